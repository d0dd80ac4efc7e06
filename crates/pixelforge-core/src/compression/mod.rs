//! Lossy image compression with a 2D Haar wavelet.
//!
//! # Pipeline
//! 1. Pad each channel into a `size × size` matrix, `size` being the smallest
//!    power of two ≥ `max(W, H)`, zero-filled past the image
//! 2. Forward multi-level Haar transform
//! 3. Zero coefficients below a distinct-magnitude quantile shared by the
//!    three channels
//! 4. Inverse transform
//! 5. Crop back to `W × H`, clamping and truncating to 8-bit
//!
//! # Complexity
//! O(size²) per channel for each transform direction, plus
//! O(size² log size²) for the distinct-magnitude set.

pub mod haar;
pub mod threshold;

use serde::{Deserialize, Serialize};

use crate::composite::split::validate_percent;
use crate::error::Result;
use crate::image::{Channel, Image, Pixel};
use haar::Matrix;

/// Outcome of a compression run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompressionReport {
    /// Magnitude below which coefficients were cleared.
    pub threshold: f64,
    /// Number of distinct rounded magnitudes the quantile was taken over.
    pub distinct_magnitudes: usize,
    /// Coefficients cleared by the threshold, across all channels.
    pub zeroed: usize,
    /// Total coefficients across all channels (padding included).
    pub total: usize,
}

/// Compress `image`, discarding `percentage` of the distinct coefficient
/// magnitudes.
pub fn compress(image: &Image, percentage: f64) -> Result<Image> {
    compress_with_report(image, percentage).map(|(img, _)| img)
}

/// [`compress`], also returning threshold statistics.
pub fn compress_with_report(image: &Image, percentage: f64) -> Result<(Image, CompressionReport)> {
    validate_percent(percentage)?;
    let (width, height) = image.dimensions();
    let size = (width.max(height) as usize).next_power_of_two();

    let mut channels = Channel::ALL.map(|c| pad_channel(image, c, size));
    for m in &mut channels {
        haar::forward_2d(m);
    }

    let threshold = threshold::select(&channels, percentage);
    let zeroed = threshold::apply(&mut channels, threshold.value);

    for m in &mut channels {
        haar::inverse_2d(m);
    }

    let report = CompressionReport {
        threshold: threshold.value,
        distinct_magnitudes: threshold.distinct_magnitudes,
        zeroed,
        total: 3 * size * size,
    };
    tracing::debug!(
        percentage,
        size,
        threshold = report.threshold,
        zeroed = report.zeroed,
        total = report.total,
        "wavelet compression"
    );

    let [r, g, b] = &channels;
    let out = Image::from_fn(width, height, |x, y| {
        let (row, col) = (y as usize, x as usize);
        Pixel::from_f64(r.get(row, col), g.get(row, col), b.get(row, col))
    });
    Ok((out, report))
}

/// One channel of `image`, zero-padded into a `size × size` matrix.
fn pad_channel(image: &Image, channel: Channel, size: usize) -> Matrix {
    let mut m = Matrix::zeros(size);
    let (width, height) = image.dimensions();
    for y in 0..height {
        for x in 0..width {
            let v = image.at(x, y).channel(channel);
            m.set(y as usize, x as usize, v as f64);
        }
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn textured(width: u32, height: u32) -> Image {
        Image::from_fn(width, height, |x, y| {
            Pixel::rgb(
                ((x * 29 + y * 7) % 256) as u8,
                ((x * x + y * 13) % 256) as u8,
                ((x * 3 + y * y * 5) % 256) as u8,
            )
        })
    }

    fn max_channel_diff(a: &Image, b: &Image) -> u8 {
        a.pixels()
            .iter()
            .zip(b.pixels())
            .flat_map(|(p, q)| {
                p.to_array()
                    .into_iter()
                    .zip(q.to_array())
                    .map(|(u, v)| u.abs_diff(v))
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_zero_percent_is_near_lossless() {
        let img = textured(7, 5);
        let (out, report) = compress_with_report(&img, 0.0).unwrap();
        assert_eq!(out.dimensions(), (7, 5));
        assert!(max_channel_diff(&img, &out) <= 1);
        assert_eq!(report.total, 3 * 8 * 8);
    }

    #[test]
    fn test_full_percent_clears_image() {
        let img = textured(4, 4);
        let (out, report) = compress_with_report(&img, 100.0).unwrap();
        assert_eq!(report.zeroed, report.total);
        assert!(out.pixels().iter().all(|&p| p == Pixel::BLACK));
    }

    #[test]
    fn test_zeroed_count_grows_with_percentage() {
        let img = textured(9, 6);
        let mut previous = 0;
        for pct in [0.0, 10.0, 25.0, 50.0, 75.0, 90.0, 100.0] {
            let (_, report) = compress_with_report(&img, pct).unwrap();
            assert!(report.zeroed >= previous, "{pct}%: {} < {previous}", report.zeroed);
            previous = report.zeroed;
        }
    }

    #[test]
    fn test_rejects_bad_percentage() {
        let img = textured(2, 2);
        assert!(matches!(compress(&img, 101.0), Err(EngineError::InvalidArgument(_))));
        assert!(compress(&img, f64::NAN).is_err());
    }

    #[test]
    fn test_empty_and_single_pixel() {
        assert!(compress(&Image::new(0, 0), 50.0).unwrap().is_empty());
        let one = Image::from_fn(1, 1, |_, _| Pixel::rgb(10, 20, 30));
        assert_eq!(compress(&one, 0.0).unwrap(), one);
    }

    #[test]
    fn test_source_is_not_mutated() {
        let img = textured(5, 5);
        let copy = img.clone();
        let _ = compress(&img, 60.0).unwrap();
        assert_eq!(img, copy);
    }
}
