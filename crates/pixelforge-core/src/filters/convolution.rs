//! Convolution with square, odd-sized kernels.
//!
//! # Edge handling
//! Taps that fall outside the image are dropped from the sum and the kernel
//! is **not** renormalized, so edge pixels of a blur come out darker than the
//! interior. Sums are clamped to `[0, 255]` and truncated toward zero.
//!
//! # Complexity
//! O(W × H × k²) for a `k × k` kernel.

use crate::error::{EngineError, Result};
use crate::image::{Image, Pixel};

/// A square convolution kernel with odd side length.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    /// Row-major weights, `size × size` entries.
    weights: Vec<f64>,
}

impl Kernel {
    /// Build a kernel from rows of weights.
    ///
    /// Rejects empty, non-square or even-sized input.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 || size % 2 == 0 {
            return Err(EngineError::invalid(format!(
                "kernel side must be odd and non-zero, got {size}"
            )));
        }
        if rows.iter().any(|row| row.len() != size) {
            return Err(EngineError::invalid("kernel must be square"));
        }
        Ok(Self {
            size,
            weights: rows.into_iter().flatten().collect(),
        })
    }

    /// Normalized 3×3 Gaussian-like blur.
    pub fn blur() -> Self {
        Self {
            size: 3,
            weights: vec![
                0.0625, 0.125, 0.0625, //
                0.125, 0.25, 0.125, //
                0.0625, 0.125, 0.0625,
            ],
        }
    }

    /// 5×5 sharpen: center 1, inner ring 1/4, outer ring −1/8.
    pub fn sharpen() -> Self {
        const O: f64 = -0.125;
        const I: f64 = 0.25;
        Self {
            size: 5,
            weights: vec![
                O, O, O, O, O, //
                O, I, I, I, O, //
                O, I, 1.0, I, O, //
                O, I, I, I, O, //
                O, O, O, O, O,
            ],
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Weight at row `j`, column `i`.
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights[j * self.size + i]
    }
}

/// Convolve every channel of `image` with `kernel`.
pub fn convolve(image: &Image, kernel: &Kernel) -> Image {
    let (width, height) = image.dimensions();
    let radius = (kernel.size / 2) as i64;
    tracing::debug!(kernel = kernel.size, width, height, "convolve");

    Image::from_fn(width, height, |x, y| {
        let mut acc = [0.0_f64; 3];
        for j in 0..kernel.size {
            let sy = y as i64 + j as i64 - radius;
            if sy < 0 || sy >= height as i64 {
                continue;
            }
            for i in 0..kernel.size {
                let sx = x as i64 + i as i64 - radius;
                if sx < 0 || sx >= width as i64 {
                    continue;
                }
                let w = kernel.weight(i, j);
                let px = image.at(sx as u32, sy as u32);
                acc[0] += w * px.r as f64;
                acc[1] += w * px.g as f64;
                acc[2] += w * px.b as f64;
            }
        }
        Pixel::from_f64(acc[0], acc[1], acc[2])
    })
}

/// 3×3 blur.
pub fn blur(image: &Image) -> Image {
    convolve(image, &Kernel::blur())
}

/// 5×5 sharpen.
pub fn sharpen(image: &Image) -> Image {
    convolve(image, &Kernel::sharpen())
}
