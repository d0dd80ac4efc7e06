//! Bilinear downscaling.
//!
//! Each destination pixel maps to a fractional source coordinate through
//! independent x/y scale factors `src / dst`. The four surrounding source
//! pixels are blended by the fractional remainder.
//!
//! ```text
//! top    = p00 × (1 − fx) + p10 × fx
//! bottom = p01 × (1 − fx) + p11 × fx
//! out    = top × (1 − fy) + bottom × fy
//! ```
//!
//! When the floor and ceiling neighbors coincide on an axis (integral
//! coordinate or right/bottom edge), the second neighbor gets weight 0.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::image::{Image, Pixel};

/// Target size for [`downscale`]. Both dimensions are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDownscaleParams")]
pub struct DownscaleParams {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct RawDownscaleParams {
    width: u32,
    height: u32,
}

impl TryFrom<RawDownscaleParams> for DownscaleParams {
    type Error = EngineError;

    fn try_from(raw: RawDownscaleParams) -> Result<Self> {
        Self::new(raw.width, raw.height)
    }
}

impl DownscaleParams {
    /// Rejects a zero width or height.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::invalid(format!(
                "downscale target must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Shrink `image` to `params` with bilinear interpolation.
///
/// The target must not exceed the source in either dimension; upscaling is
/// rejected.
pub fn downscale(image: &Image, params: DownscaleParams) -> Result<Image> {
    let (src_w, src_h) = image.dimensions();
    let (dst_w, dst_h) = (params.width, params.height);
    if dst_w > src_w || dst_h > src_h {
        return Err(EngineError::invalid(format!(
            "cannot downscale {src_w}x{src_h} to larger size {dst_w}x{dst_h}"
        )));
    }
    tracing::debug!(src_w, src_h, dst_w, dst_h, "downscale");

    let scale_x = src_w as f64 / dst_w as f64;
    let scale_y = src_h as f64 / dst_h as f64;

    Ok(Image::from_fn(dst_w, dst_h, |x, y| {
        let (x0, x1, fx) = neighbors(x as f64 * scale_x, src_w);
        let (y0, y1, fy) = neighbors(y as f64 * scale_y, src_h);

        let p00 = image.at(x0, y0).to_array();
        let p10 = image.at(x1, y0).to_array();
        let p01 = image.at(x0, y1).to_array();
        let p11 = image.at(x1, y1).to_array();

        let mut out = [0.0_f64; 3];
        for c in 0..3 {
            let top = p00[c] as f64 * (1.0 - fx) + p10[c] as f64 * fx;
            let bottom = p01[c] as f64 * (1.0 - fx) + p11[c] as f64 * fx;
            out[c] = top * (1.0 - fy) + bottom * fy;
        }
        Pixel::from_f64(out[0], out[1], out[2])
    }))
}

/// Floor/ceiling source indices (clamped to `len − 1`) and the weight of the
/// ceiling neighbor.
fn neighbors(coord: f64, len: u32) -> (u32, u32, f64) {
    let last = len - 1;
    let lo = (coord.floor() as u32).min(last);
    let hi = (coord.ceil() as u32).min(last);
    let frac = if lo == hi { 0.0 } else { coord - lo as f64 };
    (lo, hi, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_params_reject_zero() {
        assert!(DownscaleParams::new(0, 4).is_err());
        assert!(DownscaleParams::new(4, 0).is_err());
        assert!(DownscaleParams::new(1, 1).is_ok());
    }

    #[test]
    fn test_params_deserialize_validates() {
        let ok: DownscaleParams = serde_json::from_str(r#"{"width":2,"height":3}"#).unwrap();
        assert_eq!((ok.width(), ok.height()), (2, 3));
        assert!(serde_json::from_str::<DownscaleParams>(r#"{"width":0,"height":3}"#).is_err());
    }

    #[test]
    fn test_rejects_upscale() {
        let img = Image::new(4, 4);
        let err = downscale(&img, DownscaleParams::new(5, 2).unwrap()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
    }

    #[test]
    fn test_same_size_is_identity() {
        let img = Image::from_fn(5, 3, |x, y| Pixel::rgb(x as u8 * 50, y as u8 * 70, 9));
        let out = downscale(&img, DownscaleParams::new(5, 3).unwrap()).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_neighbors_integral_coordinate_has_zero_weight() {
        let (lo, hi, f) = neighbors(2.0, 5);
        assert_eq!((lo, hi), (2, 2));
        assert!(f.abs() < EPSILON);
    }

    #[test]
    fn test_neighbors_fractional_coordinate() {
        let (lo, hi, f) = neighbors(1.25, 5);
        assert_eq!((lo, hi), (1, 2));
        assert!((f - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_halving_blends_pairs() {
        // 4 → 2 samples columns 0 and 2 exactly; 3 → 2 hits 1.5 on y.
        let img = Image::from_fn(4, 3, |x, y| Pixel::rgb(x as u8 * 10, y as u8 * 10, 0));
        let out = downscale(&img, DownscaleParams::new(2, 2).unwrap()).unwrap();
        assert_eq!(out.at(0, 0), Pixel::rgb(0, 0, 0));
        assert_eq!(out.at(1, 0), Pixel::rgb(20, 0, 0));
        assert_eq!(out.at(1, 1), Pixel::rgb(20, 15, 0));
    }
}
