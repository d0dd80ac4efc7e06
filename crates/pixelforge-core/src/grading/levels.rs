//! Quadratic levels adjustment.
//!
//! Fits `y = a·x² + b·x + c` through three control points (black point to 0,
//! midpoint to 128, white point to 255) and applies it to every channel.
//!
//! # Algorithm
//! Cramer's rule on the 3×3 Vandermonde system, with `b`, `m`, `w` the
//! black, mid and white points:
//! ```text
//! A  = b²(m − w) − b(m² − w²) + w·m² − m·w²
//! Aa = −b(128 − 255) + 128·w − 255·m
//! Ab = b²(128 − 255) + 255·m² − 128·w²
//! Ac = b²(255·m − 128·w) − b(255·m² − 128·w²)
//! a = Aa / A,  b' = Ab / A,  c = Ac / A
//! ```
//! `A` vanishes when two control points coincide.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::image::{Image, Pixel, truncate_channel};

/// Output level the midpoint maps to.
const MID_TARGET: f64 = 128.0;
/// Output level the white point maps to.
const WHITE_TARGET: f64 = 255.0;

/// Black, mid and white input levels, each in `[0, 255]` with
/// `black ≤ mid ≤ white`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLevelsParams")]
pub struct LevelsParams {
    black: i32,
    mid: i32,
    white: i32,
}

#[derive(Deserialize)]
struct RawLevelsParams {
    black: i32,
    mid: i32,
    white: i32,
}

impl TryFrom<RawLevelsParams> for LevelsParams {
    type Error = EngineError;

    fn try_from(raw: RawLevelsParams) -> Result<Self> {
        Self::new(raw.black, raw.mid, raw.white)
    }
}

impl LevelsParams {
    pub fn new(black: i32, mid: i32, white: i32) -> Result<Self> {
        for (name, v) in [("black", black), ("mid", mid), ("white", white)] {
            if !(0..=255).contains(&v) {
                return Err(EngineError::invalid(format!(
                    "levels {name} point {v} is outside [0, 255]"
                )));
            }
        }
        if black > mid || mid > white {
            return Err(EngineError::invalid(format!(
                "levels points must satisfy black <= mid <= white, got {black}, {mid}, {white}"
            )));
        }
        Ok(Self { black, mid, white })
    }

    pub fn black(&self) -> i32 {
        self.black
    }

    pub fn mid(&self) -> i32 {
        self.mid
    }

    pub fn white(&self) -> i32 {
        self.white
    }
}

/// Quadratic tone curve `y = a·x² + b·x + c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCurve {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl ToneCurve {
    /// Solve for the curve through the three levels control points.
    ///
    /// Fails with `InvalidArgument` when the system is singular.
    pub fn fit(params: &LevelsParams) -> Result<Self> {
        let b = params.black as f64;
        let m = params.mid as f64;
        let w = params.white as f64;

        let det = b * b * (m - w) - b * (m * m - w * w) + w * m * m - m * w * w;
        if det == 0.0 {
            return Err(EngineError::invalid(format!(
                "degenerate tone curve for levels {}, {}, {}",
                params.black, params.mid, params.white
            )));
        }

        let det_a = -b * (MID_TARGET - WHITE_TARGET) + MID_TARGET * w - WHITE_TARGET * m;
        let det_b = b * b * (MID_TARGET - WHITE_TARGET) + WHITE_TARGET * m * m
            - MID_TARGET * w * w;
        let det_c = b * b * (WHITE_TARGET * m - MID_TARGET * w)
            - b * (WHITE_TARGET * m * m - MID_TARGET * w * w);

        let curve = Self {
            a: det_a / det,
            b: det_b / det,
            c: det_c / det,
        };
        tracing::debug!(a = curve.a, b = curve.b, c = curve.c, "tone curve fitted");
        Ok(curve)
    }

    /// Evaluate the raw (unclamped) curve.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }

    /// Bake the curve into a 256-entry lookup table, clamped and truncated.
    pub fn bake(&self) -> [u8; 256] {
        std::array::from_fn(|i| truncate_channel(self.evaluate(i as f64)))
    }
}

/// Apply the levels curve independently to every channel.
pub fn levels_adjust(image: &Image, params: &LevelsParams) -> Result<Image> {
    let lut = ToneCurve::fit(params)?.bake();
    Ok(image.map_pixels(|px| {
        Pixel::rgb(lut[px.r as usize], lut[px.g as usize], lut[px.b as usize])
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_params_validate_order_and_range() {
        assert!(LevelsParams::new(10, 5, 200).is_err());
        assert!(LevelsParams::new(10, 100, 90).is_err());
        assert!(LevelsParams::new(-1, 100, 200).is_err());
        assert!(LevelsParams::new(0, 100, 256).is_err());
        assert!(LevelsParams::new(0, 128, 255).is_ok());
    }

    #[test]
    fn test_default_levels_fit_identity() {
        let curve = ToneCurve::fit(&LevelsParams::new(0, 128, 255).unwrap()).unwrap();
        assert!(curve.a.abs() < EPSILON);
        assert!((curve.b - 1.0).abs() < EPSILON);
        assert!(curve.c.abs() < EPSILON);
    }

    #[test]
    fn test_identity_levels_leave_image_unchanged() {
        let img = Image::from_fn(16, 16, |x, y| Pixel::rgb((x * 16) as u8, (y * 16) as u8, 77));
        let out = levels_adjust(&img, &LevelsParams::new(0, 128, 255).unwrap()).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_curve_passes_through_control_points() {
        let curve = ToneCurve::fit(&LevelsParams::new(20, 100, 200).unwrap()).unwrap();
        assert!(curve.evaluate(20.0).abs() < 1e-6);
        assert!((curve.evaluate(100.0) - 128.0).abs() < 1e-6);
        assert!((curve.evaluate(200.0) - 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_levels_clamps_and_truncates() {
        let img = Image::from_pixels(
            4,
            1,
            vec![
                Pixel::gray(0),
                Pixel::gray(50),
                Pixel::gray(150),
                Pixel::gray(255),
            ],
        )
        .unwrap();
        let out = levels_adjust(&img, &LevelsParams::new(20, 100, 200).unwrap()).unwrap();
        assert_eq!(out.at(0, 0), Pixel::gray(0));
        // 50.75
        assert_eq!(out.at(1, 0), Pixel::gray(50));
        // 196.08
        assert_eq!(out.at(2, 0), Pixel::gray(196));
        assert_eq!(out.at(3, 0), Pixel::gray(255));
    }

    #[test]
    fn test_coincident_points_are_degenerate() {
        let err = ToneCurve::fit(&LevelsParams::new(50, 50, 200).unwrap()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
        assert!(levels_adjust(&Image::new(1, 1), &LevelsParams::new(0, 255, 255).unwrap()).is_err());
    }

    #[test]
    fn test_params_deserialize_validates() {
        assert!(serde_json::from_str::<LevelsParams>(r#"{"black":0,"mid":128,"white":255}"#).is_ok());
        assert!(serde_json::from_str::<LevelsParams>(r#"{"black":200,"mid":128,"white":255}"#).is_err());
    }
}
