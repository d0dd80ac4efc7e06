//! Side-by-side split preview.

use crate::error::{EngineError, Result};
use crate::image::{Image, ensure_same_size};

/// Left `⌊W · percent / 100⌋` columns from `processed`, the rest from
/// `original`.
///
/// `percent` must be a finite number in `[0, 100]` and both images must
/// share dimensions.
pub fn split_view(processed: &Image, original: &Image, percent: f64) -> Result<Image> {
    validate_percent(percent)?;
    ensure_same_size("split-view", processed, original)?;

    let (width, height) = original.dimensions();
    let cut = (width as f64 * percent / 100.0).floor() as u32;
    tracing::debug!(percent, cut, width, "split view");

    Ok(Image::from_fn(width, height, |x, y| {
        if x < cut {
            processed.at(x, y)
        } else {
            original.at(x, y)
        }
    }))
}

/// Reject NaN, infinities and anything outside `[0, 100]`.
pub(crate) fn validate_percent(percent: f64) -> Result<()> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(EngineError::invalid(format!(
            "percentage must be within [0, 100], got {percent}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Pixel;

    fn pair() -> (Image, Image) {
        (
            Image::from_fn(5, 2, |_, _| Pixel::WHITE),
            Image::from_fn(5, 2, |x, _| Pixel::gray(x as u8)),
        )
    }

    #[test]
    fn test_split_bounds_reproduce_inputs() {
        let (p, o) = pair();
        assert_eq!(split_view(&p, &o, 0.0).unwrap(), o);
        assert_eq!(split_view(&p, &o, 100.0).unwrap(), p);
    }

    #[test]
    fn test_split_cut_floors() {
        let (p, o) = pair();
        // 5 × 50 / 100 = 2.5 → 2 processed columns.
        let out = split_view(&p, &o, 50.0).unwrap();
        assert_eq!(out.at(1, 1), Pixel::WHITE);
        assert_eq!(out.at(2, 1), Pixel::gray(2));
    }

    #[test]
    fn test_split_rejects_bad_percent() {
        let (p, o) = pair();
        for bad in [-0.5, 100.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                split_view(&p, &o, bad),
                Err(EngineError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_split_rejects_size_mismatch() {
        let (p, _) = pair();
        assert!(split_view(&p, &Image::new(4, 2), 50.0).is_err());
    }
}
