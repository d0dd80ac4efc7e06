//! Stencil-based compositing.

use crate::error::{EngineError, Result};
use crate::image::{Image, Pixel};

/// Choose per pixel between `processed` and `original` using `mask`.
///
/// A mask pixel with **all three** channels non-zero keeps the original
/// pixel; any other mask pixel (pure black, but also e.g. pure red) takes
/// the processed pixel.
///
/// Only the mask is checked against the original's dimensions. `processed`
/// is read through bounds-checked access, so a smaller processed image fails
/// with `OutOfBounds` and a larger one contributes its top-left region.
pub fn mask_composite(processed: &Image, mask: &Image, original: &Image) -> Result<Image> {
    if mask.dimensions() != original.dimensions() {
        return Err(EngineError::invalid(format!(
            "mask is {}x{} but the image is {}x{}",
            mask.width(),
            mask.height(),
            original.width(),
            original.height()
        )));
    }

    let (width, height) = original.dimensions();
    tracing::debug!(width, height, "mask composite");
    Image::try_from_fn(width, height, |x, y| {
        if keeps_original(mask.at(x, y)) {
            Ok(original.at(x, y))
        } else {
            processed.get(x, y)
        }
    })
}

fn keeps_original(mask: Pixel) -> bool {
    mask.r != 0 && mask.g != 0 && mask.b != 0
}
