//! Mirror flips. Both are their own inverse.

use crate::image::Image;

/// Mirror left-right: `out(x, y) = in(W − 1 − x, y)`.
pub fn flip_horizontal(image: &Image) -> Image {
    let (width, height) = image.dimensions();
    tracing::debug!(width, height, "flip horizontal");
    Image::from_fn(width, height, |x, y| image.at(width - 1 - x, y))
}

/// Mirror top-bottom: `out(x, y) = in(x, H − 1 − y)`.
pub fn flip_vertical(image: &Image) -> Image {
    let (width, height) = image.dimensions();
    tracing::debug!(width, height, "flip vertical");
    Image::from_fn(width, height, |x, y| image.at(x, height - 1 - y))
}
