//! Point transforms: sepia tone and brightness offset.

use crate::image::{Image, Pixel};

/// Sepia tone matrix, row per output channel.
const SEPIA: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Apply the sepia matrix. Each output channel is clamped then truncated.
pub fn sepia(image: &Image) -> Image {
    tracing::debug!(width = image.width(), height = image.height(), "sepia");
    image.map_pixels(|px| {
        let rgb = [px.r as f64, px.g as f64, px.b as f64];
        let [r, g, b] = SEPIA.map(|row| row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]);
        Pixel::from_f64(r, g, b)
    })
}

/// Add `delta` to every channel, saturating at 0 and 255.
///
/// Brightening by `+d` and then `-d` restores the input only for pixels
/// where no channel hit either bound on the first pass.
pub fn brighten(image: &Image, delta: i32) -> Image {
    tracing::debug!(delta, "brighten");
    image.map_pixels(|px| {
        Pixel::new(
            px.r as i32 + delta,
            px.g as i32 + delta,
            px.b as i32 + delta,
        )
    })
}
