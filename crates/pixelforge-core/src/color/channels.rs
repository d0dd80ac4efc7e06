//! Channel extraction and grayscale reductions.
//!
//! Every function here is a pure per-pixel map: the result is a gray image
//! whose three channels all carry the same derived value.

use crate::error::Result;
use crate::image::{Channel, Image, Pixel, ensure_same_size, truncate_channel};

/// Rec. 709 luma weights.
const LUMA_REC709: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Broadcast one channel of the source into all three output channels.
pub fn channel(image: &Image, which: Channel) -> Image {
    tracing::debug!(channel = %which, width = image.width(), height = image.height(), "channel");
    image.map_pixels(|px| Pixel::gray(px.channel(which)))
}

/// Rec. 709 luma, truncated toward zero (not rounded), so (10, 20, 30)
/// maps to 18.
///
/// ```text
/// Y = 0.2126 × R + 0.7152 × G + 0.0722 × B
/// ```
pub fn luma(image: &Image) -> Image {
    tracing::debug!(width = image.width(), height = image.height(), "luma");
    image.map_pixels(|px| {
        let y = LUMA_REC709[0] * px.r as f64
            + LUMA_REC709[1] * px.g as f64
            + LUMA_REC709[2] * px.b as f64;
        Pixel::gray(truncate_channel(y))
    })
}

/// Unweighted mean `(R + G + B) / 3` with integer division.
pub fn intensity(image: &Image) -> Image {
    tracing::debug!(width = image.width(), height = image.height(), "intensity");
    image.map_pixels(|px| {
        let sum = px.r as u16 + px.g as u16 + px.b as u16;
        Pixel::gray((sum / 3) as u8)
    })
}

/// HSV value: `max(R, G, B)`.
pub fn value(image: &Image) -> Image {
    tracing::debug!(width = image.width(), height = image.height(), "value");
    image.map_pixels(|px| Pixel::gray(px.r.max(px.g).max(px.b)))
}

/// Split into red, green and blue channel images.
pub fn rgb_split(image: &Image) -> (Image, Image, Image) {
    (
        channel(image, Channel::Red),
        channel(image, Channel::Green),
        channel(image, Channel::Blue),
    )
}

/// Rebuild a color image from three channel images.
///
/// Red comes from `red`'s red channel, green from `green`'s green channel and
/// blue from `blue`'s blue channel. All three must share dimensions.
pub fn rgb_combine(red: &Image, green: &Image, blue: &Image) -> Result<Image> {
    ensure_same_size("rgb-combine", red, green)?;
    ensure_same_size("rgb-combine", red, blue)?;

    let (width, height) = red.dimensions();
    tracing::debug!(width, height, "rgb combine");
    Ok(Image::from_fn(width, height, |x, y| {
        Pixel::rgb(red.at(x, y).r, green.at(x, y).g, blue.at(x, y).b)
    }))
}
