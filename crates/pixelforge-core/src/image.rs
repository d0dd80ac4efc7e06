//! Image representation shared by every operation.
//!
//! An [`Image`] is a fixed-size, row-major grid of 8-bit RGB [`Pixel`]s.
//! Operations never mutate their inputs; each one builds a fresh `Image`.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One of the three color channels of a [`Pixel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in R, G, B order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of the channel inside a pixel (R=0, G=1, B=2).
    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
            Self::Blue => write!(f, "blue"),
        }
    }
}

/// An 8-bit RGB triple.
///
/// Constructors saturate out-of-range input to `[0, 255]` instead of
/// rejecting it. The layout is packed RGB8, so a `&[Pixel]` can be viewed as
/// raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);

    /// Build a pixel from already-valid channel values.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a pixel, clamping each channel to `[0, 255]`.
    pub fn new(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Build a pixel from real-valued channels: clamp to `[0, 255]`, then
    /// truncate toward zero.
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: truncate_channel(r),
            g: truncate_channel(g),
            b: truncate_channel(b),
        }
    }

    /// Gray pixel with all three channels set to `v`.
    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Value of a single channel.
    pub const fn channel(self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    /// Channels as an `[R, G, B]` array.
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Pixel {
    fn from(rgb: [u8; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }
}

fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// NaN maps to 0, matching the saturating float-to-int cast.
pub(crate) fn truncate_channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// A `width × height` grid of pixels, stored row-major (`y * width + x`).
///
/// `x` is the column and `y` the row. Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Image {
    /// All-black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::BLACK; width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major pixel buffer.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(EngineError::invalid(format!(
                "pixel buffer holds {} pixels, a {width}x{height} image needs {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image by evaluating `f(x, y)` for every coordinate.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> Pixel,
    {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Like [`Image::from_fn`], stopping at the first error.
    pub fn try_from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Result<Pixel>,
    {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y)?);
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Bounds-checked pixel read.
    pub fn get(&self, x: u32, y: u32) -> Result<Pixel> {
        self.check_bounds(x, y)?;
        Ok(self.at(x, y))
    }

    /// Bounds-checked pixel write. Used by fixtures and codec layers that
    /// assemble an image; operations build new images instead.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<()> {
        self.check_bounds(x, y)?;
        let idx = self.index(x, y);
        self.pixels[idx] = pixel;
        Ok(())
    }

    /// Row-major pixel slice.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Packed RGB8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// New image of the same size with `f` applied to every pixel.
    pub fn map_pixels<F>(&self, f: F) -> Self
    where
        F: FnMut(&Pixel) -> Pixel,
    {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(f).collect(),
        }
    }

    /// Convert to an `image` crate buffer for the codec layer.
    pub fn to_rgb8(&self) -> ::image::RgbImage {
        ::image::RgbImage::from_fn(self.width, self.height, |x, y| {
            ::image::Rgb(self.at(x, y).to_array())
        })
    }

    /// Unchecked read for loops already bounded by the image dimensions.
    #[inline]
    pub(crate) fn at(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.index(x, y)]
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(EngineError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl From<&::image::RgbImage> for Image {
    fn from(img: &::image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.pixels().map(|p| Pixel::from(p.0)).collect(),
        }
    }
}

/// Alpha is dropped.
impl From<&::image::RgbaImage> for Image {
    fn from(img: &::image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img
                .pixels()
                .map(|p| Pixel::rgb(p.0[0], p.0[1], p.0[2]))
                .collect(),
        }
    }
}

/// Ensure two images share dimensions, naming the operation in the error.
pub(crate) fn ensure_same_size(op: &str, a: &Image, b: &Image) -> Result<()> {
    if a.dimensions() != b.dimensions() {
        return Err(EngineError::invalid(format!(
            "{op}: image sizes differ ({}x{} vs {}x{})",
            a.width, a.height, b.width, b.height
        )));
    }
    Ok(())
}
