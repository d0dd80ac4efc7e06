//! Shared fixture images for integration tests.

#![allow(dead_code)]

use pixelforge_core::{Image, Pixel};

/// The 5×5 reference fixture. Row `y` lists pixels `x = 0..5`.
pub fn reference_5x5() -> Image {
    let rows: [[(u8, u8, u8); 5]; 5] = [
        [(0, 0, 0), (1, 1, 1), (10, 20, 30), (40, 80, 120), (255, 255, 255)],
        [(5, 10, 15), (60, 70, 80), (90, 100, 110), (200, 150, 100), (250, 240, 230)],
        [(12, 34, 56), (78, 90, 123), (45, 67, 89), (100, 100, 100), (180, 160, 140)],
        [(255, 0, 0), (0, 255, 0), (0, 0, 255), (128, 128, 128), (64, 32, 16)],
        [(30, 60, 90), (120, 150, 180), (210, 240, 15), (99, 88, 77), (11, 22, 33)],
    ];
    let pixels = rows
        .iter()
        .flatten()
        .map(|&(r, g, b)| Pixel::rgb(r, g, b))
        .collect();
    Image::from_pixels(5, 5, pixels).expect("fixture is 5x5")
}

/// Mid-range image that no ±40 brightness shift can saturate.
pub fn midtones(width: u32, height: u32) -> Image {
    Image::from_fn(width, height, |x, y| {
        Pixel::rgb(
            (60 + (x * 13 + y * 7) % 120) as u8,
            (50 + (x * 5 + y * 17) % 140) as u8,
            (45 + (x * y * 3) % 150) as u8,
        )
    })
}

/// Pseudo-random full-range texture.
pub fn texture(width: u32, height: u32) -> Image {
    Image::from_fn(width, height, |x, y| {
        Pixel::rgb(
            ((x * 31 + y * 17) % 256) as u8,
            ((x * y * 7 + 3) % 256) as u8,
            ((x * 11 + y * y * 5) % 256) as u8,
        )
    })
}

pub fn px(image: &Image, x: u32, y: u32) -> Pixel {
    image.get(x, y).expect("coordinate inside fixture")
}
