//! Automatic color correction by histogram peak alignment.
//!
//! Assumes the dominant midtone of a well-balanced image is neutral: the
//! histogram peaks of R, G and B should coincide. Each channel is shifted so
//! its peak lands on the average peak.
//!
//! # Algorithm
//! 1. Find each channel's peak bucket within 11..=245
//! 2. `avg = (peak_r + peak_g + peak_b) / 3` (integer division)
//! 3. Shift every channel by `avg − peak_c`, clamping to `[0, 255]`

use crate::image::{Image, Pixel};
use crate::scopes::histogram::HistogramData;

/// Per-channel offsets that align the histogram peaks of `image`.
pub fn peak_offsets(image: &Image) -> [i32; 3] {
    let peaks = HistogramData::compute(image).peaks().map(i32::from);
    let avg = (peaks[0] + peaks[1] + peaks[2]) / 3;
    tracing::debug!(?peaks, avg, "histogram peaks");
    peaks.map(|p| avg - p)
}

/// Shift each channel so the three histogram peaks coincide.
pub fn color_correct(image: &Image) -> Image {
    let [dr, dg, db] = peak_offsets(image);
    image.map_pixels(|px| {
        Pixel::new(px.r as i32 + dr, px.g as i32 + dg, px.b as i32 + db)
    })
}
