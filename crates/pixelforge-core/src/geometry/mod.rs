//! Geometric transforms: flips and bilinear resampling.

pub mod flip;
pub mod resample;

pub use flip::{flip_horizontal, flip_vertical};
pub use resample::{DownscaleParams, downscale};
