//! Per-pixel color operations: channel extraction, grayscale reductions,
//! sepia and brightness.

pub mod channels;
pub mod point;

pub use channels::{channel, intensity, luma, rgb_combine, rgb_split, value};
pub use point::{brighten, sepia};
