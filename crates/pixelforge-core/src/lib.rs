//! pixelforge core: pixel transformation and compression engine.
//!
//! Pure, synchronous operations over in-memory RGB images: channel and
//! grayscale reductions, convolution filters, point transforms, levels,
//! histogram color correction, compositing, bilinear downscaling and Haar
//! wavelet compression. Every operation returns a new [`Image`] and leaves
//! its inputs untouched. No file, network or process I/O happens here.

pub mod color;
pub mod composite;
pub mod compression;
pub mod error;
pub mod filters;
pub mod geometry;
pub mod grading;
pub mod image;
pub mod scopes;
pub mod store;
pub mod transform;

// Re-exports for convenience.
pub use error::{EngineError, Result};
pub use crate::image::{Channel, Image, Pixel};
pub use store::ImageStore;
pub use transform::evaluate::{Pipeline, apply, apply_masked, apply_split};
pub use transform::params::{Operation, Percentage, Preview};
