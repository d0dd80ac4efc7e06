//! Spatial filters built on fixed-weight convolution kernels.

pub mod convolution;

pub use convolution::{Kernel, blur, convolve, sharpen};
