//! Scope computation: per-channel histograms and their chart rendering.

pub mod histogram;

pub use histogram::{HistogramData, histogram};
