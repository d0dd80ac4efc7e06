//! Operation descriptions and their evaluation.

pub mod evaluate;
pub mod params;
