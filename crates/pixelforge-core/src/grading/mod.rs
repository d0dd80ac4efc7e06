//! Tonal grading: levels adjustment and histogram-driven color correction.

pub mod auto_balance;
pub mod levels;

pub use auto_balance::color_correct;
pub use levels::{LevelsParams, ToneCurve, levels_adjust};
