//! Serializable descriptions of every single-input operation.
//!
//! An [`Operation`] names what to do and carries its validated parameters;
//! a [`Preview`] says how the result is shown against the source.

use serde::{Deserialize, Serialize};

use crate::composite::split::validate_percent;
use crate::error::{EngineError, Result};
use crate::geometry::resample::DownscaleParams;
use crate::grading::levels::LevelsParams;

/// A finite percentage in `[0, 100]`.
///
/// Serialized as a bare number; out-of-range values fail to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentage(f64);

impl Percentage {
    pub fn new(value: f64) -> Result<Self> {
        validate_percent(value)?;
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Percentage {
    type Error = EngineError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Percentage> for f64 {
    fn from(p: Percentage) -> f64 {
        p.0
    }
}

/// One image operation and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Operation {
    /// Red channel broadcast to gray.
    Red,
    /// Green channel broadcast to gray.
    Green,
    /// Blue channel broadcast to gray.
    Blue,
    /// Rec. 709 luma as gray.
    Luma,
    /// Unweighted channel mean as gray.
    Intensity,
    /// Largest channel as gray.
    Value,
    /// 3×3 blur.
    Blur,
    /// 5×5 sharpen.
    Sharpen,
    /// Sepia tone matrix.
    Sepia,
    /// Signed offset added to every channel.
    Brighten { delta: i32 },
    /// Mirror left-right.
    FlipHorizontal,
    /// Mirror top-bottom.
    FlipVertical,
    /// Quadratic levels curve through black, mid and white points.
    Levels(LevelsParams),
    /// Align the R, G and B histogram peaks.
    ColorCorrect,
    /// Bilinear shrink to a target size.
    Downscale(DownscaleParams),
    /// Share of distinct coefficient magnitudes to discard.
    Compress { percentage: Percentage },
}

impl Operation {
    /// Canonical kebab-case name, as used in serialized pipelines.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Luma => "luma",
            Self::Intensity => "intensity",
            Self::Value => "value",
            Self::Blur => "blur",
            Self::Sharpen => "sharpen",
            Self::Sepia => "sepia",
            Self::Brighten { .. } => "brighten",
            Self::FlipHorizontal => "flip-horizontal",
            Self::FlipVertical => "flip-vertical",
            Self::Levels(_) => "levels",
            Self::ColorCorrect => "color-correct",
            Self::Downscale(_) => "downscale",
            Self::Compress { .. } => "compress",
        }
    }

    /// Whether the output always has the input's dimensions. Split and
    /// masked previews need this.
    pub const fn preserves_size(&self) -> bool {
        !matches!(self, Self::Downscale(_))
    }
}

/// How an operation's result is presented against its source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Preview {
    /// The whole result.
    #[default]
    Full,
    /// Result on the left `percent` of the width, source on the right.
    Split { percent: Percentage },
    /// Result where the named mask image is not fully non-zero.
    Masked { mask: String },
}
