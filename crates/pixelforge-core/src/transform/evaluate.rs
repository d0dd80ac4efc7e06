//! Operation evaluation: full, split-preview and masked application, plus
//! multi-step pipelines.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::image::{Channel, Image};
use crate::transform::params::Operation;
use crate::{color, composite, compression, filters, geometry, grading};

/// Apply `op` to `image`, producing a new image.
pub fn apply(image: &Image, op: &Operation) -> Result<Image> {
    tracing::debug!(
        op = op.name(),
        width = image.width(),
        height = image.height(),
        "apply"
    );
    let out = match op {
        Operation::Red => color::channel(image, Channel::Red),
        Operation::Green => color::channel(image, Channel::Green),
        Operation::Blue => color::channel(image, Channel::Blue),
        Operation::Luma => color::luma(image),
        Operation::Intensity => color::intensity(image),
        Operation::Value => color::value(image),
        Operation::Blur => filters::blur(image),
        Operation::Sharpen => filters::sharpen(image),
        Operation::Sepia => color::sepia(image),
        Operation::Brighten { delta } => color::brighten(image, *delta),
        Operation::FlipHorizontal => geometry::flip_horizontal(image),
        Operation::FlipVertical => geometry::flip_vertical(image),
        Operation::Levels(params) => grading::levels_adjust(image, params)?,
        Operation::ColorCorrect => grading::color_correct(image),
        Operation::Downscale(params) => geometry::downscale(image, *params)?,
        Operation::Compress { percentage } => compression::compress(image, percentage.get())?,
    };
    Ok(out)
}

/// Apply `op` and show it on the left `percent` of the width only.
pub fn apply_split(image: &Image, op: &Operation, percent: f64) -> Result<Image> {
    ensure_previewable(op, "split preview")?;
    let processed = apply(image, op)?;
    composite::split_view(&processed, image, percent)
}

/// Apply `op` only where `mask` is not fully non-zero.
pub fn apply_masked(image: &Image, op: &Operation, mask: &Image) -> Result<Image> {
    ensure_previewable(op, "masked application")?;
    let processed = apply(image, op)?;
    composite::mask_composite(&processed, mask, image)
}

fn ensure_previewable(op: &Operation, what: &str) -> Result<()> {
    if !op.preserves_size() {
        return Err(EngineError::invalid(format!(
            "{} changes the image size and cannot be used for {what}",
            op.name()
        )));
    }
    Ok(())
}

/// An ordered list of operations applied one after another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub steps: Vec<Operation>,
}

impl Pipeline {
    pub fn new(steps: Vec<Operation>) -> Self {
        Self { steps }
    }

    /// Parse a pipeline from JSON, e.g.
    /// `{"steps":[{"op":"blur"},{"op":"brighten","delta":10}]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| EngineError::invalid(format!("malformed pipeline: {e}")))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| EngineError::invalid(format!("unserializable pipeline: {e}")))
    }

    /// Run every step in order. An empty pipeline returns a copy.
    pub fn run(&self, image: &Image) -> Result<Image> {
        let mut current = image.clone();
        for (index, op) in self.steps.iter().enumerate() {
            current = apply(&current, op).inspect_err(|e| {
                tracing::warn!(step = index, op = op.name(), "pipeline step failed: {e}");
            })?;
        }
        Ok(current)
    }
}
