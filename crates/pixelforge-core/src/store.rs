//! Named image repository for callers that juggle several images.
//!
//! The engine's operations never see the store; a command layer owns one and
//! passes it by reference.

use std::collections::HashMap;

use crate::error::{EngineError, Result};
use crate::image::Image;
use crate::transform::evaluate;
use crate::transform::params::{Operation, Preview};

/// Maps names to images.
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    images: HashMap<String, Image>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `image` under `name`, returning the image it replaced.
    pub fn insert(&mut self, name: impl Into<String>, image: Image) -> Option<Image> {
        self.images.insert(name.into(), image)
    }

    /// Look up `name`, failing with `NotFound`.
    pub fn get(&self, name: &str) -> Result<&Image> {
        self.images
            .get(name)
            .ok_or_else(|| EngineError::NotFound(name.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> Option<Image> {
        self.images.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Stored names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.images.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Apply `op` to the image named `source` with the given preview mode and
    /// store the result as `dest`.
    ///
    /// Nothing is stored when any lookup or the operation fails.
    pub fn apply(&mut self, source: &str, op: &Operation, preview: &Preview, dest: &str) -> Result<()> {
        let image = self.get(source)?;
        let result = match preview {
            Preview::Full => evaluate::apply(image, op)?,
            Preview::Split { percent } => evaluate::apply_split(image, op, percent.get())?,
            Preview::Masked { mask } => evaluate::apply_masked(image, op, self.get(mask)?)?,
        };
        tracing::debug!(source, dest, op = op.name(), "stored result");
        self.insert(dest, result);
        Ok(())
    }
}
