//! Compositing of a processed image against its original.

pub mod mask;
pub mod split;

pub use mask::mask_composite;
pub use split::split_view;
