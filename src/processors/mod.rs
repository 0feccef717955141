//! Image processors for the ripeness pipeline.
//!
//! Preprocessing runs in two fixed steps: [`ImageCropper`] cuts out the central
//! square, then [`ImageNormalizer`] resizes and scales it into a
//! [`NormalizedTensor`](crate::core::NormalizedTensor).

pub mod crop;
pub mod normalization;

pub use crop::{CropBox, ImageCropper};
pub use normalization::ImageNormalizer;
