//! Configuration management for the ripeness pipeline.
//!
//! The preprocessing constants are fixed (see [`crate::core::constants`]); the
//! only runtime configuration is how the ONNX Runtime session is built.

pub mod errors;
pub mod onnx;

pub use errors::{ConfigError, ConfigValidator, ConfigValidatorExt};
pub use onnx::*;
