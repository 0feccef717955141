//! The core module of the ripeness pipeline.
//!
//! This module contains the fundamental components shared by every stage:
//! - Configuration management
//! - Constants of the trained model
//! - Error handling
//! - Inference engine integration
//! - The validated input tensor

pub mod config;
pub mod constants;
pub mod errors;
pub mod inference;
pub mod tensor;

pub use config::{ConfigError, ConfigValidator, ConfigValidatorExt, OrtSessionConfig};
pub use constants::*;
pub use errors::{ImageProcessError, ProcessingStage, RipenessError, RipenessResult};
pub use inference::{InferenceEngine, OrtInfer, load_session};
pub use tensor::NormalizedTensor;
