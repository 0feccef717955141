//! Core error types for the ripeness pipeline.
//!
//! This module defines the error enum shared by every pipeline stage together
//! with the [`ProcessingStage`] tag used to say where a failure happened.

use thiserror::Error;

/// Errors that can occur during image processing operations.
#[derive(Debug, Error)]
pub enum ImageProcessError {
    /// The input image has a zero-length side.
    #[error("Image has empty dimensions ({width}x{height})")]
    EmptyImage {
        /// Width of the offending image.
        width: u32,
        /// Height of the offending image.
        height: u32,
    },
}

/// Stage of the pipeline an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Central square crop.
    Crop,
    /// Resize and pixel scaling into the model input range.
    Normalization,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Crop => write!(f, "crop"),
            ProcessingStage::Normalization => write!(f, "normalization"),
        }
    }
}

/// Errors that can occur in the ripeness pipeline.
///
/// An image the classifier does not recognize as a banana is *not* an error;
/// it is reported as [`Decision::Unrecognized`](crate::domain::Decision).
#[derive(Error, Debug)]
pub enum RipenessError {
    /// Error occurred while decoding an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error occurred during preprocessing or postprocessing.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error occurred during inference.
    #[error("inference failed in model '{model_name}': {context}")]
    Inference {
        /// The name of the model where inference failed.
        model_name: String,
        /// Additional context about the inference error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// The classifier produced something that does not honor the label contract.
    #[error("invalid model output: {message}")]
    InvalidOutput {
        /// A message describing the violation.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from tensor operations with detailed context.
    #[error(
        "tensor operation '{operation}' failed: expected shape {expected_shape:?}, got {actual_shape:?} in {context}"
    )]
    TensorOperation {
        /// The tensor operation that failed.
        operation: String,
        /// The expected tensor shape.
        expected_shape: Vec<usize>,
        /// The actual tensor shape.
        actual_shape: Vec<usize>,
        /// Additional context about where the error occurred.
        context: String,
    },

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),

    /// Error loading a model file, with context and suggestions.
    #[error("model load failed for '{model_path}': {reason}{suggestion}")]
    ModelLoad {
        /// Path to the model that failed to load
        model_path: String,
        /// Short reason string
        reason: String,
        /// Optional suggestion (prefixed with '; ' when present)
        suggestion: String,
        /// Underlying source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result alias used across the crate.
pub type RipenessResult<T> = Result<T, RipenessError>;

impl From<image::ImageError> for RipenessError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

impl From<crate::core::config::ConfigError> for RipenessError {
    fn from(error: crate::core::config::ConfigError) -> Self {
        Self::ConfigError {
            message: error.to_string(),
        }
    }
}

impl From<ImageProcessError> for RipenessError {
    fn from(error: ImageProcessError) -> Self {
        Self::Processing {
            kind: ProcessingStage::Crop,
            context: "central crop failed".to_string(),
            source: Box::new(error),
        }
    }
}

impl RipenessError {
    /// Wraps a failure from one of the preprocessing stages.
    pub fn processing(
        kind: ProcessingStage,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind,
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates a tensor shape mismatch error.
    pub fn tensor_shape_mismatch(
        operation: impl Into<String>,
        expected_shape: &[usize],
        actual_shape: &[usize],
        context: impl Into<String>,
    ) -> Self {
        Self::TensorOperation {
            operation: operation.into(),
            expected_shape: expected_shape.to_vec(),
            actual_shape: actual_shape.to_vec(),
            context: context.into(),
        }
    }

    /// Wraps an ONNX Runtime failure that happened while running a model.
    pub fn inference(
        model_name: impl Into<String>,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            model_name: model_name.into(),
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates a model load error.
    ///
    /// `suggestion` is rendered after the reason, separated by `"; "`.
    pub fn model_load(
        model_path: impl AsRef<std::path::Path>,
        reason: impl Into<String>,
        suggestion: Option<&str>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ModelLoad {
            model_path: model_path.as_ref().display().to_string(),
            reason: reason.into(),
            suggestion: suggestion.map(|s| format!("; {s}")).unwrap_or_default(),
            source,
        }
    }

    /// Creates a configuration error for invalid field values.
    pub fn invalid_field(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ConfigError {
            message: format!(
                "invalid value for field '{}': expected {}, got {}",
                field.into(),
                expected.into(),
                actual.into()
            ),
        }
    }

    /// Creates an output contract violation.
    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_load_message_includes_suggestion() {
        let err = RipenessError::model_load(
            "models/banana.onnx",
            "file not found",
            Some("convert the Keras model to ONNX first"),
            None,
        );
        let message = err.to_string();
        assert!(message.contains("models/banana.onnx"));
        assert!(message.ends_with("; convert the Keras model to ONNX first"));
    }

    #[test]
    fn test_model_load_message_without_suggestion() {
        let err = RipenessError::model_load("m.onnx", "corrupt", None, None);
        assert_eq!(err.to_string(), "model load failed for 'm.onnx': corrupt");
    }

    #[test]
    fn test_image_process_error_converts_to_crop_stage() {
        let err: RipenessError = ImageProcessError::EmptyImage {
            width: 0,
            height: 3,
        }
        .into();
        assert!(matches!(
            err,
            RipenessError::Processing {
                kind: ProcessingStage::Crop,
                ..
            }
        ));
    }

    #[test]
    fn test_tensor_shape_mismatch_display() {
        let err = RipenessError::tensor_shape_mismatch(
            "classifier_output",
            &[5],
            &[4],
            "ripeness model",
        );
        assert_eq!(
            err.to_string(),
            "tensor operation 'classifier_output' failed: expected shape [5], got [4] in ripeness model"
        );
    }
}
