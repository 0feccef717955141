//! Model inference.
//!
//! [`InferenceEngine`] is the boundary to the external classifier: it takes a
//! [`NormalizedTensor`] and returns one probability per label. [`OrtInfer`] is
//! the ONNX Runtime implementation used in production.

mod ort_infer_config;

use crate::core::config::{ConfigValidator, OrtSessionConfig};
use crate::core::constants::{DEFAULT_MODEL_NAME, NUM_LABELS};
use crate::core::errors::{RipenessError, RipenessResult};
use crate::core::tensor::NormalizedTensor;
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, info};

/// A loaded image classifier.
///
/// Implementations must return exactly [`NUM_LABELS`] values, index-aligned
/// with [`RipenessLabel::ALL`](crate::domain::RipenessLabel::ALL).
pub trait InferenceEngine: Send + Sync {
    /// Runs the classifier on one normalized image.
    fn infer(&self, input: NormalizedTensor) -> RipenessResult<Vec<f32>>;

    /// Name used in logs and error messages.
    fn model_name(&self) -> &str;
}

/// ONNX Runtime backed classifier.
///
/// `Session::run` needs exclusive access, so calls are serialized through a
/// mutex. The session itself is built once and never reloaded.
pub struct OrtInfer {
    session: Mutex<Session>,
    model_name: String,
    input_name: String,
}

impl OrtInfer {
    /// Loads a model with the default session configuration.
    pub fn new(model_path: impl AsRef<Path>) -> RipenessResult<Self> {
        Self::with_config(model_path, &OrtSessionConfig::default())
    }

    /// Loads a model with an explicit session configuration.
    ///
    /// Any failure here is fatal for the caller: there is no fallback model.
    pub fn with_config(
        model_path: impl AsRef<Path>,
        config: &OrtSessionConfig,
    ) -> RipenessResult<Self> {
        let model_path = model_path.as_ref();
        let start = Instant::now();
        let session = load_session(model_path, config)?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| {
                RipenessError::model_load(model_path, "model declares no inputs", None, None)
            })?;

        if session.outputs.is_empty() {
            return Err(RipenessError::model_load(
                model_path,
                "model declares no outputs",
                None,
                None,
            ));
        }

        let model_name = model_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(DEFAULT_MODEL_NAME)
            .to_string();

        info!(
            model = %model_name,
            input = %input_name,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Loaded ripeness model"
        );

        Ok(Self {
            session: Mutex::new(session),
            model_name,
            input_name,
        })
    }
}

impl std::fmt::Debug for OrtInfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtInfer")
            .field("model_name", &self.model_name)
            .field("input_name", &self.input_name)
            .finish_non_exhaustive()
    }
}

impl InferenceEngine for OrtInfer {
    fn infer(&self, input: NormalizedTensor) -> RipenessResult<Vec<f32>> {
        let start = Instant::now();
        let input_shape = input.shape().to_vec();
        let tensor = Tensor::from_array(input.into_array()).map_err(|e| {
            RipenessError::inference(&self.model_name, "failed to build input tensor", e)
        })?;

        let mut session = self.session.lock().map_err(|_| RipenessError::Inference {
            model_name: self.model_name.clone(),
            context: "session lock poisoned".to_string(),
            source: "a previous inference call panicked".into(),
        })?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => tensor])
            .map_err(|e| {
                RipenessError::inference(
                    &self.model_name,
                    format!("forward pass with input shape {input_shape:?}"),
                    e,
                )
            })?;

        let output = outputs.values().next().ok_or_else(|| {
            RipenessError::invalid_output(format!("model '{}' produced no outputs", self.model_name))
        })?;

        let (shape, data) = output.try_extract_tensor::<f32>().map_err(|e| {
            RipenessError::inference(&self.model_name, "output is not an f32 tensor", e)
        })?;
        let dims: Vec<usize> = shape.iter().map(|&d| d.max(0) as usize).collect();
        let probabilities = flatten_single_batch(&dims, data)?;

        debug!(
            model = %self.model_name,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Inference finished"
        );

        Ok(probabilities)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Builds an ONNX Runtime session for the model at `model_path`.
pub fn load_session(model_path: &Path, config: &OrtSessionConfig) -> RipenessResult<Session> {
    if !model_path.exists() {
        return Err(RipenessError::model_load(
            model_path,
            "file not found",
            Some("check the --model path or the RIPENESS_MODEL environment variable"),
            None,
        ));
    }

    config.validate()?;

    let builder = Session::builder()
        .and_then(|builder| OrtInfer::apply_ort_config(builder, config))
        .map_err(|e| {
            RipenessError::model_load(
                model_path,
                "failed to configure session",
                None,
                Some(Box::new(e)),
            )
        })?;

    builder.commit_from_file(model_path).map_err(|e| {
        RipenessError::model_load(
            model_path,
            "failed to parse model",
            Some("the artifact must be an ONNX export of the ripeness classifier"),
            Some(Box::new(e)),
        )
    })
}

/// Accepts `[N]` or `[1, N]` outputs with `N == NUM_LABELS`.
fn flatten_single_batch(dims: &[usize], data: &[f32]) -> RipenessResult<Vec<f32>> {
    let conforms = match dims {
        [n] => *n == NUM_LABELS,
        [1, n] => *n == NUM_LABELS,
        _ => false,
    };

    if !conforms || data.len() != NUM_LABELS {
        return Err(RipenessError::tensor_shape_mismatch(
            "classifier_output",
            &[1, NUM_LABELS],
            dims,
            "ripeness model output",
        ));
    }

    Ok(data.to_vec())
}
