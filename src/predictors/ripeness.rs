//! Banana Ripeness Predictor
//!
//! This module provides the high-level API: decoded image in, [`Decision`] out.

use crate::core::config::OrtSessionConfig;
use crate::core::errors::RipenessResult;
use crate::core::inference::{InferenceEngine, OrtInfer};
use crate::core::tensor::NormalizedTensor;
use crate::domain::{Decision, DecisionPolicy};
use crate::processors::{ImageCropper, ImageNormalizer};
use crate::utils::ScoreValidator;
use image::DynamicImage;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// A decision together with the raw model output it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// The classification outcome.
    pub decision: Decision,
    /// Model probabilities, index-aligned with
    /// [`RipenessLabel::ALL`](crate::domain::RipenessLabel::ALL).
    pub probabilities: Vec<f32>,
}

/// Banana ripeness predictor.
///
/// The model is loaded once when the predictor is built. The predictor is
/// `Send + Sync`; share it between threads with [`SharedPredictor`].
pub struct RipenessPredictor {
    engine: Arc<dyn InferenceEngine>,
    normalizer: ImageNormalizer,
    validator: ScoreValidator,
}

/// A predictor shared between threads or request handlers.
pub type SharedPredictor = Arc<RipenessPredictor>;

impl RipenessPredictor {
    /// Create a new builder for the ripeness predictor
    pub fn builder() -> RipenessPredictorBuilder {
        RipenessPredictorBuilder::new()
    }

    /// Wraps an already loaded inference engine.
    pub fn with_engine(engine: Arc<dyn InferenceEngine>) -> Self {
        Self {
            engine,
            normalizer: ImageNormalizer::new(),
            validator: ScoreValidator::new_unit_range("probability"),
        }
    }

    /// Name of the underlying model.
    pub fn model_name(&self) -> &str {
        self.engine.model_name()
    }

    /// Crops and normalizes `image` into the model input tensor.
    pub fn preprocess(&self, image: &DynamicImage) -> RipenessResult<NormalizedTensor> {
        let start = Instant::now();
        let cropped = ImageCropper::crop_center(image)?;
        debug!(
            width = image.width(),
            height = image.height(),
            side = cropped.width(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Cropped image"
        );

        let start = Instant::now();
        let tensor = self.normalizer.normalize(&cropped)?;
        debug!(
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Normalized image"
        );

        Ok(tensor)
    }

    /// Classifies one image.
    pub fn predict(&self, image: &DynamicImage) -> RipenessResult<Decision> {
        Ok(self.predict_detailed(image)?.decision)
    }

    /// Classifies one image, keeping the probability vector.
    pub fn predict_detailed(&self, image: &DynamicImage) -> RipenessResult<Prediction> {
        let tensor = self.preprocess(image)?;
        self.classify(tensor)
    }

    /// Classifies several images.
    ///
    /// Preprocessing runs in parallel; model calls run one after another. The
    /// first failing image aborts the batch.
    pub fn predict_batch(&self, images: Vec<DynamicImage>) -> RipenessResult<Vec<Decision>> {
        if images.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let tensors = images
            .par_iter()
            .map(|image| self.preprocess(image))
            .collect::<RipenessResult<Vec<_>>>()?;
        debug!(
            batch_size = tensors.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Preprocessed batch"
        );

        tensors
            .into_iter()
            .map(|tensor| self.classify(tensor).map(|p| p.decision))
            .collect()
    }

    fn classify(&self, tensor: NormalizedTensor) -> RipenessResult<Prediction> {
        let start = Instant::now();
        let probabilities = self.engine.infer(tensor)?;
        debug!(
            model = self.engine.model_name(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Ran classifier"
        );

        self.validator
            .validate_scores_with(&probabilities, |idx| format!("output index {idx}"))?;
        let decision = DecisionPolicy::decide(&probabilities)?;
        debug!(?decision, "Decided");

        Ok(Prediction {
            decision,
            probabilities,
        })
    }
}

impl std::fmt::Debug for RipenessPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RipenessPredictor")
            .field("model_name", &self.engine.model_name())
            .field("normalizer", &self.normalizer)
            .finish()
    }
}

/// Builder for the ripeness predictor
#[derive(Debug, Default)]
pub struct RipenessPredictorBuilder {
    ort_config: Option<OrtSessionConfig>,
}

impl RipenessPredictorBuilder {
    /// Creates a builder with the default session configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ONNX Runtime session configuration.
    pub fn with_ort_config(mut self, config: OrtSessionConfig) -> Self {
        self.ort_config = Some(config);
        self
    }

    /// Loads the model at `model_path` and builds the predictor.
    ///
    /// # Errors
    ///
    /// Returns [`RipenessError::ModelLoad`](crate::core::RipenessError::ModelLoad)
    /// if the model is missing or cannot be parsed, or a configuration error if
    /// the session config is invalid.
    pub fn build<P: AsRef<Path>>(self, model_path: P) -> RipenessResult<RipenessPredictor> {
        let config = self.ort_config.unwrap_or_default();
        let engine = OrtInfer::with_config(model_path, &config)?;
        Ok(RipenessPredictor::with_engine(Arc::new(engine)))
    }

    /// Builds a predictor around an existing engine, ignoring the session config.
    pub fn build_with_engine(self, engine: Arc<dyn InferenceEngine>) -> RipenessPredictor {
        RipenessPredictor::with_engine(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::{ProcessingStage, RipenessError};
    use crate::domain::{ClassificationResult, RipenessStage};
    use image::{Rgb, RgbImage};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns the same output for every input and records what it was given.
    struct FixedEngine {
        output: Vec<f32>,
        calls: AtomicUsize,
        last_shape: Mutex<Option<Vec<usize>>>,
    }

    impl FixedEngine {
        fn new(output: Vec<f32>) -> Arc<Self> {
            Arc::new(Self {
                output,
                calls: AtomicUsize::new(0),
                last_shape: Mutex::new(None),
            })
        }
    }

    impl InferenceEngine for FixedEngine {
        fn infer(&self, input: NormalizedTensor) -> RipenessResult<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_shape.lock().unwrap() = Some(input.shape().to_vec());
            Ok(self.output.clone())
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    /// Bright images are green bananas, dark images are not bananas.
    struct BrightnessEngine;

    impl InferenceEngine for BrightnessEngine {
        fn infer(&self, input: NormalizedTensor) -> RipenessResult<Vec<f32>> {
            let mean = input.view().mean().unwrap_or(0.0);
            if mean > 0.5 {
                Ok(vec![0.0, mean, 0.0, 0.0, 1.0 - mean])
            } else {
                Ok(vec![0.0, 0.0, 0.0, 0.0, 1.0])
            }
        }

        fn model_name(&self) -> &str {
            "brightness"
        }
    }

    fn banana_photo() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(320, 240, |x, y| {
            Rgb([(x % 256) as u8, 200, (y % 256) as u8])
        }))
    }

    fn flat(value: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 300, Rgb([value, value, value])))
    }

    #[test]
    fn test_preprocess_flat_photo_is_exact() {
        let predictor = RipenessPredictor::with_engine(FixedEngine::new(vec![0.2; 5]));
        let photo = DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 300, Rgb([230, 190, 40])));

        let tensor = predictor.preprocess(&photo).unwrap();
        assert_eq!(tensor.shape(), &[1, 150, 150, 3]);

        let expected = [230.0 / 255.0, 190.0 / 255.0, 40.0 / 255.0];
        for ((_, _, _, c), &value) in tensor.view().indexed_iter() {
            assert_eq!(value, expected[c]);
        }
    }

    #[test]
    fn test_predict_recognized_stage() {
        let engine = FixedEngine::new(vec![0.05, 0.90, 0.02, 0.02, 0.01]);
        let predictor = RipenessPredictor::with_engine(engine.clone());

        let decision = predictor.predict(&banana_photo()).unwrap();
        assert_eq!(
            decision,
            Decision::Recognized(ClassificationResult {
                stage: RipenessStage::Hijau,
                confidence: 0.90
            })
        );
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            engine.last_shape.lock().unwrap().as_deref(),
            Some(&[1, 150, 150, 3][..])
        );
    }

    #[test]
    fn test_predict_unknown_is_unrecognized() {
        let predictor =
            RipenessPredictor::with_engine(FixedEngine::new(vec![0.1, 0.1, 0.1, 0.1, 0.6]));
        assert_eq!(
            predictor.predict(&banana_photo()).unwrap(),
            Decision::Unrecognized
        );
    }

    #[test]
    fn test_uniform_output_picks_cokelat() {
        let predictor = RipenessPredictor::with_engine(FixedEngine::new(vec![0.2; 5]));
        let decision = predictor.predict(&banana_photo()).unwrap();
        assert_eq!(decision.result().unwrap().stage, RipenessStage::Cokelat);
    }

    #[test]
    fn test_predict_detailed_keeps_probabilities() {
        let output = vec![0.1, 0.2, 0.3, 0.35, 0.05];
        let predictor = RipenessPredictor::with_engine(FixedEngine::new(output.clone()));
        let prediction = predictor.predict_detailed(&banana_photo()).unwrap();
        assert_eq!(prediction.probabilities, output);
        assert_eq!(
            prediction.decision.result().unwrap().stage,
            RipenessStage::KuningBintikCokelat
        );
    }

    #[test]
    fn test_wrong_output_length_is_rejected() {
        let predictor = RipenessPredictor::with_engine(FixedEngine::new(vec![0.25; 4]));
        let err = predictor.predict(&banana_photo()).unwrap_err();
        assert!(matches!(err, RipenessError::InvalidOutput { .. }));
    }

    #[test]
    fn test_out_of_range_output_is_rejected() {
        let predictor =
            RipenessPredictor::with_engine(FixedEngine::new(vec![1.5, 0.0, 0.0, 0.0, 0.0]));
        let err = predictor.predict(&banana_photo()).unwrap_err();
        assert!(matches!(err, RipenessError::InvalidOutput { .. }));
    }

    #[test]
    fn test_empty_image_fails_in_crop() {
        let predictor = RipenessPredictor::with_engine(FixedEngine::new(vec![0.2; 5]));
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        let err = predictor.predict(&empty).unwrap_err();
        assert!(matches!(
            err,
            RipenessError::Processing {
                kind: ProcessingStage::Crop,
                ..
            }
        ));
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let predictor = RipenessPredictor::with_engine(Arc::new(BrightnessEngine));
        let image = banana_photo();

        let first = predictor.preprocess(&image).unwrap();
        let second = predictor.preprocess(&image).unwrap();
        assert_eq!(first, second);

        let a = predictor.predict_detailed(&image).unwrap();
        let b = predictor.predict_detailed(&image).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_predict_batch_preserves_order() {
        let predictor = RipenessPredictor::with_engine(Arc::new(BrightnessEngine));
        let decisions = predictor
            .predict_batch(vec![flat(255), flat(0), flat(230)])
            .unwrap();

        assert_eq!(decisions.len(), 3);
        assert_eq!(decisions[0].result().unwrap().stage, RipenessStage::Hijau);
        assert_eq!(decisions[1], Decision::Unrecognized);
        assert!(decisions[2].is_recognized());
    }

    #[test]
    fn test_predict_batch_empty() {
        let engine = FixedEngine::new(vec![0.2; 5]);
        let predictor = RipenessPredictor::with_engine(engine.clone());
        assert!(predictor.predict_batch(Vec::new()).unwrap().is_empty());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_shared_predictor_across_threads() {
        let engine = FixedEngine::new(vec![0.05, 0.90, 0.02, 0.02, 0.01]);
        let predictor: SharedPredictor = Arc::new(RipenessPredictor::with_engine(engine.clone()));

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let predictor = Arc::clone(&predictor);
                scope.spawn(move || {
                    let decision = predictor.predict(&banana_photo()).unwrap();
                    assert!(decision.is_recognized());
                });
            }
        });
        assert_eq!(engine.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_builder_missing_model() {
        let err = RipenessPredictor::builder()
            .with_ort_config(OrtSessionConfig::new().with_intra_threads(1))
            .build("missing/model.onnx")
            .unwrap_err();
        assert!(matches!(err, RipenessError::ModelLoad { .. }));
    }

    #[test]
    fn test_builder_with_engine() {
        let predictor = RipenessPredictor::builder().build_with_engine(Arc::new(BrightnessEngine));
        assert_eq!(predictor.model_name(), "brightness");
    }
}
