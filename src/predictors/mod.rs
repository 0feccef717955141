//! High-level predictors.
//!
//! [`RipenessPredictor`] runs the full pipeline: central crop, normalization,
//! model inference and the final decision.

pub mod ripeness;

pub use ripeness::{Prediction, RipenessPredictor, RipenessPredictorBuilder, SharedPredictor};
