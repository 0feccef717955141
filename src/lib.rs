//! # Pisang Ripeness
//!
//! Classifies the ripeness of a banana from a photo into one of four stages
//! (hijau, kuning, kuning bintik cokelat, cokelat) or rejects the photo as not
//! showing a banana.
//!
//! The pipeline is fixed by how the classifier was trained:
//!
//! 1. crop the central square covering 60% of the shorter side
//! 2. resize to 150×150 RGB and scale channels into `[0, 1]`
//! 3. run the ONNX classifier, which returns five probabilities
//! 4. pick the most probable label; "unknown" means "not a banana"
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, constants, the input tensor and the inference engine
//! * [`processors`] - Central crop and normalization
//! * [`domain`] - Labels, the decision policy and per-stage nutrition content
//! * [`predictors`] - The high-level [`RipenessPredictor`]
//! * [`utils`] - Image loading, output validation and logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pisang_ripeness::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let predictor = RipenessPredictor::builder().build("models/banana_ripeness.onnx")?;
//! let image = load_image("pisang.jpg")?;
//!
//! match predictor.predict(&image)? {
//!     Decision::Recognized(result) => {
//!         println!("{result}");
//!         println!("{}", result.stage.insight());
//!     }
//!     Decision::Unrecognized => println!("{UNRECOGNIZED_MESSAGE}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod predictors;
pub mod processors;
pub mod utils;

pub use predictors::{RipenessPredictor, SharedPredictor};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::config::{OrtExecutionProvider, OrtSessionConfig};
    pub use crate::core::{InferenceEngine, NormalizedTensor, RipenessError, RipenessResult};
    pub use crate::domain::{
        Benefit, ClassificationResult, Decision, RipenessLabel, RipenessStage,
        UNRECOGNIZED_MESSAGE,
    };
    pub use crate::predictors::{Prediction, RipenessPredictor, SharedPredictor};
    pub use crate::utils::{init_tracing, load_image, load_image_from_bytes};
}
