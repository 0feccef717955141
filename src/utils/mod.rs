//! Utility functions for the ripeness pipeline.
//!
//! Image decoding, output validation and logging setup.

pub mod image;
pub mod logging;
pub mod validation;

pub use self::image::{load_image, load_image_from_bytes};
pub use logging::init_tracing;
pub use validation::ScoreValidator;
