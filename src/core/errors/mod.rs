//! Error handling for the ripeness pipeline.

mod types;

pub use types::{ImageProcessError, ProcessingStage, RipenessError, RipenessResult};
