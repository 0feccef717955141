//! Domain types of the ripeness classifier.
//!
//! - [`labels`]: the fixed label set and the four ripeness stages
//! - [`decision`]: argmax decision over the model output
//! - [`nutrition`]: per-stage insight text and health benefits

pub mod decision;
pub mod labels;
pub mod nutrition;

pub use decision::{ClassificationResult, Decision, DecisionPolicy};
pub use labels::{RipenessLabel, RipenessStage};
pub use nutrition::{Benefit, StageBenefits, UNRECOGNIZED_MESSAGE};
