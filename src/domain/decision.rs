//! Turning a probability vector into a classification decision.

use super::labels::{RipenessLabel, RipenessStage};
use crate::core::constants::NUM_LABELS;
use crate::core::errors::{RipenessError, RipenessResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recognized stage and the model's probability for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The predicted ripeness stage.
    pub stage: RipenessStage,
    /// Probability of `stage` (0.0 to 1.0).
    pub confidence: f32,
}

impl fmt::Display for ClassificationResult {
    /// Formats as `Hasil: Kuning (87.50%)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hasil: {} ({:.2}%)",
            self.stage.display_name(),
            self.confidence as f64 * 100.0
        )
    }
}

/// Outcome of classifying one image.
///
/// An image the model does not take for a banana is a normal outcome, not an
/// error, and carries no confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Decision {
    /// The image shows a banana at the given stage.
    Recognized(ClassificationResult),
    /// The model picked the "unknown" label.
    Unrecognized,
}

impl Decision {
    /// The classification, if the image was recognized.
    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            Decision::Recognized(result) => Some(result),
            Decision::Unrecognized => None,
        }
    }

    /// Returns `true` for [`Decision::Recognized`].
    pub fn is_recognized(&self) -> bool {
        matches!(self, Decision::Recognized(_))
    }
}

/// Picks the label for a model output vector.
pub struct DecisionPolicy;

impl DecisionPolicy {
    /// Decides on a label from `probabilities`.
    ///
    /// The highest value wins; on ties the lowest index wins. The vector is not
    /// required to sum to 1. If the winner is "unknown" the result is
    /// [`Decision::Unrecognized`] no matter how confident the model is.
    ///
    /// # Errors
    ///
    /// Returns [`RipenessError::InvalidOutput`] if the vector length differs
    /// from the label set or contains a non-finite value.
    pub fn decide(probabilities: &[f32]) -> RipenessResult<Decision> {
        if probabilities.len() != NUM_LABELS {
            return Err(RipenessError::invalid_output(format!(
                "expected {NUM_LABELS} probabilities, got {}",
                probabilities.len()
            )));
        }

        if let Some(i) = probabilities.iter().position(|p| !p.is_finite()) {
            return Err(RipenessError::invalid_output(format!(
                "probability at index {i} is not finite: {}",
                probabilities[i]
            )));
        }

        let (index, confidence) = argmax(probabilities)
            .ok_or_else(|| RipenessError::invalid_output("empty probability vector"))?;

        let label = RipenessLabel::from_index(index).ok_or_else(|| {
            RipenessError::invalid_output(format!("no label for output index {index}"))
        })?;

        Ok(match label.stage() {
            Some(stage) => Decision::Recognized(ClassificationResult { stage, confidence }),
            None => Decision::Unrecognized,
        })
    }
}

/// Index and value of the first maximum.
fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    let mut iter = values.iter().copied().enumerate();
    let first = iter.next()?;
    Some(iter.fold(first, |best, (i, v)| if v > best.1 { (i, v) } else { best }))
}
