//! Validation helpers for model outputs.

use crate::core::errors::{RipenessError, RipenessResult};

/// Checks that scores are finite and inside a closed range.
#[derive(Debug, Clone)]
pub struct ScoreValidator {
    field_name: String,
    min: f32,
    max: f32,
}

impl ScoreValidator {
    /// Creates a validator for `[min, max]`.
    pub fn new(field_name: impl Into<String>, min: f32, max: f32) -> Self {
        Self {
            field_name: field_name.into(),
            min,
            max,
        }
    }

    /// Creates a validator for probabilities, `[0.0, 1.0]`.
    pub fn new_unit_range(field_name: impl Into<String>) -> Self {
        Self::new(field_name, 0.0, 1.0)
    }

    /// Validates one score.
    pub fn validate_score(&self, score: f32, context: &str) -> RipenessResult<()> {
        if !score.is_finite() || score < self.min || score > self.max {
            return Err(RipenessError::invalid_output(format!(
                "{context}: {} {score} outside [{}, {}]",
                self.field_name, self.min, self.max
            )));
        }
        Ok(())
    }

    /// Validates all scores, building the error context from the index lazily.
    pub fn validate_scores_with<F>(&self, scores: &[f32], context: F) -> RipenessResult<()>
    where
        F: Fn(usize) -> String,
    {
        for (idx, &score) in scores.iter().enumerate() {
            if !score.is_finite() || score < self.min || score > self.max {
                return self.validate_score(score, &context(idx));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_range_accepts_probabilities() {
        let validator = ScoreValidator::new_unit_range("probability");
        assert!(
            validator
                .validate_scores_with(&[0.0, 0.25, 1.0], |i| format!("label {i}"))
                .is_ok()
        );
    }

    #[test]
    fn test_unit_range_rejects_out_of_range() {
        let validator = ScoreValidator::new_unit_range("probability");
        let err = validator
            .validate_scores_with(&[0.5, 1.5], |i| format!("label {i}"))
            .unwrap_err();
        assert!(err.to_string().contains("label 1"));
        assert!(validator.validate_score(-0.1, "x").is_err());
        assert!(validator.validate_score(f32::INFINITY, "x").is_err());
    }
}
