//! Rendering classification results and benefit lists.

use clap::ValueEnum;
use pisang_ripeness::domain::{
    ClassificationResult, Decision, RipenessStage, StageBenefits, UNRECOGNIZED_MESSAGE,
};
use pisang_ripeness::predictors::Prediction;
use serde::Serialize;
use std::fmt::Write;

/// Output format for both subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable report
    Pretty,
    /// JSON document on stdout
    Json,
    /// One tab separated line per image
    Text,
}

/// Result for one input image.
#[derive(Debug, Serialize)]
pub struct ImageReport {
    pub image: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Recognized {
        stage: RipenessStage,
        confidence: f32,
        insight: &'static str,
        probabilities: Vec<f32>,
    },
    /// No stage scores are reported, only the rejection message.
    Unrecognized {
        message: &'static str,
    },
    Error {
        message: String,
    },
}

impl ImageReport {
    pub fn from_prediction(image: impl Into<String>, prediction: Prediction) -> Self {
        let outcome = match prediction.decision {
            Decision::Recognized(result) => Outcome::Recognized {
                stage: result.stage,
                confidence: result.confidence,
                insight: result.stage.insight(),
                probabilities: prediction.probabilities,
            },
            Decision::Unrecognized => Outcome::Unrecognized {
                message: UNRECOGNIZED_MESSAGE,
            },
        };
        Self {
            image: image.into(),
            outcome,
        }
    }

    pub fn from_error(image: impl Into<String>, error: &dyn std::error::Error) -> Self {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            let _ = write!(message, ": {cause}");
            source = cause.source();
        }
        Self {
            image: image.into(),
            outcome: Outcome::Error { message },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error { .. })
    }
}

/// Renders one report for the pretty and text formats.
pub fn render_report(report: &ImageReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => match &report.outcome {
            Outcome::Recognized {
                stage, confidence, ..
            } => format!("{}\t{}\t{:.4}", report.image, stage, confidence),
            Outcome::Unrecognized { .. } => format!("{}\tunrecognized", report.image),
            Outcome::Error { message } => format!("{}\terror: {}", report.image, message),
        },
        // JSON reports are collected and printed as one array by the caller.
        OutputFormat::Pretty | OutputFormat::Json => {
            let mut out = format!("=== {} ===\n", report.image);
            match &report.outcome {
                Outcome::Recognized {
                    stage,
                    confidence,
                    insight,
                    ..
                } => {
                    let result = ClassificationResult {
                        stage: *stage,
                        confidence: *confidence,
                    };
                    let _ = writeln!(out, "{result}");
                    let _ = writeln!(out, "{insight}");
                }
                Outcome::Unrecognized { message } => {
                    let _ = writeln!(out, "{message}");
                }
                Outcome::Error { message } => {
                    let _ = writeln!(out, "Error: {message}");
                }
            }
            out
        }
    }
}

/// Renders the benefit list of the given stages.
pub fn render_benefits(
    stages: &[RipenessStage],
    format: OutputFormat,
) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        let entries: Vec<StageBenefits> =
            stages.iter().copied().map(StageBenefits::from).collect();
        return serde_json::to_string_pretty(&entries);
    }

    let mut out = String::new();
    for stage in stages {
        match format {
            OutputFormat::Text => {
                for benefit in stage.benefits() {
                    let _ = writeln!(out, "{}\t{}", stage, benefit.title);
                }
            }
            _ => {
                let _ = writeln!(out, "## {}", stage.display_name());
                let _ = writeln!(out, "{}", stage.insight());
                for benefit in stage.benefits() {
                    let _ = writeln!(out, "- **{}**: {}", benefit.title, benefit.detail);
                }
                out.push('\n');
            }
        }
    }
    Ok(out)
}
