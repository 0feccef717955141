//! Subcommand implementations.

use crate::config::ModelConfig;
use crate::output::{ImageReport, OutputFormat, render_benefits, render_report};
use pisang_ripeness::RipenessPredictor;
use pisang_ripeness::core::RipenessError;
use pisang_ripeness::domain::RipenessStage;
use pisang_ripeness::utils::load_image;
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that stop the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Ripeness(#[from] RipenessError),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Classifies every image and prints the results.
///
/// A model that fails to load aborts before any image is read. Images that
/// fail to decode or classify are reported and skipped. Returns the number of
/// images that failed.
pub fn classify(
    config: &ModelConfig,
    images: &[PathBuf],
    format: OutputFormat,
) -> Result<usize, CliError> {
    let session_config = config.session_config()?;

    info!("Loading model from {}...", config.model.display());
    let start = Instant::now();
    let predictor = RipenessPredictor::builder()
        .with_ort_config(session_config)
        .build(&config.model)?;
    info!(
        "Model loaded in {:.2}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    let mut reports = Vec::with_capacity(images.len());
    for path in images {
        let name = path.display().to_string();
        let start = Instant::now();

        let report = match load_image(path).and_then(|image| predictor.predict_detailed(&image)) {
            Ok(prediction) => {
                info!(
                    "Classified {} in {:.2}ms",
                    name,
                    start.elapsed().as_secs_f64() * 1000.0
                );
                ImageReport::from_prediction(name, prediction)
            }
            Err(e) => {
                warn!("Skipping {}: {}", name, e);
                ImageReport::from_error(name, &e)
            }
        };

        if format != OutputFormat::Json {
            println!("{}", render_report(&report, format));
        }
        reports.push(report);
    }

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(reports.iter().filter(|r| r.is_error()).count())
}

/// Prints the benefit list of one stage, or of all stages in display order.
pub fn benefits(stage: Option<&str>, format: OutputFormat) -> Result<(), CliError> {
    let stages = match stage {
        Some(name) => vec![name.parse::<RipenessStage>()?],
        None => RipenessStage::display_order().to_vec(),
    };

    print!("{}", render_benefits(&stages, format)?);
    Ok(())
}
