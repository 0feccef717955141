//! Configuration for the ripeness CLI.

use crate::cli::CliError;
#[cfg(feature = "cuda")]
use pisang_ripeness::core::config::OrtExecutionProvider;
use pisang_ripeness::core::config::{ConfigValidatorExt, OrtSessionConfig};
use std::path::PathBuf;

/// Everything needed to load the model.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub model: PathBuf,
    pub device: String,
    pub intra_threads: Option<usize>,
    pub ort_config: Option<PathBuf>,
}

impl ModelConfig {
    /// Builds the session config: JSON file first, then device, then thread flags.
    pub fn session_config(&self) -> Result<OrtSessionConfig, CliError> {
        let mut config = match &self.ort_config {
            Some(path) => OrtSessionConfig::from_json_file(path)
                .map_err(|e| CliError::Config(e.to_string()))?,
            None => OrtSessionConfig::new(),
        };

        if let Some(device_config) = parse_device_config(&self.device)? {
            config = config.merged_with(&device_config);
        }

        if let Some(threads) = self.intra_threads {
            config = config.with_intra_threads(threads);
        }

        config
            .validated()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}

/// Parse device string and create OrtSessionConfig
///
/// `cpu` needs no extra configuration and yields `None`.
pub fn parse_device_config(device: &str) -> Result<Option<OrtSessionConfig>, CliError> {
    let device_lower = device.trim().to_lowercase();

    if device_lower == "cpu" {
        return Ok(None);
    }

    #[cfg(feature = "cuda")]
    {
        if device_lower.starts_with("cuda") {
            let device_id = if device_lower == "cuda" {
                0
            } else if let Some(id_str) = device_lower.strip_prefix("cuda:") {
                id_str
                    .parse::<i32>()
                    .map_err(|_| CliError::Config(format!("Invalid CUDA device ID: {device}")))?
            } else {
                return Err(CliError::Config(format!(
                    "Invalid device format: {device}. Expected 'cuda' or 'cuda:N'"
                )));
            };

            let config = OrtSessionConfig::new().with_execution_providers(vec![
                OrtExecutionProvider::CUDA {
                    device_id: Some(device_id),
                    gpu_mem_limit: None,
                },
                OrtExecutionProvider::CPU,
            ]);

            return Ok(Some(config));
        }
    }

    #[cfg(not(feature = "cuda"))]
    {
        if device_lower.starts_with("cuda") {
            return Err(CliError::Config(format!(
                "CUDA device '{device}' requested but CUDA feature is not enabled"
            )));
        }
    }

    Err(CliError::Config(format!("Unsupported device: {device}")))
}
