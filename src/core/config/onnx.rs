//! ONNX Runtime configuration types and utilities.

use super::errors::{ConfigError, ConfigValidator};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Graph optimization levels for ONNX Runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrtGraphOptimizationLevel {
    /// Disable all optimizations.
    DisableAll,
    /// Enable basic optimizations.
    Level1,
    /// Enable extended optimizations.
    Level2,
    /// Enable all optimizations.
    #[default]
    Level3,
    /// Enable all optimizations (alias for Level3).
    All,
}

/// Execution providers for ONNX Runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum OrtExecutionProvider {
    /// CPU execution provider (always available)
    #[default]
    CPU,
    /// NVIDIA CUDA execution provider
    CUDA {
        /// CUDA device ID (default: 0)
        device_id: Option<i32>,
        /// Memory limit in bytes (optional)
        gpu_mem_limit: Option<usize>,
    },
}

/// Configuration for ONNX Runtime sessions.
///
/// Every field is optional; unset fields leave the ONNX Runtime default in place.
/// The ripeness model is small, so the defaults are usually fine and this
/// mostly exists to pin thread counts or pick a GPU.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrtSessionConfig {
    /// Number of threads used to parallelize execution within nodes
    pub intra_threads: Option<usize>,
    /// Number of threads used to parallelize execution across nodes
    pub inter_threads: Option<usize>,
    /// Graph optimization level
    pub optimization_level: Option<OrtGraphOptimizationLevel>,
    /// Execution providers in order of preference
    pub execution_providers: Option<Vec<OrtExecutionProvider>>,
}

impl OrtSessionConfig {
    /// Creates a new OrtSessionConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a session config from a JSON file.
    ///
    /// Missing keys fall back to their defaults. The loaded config is validated
    /// before it is returned.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the number of intra-op threads.
    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = Some(threads);
        self
    }

    /// Sets the number of inter-op threads.
    pub fn with_inter_threads(mut self, threads: usize) -> Self {
        self.inter_threads = Some(threads);
        self
    }

    /// Sets the graph optimization level.
    pub fn with_optimization_level(mut self, level: OrtGraphOptimizationLevel) -> Self {
        self.optimization_level = Some(level);
        self
    }

    /// Sets the execution providers, in order of preference.
    pub fn with_execution_providers(mut self, providers: Vec<OrtExecutionProvider>) -> Self {
        self.execution_providers = Some(providers);
        self
    }

    /// Adds a single execution provider.
    pub fn add_execution_provider(mut self, provider: OrtExecutionProvider) -> Self {
        if let Some(ref mut providers) = self.execution_providers {
            providers.push(provider);
        } else {
            self.execution_providers = Some(vec![provider]);
        }
        self
    }

    /// Overlays every field that is set in `other` on top of `self`.
    ///
    /// Used by the CLI so that explicit flags win over a config file.
    pub fn merged_with(mut self, other: &OrtSessionConfig) -> Self {
        if other.intra_threads.is_some() {
            self.intra_threads = other.intra_threads;
        }
        if other.inter_threads.is_some() {
            self.inter_threads = other.inter_threads;
        }
        if other.optimization_level.is_some() {
            self.optimization_level = other.optimization_level;
        }
        if other.execution_providers.is_some() {
            self.execution_providers = other.execution_providers.clone();
        }
        self
    }

    /// Gets the effective graph optimization level.
    pub fn get_optimization_level(&self) -> OrtGraphOptimizationLevel {
        self.optimization_level.unwrap_or_default()
    }

    /// Gets the execution providers, defaulting to CPU only.
    pub fn get_execution_providers(&self) -> Vec<OrtExecutionProvider> {
        self.execution_providers
            .clone()
            .unwrap_or_else(|| vec![OrtExecutionProvider::CPU])
    }
}

impl ConfigValidator for OrtSessionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.intra_threads == Some(0) {
            return Err(ConfigError::InvalidConfig {
                message: "intra_threads must be greater than 0".to_string(),
            });
        }
        if self.inter_threads == Some(0) {
            return Err(ConfigError::InvalidConfig {
                message: "inter_threads must be greater than 0".to_string(),
            });
        }
        if let Some(providers) = &self.execution_providers {
            if providers.is_empty() {
                return Err(ConfigError::InvalidConfig {
                    message: "execution_providers must not be empty when set".to_string(),
                });
            }
            for provider in providers {
                if let OrtExecutionProvider::CUDA {
                    device_id: Some(id),
                    ..
                } = provider
                {
                    if *id < 0 {
                        return Err(ConfigError::InvalidConfig {
                            message: format!("CUDA device_id must be non-negative, got {id}"),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}
