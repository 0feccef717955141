//! Configuration validation.

use thiserror::Error;

/// Errors raised while validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration value is out of its allowed domain.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// What is wrong with the value.
        message: String,
    },
    /// A configuration file could not be parsed.
    #[error("failed to parse config '{path}'")]
    Parse {
        /// The file that failed to parse.
        path: String,
        /// The underlying parser error.
        #[source]
        source: serde_json::Error,
    },
    /// A configuration file could not be read.
    #[error("failed to read config '{path}'")]
    Read {
        /// The file that failed to read.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Validation hook implemented by every configuration type.
pub trait ConfigValidator {
    /// Checks the configuration for values that cannot work at runtime.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Returns the default configuration.
    fn get_defaults() -> Self
    where
        Self: Sized;
}

/// Convenience helpers on top of [`ConfigValidator`].
pub trait ConfigValidatorExt: ConfigValidator + Sized {
    /// Validates and returns `self`, so builders can end with `.validated()?`.
    fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

impl<T: ConfigValidator + Sized> ConfigValidatorExt for T {}
