//! Error types for configuration loading

use thiserror::Error;

use crate::format::ConfigFormat;

/// Errors that can occur while resolving, expanding, or decoding configuration
///
/// All variants are fatal to the operation that produced them; there are no
/// internal retries. Missing secret placeholders are deliberately *not* an
/// error (see [`crate::secrets::substitute_placeholders`]), and a failed
/// cloud-metadata lookup degrades to the next source instead of surfacing
/// here.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error expanding config template: {0}")]
    Template(#[from] minijinja::Error),

    #[error("error converting YAML config to JSON: {0}")]
    YamlConversion(#[from] serde_yaml::Error),

    #[error("error decoding {format} config: {message}")]
    Decode {
        format: ConfigFormat,
        message: String,
    },

    #[error("error encoding {format} config: {message}")]
    Encode {
        format: ConfigFormat,
        message: String,
    },

    #[error("unknown format: {0}")]
    UnsupportedFormat(String),
}

impl ConfigError {
    pub(crate) fn decode(format: ConfigFormat, err: impl std::fmt::Display) -> Self {
        ConfigError::Decode {
            format,
            message: err.to_string(),
        }
    }

    pub(crate) fn encode(format: ConfigFormat, err: impl std::fmt::Display) -> Self {
        ConfigError::Encode {
            format,
            message: err.to_string(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
