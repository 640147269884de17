//! The ordered configuration source fallback chain

use std::sync::Arc;

use crate::error::{ConfigError, ConfigResult};
use crate::format::ConfigFormat;
use crate::logging::{NoOpLogger, SharedLogger};

use super::file::{DiskFileReader, FileReader};
use super::metadata::{MetadataSource, NoCloudMetadata, CONFIG_METADATA_KEY};

/// Default on-disk location, checked only when no explicit, configured, or
/// metadata source produced anything.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/cloudprober.cfg";

/// Compiled-in last-resort configuration (TextProto).
pub const DEFAULT_CONFIG: &str = r#"# Built-in default: probe the local host every 10s.
probe {
  name: "default-self"
  type: "PING"
  targets: "localhost"
  interval_msec: 10000
}
"#;

/// Resolves raw configuration text from the first source that yields it.
///
/// Attempt order, first success wins:
/// 1. the explicit path passed to [`resolve`](ConfigResolver::resolve);
/// 2. the configured path (the start-up flag value, threaded in explicitly);
/// 3. on a recognized cloud, the [`CONFIG_METADATA_KEY`] metadata key —
///    a failed lookup logs and falls through instead of aborting;
/// 4. the default on-disk path, if the file exists;
/// 5. [`DEFAULT_CONFIG`], which never fails.
///
/// A read failure on an explicit or configured path (steps 1, 2, 4) is fatal.
/// The ordering is part of the contract and must not change.
pub struct ConfigResolver {
    configured_path: Option<String>,
    default_path: String,
    reader: Box<dyn FileReader>,
    metadata: Box<dyn MetadataSource>,
    logger: SharedLogger,
}

impl ConfigResolver {
    /// Create a resolver backed by local disk, no cloud, and no configured
    /// path.
    pub fn new() -> Self {
        Self {
            configured_path: None,
            default_path: DEFAULT_CONFIG_PATH.to_string(),
            reader: Box::new(DiskFileReader::new()),
            metadata: Box::new(NoCloudMetadata::new()),
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    /// Set the path configured at start-up (e.g. a `--config-file` flag
    /// value). Consulted after the explicit argument, before any other
    /// source.
    pub fn with_configured_path(mut self, path: impl Into<String>) -> Self {
        self.configured_path = Some(path.into());
        self
    }

    /// Override the default on-disk location.
    pub fn with_default_path(mut self, path: impl Into<String>) -> Self {
        self.default_path = path.into();
        self
    }

    pub fn with_reader(mut self, reader: Box<dyn FileReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn with_metadata(mut self, metadata: Box<dyn MetadataSource>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Walk the fallback chain and return the raw text plus its format hint.
    ///
    /// Metadata-sourced text has no file name, so its format is `Unknown`
    /// (the codec then defaults to TextProto).
    pub fn resolve(&self, explicit_path: Option<&str>) -> ConfigResult<(String, ConfigFormat)> {
        if let Some(path) = explicit_path.filter(|p| !p.is_empty()) {
            return self.read_config_file(path);
        }

        if let Some(path) = self.configured_path.as_deref().filter(|p| !p.is_empty()) {
            return self.read_config_file(path);
        }

        if self.metadata.on_cloud() {
            match self.metadata.read_key(CONFIG_METADATA_KEY) {
                Ok(text) => return Ok((text, ConfigFormat::Unknown)),
                Err(err) => self
                    .logger
                    .info(&format!("error reading config from metadata: {err}")),
            }
        }

        if self.reader.exists(&self.default_path) {
            return self.read_config_file(&self.default_path);
        }

        self.logger.warn(&format!(
            "config file {} not found, using the built-in default config",
            self.default_path
        ));
        Ok((DEFAULT_CONFIG.to_string(), ConfigFormat::TextProto))
    }

    fn read_config_file(&self, path: &str) -> ConfigResult<(String, ConfigFormat)> {
        let bytes = self
            .reader
            .read_file(path)
            .map_err(|source| ConfigError::FileRead {
                path: path.to_string(),
                source,
            })?;
        let text = String::from_utf8(bytes).map_err(|err| ConfigError::FileRead {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, err),
        })?;
        Ok((text, ConfigFormat::detect(path)))
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}
