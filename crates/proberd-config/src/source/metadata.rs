//! Cloud instance metadata collaborators

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

/// Metadata key that may carry the full configuration on supported clouds.
pub const CONFIG_METADATA_KEY: &str = "cloudprober_config";

/// Failure of a metadata lookup
///
/// Never fatal to resolution: the resolver logs it and falls through to the
/// next source.
#[derive(Debug, Error)]
#[error("metadata lookup failed: {0}")]
pub struct MetadataError(pub String);

/// Cloud instance metadata access
pub trait MetadataSource: Send + Sync {
    /// Whether the process is running on a recognized cloud instance.
    fn on_cloud(&self) -> bool;

    /// Read a custom metadata key.
    fn read_key(&self, key: &str) -> Result<String, MetadataError>;
}

/// Used when no cloud environment is detected or supported
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCloudMetadata;

impl NoCloudMetadata {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataSource for NoCloudMetadata {
    fn on_cloud(&self) -> bool {
        false
    }

    fn read_key(&self, key: &str) -> Result<String, MetadataError> {
        Err(MetadataError(format!(
            "not running on a cloud instance, key {key} unavailable"
        )))
    }
}

/// In-memory metadata for tests, always "on cloud"
#[derive(Debug, Default)]
pub struct MemoryMetadata {
    keys: RwLock<HashMap<String, String>>,
}

impl MemoryMetadata {
    /// Create a new store with no keys set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a metadata key
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.keys.write().unwrap().insert(key.into(), value.into());
    }
}

impl MetadataSource for MemoryMetadata {
    fn on_cloud(&self) -> bool {
        true
    }

    fn read_key(&self, key: &str) -> Result<String, MetadataError> {
        self.keys
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| MetadataError(format!("metadata key {key} not set")))
    }
}
