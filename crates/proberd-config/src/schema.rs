//! The structured prober configuration
//!
//! This is the decoded, format-independent form of the configuration. The
//! field set is fixed: every field is representable in all three textual
//! formats, and unknown fields are rejected at decode time.

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level prober configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProberConfig {
    /// Configured probes
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub probe: Vec<Probe>,

    /// Hostname to report in probe results; defaults to the system hostname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Port for the built-in status endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,

    /// How long the prober keeps running; unset means forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_time_sec: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// A single probe definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Probe {
    pub name: String,

    /// Probe kind, e.g. "PING", "HTTP", "TCP"
    #[serde(rename = "type")]
    pub probe_type: String,

    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub targets: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_msec: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_msec: Option<u64>,

    /// Credential for probes that need one; typically filled in through a
    /// secret placeholder rather than written literally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Probe {
    pub fn new(name: impl Into<String>, probe_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            probe_type: probe_type.into(),
            ..Default::default()
        }
    }

    pub fn with_targets(mut self, targets: Vec<String>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_interval_msec(mut self, msec: u64) -> Self {
        self.interval_msec = Some(msec);
        self
    }
}

/// Accept either a single value or an array for repeated fields.
///
/// A TextProto block that appears once parses as a single object, while
/// JSON/YAML always carry an array; both shapes must decode to the same
/// `Vec`.
fn one_or_many<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(values) => values,
        OneOrMany::One(value) => vec![value],
    })
}
