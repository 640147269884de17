//! Format dispatch between raw config text and [`ProberConfig`]
//!
//! Decode and encode must stay symmetric: every format a blob can be decoded
//! from is also a format the config can be re-encoded to, and all three carry
//! the same information. YAML goes through an intermediate JSON value in both
//! directions; TextProto goes through the [`crate::textpb`] bridge.

use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};
use crate::format::ConfigFormat;
use crate::schema::ProberConfig;
use crate::textpb;

/// Decode configuration text in the given format.
///
/// `Unknown` decodes as TextProto. A malformed YAML document surfaces as a
/// conversion error; content that does not match the schema surfaces as a
/// decode error tagged with the format it was decoded as.
pub fn decode(text: &str, format: ConfigFormat) -> ConfigResult<ProberConfig> {
    match format {
        ConfigFormat::Yaml => {
            let json: Value = serde_yaml::from_str(text)?;
            serde_json::from_value(json).map_err(|e| ConfigError::decode(ConfigFormat::Yaml, e))
        }
        ConfigFormat::Json => {
            serde_json::from_str(text).map_err(|e| ConfigError::decode(ConfigFormat::Json, e))
        }
        ConfigFormat::TextProto | ConfigFormat::Unknown => {
            let json = textpb::parse(text)
                .map_err(|e| ConfigError::decode(ConfigFormat::TextProto, e))?;
            serde_json::from_value(json)
                .map_err(|e| ConfigError::decode(ConfigFormat::TextProto, e))
        }
    }
}

/// Encode a configuration to the given format.
///
/// JSON and TextProto output is multi-line with two-space indentation.
/// `Unknown` is not an encodable format and fails with an unsupported-format
/// error.
pub fn encode(cfg: &ProberConfig, format: ConfigFormat) -> ConfigResult<Vec<u8>> {
    match format {
        ConfigFormat::Yaml => {
            let json = serde_json::to_value(cfg)
                .map_err(|e| ConfigError::encode(ConfigFormat::Yaml, e))?;
            Ok(serde_yaml::to_string(&json)?.into_bytes())
        }
        ConfigFormat::Json => {
            let text = serde_json::to_string_pretty(cfg)
                .map_err(|e| ConfigError::encode(ConfigFormat::Json, e))?;
            Ok(text.into_bytes())
        }
        ConfigFormat::TextProto => {
            let json = serde_json::to_value(cfg)
                .map_err(|e| ConfigError::encode(ConfigFormat::TextProto, e))?;
            Ok(textpb::to_string(&json).into_bytes())
        }
        ConfigFormat::Unknown => Err(ConfigError::UnsupportedFormat(
            ConfigFormat::Unknown.as_str().to_string(),
        )),
    }
}
