//! Config format tags and file-extension detection

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// The three textual encodings of the prober configuration, plus `Unknown`
/// for content whose format could not be determined from its file name.
///
/// `Unknown` is legal input everywhere except [`crate::codec::encode`]: the
/// decoder treats it as TextProto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    TextProto,
    Json,
    Yaml,
    Unknown,
}

impl ConfigFormat {
    /// Detect the format from a file name's extension.
    ///
    /// Pure function of the name; no I/O. Unrecognized extensions map to
    /// `Unknown` rather than an error.
    pub fn detect(file_name: &str) -> ConfigFormat {
        if file_name.ends_with(".pb.txt")
            || file_name.ends_with(".cfg")
            || file_name.ends_with(".textpb")
        {
            ConfigFormat::TextProto
        } else if file_name.ends_with(".json") {
            ConfigFormat::Json
        } else if file_name.ends_with(".yaml") || file_name.ends_with(".yml") {
            ConfigFormat::Yaml
        } else {
            ConfigFormat::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFormat::TextProto => "textpb",
            ConfigFormat::Json => "json",
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigFormat {
    type Err = ConfigError;

    /// Parse one of the three public format tokens.
    ///
    /// `Unknown` is not a requestable format; anything outside
    /// `textpb`/`json`/`yaml` is an `UnsupportedFormat` error naming the
    /// offending string.
    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s {
            "textpb" => Ok(ConfigFormat::TextProto),
            "json" => Ok(ConfigFormat::Json),
            "yaml" => Ok(ConfigFormat::Yaml),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_textproto_extensions() {
        assert_eq!(ConfigFormat::detect("prober.pb.txt"), ConfigFormat::TextProto);
        assert_eq!(ConfigFormat::detect("/etc/prober.cfg"), ConfigFormat::TextProto);
        assert_eq!(ConfigFormat::detect("prober.textpb"), ConfigFormat::TextProto);
    }

    #[test]
    fn test_detect_json_and_yaml() {
        assert_eq!(ConfigFormat::detect("prober.json"), ConfigFormat::Json);
        assert_eq!(ConfigFormat::detect("prober.yaml"), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::detect("prober.yml"), ConfigFormat::Yaml);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(ConfigFormat::detect("prober.toml"), ConfigFormat::Unknown);
        assert_eq!(ConfigFormat::detect("prober"), ConfigFormat::Unknown);
        assert_eq!(ConfigFormat::detect(""), ConfigFormat::Unknown);
    }

    #[test]
    fn test_from_str_valid_tokens() {
        assert_eq!("textpb".parse::<ConfigFormat>().unwrap(), ConfigFormat::TextProto);
        assert_eq!("json".parse::<ConfigFormat>().unwrap(), ConfigFormat::Json);
        assert_eq!("yaml".parse::<ConfigFormat>().unwrap(), ConfigFormat::Yaml);
    }

    #[test]
    fn test_from_str_rejects_unknown_token() {
        let err = "xml".parse::<ConfigFormat>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ref s) if s == "xml"));
        assert!("unknown".parse::<ConfigFormat>().is_err());
    }

    #[test]
    fn test_display_round_trips_tokens() {
        for format in [ConfigFormat::TextProto, ConfigFormat::Json, ConfigFormat::Yaml] {
            assert_eq!(format.as_str().parse::<ConfigFormat>().unwrap(), format);
        }
    }
}
