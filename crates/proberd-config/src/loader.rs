//! Public entry points composing resolution, templating, substitution, and
//! the codec

use std::collections::HashMap;
use std::sync::Arc;

use crate::codec;
use crate::error::ConfigResult;
use crate::format::ConfigFormat;
use crate::logging::{NoOpLogger, SharedLogger};
use crate::schema::ProberConfig;
use crate::secrets::{self, EnvSource, RealEnv};
use crate::source::ConfigResolver;
use crate::template;

/// High-level configuration loading
///
/// Owns a [`ConfigResolver`] for locating raw text, an [`EnvSource`] for
/// secret substitution, and a logger for diagnostics. All operations are
/// synchronous and take the explicit config path as a parameter rather than
/// reading process-global state.
pub struct ConfigLoader {
    resolver: ConfigResolver,
    env: Box<dyn EnvSource>,
    logger: SharedLogger,
}

impl ConfigLoader {
    /// Create a loader over the given resolver, using the process
    /// environment for secrets.
    pub fn new(resolver: ConfigResolver) -> Self {
        Self {
            resolver,
            env: Box::new(RealEnv::new()),
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    pub fn with_env(mut self, env: Box<dyn EnvSource>) -> Self {
        self.env = env;
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Raw resolved configuration text plus its format hint, before any
    /// templating or decoding. Thin pass-through to the resolver.
    pub fn get_config(&self, explicit_path: Option<&str>) -> ConfigResult<(String, ConfigFormat)> {
        self.resolver.resolve(explicit_path)
    }

    /// Expand, substitute secrets, and decode already-resolved text.
    ///
    /// Returns the decoded configuration together with the template-expanded
    /// text. The returned text is taken before secret substitution so that
    /// real secret values never travel into diagnostics or dumps.
    pub fn parse_config(
        &self,
        text: &str,
        format: ConfigFormat,
        vars: &HashMap<String, String>,
    ) -> ConfigResult<(ProberConfig, String)> {
        let expanded = template::expand(text, vars, None)?;
        let substituted =
            secrets::substitute_placeholders(&expanded, self.env.as_ref(), self.logger.as_ref());
        let cfg = codec::decode(&substituted, format)?;
        Ok((cfg, expanded))
    }

    /// Resolve, parse, and re-encode the configuration in `out_format`
    /// (`"textpb"`, `"json"`, or `"yaml"`).
    pub fn dump_config(
        &self,
        explicit_path: Option<&str>,
        out_format: &str,
        vars: &HashMap<String, String>,
    ) -> ConfigResult<Vec<u8>> {
        let format: ConfigFormat = out_format.parse()?;
        let (text, in_format) = self.resolver.resolve(explicit_path)?;
        let (cfg, _) = self.parse_config(&text, in_format, vars)?;
        codec::encode(&cfg, format)
    }

    /// Dry-run parse for config validation in CI or pre-deploy checks.
    ///
    /// Expands with a deterministic secret stub (`NAME-test-value`), so the
    /// check neither depends on nor leaks real secrets, then decodes and
    /// discards the result.
    pub fn config_test(
        &self,
        explicit_path: Option<&str>,
        vars: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        let (text, format) = self.resolver.resolve(explicit_path)?;
        let expanded = template::expand(&text, vars, Some(template::test_secret_fn()))?;
        codec::decode(&expanded, format)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::logging::MemoryLogger;
    use crate::secrets::MemoryEnv;
    use crate::source::MemoryFileReader;

    fn loader_with_files(files: &[(&str, &str)]) -> ConfigLoader {
        let reader = MemoryFileReader::new();
        for (path, contents) in files {
            reader.insert(*path, *contents);
        }
        ConfigLoader::new(ConfigResolver::new().with_reader(Box::new(reader)))
    }

    #[test]
    fn test_parse_config_substitutes_secret() {
        let loader = ConfigLoader::new(ConfigResolver::new())
            .with_env(Box::new(MemoryEnv::new().set("TOKEN", "secret123")));

        let text = "probe {\n  name: \"{{ env_secret('TOKEN') }}\"\n  type: \"PING\"\n}\n";
        let (cfg, expanded) = loader
            .parse_config(text, ConfigFormat::TextProto, &HashMap::new())
            .unwrap();

        assert_eq!(cfg.probe[0].name, "secret123");
        // The returned text keeps the placeholder; the secret value stays out
        // of diagnostics.
        assert!(expanded.contains("**$TOKEN**"));
        assert!(!expanded.contains("secret123"));
    }

    #[test]
    fn test_parse_config_unset_secret_keeps_placeholder_and_warns() {
        let logger = Arc::new(MemoryLogger::new());
        let loader = ConfigLoader::new(ConfigResolver::new())
            .with_env(Box::new(MemoryEnv::new()))
            .with_logger(logger.clone());

        let text = "probe {\n  name: \"{{ env_secret('TOKEN') }}\"\n  type: \"PING\"\n}\n";
        let (cfg, _) = loader
            .parse_config(text, ConfigFormat::TextProto, &HashMap::new())
            .unwrap();

        // String-typed field: the literal placeholder survives the decode.
        assert_eq!(cfg.probe[0].name, "**$TOKEN**");
        assert_eq!(logger.warnings().len(), 1);
    }

    #[test]
    fn test_parse_config_with_vars() {
        let loader = loader_with_files(&[]);
        let text = r#"{"host": "{{ region }}-prober"}"#;
        let mut vars = HashMap::new();
        vars.insert("region".to_string(), "us-east1".to_string());

        let (cfg, _) = loader.parse_config(text, ConfigFormat::Json, &vars).unwrap();
        assert_eq!(cfg.host.as_deref(), Some("us-east1-prober"));
    }

    #[test]
    fn test_get_config_passes_through_resolver() {
        let loader = loader_with_files(&[("/prober.yaml", "host: h1\n")]);
        let (text, format) = loader.get_config(Some("/prober.yaml")).unwrap();
        assert_eq!(text, "host: h1\n");
        assert_eq!(format, ConfigFormat::Yaml);
    }

    #[test]
    fn test_dump_config_converts_between_formats() {
        let loader = loader_with_files(&[(
            "/prober.cfg",
            "probe {\n  name: \"ping\"\n  type: \"PING\"\n  targets: \"localhost\"\n}\n",
        )]);

        let json = loader
            .dump_config(Some("/prober.cfg"), "json", &HashMap::new())
            .unwrap();
        let json = String::from_utf8(json).unwrap();
        assert!(json.contains("\"name\": \"ping\""));

        let yaml = loader
            .dump_config(Some("/prober.cfg"), "yaml", &HashMap::new())
            .unwrap();
        let yaml = String::from_utf8(yaml).unwrap();
        assert!(yaml.contains("name: ping"));
    }

    #[test]
    fn test_dump_config_rejects_unknown_out_format() {
        let loader = loader_with_files(&[("/prober.cfg", "port: 80\n")]);
        let err = loader
            .dump_config(Some("/prober.cfg"), "xml", &HashMap::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ref s) if s == "xml"));
    }

    #[test]
    fn test_config_test_never_touches_real_secrets() {
        // No TOKEN in the environment; the stub fabricates a value, so the
        // dry run still succeeds and the placeholder path is never taken.
        let loader = loader_with_files(&[(
            "/prober.cfg",
            "probe {\n  name: \"ping\"\n  type: \"PING\"\n  api_key: \"{{ env_secret('TOKEN') }}\"\n}\n",
        )])
        .with_env(Box::new(MemoryEnv::new()));

        loader.config_test(Some("/prober.cfg"), &HashMap::new()).unwrap();
    }

    #[test]
    fn test_config_test_rejects_invalid_config() {
        let loader = loader_with_files(&[("/prober.cfg", "no_such_field: 1\n")]);
        assert!(loader.config_test(Some("/prober.cfg"), &HashMap::new()).is_err());
    }

    #[test]
    fn test_config_test_rejects_template_error() {
        let loader = loader_with_files(&[("/prober.cfg", "{% broken\n")]);
        let err = loader
            .config_test(Some("/prober.cfg"), &HashMap::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Template(_)));
    }

    #[test]
    fn test_end_to_end_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prober.cfg");
        std::fs::write(
            &path,
            "probe {\n  name: \"web\"\n  type: \"HTTP\"\n  api_key: \"{{ env_secret('WEB_KEY') }}\"\n}\n",
        )
        .unwrap();

        let loader = ConfigLoader::new(ConfigResolver::new())
            .with_env(Box::new(MemoryEnv::new().set("WEB_KEY", "k-123")));

        let (text, format) = loader.get_config(Some(path.to_string_lossy().as_ref())).unwrap();
        assert_eq!(format, ConfigFormat::TextProto);

        let (cfg, _) = loader.parse_config(&text, format, &HashMap::new()).unwrap();
        assert_eq!(cfg.probe[0].api_key.as_deref(), Some("k-123"));
    }
}
