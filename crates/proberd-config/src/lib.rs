//! proberd configuration loading
//!
//! Resolves the prober daemon's runtime configuration from an ordered chain
//! of sources, expands it through a templating pass with a secret-placeholder
//! convention, and decodes it from any of three equivalent textual formats.
//!
//! ## Resolution chain
//!
//! First source that yields text wins:
//!
//! 1. explicit path argument
//! 2. path configured at start-up (flag value, passed in explicitly)
//! 3. cloud instance metadata (lookup failure falls through)
//! 4. well-known default disk path
//! 5. built-in default configuration
//!
//! ## Text pipeline
//!
//! Raw text goes through two independent rewriting stages before decoding:
//! template expansion (variables, conditionals, the `env_secret` function)
//! and secret placeholder substitution (`**$NAME**` markers replaced from
//! the environment, missing variables warn instead of failing).
//!
//! ## Formats
//!
//! TextProto, JSON, and YAML carry the same information; a configuration can
//! be decoded from one and re-encoded to another for inspection.
//!
//! ## Example
//!
//! ```
//! use proberd_config::{ConfigLoader, ConfigResolver, MemoryFileReader};
//! use std::collections::HashMap;
//!
//! let resolver = ConfigResolver::new().with_reader(Box::new(MemoryFileReader::new()));
//! let loader = ConfigLoader::new(resolver);
//! // No sources configured anywhere: the built-in default applies.
//! let (text, format) = loader.get_config(None).unwrap();
//! let (cfg, _expanded) = loader.parse_config(&text, format, &HashMap::new()).unwrap();
//! assert_eq!(cfg.probe[0].name, "default-self");
//! ```

pub mod codec;
pub mod error;
pub mod format;
pub mod loader;
pub mod logging;
pub mod schema;
pub mod secrets;
pub mod source;
pub mod template;
pub mod textpb;

// Re-export commonly used types
pub use codec::{decode, encode};
pub use error::{ConfigError, ConfigResult};
pub use format::ConfigFormat;
pub use loader::ConfigLoader;
pub use logging::{ConsoleLogger, Logger, MemoryLogger, NoOpLogger, SharedLogger};
pub use schema::{Probe, ProberConfig};
pub use secrets::{placeholder_for, substitute_placeholders, EnvSource, MemoryEnv, RealEnv};
pub use source::{
    ConfigResolver, DiskFileReader, FileReader, MemoryFileReader, MemoryMetadata, MetadataError,
    MetadataSource, NoCloudMetadata, CONFIG_METADATA_KEY, DEFAULT_CONFIG, DEFAULT_CONFIG_PATH,
};
pub use template::{expand, SecretFn};
