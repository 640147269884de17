//! Configuration source resolution
//!
//! Locates raw configuration text from an ordered chain of candidates:
//! explicit path, configured path, cloud instance metadata, well-known disk
//! path, built-in default. The file-reading and metadata back ends are
//! pluggable:
//! - `DiskFileReader` / `MemoryFileReader`
//! - `NoCloudMetadata` / `MemoryMetadata`

mod file;
mod metadata;
mod resolver;

pub use file::{DiskFileReader, FileReader, MemoryFileReader};
pub use metadata::{
    MemoryMetadata, MetadataError, MetadataSource, NoCloudMetadata, CONFIG_METADATA_KEY,
};
pub use resolver::{ConfigResolver, DEFAULT_CONFIG, DEFAULT_CONFIG_PATH};
