//! File-reading collaborators

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::RwLock;

/// Scheme-agnostic file reader
///
/// The resolver only needs a single read-everything call plus an existence
/// probe for the default-path check. Implementations may be backed by local
/// disk or, later, object storage.
pub trait FileReader: Send + Sync {
    /// Read the full contents of the file at `path`.
    fn read_file(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Whether a file exists at `path`, without reading it.
    fn exists(&self, path: &str) -> bool;
}

/// Local-disk file reader
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFileReader;

impl DiskFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl FileReader for DiskFileReader {
    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }
}

/// In-memory file reader for tests
#[derive(Debug, Default)]
pub struct MemoryFileReader {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryFileReader {
    /// Create a new empty reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert(&self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), contents.into());
    }
}

impl FileReader for MemoryFileReader {
    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        self.files.read().unwrap().get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}"))
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.files.read().unwrap().contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reader() {
        let reader = MemoryFileReader::new();
        assert!(!reader.exists("/etc/prober.cfg"));
        assert!(reader.read_file("/etc/prober.cfg").is_err());

        reader.insert("/etc/prober.cfg", "host: \"h1\"");
        assert!(reader.exists("/etc/prober.cfg"));
        assert_eq!(reader.read_file("/etc/prober.cfg").unwrap(), b"host: \"h1\"");
    }

    #[test]
    fn test_disk_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prober.cfg");
        std::fs::write(&path, "port: 80\n").unwrap();

        let reader = DiskFileReader::new();
        let path = path.to_string_lossy();
        assert!(reader.exists(&path));
        assert_eq!(reader.read_file(&path).unwrap(), b"port: 80\n");
        assert!(!reader.exists(dir.path().join("missing.cfg").to_string_lossy().as_ref()));
    }
}
