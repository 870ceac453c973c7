//! Named byte sources for the context loader

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ChatError, Result};

/// Recognized context file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    Pdf,
}

impl SourceKind {
    /// Classify a file name by its extension (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        if lower.ends_with(".txt") {
            Some(Self::Text)
        } else if lower.ends_with(".pdf") {
            Some(Self::Pdf)
        } else {
            None
        }
    }
}

/// A file name paired with its raw content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    /// Create a source from an in-memory buffer
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a whole file; the source is named after the final path component
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ChatError::InvalidInput(format!("not a file: {}", path.display())))?;
        let bytes = fs::read(path)?;
        debug!("Read {} ({} bytes)", path.display(), bytes.len());
        Ok(Self { name, bytes })
    }

    /// The recognized format of this source, if any
    pub fn kind(&self) -> Option<SourceKind> {
        SourceKind::from_name(&self.name)
    }
}

/// Read every recognized file directly inside `dir`, sorted by path
///
/// Subdirectories are not descended into.
pub fn scan_directory(dir: impl AsRef<Path>) -> Result<Vec<SourceFile>> {
    let dir = dir.as_ref();
    let mut paths: Vec<PathBuf> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let recognized = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(SourceKind::from_name)
            .is_some();
        if recognized && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    debug!("Found {} context files in {}", paths.len(), dir.display());
    paths.iter().map(SourceFile::read).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_source_kind_from_name() {
        assert_eq!(SourceKind::from_name("notes.txt"), Some(SourceKind::Text));
        assert_eq!(SourceKind::from_name("NOTES.TXT"), Some(SourceKind::Text));
        assert_eq!(SourceKind::from_name("report.Pdf"), Some(SourceKind::Pdf));
        assert_eq!(SourceKind::from_name("image.png"), None);
        assert_eq!(SourceKind::from_name("txt"), None);
        assert_eq!(SourceKind::from_name("archive.pdf.zip"), None);
    }

    #[test]
    fn test_read_names_source_after_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "hello").unwrap();

        let source = SourceFile::read(&path).unwrap();
        assert_eq!(source.name, "a.txt");
        assert_eq!(source.bytes, b"hello");
        assert_eq!(source.kind(), Some(SourceKind::Text));
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = tempdir().unwrap();
        assert!(SourceFile::read(dir.path().join("missing.txt")).is_err());
    }

    #[test]
    fn test_scan_directory_filters_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.TXT"), "a").unwrap();
        fs::write(dir.path().join("c.md"), "c").unwrap();
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let sources = scan_directory(dir.path()).unwrap();
        let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a.TXT", "b.txt"]);
    }

    #[test]
    fn test_scan_missing_directory_fails() {
        let dir = tempdir().unwrap();
        assert!(scan_directory(dir.path().join("nope")).is_err());
    }
}
