//! Pending output files.
//!
//! Generators never write as they go. They fill a [`BuildOutput`] (destination
//! path → full file content) and the caller applies it in one pass with
//! [`BuildOutput::write_all`]. Every file is replaced wholesale; nothing is
//! patched, so re-running after a partial failure converges.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct BuildOutput {
    files: BTreeMap<PathBuf, String>,
}

impl BuildOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `content` for `path`, replacing anything queued there before.
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: String) {
        self.files.insert(path.into(), content);
    }

    /// Fold another output into this one.
    pub fn extend(&mut self, other: BuildOutput) {
        self.files.extend(other.files);
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Destination paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    /// Write every queued file, creating parent directories as needed.
    pub fn write_all(&self) -> std::io::Result<usize> {
        for (path, content) in &self.files {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
            log::debug!("wrote {}", path.display());
        }
        Ok(self.files.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn later_insert_replaces_earlier() {
        let mut out = BuildOutput::new();
        out.insert("a.html", "one".to_string());
        out.insert("a.html", "two".to_string());
        assert_eq!(out.len(), 1);
        assert_eq!(out.get(Path::new("a.html")), Some("two"));
    }

    #[test]
    fn extend_merges_outputs() {
        let mut a = BuildOutput::new();
        a.insert("a.html", "a".to_string());
        let mut b = BuildOutput::new();
        b.insert("b.html", "b".to_string());
        a.extend(b);
        let paths: Vec<_> = a.paths().collect();
        assert_eq!(paths, vec![Path::new("a.html"), Path::new("b.html")]);
    }

    #[test]
    fn write_all_creates_directories_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("deep/nested/page.html");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, "stale").unwrap();

        let mut out = BuildOutput::new();
        out.insert(&target, "fresh".to_string());
        out.insert(tmp.path().join("top.html"), "top".to_string());
        assert_eq!(out.write_all().unwrap(), 2);

        assert_eq!(fs::read_to_string(&target).unwrap(), "fresh");
        assert_eq!(fs::read_to_string(tmp.path().join("top.html")).unwrap(), "top");
    }

    #[test]
    fn empty_output_writes_nothing() {
        let out = BuildOutput::new();
        assert!(out.is_empty());
        assert_eq!(out.write_all().unwrap(), 0);
    }
}
