//! Script source abstraction for reading XGC files from disk or memory.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;

/// Trait for abstracting where scripts come from.
pub trait ScriptSource {
    /// Read the script at the given path.
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String>;
    /// List `.xgc` scripts below a directory, sorted by path.
    fn list_scripts(&mut self, dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>>;
}

/// Reads scripts directly from the local filesystem.
pub struct FsSource;

impl ScriptSource for FsSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        std::fs::read_to_string(path.as_std_path()).with_context(|| format!("Failed to read {}", path))
    }

    fn list_scripts(&mut self, dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(dir.as_std_path()) {
            let entry = entry.with_context(|| format!("Walk {}", dir))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = Utf8PathBuf::from_path_buf(entry.into_path())
                .map_err(|p| anyhow::anyhow!("Non-UTF8 path {}", p.display()))?;
            if is_xgc(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

/// In-memory scripts keyed by path, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemSource {
    pub files: BTreeMap<Utf8PathBuf, String>,
}

impl MemSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<Utf8PathBuf>, script: impl Into<String>) {
        self.files.insert(path.into(), script.into());
    }
}

impl ScriptSource for MemSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("not found: {}", path))
    }

    fn list_scripts(&mut self, dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
        // BTreeMap keys are already sorted.
        Ok(self
            .files
            .keys()
            .filter(|p| p.starts_with(dir) && is_xgc(p))
            .cloned()
            .collect())
    }
}

/// True for paths with an `.xgc` extension (any case).
pub fn is_xgc(path: &Utf8Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("xgc"))
}
