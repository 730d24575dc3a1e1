//! Named resource access and the process-wide engine.

use crate::config::PinyinConfig;
use crate::core::engine::PinyinEngine;
use crate::core::types::{CodePoint, PhraseMatch, Reading};
use crate::error::{PinyinError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Opens a dictionary table by name.
pub trait ResourceProvider: Send + Sync {
    fn open(&self, name: &str) -> Result<Box<dyn BufRead + Send>>;
}

/// Resolves names relative to a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceProvider for DirectoryResources {
    fn open(&self, name: &str) -> Result<Box<dyn BufRead + Send>> {
        let path = self.root.join(name);
        match File::open(&path) {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(PinyinError::ResourceNotFound(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory tables, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    tables: HashMap<String, Vec<u8>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, data: impl Into<Vec<u8>>) -> Self {
        self.tables.insert(name.to_string(), data.into());
        self
    }
}

impl ResourceProvider for MemoryResources {
    fn open(&self, name: &str) -> Result<Box<dyn BufRead + Send>> {
        self.tables
            .get(name)
            .map(|data| Box::new(Cursor::new(data.clone())) as Box<dyn BufRead + Send>)
            .ok_or_else(|| PinyinError::ResourceNotFound(name.to_string()))
    }
}

static ENGINE: OnceLock<PinyinEngine> = OnceLock::new();

/// The shared engine, built on first access from [`PinyinConfig::from_env`].
///
/// Concurrent first callers block until the single build finishes. A failed
/// load leaves an empty engine, so every lookup simply misses.
pub fn global() -> &'static PinyinEngine {
    ENGINE.get_or_init(|| PinyinEngine::from_config(&PinyinConfig::from_env()))
}

/// Supplies the shared engine before anything has touched it.
/// Hands the engine back if the global was already initialized.
pub fn install(engine: PinyinEngine) -> std::result::Result<(), PinyinEngine> {
    ENGINE.set(engine)
}

/// Candidate readings for a code point from the shared engine.
pub fn lookup(cp: CodePoint) -> &'static [Reading] {
    global().lookup_code_point(cp)
}

/// Longest phrase override at `start` from the shared engine.
pub fn lookup_phrase(seq: &[CodePoint], start: usize) -> Option<PhraseMatch> {
    global().lookup_phrase(seq, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn memory_resources_open_by_name() {
        let resources = MemoryResources::new().with("a.txt", "20013=[ZHONG1]\n");
        let mut text = String::new();
        resources.open("a.txt").unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "20013=[ZHONG1]\n");
        assert!(matches!(
            resources.open("missing.txt"),
            Err(PinyinError::ResourceNotFound(_))
        ));
    }

    #[test]
    fn directory_resources_report_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let resources = DirectoryResources::new(dir.path());
        assert!(matches!(
            resources.open("nope.txt"),
            Err(PinyinError::ResourceNotFound(_))
        ));
    }
}
