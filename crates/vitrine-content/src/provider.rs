//! `ContentProvider` implementations.
//!
//! - `StaticContentProvider`: bodies held in memory, keyed by name
//! - `DirectoryContentProvider`: bodies read from files under one root
//!
//! Both report a missing key as `VitrineError::NotFound` so the cache can
//! tell "absent" apart from "failed to read".

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

use tracing::debug;

use vitrine_contracts::error::{EntityKind, VitrineError, VitrineResult};
use vitrine_core::traits::ContentProvider;

fn not_found(key: &str) -> VitrineError {
    VitrineError::NotFound {
        kind: EntityKind::Resource,
        key: key.to_string(),
    }
}

/// In-memory bodies.
#[derive(Debug, Clone, Default)]
pub struct StaticContentProvider {
    bodies: HashMap<String, Vec<u8>>,
}

impl StaticContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(key, body);
        self
    }

    /// Store `body` under `key`, replacing any previous body.
    pub fn insert(&mut self, key: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.bodies.insert(key.into(), body.into());
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl ContentProvider for StaticContentProvider {
    fn load_content(&self, key: &str) -> VitrineResult<Vec<u8>> {
        self.bodies.get(key).cloned().ok_or_else(|| not_found(key))
    }
}

/// Reads `<root>/<key>` from disk.
///
/// Keys are relative paths. Absolute keys and keys that climb out of the
/// root (`..`) are rejected with `ContentUnavailable` before any I/O.
#[derive(Debug, Clone)]
pub struct DirectoryContentProvider {
    root: PathBuf,
}

impl DirectoryContentProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> VitrineResult<PathBuf> {
        let rel = Path::new(key);
        let confined = !key.is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !confined {
            return Err(VitrineError::ContentUnavailable {
                key: key.to_string(),
                reason: "key must be a relative path inside the content root".to_string(),
            });
        }
        Ok(self.root.join(rel))
    }
}

impl ContentProvider for DirectoryContentProvider {
    fn load_content(&self, key: &str) -> VitrineResult<Vec<u8>> {
        let path = self.resolve(key)?;
        debug!(key = %key, path = %path.display(), "reading content file");
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => not_found(key),
            _ => VitrineError::ContentUnavailable {
                key: key.to_string(),
                reason: e.to_string(),
            },
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
