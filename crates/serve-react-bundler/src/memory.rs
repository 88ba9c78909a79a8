//! In-memory output store for build artifacts.
//!
//! Build output never touches disk: the compile pass writes every chunk and
//! asset into this store, and the dev server reads from it on each request.
//! The store is written once before the listener starts and read-only
//! afterwards, so a plain RwLock is all the coordination needed.

use parking_lot::RwLock;
use std::collections::HashMap;

/// URL path the entry chunk is stored under.
pub const BUNDLE_PATH: &str = "/bundle.js";

/// In-memory filesystem for compiled artifacts.
///
/// Maps URL paths (e.g. `/bundle.js`) to their content and MIME type.
#[derive(Debug, Default)]
pub struct MemoryOutput {
    files: RwLock<HashMap<String, (Vec<u8>, String)>>,
}

impl MemoryOutput {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an artifact.
    ///
    /// # Arguments
    ///
    /// * `path` - URL path (e.g. "/bundle.js")
    /// * `content` - Artifact content as bytes
    /// * `content_type` - MIME type (e.g. "application/javascript")
    pub fn insert(&self, path: impl Into<String>, content: Vec<u8>, content_type: impl Into<String>) {
        self.files
            .write()
            .insert(path.into(), (content, content_type.into()));
    }

    /// Get an artifact by URL path.
    ///
    /// Returns `(content, content_type)` if present.
    pub fn get(&self, path: &str) -> Option<(Vec<u8>, String)> {
        self.files.read().get(path).cloned()
    }

    /// Check whether an artifact exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.files.read().contains_key(path)
    }

    /// All stored artifact paths, sorted for stable display.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.read().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Number of stored artifacts.
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    /// Remove all artifacts.
    pub fn clear(&self) {
        self.files.write().clear();
    }
}
