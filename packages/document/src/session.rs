//! The loaded document and its view state.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{DocumentError, Result};
use crate::path::{self, DottedPath, KeyEntry};
use crate::value::{sorted, to_pretty_string};

/// One JSON document loaded from disk.
///
/// The session remembers where the document came from, whether keys are
/// rendered alphabetically, and which path was most recently displayed.
/// `revision` increases on every change to the tree.
#[derive(Debug, Clone)]
pub struct DocumentSession {
    tree: Value,
    source: PathBuf,
    sort_mode: bool,
    last_viewed: Option<DottedPath>,
    revision: u64,
}

impl DocumentSession {
    /// Read and parse the file at `source`.
    pub fn load(source: impl AsRef<Path>, sort_mode: bool) -> Result<Self> {
        let source = source.as_ref();
        let text = fs::read_to_string(source).map_err(|e| DocumentError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;
        let tree: Value = serde_json::from_str(&text).map_err(|e| DocumentError::Parse {
            path: source.to_path_buf(),
            source: e,
        })?;

        tracing::info!(path = %source.display(), sort_mode, "loaded document");
        Ok(Self::from_value(tree, source, sort_mode))
    }

    /// Wrap an in-memory tree.
    pub fn from_value(tree: Value, source: impl Into<PathBuf>, sort_mode: bool) -> Self {
        let tree = if sort_mode { sorted(&tree) } else { tree };
        Self {
            tree,
            source: source.into(),
            sort_mode,
            last_viewed: None,
            revision: 0,
        }
    }

    pub fn tree(&self) -> &Value {
        &self.tree
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn sort_mode(&self) -> bool {
        self.sort_mode
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, path: &DottedPath) -> Result<&Value> {
        path::get(&self.tree, path)
    }

    pub fn set(&mut self, path: &DottedPath, raw: &str) -> Result<()> {
        path::set(&mut self.tree, path, raw)?;
        self.revision += 1;
        tracing::debug!(%path, revision = self.revision, "set property");
        Ok(())
    }

    pub fn delete(&mut self, path: &DottedPath) -> Result<Value> {
        let removed = path::delete(&mut self.tree, path)?;
        self.revision += 1;
        tracing::debug!(%path, revision = self.revision, "deleted property");
        Ok(removed)
    }

    pub fn keys_of(&self, path: &DottedPath) -> Result<Vec<KeyEntry>> {
        path::keys_of(&self.tree, path)
    }

    /// Render the node at `path` (the root when `None`) as indented JSON.
    pub fn serialize(&self, path: Option<&DottedPath>) -> Result<String> {
        let node = match path {
            Some(path) => self.get(path)?,
            None => &self.tree,
        };
        if self.sort_mode {
            to_pretty_string(&sorted(node))
        } else {
            to_pretty_string(node)
        }
    }

    /// Write the whole document to `target`, or back to its source.
    ///
    /// A given target becomes the new source. Returns the path written.
    pub fn save(&mut self, target: Option<&Path>) -> Result<PathBuf> {
        let destination = target.map_or_else(|| self.source.clone(), Path::to_path_buf);
        let mut text = self.serialize(None)?;
        text.push('\n');
        fs::write(&destination, text).map_err(|e| DocumentError::Write {
            path: destination.clone(),
            source: e,
        })?;

        tracing::info!(path = %destination.display(), "saved document");
        self.source = destination.clone();
        Ok(destination)
    }

    pub fn record_last_viewed(&mut self, path: DottedPath) {
        self.last_viewed = Some(path);
    }

    pub fn last_viewed(&self) -> Option<&DottedPath> {
        self.last_viewed.as_ref()
    }

    pub fn clear_last_viewed(&mut self) {
        self.last_viewed = None;
    }
}
