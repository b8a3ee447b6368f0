//! Shared data structures for the library
//!
//! These structs represent the data model that flows between
//! the directory scanner, the layout engine and the UI layer.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Represents a single image file found on disk
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Item {
    /// Full, resolved path to the file
    path: PathBuf,
    /// Filename only (e.g., "photo.jpg")
    name: String,
}

impl Item {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filename without its extension
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// Ordered set of items produced by one directory scan
///
/// Duplicates are kept; the order is the scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Collection {
    root: PathBuf,
    items: Vec<Item>,
}

impl Collection {
    pub fn new(root: PathBuf, items: Vec<Item>) -> Self {
        Self { root, items }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
