//! Recursive directory scanning

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::time::SystemTime;
use walkdir::WalkDir;

use super::data::{Collection, Item};
use crate::config::ExtensionFilter;
use crate::error::{Error, Result};

/// Scan `root` and every directory below it for accepted files.
///
/// Entries are visited sorted by file name inside each directory, so two
/// scans of an unchanged tree give the same items in the same order.
/// Errors while walking (missing root, permissions) are returned.
pub fn scan_directory(root: &Path, filter: &ExtensionFilter) -> Result<Collection> {
    let root = root.canonicalize().map_err(|e| Error::io(root, e))?;
    log::debug!("Scanning folder: {}", root.display());

    let mut items = Vec::new();

    // Walk the directory tree recursively
    for entry in WalkDir::new(&root)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;

        // Only process files (not directories)
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !filter.matches(&file_name) {
            continue;
        }

        items.push(Item::new(entry.into_path()));
    }

    log::debug!("Found {} files under {}", items.len(), root.display());
    Ok(Collection::new(root, items))
}

/// Fingerprint of a directory tree's current state.
///
/// Folds the relative path, size and modification time of every entry
/// under `root`; any rename, add, delete or rewrite changes it.
pub fn directory_signature(root: &Path) -> Result<u64> {
    let mut hasher = DefaultHasher::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let metadata = entry.metadata()?;

        entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .hash(&mut hasher);
        metadata.len().hash(&mut hasher);
        metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
            .hash(&mut hasher);
    }

    Ok(hasher.finish())
}
