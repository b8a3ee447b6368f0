//! Explicit memoization of built layouts
//!
//! Entries are keyed by the directory, a signature of its current content
//! and the options used to build the layout. A changed folder therefore
//! misses on its own; `invalidate` and `clear` drop entries on demand, e.g.
//! after an upload.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::scan::directory_signature;
use crate::error::Result;

/// Keys use the resolved path so `assets/` and `./assets` share entries
fn canonical(root: &Path) -> PathBuf {
    root.canonicalize().unwrap_or_else(|_| root.to_path_buf())
}

/// Anything holding state derived from a folder's content
pub trait Invalidate {
    /// Forget everything derived from `root`
    fn invalidate(&self, root: &Path);
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutKey<O> {
    pub root: PathBuf,
    pub signature: u64,
    pub options: O,
}

/// Thread-safe map from [`LayoutKey`] to a shared, previously built value
#[derive(Debug)]
pub struct LayoutCache<O, V> {
    entries: Mutex<HashMap<LayoutKey<O>, Arc<V>>>,
}

impl<O, V> Default for LayoutCache<O, V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<O, V> LayoutCache<O, V>
where
    O: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<LayoutKey<O>, Arc<V>>> {
        // A panic while holding the lock leaves the map itself intact
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the cached value for `root` + `options`, building it with
    /// `build` when the folder changed or nothing is cached yet
    pub fn get_or_build<F>(&self, root: &Path, options: &O, build: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Result<V>,
    {
        let root = &canonical(root);
        let key = LayoutKey {
            root: root.to_path_buf(),
            signature: directory_signature(root)?,
            options: options.clone(),
        };

        if let Some(hit) = self.entries().get(&key) {
            log::debug!("Layout cache hit for {}", root.display());
            return Ok(Arc::clone(hit));
        }

        log::debug!("Layout cache miss for {}", root.display());
        let value = Arc::new(build()?);

        let mut entries = self.entries();
        // Older signatures of the same folder can never hit again
        entries.retain(|k, _| !(k.root == key.root && k.options == key.options));
        entries.insert(key, Arc::clone(&value));
        Ok(value)
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl<O, V> Invalidate for LayoutCache<O, V>
where
    O: Clone + Eq + Hash,
{
    fn invalidate(&self, root: &Path) {
        let root = canonical(root);
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|k, _| k.root != root);
        log::debug!(
            "Invalidated {} cached layouts for {}",
            before - entries.len(),
            root.display()
        );
    }
}
