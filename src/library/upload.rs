//! Saving uploaded files into a library folder

use std::fs;
use std::path::{Path, PathBuf};

use super::cache::Invalidate;
use crate::config::ExtensionFilter;
use crate::error::{Error, Result};

/// A file handed over by the uploader: its name and raw content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file picked from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Ok(Self { name, bytes })
    }
}

/// Result of one upload batch
#[derive(Debug, Default)]
pub struct UploadOutcome {
    pub saved: Vec<PathBuf>,
    /// Files refused by the extension filter; they are not written
    pub rejected: Vec<Error>,
}

/// Write every accepted file to `destination/<name>`, then invalidate
/// everything cached for `destination`.
///
/// Only the final component of an uploaded name is used, so a name can
/// never point outside `destination`. Existing files are overwritten.
/// A failed write stops the batch, but the caches are invalidated first
/// since earlier files may already be on disk.
pub fn save_uploaded_files(
    files: &[UploadedFile],
    destination: &Path,
    filter: &ExtensionFilter,
    caches: &[&dyn Invalidate],
) -> Result<UploadOutcome> {
    let mut outcome = UploadOutcome::default();
    let written = write_files(files, destination, filter, &mut outcome);

    for cache in caches {
        cache.invalidate(destination);
    }

    written.map(|()| outcome)
}

fn write_files(
    files: &[UploadedFile],
    destination: &Path,
    filter: &ExtensionFilter,
    outcome: &mut UploadOutcome,
) -> Result<()> {
    for file in files {
        let Some(name) = Path::new(&file.name).file_name() else {
            log::warn!("Ignoring upload with empty name");
            outcome.rejected.push(Error::RejectedUpload {
                name: file.name.clone(),
            });
            continue;
        };

        if !filter.matches(&name.to_string_lossy()) {
            log::warn!("Rejected upload {}: file type not accepted", file.name);
            outcome.rejected.push(Error::RejectedUpload {
                name: file.name.clone(),
            });
            continue;
        }

        let full_path = destination.join(name);
        fs::write(&full_path, &file.bytes).map_err(|e| Error::io(&full_path, e))?;
        log::info!("Saved upload to {}", full_path.display());
        outcome.saved.push(full_path);
    }

    Ok(())
}
