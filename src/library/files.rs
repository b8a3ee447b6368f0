//! Rename and delete operations behind the details panel submit button
//!
//! A rename whose target already exists and a delete whose file is already
//! gone are expected races between viewers of the same folder: both are
//! logged at warning level and treated as no-ops. Any other I/O error is
//! returned to the caller.
//!
//! A rename never replaces an existing file: the new name is linked first
//! and the old one removed only once the link succeeded.

use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// What a submit actually did to the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileUpdate {
    Renamed { from: PathBuf, to: PathBuf },
    Deleted(PathBuf),
    /// The new name equals the current one
    Unchanged,
    /// Rename target existed or delete target was missing
    Skipped,
}

impl FileUpdate {
    /// Whether the folder content changed and cached layouts are stale
    pub fn changed_disk(&self) -> bool {
        matches!(self, FileUpdate::Renamed { .. } | FileUpdate::Deleted(_))
    }
}

/// `path` with its stem replaced by `new_stem`, extension preserved
pub fn with_stem(path: &Path, new_stem: &str) -> PathBuf {
    let file_name = match path.extension() {
        Some(ext) => format!("{}.{}", new_stem, ext.to_string_lossy()),
        None => new_stem.to_string(),
    };
    path.with_file_name(file_name)
}

/// Whether `name` can be used as a file name inside the current folder
fn is_plain_name(name: &str) -> bool {
    Path::new(name).file_name() == Some(OsStr::new(name))
}

/// Rename `old_file` to `new_stem`, keeping its extension.
///
/// `new_stem` must be a single path component; separators, `.` and `..`
/// are rejected with [`Error::InvalidName`].
pub fn rename_file(old_file: &Path, new_stem: &str) -> Result<FileUpdate> {
    if !is_plain_name(new_stem) {
        return Err(Error::InvalidName {
            name: new_stem.to_string(),
        });
    }

    let target = with_stem(old_file, new_stem);

    if target == old_file {
        return Ok(FileUpdate::Unchanged);
    }

    match fs::hard_link(old_file, &target) {
        Ok(()) => {
            if let Err(e) = fs::remove_file(old_file) {
                // Leave the folder as it was
                let _ = fs::remove_file(&target);
                return Err(Error::io(old_file, e));
            }
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(target_exists(old_file, &target)),
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(Error::io(old_file, e)),
        Err(e) => {
            // No hard links on this filesystem (FAT, some network shares)
            log::debug!("Cannot link {}: {}, renaming in place", target.display(), e);
            if fs::symlink_metadata(&target).is_ok() {
                return Ok(target_exists(old_file, &target));
            }
            fs::rename(old_file, &target).map_err(|e| Error::io(old_file, e))?;
        }
    }
    log::info!("Renamed {} to {}", old_file.display(), target.display());

    Ok(FileUpdate::Renamed {
        from: old_file.to_path_buf(),
        to: target,
    })
}

fn target_exists(old_file: &Path, target: &Path) -> FileUpdate {
    log::warn!(
        "Not renaming {}: {} already exists",
        old_file.display(),
        target.display()
    );
    FileUpdate::Skipped
}

/// Permanently delete `file`
pub fn delete_file(file: &Path) -> Result<FileUpdate> {
    match fs::remove_file(file) {
        Ok(()) => {
            log::info!("Deleted {}", file.display());
            Ok(FileUpdate::Deleted(file.to_path_buf()))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("Not deleting {}: file is already gone", file.display());
            Ok(FileUpdate::Skipped)
        }
        Err(e) => Err(Error::io(file, e)),
    }
}

/// Apply a details-panel submit: delete when `delete` is set, rename otherwise
pub fn update_file(old_file: &Path, new_stem: &str, delete: bool) -> Result<FileUpdate> {
    if delete {
        delete_file(old_file)
    } else {
        rename_file(old_file, new_stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::cell::RefCell;
    use std::sync::Once;
    use tempfile::tempdir;

    thread_local! {
        static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
    }

    /// Keeps records per test thread so parallel tests do not see each other
    struct CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            RECORDS.with(|r| r.borrow_mut().push((record.level(), record.args().to_string())));
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;
    static INIT: Once = Once::new();

    fn capture_logs() {
        INIT.call_once(|| {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(LevelFilter::Trace);
        });
        RECORDS.with(|r| r.borrow_mut().clear());
    }

    fn records_at(level: Level) -> Vec<String> {
        RECORDS.with(|r| {
            r.borrow()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, message)| message.clone())
                .collect()
        })
    }

    #[test]
    fn test_rename_keeps_extension() {
        let dir = tempdir().unwrap();
        let photo = dir.path().join("photo.jpg");
        fs::write(&photo, b"one").unwrap();

        let update = update_file(&photo, "holiday", false).unwrap();
        let renamed = dir.path().join("holiday.jpg");
        assert_eq!(
            update,
            FileUpdate::Renamed {
                from: photo.clone(),
                to: renamed.clone()
            }
        );
        assert!(update.changed_disk());
        assert!(!photo.exists());
        assert_eq!(fs::read(&renamed).unwrap(), b"one");
    }

    #[test]
    fn test_rename_onto_existing_is_skipped() {
        let dir = tempdir().unwrap();
        let photo = dir.path().join("photo.jpg");
        let taken = dir.path().join("photo2.jpg");
        fs::write(&photo, b"original").unwrap();
        fs::write(&taken, b"other").unwrap();

        capture_logs();
        let update = rename_file(&photo, "photo2").unwrap();
        assert_eq!(update, FileUpdate::Skipped);
        assert!(!update.changed_disk());
        assert_eq!(fs::read(&photo).unwrap(), b"original");
        assert_eq!(fs::read(&taken).unwrap(), b"other");

        let warnings = records_at(Level::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("already exists"));
        assert!(records_at(Level::Error).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_rename_never_replaces_a_dangling_link() {
        let dir = tempdir().unwrap();
        let photo = dir.path().join("photo.jpg");
        let link = dir.path().join("photo2.jpg");
        fs::write(&photo, b"original").unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), &link).unwrap();

        assert_eq!(rename_file(&photo, "photo2").unwrap(), FileUpdate::Skipped);
        assert_eq!(fs::read(&photo).unwrap(), b"original");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    }

    #[test]
    fn test_rename_rejects_names_outside_the_folder() {
        let dir = tempdir().unwrap();
        let library = dir.path().join("library");
        fs::create_dir(&library).unwrap();
        let photo = library.join("photo.jpg");
        fs::write(&photo, b"x").unwrap();

        for name in ["../escaped", "sub/name", "", ".", ".."] {
            let result = update_file(&photo, name, false);
            assert!(
                matches!(&result, Err(Error::InvalidName { name: n }) if n == name),
                "{:?} gave {:?}",
                name,
                result
            );
        }

        assert_eq!(fs::read(&photo).unwrap(), b"x");
        let mut entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        entries.sort();
        assert_eq!(entries, vec![OsStr::new("library").to_os_string()]);
        assert_eq!(fs::read_dir(&library).unwrap().count(), 1);
    }

    #[test]
    fn test_rename_to_same_name() {
        let dir = tempdir().unwrap();
        let photo = dir.path().join("photo.jpg");
        fs::write(&photo, b"x").unwrap();

        assert_eq!(rename_file(&photo, "photo").unwrap(), FileUpdate::Unchanged);
        assert!(photo.exists());
    }

    #[test]
    fn test_rename_missing_source_propagates() {
        let dir = tempdir().unwrap();
        let result = rename_file(&dir.path().join("gone.png"), "other");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_delete() {
        let dir = tempdir().unwrap();
        let photo = dir.path().join("photo.png");
        fs::write(&photo, b"x").unwrap();

        assert_eq!(
            update_file(&photo, "ignored", true).unwrap(),
            FileUpdate::Deleted(photo.clone())
        );
        assert!(!photo.exists());

        capture_logs();
        assert_eq!(delete_file(&photo).unwrap(), FileUpdate::Skipped);
        let warnings = records_at(Level::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("already gone"));
        assert!(records_at(Level::Error).is_empty());
    }

    #[test]
    fn test_delete_directory_propagates() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub.png");
        fs::create_dir(&sub).unwrap();
        assert!(delete_file(&sub).is_err());
    }

    #[test]
    fn test_with_stem() {
        assert_eq!(
            with_stem(Path::new("/a/b/photo.tar.gz"), "x"),
            PathBuf::from("/a/b/x.gz")
        );
        assert_eq!(with_stem(Path::new("/a/README"), "x"), PathBuf::from("/a/x"));
    }
}
