//! Atomic file write helpers.
//!
//! Uses a temp file + rename pattern so a reader never observes a half-written
//! export. On Windows, rename-over-existing fails, so the old file is moved to
//! a `.stellar-bak` sibling and restored if the second persist fails.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileSyncPolicy {
    /// fsync the temp file and best-effort fsync the parent directory.
    #[default]
    SyncAll,
    SkipSync,
}

/// Sibling used while replacing `path` on platforms where rename cannot
/// overwrite. The suffix keeps it clear of files the user owns.
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".stellar-bak");
    path.with_file_name(name)
}

pub fn atomic_write(path: impl AsRef<Path>, bytes: &[u8], sync: FileSyncPolicy) -> io::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    if sync == FileSyncPolicy::SyncAll {
        tmp.as_file().sync_all()?;
    }

    if let Err(err) = tmp.persist(path) {
        if !path.exists() {
            return Err(err.error);
        }
        let backup = backup_path(path);
        let _ = fs::remove_file(&backup);
        fs::rename(path, &backup)?;

        if let Err(rename_err) = err.file.persist(path) {
            let _ = fs::rename(&backup, path);
            return Err(rename_err.error);
        }
        if let Err(e) = fs::remove_file(&backup) {
            tracing::warn!(
                path = %backup.display(),
                "Failed to remove backup after atomic write: {e}"
            );
        }
    }

    if sync == FileSyncPolicy::SyncAll {
        #[cfg(unix)]
        if let Err(e) = fs::File::open(parent).and_then(|d| d.sync_all()) {
            tracing::debug!(path = %parent.display(), "Parent directory sync_all failed (best-effort): {e}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{FileSyncPolicy, atomic_write, backup_path};

    #[test]
    fn atomic_write_overwrites_existing_and_cleans_backup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("trajectory.csv");

        atomic_write(&path, b"one", FileSyncPolicy::SkipSync).expect("write one");
        atomic_write(&path, b"two", FileSyncPolicy::SyncAll).expect("write two");

        let content = fs::read_to_string(&path).expect("read");
        assert_eq!(content, "two");
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn atomic_write_fails_when_parent_is_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.json");
        assert!(atomic_write(&path, b"{}", FileSyncPolicy::SkipSync).is_err());
    }

    #[test]
    fn backup_name_keeps_the_full_file_name() {
        let path = std::path::Path::new("/tmp/results.json");
        assert_eq!(
            backup_path(path),
            std::path::Path::new("/tmp/results.json.stellar-bak")
        );
        assert_ne!(backup_path(path), path.with_extension("bak"));
    }

    #[test]
    fn user_bak_sibling_is_left_alone() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("results.json");
        let user_file = dir.path().join("results.bak");
        fs::write(&user_file, "keep me").expect("seed");

        atomic_write(&path, b"first", FileSyncPolicy::SkipSync).expect("create");
        atomic_write(&path, b"second", FileSyncPolicy::SkipSync).expect("overwrite");

        assert_eq!(fs::read_to_string(&path).expect("read"), "second");
        assert_eq!(fs::read_to_string(&user_file).expect("read bak"), "keep me");
    }
}
