//! Atomic file replacement with a one-time backup.
//!
//! Content goes to `<path>.tmp` first. Before the first replacement the
//! existing file is renamed to `<path>.orig`; that backup is never touched
//! again. The temporary file is then renamed onto `path`, so readers see
//! either the old file or the new one, never a partial write.

use crate::error::Result;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Suffix of the one-time backup of the original file.
pub const BACKUP_SUFFIX: &str = ".orig";

/// Suffix of the scratch file written before the final rename.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Returns `<path>.orig`.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, BACKUP_SUFFIX)
}

/// Returns `<path>.tmp`.
#[must_use]
pub fn temp_path(path: &Path) -> PathBuf {
    with_suffix(path, TEMP_SUFFIX)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Replaces `path` with `contents`.
///
/// A stray temporary file from an earlier crash is overwritten. If `path`
/// does not exist yet there is nothing to back up and the backup step is
/// skipped.
///
/// # Errors
///
/// Returns [`HostsError::Io`](crate::HostsError::Io) if the temporary file
/// cannot be written or either rename fails. A backup created before a
/// failed final rename is left in place.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = temp_path(path);
    {
        let mut file = std::fs::File::create(&tmp)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
    }

    let backup = backup_path(path);
    if backup.exists() {
        tracing::debug!(backup = %backup.display(), "Backup already exists, keeping it");
    } else if path.exists() {
        std::fs::rename(path, &backup)?;
        tracing::info!(
            path = %path.display(),
            backup = %backup.display(),
            "Saved original hosts file"
        );
    }

    std::fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Replaced file");
    Ok(())
}
