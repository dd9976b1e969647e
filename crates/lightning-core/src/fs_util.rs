//! Whole-file reads and atomic replacement

use crate::error::{Result, VaultError};
use std::fs::Permissions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Read a file, mapping failures to [`VaultError::Io`].
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| VaultError::io(path, e))
}

/// Replace `path` with `contents`.
///
/// The new bytes go to a temporary file in the same directory which is then
/// renamed over the target, so readers see either the old or the new file.
/// An existing file keeps its permissions, a symlink keeps pointing at the
/// file it names, and a new file gets the mode the process umask allows.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let target = resolve_target(path)?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| VaultError::io(&dir, e))?;
    }

    let existing = match std::fs::metadata(&target) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(VaultError::io(&target, e)),
    };

    let mut tmp = temp_file_in(&dir, existing).map_err(|e| VaultError::io(&dir, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| VaultError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| VaultError::io(tmp.path(), e))?;
    tmp.persist(&target)
        .map_err(|e| VaultError::io(&target, e.error))?;
    Ok(())
}

/// The regular file a write to `path` should land on.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            std::fs::canonicalize(path).map_err(|e| VaultError::io(path, e))
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn temp_file_in(dir: &Path, existing: Option<Permissions>) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    if existing.is_none() {
        if let Some(permissions) = new_file_permissions() {
            builder.permissions(permissions);
        }
    }

    let tmp = builder.tempfile_in(dir)?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions)?;
    }
    Ok(tmp)
}

// Filtered by the umask at creation, like any newly created file
#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}
