// shadowmod-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::Builder;

/// Replaces `path` with `content` in one rename. Readers (and a toolchain
/// started right after) see either the previous file or the complete new one.
///
/// The staging file is a hidden sibling of `path`; it is removed by `tempfile`
/// if anything fails before the rename.
pub fn atomic_write(path: &Path, content: impl AsRef<[u8]>) -> Result<(), InfrastructureError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = Builder::new().prefix(".shadowmod-").tempfile_in(dir)?;
    staged.write_all(content.as_ref())?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| InfrastructureError::Io(e.error))?;
    Ok(())
}

/// Removes a file, treating "already gone" as success.
/// Returns `true` when a file was actually deleted.
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<bool, std::io::Error> {
    match fs::remove_file(path.as_ref()) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
