//! Filesystem helpers mapping I/O failures onto [`ScaffoldError`]

use std::fs;
use std::path::Path;

use crate::error::{Result, ScaffoldError};

/// Read a UTF-8 file
///
/// # Errors
///
/// Returns [`ScaffoldError::Io`] if the file cannot be read.
pub fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| ScaffoldError::io("read", path, err))
}

/// Write a file, creating parent directories as needed
///
/// # Errors
///
/// Returns [`ScaffoldError::Io`] if a directory or the file cannot be written.
pub fn write(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).map_err(|err| ScaffoldError::io("write", path, err))
}

/// Create a directory tree; returns whether anything was created
///
/// # Errors
///
/// Returns [`ScaffoldError::Io`] if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|err| ScaffoldError::io("create directory", path, err))?;
    Ok(true)
}

/// Copy a file
///
/// # Errors
///
/// Returns [`ScaffoldError::Io`] if the copy fails.
pub fn copy(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|err| ScaffoldError::io("copy", from, err))
}

/// Remove a file
///
/// # Errors
///
/// Returns [`ScaffoldError::Io`] if the file cannot be removed.
pub fn remove(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|err| ScaffoldError::io("remove", path, err))
}
