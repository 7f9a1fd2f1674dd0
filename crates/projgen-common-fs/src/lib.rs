//! File system primitives used during synthesis.
//!
//! Directory creation here is single-level: callers are
//! expected to have created every ancestor except the last one.

use std::fs;
use std::io;
use std::path::Path;

use projgen_common_core::{Error, Result};
use tracing::trace;

pub mod path;

/// Executable bit added by [`add_executable_bit`] (owner execute).
pub const EXECUTABLE_BIT: u32 = 0o100;

/// Ensure a directory exists, creating only the last path component.
///
/// Calling this on an existing directory is a no-op.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match fs::create_dir(path) {
        Ok(()) => {
            trace!(dir = %path.display(), "created directory");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(Error::file_system(
            format!("failed to create directory: {}", path.display()),
            path,
            e,
        )),
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: impl AsRef<Path>) -> Result<()> {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Write bytes to a file, replacing any existing content.
pub fn write_bytes(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, contents).map_err(|e| {
        Error::file_system(format!("failed to write file: {}", path.display()), path, e)
    })
}

/// Write a string to a file, replacing any existing content.
pub fn write_text(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    write_bytes(path, contents.as_bytes())
}

/// Add the executable bit to the file's current mode.
///
/// The existing mode is read first so no other bits are cleared.
#[cfg(unix)]
pub fn add_executable_bit(path: impl AsRef<Path>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let path = path.as_ref();
    let mut permissions = fs::metadata(path)
        .map_err(|e| {
            Error::file_system(format!("failed to read metadata: {}", path.display()), path, e)
        })?
        .permissions();
    permissions.set_mode(permissions.mode() | EXECUTABLE_BIT);
    fs::set_permissions(path, permissions).map_err(|e| {
        Error::file_system(
            format!("failed to set permissions for: {}", path.display()),
            path,
            e,
        )
    })
}

/// Add the executable bit (no-op on platforms without Unix modes).
#[cfg(not(unix))]
pub fn add_executable_bit(_path: impl AsRef<Path>) -> Result<()> {
    Ok(())
}

/// Read the permission bits of a file.
#[cfg(unix)]
pub fn mode(path: impl AsRef<Path>) -> Result<u32> {
    use std::os::unix::fs::PermissionsExt;

    let path = path.as_ref();
    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o7777)
        .map_err(|e| {
            Error::file_system(format!("failed to read metadata: {}", path.display()), path, e)
        })
}
