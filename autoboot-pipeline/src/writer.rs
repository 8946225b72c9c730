//! Write-if-absent for scaffold files.
//!
//! 1. If anything already exists at the path (file, dir, or dangling link), stop.
//! 2. Normalise line endings to LF.
//! 3. Write to `<path>.autoboot.tmp`.
//! 4. Rename to the final path; remove the tmp file if that fails.

use std::path::{Path, PathBuf};

use crate::error::{io_err, BootError};

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File did not exist and was created.
    Written { path: PathBuf },
    /// Something was already at the path; left untouched.
    AlreadyExists { path: PathBuf },
}

pub fn exists(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// `<path>.autoboot.tmp`, built on the raw OS string so non-UTF-8 names
/// survive.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".autoboot.tmp");
    PathBuf::from(name)
}

/// Create `path` with `content` unless it already exists.
pub fn write_if_absent(path: &Path, content: &str) -> Result<WriteResult, BootError> {
    if exists(path) {
        tracing::debug!("exists, leaving as is: {}", path.display());
        return Ok(WriteResult::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    let normalized = content.replace("\r\n", "\n");
    let tmp = tmp_path(path);
    std::fs::write(&tmp, &normalized).map_err(|e| io_err(&tmp, e))?;

    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}
