//! State file persistence
//!
//! The state file holds the encoded stack and nothing else. Writes go to a
//! sibling temp file that is renamed over the target once fully written.

use super::stack::{self, Stack};
use crate::error::StorageError;
use rand::distr::Alphanumeric;
use rand::Rng;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const STATE_FILE_PREFIX: &str = "kcn";
const SUFFIX_LEN: usize = 6;

/// Allocate a fresh state path under `cache_dir`.
///
/// The parent process id ties the file to the invoking shell session; the
/// random suffix keeps recycled pids from sharing a file.
pub fn allocate_path(cache_dir: &Path) -> PathBuf {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();
    cache_dir.join(format!(
        "{}-{}-{}",
        STATE_FILE_PREFIX,
        session_id(),
        suffix
    ))
}

#[cfg(unix)]
fn session_id() -> u32 {
    std::os::unix::process::parent_id()
}

#[cfg(not(unix))]
fn session_id() -> u32 {
    std::process::id()
}

/// Read and decode the stack stored at `path`.
pub fn read_stack(path: &Path) -> Result<Stack, StorageError> {
    let bytes = fs::read(path)?;
    let stack = stack::decode(&bytes)?;
    debug!(path = %path.display(), entries = stack.len(), "Read state file");
    Ok(stack)
}

/// Encode `stack` and replace the file at `path` with it.
pub fn write_stack(path: &Path, stack: &Stack) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let payload = stack::encode(stack)?;

    let temp_path = temp_path_for(path);
    let written = fs::File::create(&temp_path)
        .map_err(StorageError::from)
        .and_then(|mut file| {
            write_checked(&mut file, &payload, &temp_path)?;
            file.sync_all()?;
            Ok(())
        });
    commit(path, &temp_path, written)?;

    debug!(path = %path.display(), entries = stack.len(), "Wrote state file");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    PathBuf::from(temp_name)
}

/// Rename the temp file over `path` once it is fully written; otherwise
/// discard it and leave `path` alone.
fn commit(
    path: &Path,
    temp_path: &Path,
    written: Result<(), StorageError>,
) -> Result<(), StorageError> {
    if let Err(e) = written {
        let _ = fs::remove_file(temp_path);
        return Err(e);
    }
    if let Err(e) = fs::rename(temp_path, path) {
        let _ = fs::remove_file(temp_path);
        return Err(e.into());
    }
    Ok(())
}

/// Single write of `payload`; anything less than the full payload is an error.
fn write_checked<W: Write>(
    writer: &mut W,
    payload: &[u8],
    path: &Path,
) -> Result<(), StorageError> {
    let written = writer.write(payload)?;
    if written != payload.len() {
        return Err(StorageError::ShortWrite {
            path: path.to_path_buf(),
            written,
            expected: payload.len(),
        });
    }
    writer.flush()?;
    Ok(())
}
