//! Scheduler snapshots on disk, in `MessagePack`.
//!
//! A snapshot holds the game clock, the pending deferred actions, and the
//! heartbeat owners. Field names are kept so older files stay readable when
//! fields are added.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use quill_engine::SchedulerSnapshot;
use quill_foundation::{Error, ErrorKind, Result};

/// Encodes a snapshot.
///
/// # Errors
///
/// Returns a serialization error if encoding fails.
pub fn to_bytes(snapshot: &SchedulerSnapshot) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(snapshot)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Decodes a snapshot.
///
/// # Errors
///
/// Returns a serialization error for truncated or foreign data.
pub fn from_bytes(bytes: &[u8]) -> Result<SchedulerSnapshot> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!(
        "failed to {action} '{}': {e}",
        path.display()
    )))
}

/// Writes a snapshot to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an IO error if the file cannot be written, or a serialization
/// error if encoding fails.
pub fn save_snapshot<P: AsRef<Path>>(snapshot: &SchedulerSnapshot, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(snapshot)?;
    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))?;
    Ok(())
}

/// Reads a snapshot from `path`.
///
/// # Errors
///
/// Returns an IO error if the file cannot be read, or a serialization error
/// if its contents do not decode.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<SchedulerSnapshot> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;
    from_bytes(&bytes)
}
