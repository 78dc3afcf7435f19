// Placement of exported archives on disk. Bytes go to a temp file in the
// target directory and are renamed into place, so a failed write never
// leaves a file under the final name.

use crate::error::{Result, SlotifyError};
use chrono::NaiveDateTime;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const ARCHIVE_PREFIX: &str = "slotify_export_";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `slotify_export_<YYYYMMDD_HHMMSS>.zip` for the given wall-clock time.
pub fn archive_file_name(at: NaiveDateTime) -> String {
    format!("{ARCHIVE_PREFIX}{}.zip", at.format(TIMESTAMP_FORMAT))
}

/// Write `bytes` to `dir/archive_file_name(at)`, creating `dir` if needed.
///
/// Names have second resolution: saving twice within the same second
/// replaces the earlier archive.
pub fn save_archive(dir: &Path, at: NaiveDateTime, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| SlotifyError::io(format!("Failed to create {}", dir.display()), e))?;

    let target = dir.join(archive_file_name(at));
    let write_err = |e| SlotifyError::io(format!("Failed to write {}", target.display()), e);

    // Dropped (and deleted) on every early return below.
    let mut tmp = tempfile::Builder::new()
        .prefix(".slotify_export_")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(&target).map_err(|e| write_err(e.error))?;

    tracing::info!(path = %target.display(), bytes = bytes.len(), "archive saved");
    Ok(target)
}
