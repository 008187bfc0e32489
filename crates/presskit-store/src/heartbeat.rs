//! Last-run marker for external schedulers.

use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

/// Timestamp format of the marker file, always UTC.
pub const HEARTBEAT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Overwrite `path` with `now` formatted as [`HEARTBEAT_FORMAT`].
pub fn write_heartbeat(path: &Path, now: DateTime<Utc>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
    }
    fs::write(path, now.format(HEARTBEAT_FORMAT).to_string()).map_err(|e| StoreError::io(path, e))
}
