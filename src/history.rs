// src/history.rs
//
// Per-entity append-only time series.
//
// Log invariant: lines are `<timestamp>;<value>\n`, strictly appended; a
// write whose timestamp prefix equals the last stored line's is a no-op.
// Replaying a poll cycle therefore cannot duplicate an entry, while a new
// cycle always appends even when the value has not changed (the log is a
// time series, not a change log). The log itself has no upper bound.

use std::error::Error;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::consts::{HISTORY_EXT, HISTORY_SEP};
use crate::core::sanitize::slugify;
use crate::data::{EntityKind, Reading};

/// `S9.txt` / `drv_D4.txt`, or with `slug` the label baked in:
/// `S9_t_deposito_acs.txt`. The identifier always leads, so slug
/// collisions cannot collide files.
pub fn history_file_name(kind: EntityKind, reading: &Reading, slug: bool) -> String {
    if slug {
        join!(kind.history_prefix(), &reading.item, "_", &slugify(&reading.label), ".", HISTORY_EXT)
    } else {
        join!(kind.history_prefix(), &reading.item, ".", HISTORY_EXT)
    }
}

pub fn history_path(data_dir: &Path, kind: EntityKind, reading: &Reading, slug: bool) -> PathBuf {
    data_dir.join(history_file_name(kind, reading, slug))
}

/// Append `timestamp;value` unless the file's last line already carries
/// this timestamp.
pub fn append(path: &Path, timestamp: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let prefix = format!("{timestamp}{HISTORY_SEP}");

    if path.exists() {
        let text = fs::read_to_string(path)?;
        if let Some(last) = text.lines().last() {
            if last.starts_with(&prefix) {
                return Ok(());
            }
        }
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{prefix}{value}")?;
    Ok(())
}
