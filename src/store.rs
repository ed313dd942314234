// src/store.rs
//
// Whole-document JSON writes: snapshots and manifests are superseded, not
// merged, on every cycle.

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::config::consts::*;
use crate::data::{
    CombinedSnapshot, DriverSnapshot, EntityKind, Manifest, ManifestEntry, Reading,
    SensorSnapshot,
};
use crate::history::history_file_name;

fn write_json<T: serde::Serialize>(path: &Path, doc: &T) -> Result<(), Box<dyn Error>> {
    let text = serde_json::to_string_pretty(doc)?;
    fs::write(path, text + "\n")?;
    Ok(())
}

pub fn write_sensor_snapshot(data_dir: &Path, snap: &SensorSnapshot) -> Result<(), Box<dyn Error>> {
    write_json(&data_dir.join(SENSORS_LATEST_FILE), snap)
}

pub fn write_driver_snapshot(data_dir: &Path, snap: &DriverSnapshot) -> Result<(), Box<dyn Error>> {
    write_json(&data_dir.join(DRIVERS_LATEST_FILE), snap)
}

pub fn write_combined_snapshot(data_dir: &Path, snap: &CombinedSnapshot) -> Result<(), Box<dyn Error>> {
    write_json(&data_dir.join(COMBINED_LATEST_FILE), snap)
}

/// The renderer's input when it reruns without a fresh poll.
pub fn load_combined_snapshot(data_dir: &Path) -> Result<CombinedSnapshot, Box<dyn Error>> {
    let text = fs::read_to_string(data_dir.join(COMBINED_LATEST_FILE))?;
    Ok(serde_json::from_str(&text)?)
}

/// Discovery document: one entry per known entity, pointing at its
/// history log. Pure over the reading list; rebuilt whole each cycle.
pub fn build_manifest(
    timestamp_utc: &str,
    kind: EntityKind,
    readings: &[Reading],
    slug_names: bool,
) -> Manifest {
    Manifest {
        timestamp_utc: s!(timestamp_utc),
        files: readings
            .iter()
            .map(|r| ManifestEntry {
                item: r.item.clone(),
                label: r.label.clone(),
                units: r.units.clone(),
                file: history_file_name(kind, r, slug_names),
            })
            .collect(),
    }
}

pub fn write_manifest(data_dir: &Path, kind: EntityKind, manifest: &Manifest) -> Result<(), Box<dyn Error>> {
    let name = match kind {
        EntityKind::Sensor => SENSORS_MANIFEST_FILE,
        EntityKind::Driver => DRIVERS_MANIFEST_FILE,
    };
    write_json(&data_dir.join(name), manifest)
}
