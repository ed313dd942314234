// tests/persistence.rs
//
// The S9 scenario end to end: one value string must come out verbatim in
// the snapshot document, the manifest, the history log and the rendered
// token, with no re-formatting anywhere.

use std::fs;
use std::path::PathBuf;

use trend_scrape::data::{CombinedSnapshot, EntityKind, Reading, SensorSnapshot};
use trend_scrape::history;
use trend_scrape::render::substitute;
use trend_scrape::store;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("trend_scrape_it_{}_{}", std::process::id(), tag));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn s9() -> Reading {
    Reading {
        item: "S9".into(),
        label: "Tª Depósito ACS".into(),
        value: "58.27".into(),
        units: "DegC".into(),
        module_status: None,
        alarm: None,
    }
}

const TS: &str = "2025-11-02T10:00:00+00:00";

#[test]
fn one_value_string_everywhere() {
    let dir = temp_dir("verbatim");
    let sensors = vec![s9()];

    // snapshot
    let snap = SensorSnapshot { timestamp_utc: TS.into(), sensors: sensors.clone() };
    store::write_sensor_snapshot(&dir, &snap).unwrap();
    let json = fs::read_to_string(dir.join("latest.json")).unwrap();
    assert!(json.contains("\"58.27\""));

    // manifest
    let manifest = store::build_manifest(TS, EntityKind::Sensor, &sensors, false);
    store::write_manifest(&dir, EntityKind::Sensor, &manifest).unwrap();
    let mjson = fs::read_to_string(dir.join("sensors_manifest.json")).unwrap();
    assert!(mjson.contains("\"S9.txt\""));
    assert!(mjson.contains("Tª Depósito ACS"));

    // history
    let path = history::history_path(&dir, EntityKind::Sensor, &s9(), false);
    history::append(&path, TS, &s9().value).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), format!("{TS};58.27\n"));

    // rendered token
    let combined = CombinedSnapshot::build(TS, &sensors, &[]);
    let out = substitute("<text>{{S9}}</text>", &combined, true);
    assert_eq!(out, "<text>58.27 DegC</text>");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn combined_snapshot_survives_disk_roundtrip() {
    let dir = temp_dir("roundtrip");
    let drivers = vec![Reading {
        item: "D4".into(),
        label: "Bomba ACS".into(),
        value: "On".into(),
        units: "".into(),
        module_status: Some("Ok".into()),
        alarm: None,
    }];
    let combined = CombinedSnapshot::build(TS, &[s9()], &drivers);
    store::write_combined_snapshot(&dir, &combined).unwrap();

    let back = store::load_combined_snapshot(&dir).unwrap();
    assert_eq!(back, combined);
    assert_eq!(back.items.len(), 2);
    assert_eq!(back.items[1].module_status, None); // projected

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn replayed_cycle_leaves_history_length_alone() {
    let dir = temp_dir("replay");
    let path = history::history_path(&dir, EntityKind::Driver, &s9(), false);

    for _ in 0..4 {
        history::append(&path, TS, "On").unwrap();
    }
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);

    history::append(&path, "2025-11-02T10:05:00+00:00", "On").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);

    let _ = fs::remove_dir_all(&dir);
}
