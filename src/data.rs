// src/data.rs
//
// Canonical record shapes shared by the extraction pipeline, the
// persistence layer and the renderer.

use serde::{Deserialize, Serialize};

/// The two telemetry classes the controller exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Sensor,
    Driver,
}

impl EntityKind {
    pub fn letter(self) -> char {
        match self { EntityKind::Sensor => 'S', EntityKind::Driver => 'D' }
    }

    /// Status page for this class, relative to the base URL.
    pub fn page(self) -> &'static str {
        match self { EntityKind::Sensor => "S.htm", EntityKind::Driver => "D.htm" }
    }

    /// Sensors come as Item/Label/Value; drivers always carry Units and
    /// sometimes Module Status / Alarm columns on top.
    pub fn min_cols(self) -> usize {
        match self { EntityKind::Sensor => 3, EntityKind::Driver => 4 }
    }

    pub fn history_prefix(self) -> &'static str {
        match self {
            EntityKind::Sensor => "",
            EntityKind::Driver => crate::config::consts::DRIVER_HISTORY_PREFIX,
        }
    }
}

/// `"S9"` → 9 when the identifier belongs to `kind`. Anything that is not
/// `<letter><digits>` is not an entity row (section headers, separators).
pub fn ordinal_of(item: &str, kind: EntityKind) -> Option<u32> {
    let rest = item.strip_prefix(kind.letter())?;
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}

/// Parse an identifier of either class.
pub fn parse_item(item: &str) -> Option<(EntityKind, u32)> {
    for kind in [EntityKind::Sensor, EntityKind::Driver] {
        if let Some(n) = ordinal_of(item, kind) {
            return Some((kind, n));
        }
    }
    None
}

/// One normalized table row. `value` stays raw text; interpretation is a
/// consumer concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub item: String,
    pub label: String,
    pub value: String,
    pub units: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub module_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub alarm: Option<String>,
}

impl Reading {
    /// The four-column projection used by the combined `items` list.
    pub fn projected(&self) -> Reading {
        Reading {
            item: self.item.clone(),
            label: self.label.clone(),
            value: self.value.clone(),
            units: self.units.clone(),
            module_status: None,
            alarm: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub timestamp_utc: String,
    pub sensors: Vec<Reading>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSnapshot {
    pub timestamp_utc: String,
    pub drivers: Vec<Reading>,
}

/// Sensors and drivers in one document, plus the flat `items` union the
/// renderer consumes. Consumers branch on the identifier's leading letter
/// when they need the class back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedSnapshot {
    pub timestamp_utc: String,
    pub sensors: Vec<Reading>,
    pub drivers: Vec<Reading>,
    pub items: Vec<Reading>,
}

impl CombinedSnapshot {
    pub fn build(timestamp_utc: &str, sensors: &[Reading], drivers: &[Reading]) -> Self {
        let mut items: Vec<Reading> = sensors.to_vec();
        items.extend(drivers.iter().map(Reading::projected));
        Self {
            timestamp_utc: s!(timestamp_utc),
            sensors: sensors.to_vec(),
            drivers: drivers.to_vec(),
            items,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub item: String,
    pub label: String,
    pub units: String,
    pub file: String,
}

/// Discovery document for downstream consumers; rebuilt whole each cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub timestamp_utc: String,
    pub files: Vec<ManifestEntry>,
}
