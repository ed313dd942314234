// src/scrape/rows.rs
//
// Turns the located table into typed readings. Non-entity rows (section
// headers, separators, blank padding) are expected on every page and are
// dropped without comment.

use crate::core::html;
use crate::data::{EntityKind, Reading, ordinal_of};

/// Column indices resolved for one table. Canonical order is
/// Item | Label | Value | Units, with Module Status / Alarm tails on some
/// driver pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    pub item: usize,
    pub label: usize,
    pub value: usize,
    pub units: usize,
    pub module_status: Option<usize>,
    pub alarm: Option<usize>,
}

impl ColumnMap {
    pub fn positional() -> Self {
        Self { item: 0, label: 1, value: 2, units: 3, module_status: Some(4), alarm: Some(5) }
    }

    /// Explicit map from a recognized header row; unnamed columns keep
    /// their canonical position.
    pub fn from_headers(cells: &[String]) -> Self {
        let mut map = Self::positional();
        map.module_status = None;
        map.alarm = None;
        for (i, cell) in cells.iter().enumerate() {
            let lc = html::to_lower(cell);
            if lc.contains("item") { map.item = i; }
            else if lc.contains("label") { map.label = i; }
            else if lc.contains("value") { map.value = i; }
            else if lc.contains("unit") { map.units = i; }
            else if lc.contains("module") { map.module_status = Some(i); }
            else if lc.contains("alarm") { map.alarm = Some(i); }
        }
        map
    }
}

fn is_header_row(cells: &[String]) -> bool {
    cells.iter().any(|c| {
        let lc = html::to_lower(c);
        lc.contains("item") || lc.contains("label") || lc.contains("value") || lc.contains("unit")
    })
}

/// Normalized cell texts of every `<tr>` in the table, in document order.
pub fn raw_rows(table: &str) -> Vec<Vec<String>> {
    let mut out = Vec::new();
    for (tr_s, tr_e) in html::tag_blocks(table, "tr") {
        let tr = &table[tr_s..tr_e];
        let mut cells = Vec::new();
        let mut pos = 0usize;
        while let Some((c_s, c_e)) = html::next_cell_block(tr, pos) {
            cells.push(html::cell_text(&tr[c_s..c_e]));
            pos = c_e;
        }
        if !cells.is_empty() {
            out.push(cells);
        }
    }
    out
}

/// Readings of the requested class. Rows with too few columns or a first
/// column that is not a `kind` identifier are discarded.
pub fn extract_rows(table: &str, kind: EntityKind) -> Vec<Reading> {
    let rows = raw_rows(table);
    let mut map = ColumnMap::positional();
    if let Some(first) = rows.first() {
        if is_header_row(first) {
            map = ColumnMap::from_headers(first);
        }
    }

    let mut out = Vec::new();
    for cells in &rows {
        if cells.len() < kind.min_cols() {
            continue;
        }
        let item = match cells.get(map.item) {
            Some(c) if ordinal_of(c, kind).is_some() => c.clone(),
            _ => continue,
        };
        let get = |i: usize| cells.get(i).cloned().unwrap_or_default();
        let opt = |i: Option<usize>| i.and_then(|i| cells.get(i)).filter(|c| !c.is_empty()).cloned();

        let (module_status, alarm) = match kind {
            EntityKind::Driver => (opt(map.module_status), opt(map.alarm)),
            EntityKind::Sensor => (None, None),
        };
        out.push(Reading {
            item,
            label: get(map.label),
            value: get(map.value),
            units: get(map.units),
            module_status,
            alarm,
        });
    }
    out
}
