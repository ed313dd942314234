// src/scrape/dedupe.rs

use std::collections::HashMap;

use crate::data::{EntityKind, Reading, ordinal_of};

/// One reading per identifier, ascending by numeric ordinal. Later scan
/// positions win, so pagination overlap resolves to the freshest page.
/// Records without a well-formed `kind` identifier are dropped.
pub fn dedupe(rows: Vec<Reading>, kind: EntityKind) -> Vec<Reading> {
    let mut by_ordinal: HashMap<u32, Reading> = HashMap::new();
    for r in rows {
        if let Some(n) = ordinal_of(&r.item, kind) {
            by_ordinal.insert(n, r);
        }
    }
    let mut out: Vec<(u32, Reading)> = by_ordinal.into_iter().collect();
    out.sort_unstable_by_key(|(n, _)| *n);
    out.into_iter().map(|(_, r)| r).collect()
}
