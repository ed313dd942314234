// src/render/tokens.rs

use crate::config::consts::MAX_TOKEN_ORDINAL;
use crate::data::{CombinedSnapshot, parse_item};

/// Replace every literal `{{S9}}`-style token with the entity's current
/// value (`"58.27"` or `"58.27 DegC"` with units enabled). Tokens whose
/// entity is absent from the snapshot stay in the output untouched: a
/// partially populated schematic beats a failed render when upstream data
/// is incomplete.
pub fn substitute(template: &str, snapshot: &CombinedSnapshot, with_units: bool) -> String {
    let mut out = template.to_string();
    for r in &snapshot.items {
        let Some((_, ordinal)) = parse_item(&r.item) else { continue };
        if ordinal > MAX_TOKEN_ORDINAL {
            continue;
        }
        let token = join!("{{", &r.item, "}}");
        if !out.contains(&token) {
            continue;
        }
        let text = if with_units && !r.units.is_empty() {
            join!(&r.value, " ", &r.units)
        } else {
            r.value.clone()
        };
        out = out.replace(&token, &escape_text(&text));
    }
    out
}

/// Values land inside markup text; `&` and `<` must go back to entity
/// form or the rendered document stops being well-formed. The token's
/// surrounding markup is never touched.
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Reading;

    fn snap(items: Vec<(&str, &str, &str)>) -> CombinedSnapshot {
        let readings: Vec<Reading> = items
            .into_iter()
            .map(|(item, value, units)| Reading {
                item: s!(item), label: s!(), value: s!(value), units: s!(units),
                module_status: None, alarm: None,
            })
            .collect();
        CombinedSnapshot {
            timestamp_utc: s!("2025-11-02T10:00:00+00:00"),
            sensors: Vec::new(),
            drivers: Vec::new(),
            items: readings,
        }
    }

    #[test]
    fn present_token_replaced_absent_left_alone() {
        let s = snap(vec![("S1", "21.5", "DegC")]);
        let out = substitute("<text>{{S1}}</text><text>{{S2}}</text>", &s, false);
        assert_eq!(out, "<text>21.5</text><text>{{S2}}</text>");
    }

    #[test]
    fn units_are_optional() {
        let s = snap(vec![("S9", "58.27", "DegC"), ("D1", "On", "")]);
        let with = substitute("{{S9}} / {{D1}}", &s, true);
        assert_eq!(with, "58.27 DegC / On");
        let without = substitute("{{S9}}", &s, false);
        assert_eq!(without, "58.27");
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let s = snap(vec![("S1", "7", "")]);
        assert_eq!(substitute("{{S1}}+{{S1}}", &s, false), "7+7");
    }

    #[test]
    fn ordinals_beyond_the_cap_are_ignored() {
        let s = snap(vec![("S123", "x", "")]);
        assert_eq!(substitute("{{S123}}", &s, false), "{{S123}}");
    }

    #[test]
    fn markup_significant_values_are_escaped() {
        let s = snap(vec![("D2", "M&E ok", ""), ("S4", "<5", "%")]);
        let out = substitute("<text>{{D2}}</text><text>{{S4}}</text>", &s, true);
        assert_eq!(out, "<text>M&amp;E ok</text><text>&lt;5 %</text>");
    }

    #[test]
    fn value_text_is_verbatim() {
        let s = snap(vec![("S9", "58.27", "DegC")]);
        assert!(substitute("{{S9}}", &s, false).contains("58.27"));
    }
}
