// tests/render_cycle.rs
//
// Renderer over a drawio-style template: tokens resolve, driver state
// gates painting, configuration drift is reported without aborting.

use trend_scrape::data::{CombinedSnapshot, Reading};
use trend_scrape::render::{DriverState, paint, substitute};

const TEMPLATE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">
  <g data-cell-id="bomba_acs">
    <ellipse fill="#ffffff" stroke="#000000" cx="30" cy="30" rx="20" ry="20"/>
    <path fill="none" stroke="#000000" d="M 10 30 L 50 30"/>
  </g>
  <g data-cell-id="caldera">
    <rect fill="#eeeeee" stroke="#333333" x="100" y="10" width="60" height="40"/>
  </g>
  <text x="10" y="90">{{S9}}</text>
  <text x="10" y="99">{{S11}}</text>
</svg>"##;

fn reading(item: &str, value: &str, units: &str) -> Reading {
    Reading {
        item: item.into(),
        label: String::new(),
        value: value.into(),
        units: units.into(),
        module_status: None,
        alarm: None,
    }
}

fn snapshot(driver_value: &str) -> CombinedSnapshot {
    CombinedSnapshot::build(
        "2025-11-02T10:00:00+00:00",
        &[reading("S9", "58.27", "DegC")],
        &[reading("D4", driver_value, "")],
    )
}

#[test]
fn full_render_pass() {
    let snap = snapshot("On");
    let mut svg = substitute(TEMPLATE, &snap, true);
    assert!(svg.contains(">58.27 DegC<"));
    assert!(svg.contains("{{S11}}")); // absent entity, token untouched

    if DriverState::from_value(&snap.drivers[0].value).is_on() {
        svg = paint(&svg, "bomba_acs", "#2e7d32", true).unwrap().unwrap();
    }
    assert!(svg.contains("fill=\"#2e7d32\""));
    assert!(svg.contains("stroke=\"#2e7d32\""));
    assert!(svg.contains("fill=\"none\"")); // sentinel survives
    assert!(svg.contains("<animateTransform"));
    // the other cell is not this rule's business
    assert!(svg.contains("fill=\"#eeeeee\""));
}

#[test]
fn off_driver_never_reaches_paint() {
    let snap = snapshot("Off");
    let svg = substitute(TEMPLATE, &snap, true);
    let state = DriverState::from_value(&snap.drivers[0].value);
    assert!(!state.is_on());
    // the gate is the caller's; template must still be as drawn
    assert!(svg.contains("fill=\"#ffffff\""));
}

#[test]
fn drifted_cell_id_reports_not_found() {
    let found = paint(TEMPLATE, "bomba_piscina", "#2e7d32", false).unwrap();
    assert!(found.is_none());
}

#[test]
fn ampersand_in_a_value_does_not_poison_later_painting() {
    // A scraped value may carry a raw '&' (entity decoding is part of
    // extraction); the substituted document must stay parseable so the
    // paint rules after it still apply.
    let snap = CombinedSnapshot::build(
        "2025-11-02T10:00:00+00:00",
        &[reading("S9", "M&E ok", "")],
        &[reading("D4", "On", "")],
    );
    let svg = substitute(TEMPLATE, &snap, true);
    assert!(svg.contains("M&amp;E ok"));

    let painted = paint(&svg, "bomba_acs", "#2e7d32", false).unwrap().unwrap();
    assert!(painted.contains("fill=\"#2e7d32\""));
    assert!(roxmltree::Document::parse(&painted).is_ok());
}

#[test]
fn painted_output_is_still_well_formed() {
    let out = paint(TEMPLATE, "bomba_acs", "#2e7d32", true).unwrap().unwrap();
    assert!(roxmltree::Document::parse(&out).is_ok());
}
