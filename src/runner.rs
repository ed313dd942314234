// src/runner.rs
//
// One full fetch→normalize→persist→render cycle. No scheduler lives
// here; an external timer reruns the binary. Per-page failures degrade
// to empty pages, so only the two fatal render conditions (template
// missing, template malformed) can fail the run once the data directory
// is writable.

use std::error::Error;
use std::fs;

use chrono::{SecondsFormat, Utc};

use crate::config::consts::DEFAULT_LOG_FILE;
use crate::config::options::{AppOptions, PollOptions, RenderOptions, Stage};
use crate::core::net::{Fetch, HttpFetcher};
use crate::data::{CombinedSnapshot, DriverSnapshot, EntityKind, Reading, SensorSnapshot};
use crate::history;
use crate::render::{DriverState, paint, substitute};
use crate::scrape::{dedupe, walk};
use crate::store;

/// What one invocation produced, for the operator-facing summary line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sensors: usize,
    pub drivers: usize,
    pub painted: usize,
    pub cells_missing: usize,
}

pub fn run(opts: &AppOptions) -> Result<RunSummary, Box<dyn Error>> {
    fs::create_dir_all(&opts.poll.data_dir)?;
    crate::log::set_log_path(opts.poll.data_dir.join(DEFAULT_LOG_FILE));

    let mut summary = RunSummary::default();

    let snapshot = match opts.stage {
        Stage::RenderOnly => store::load_combined_snapshot(&opts.poll.data_dir)?,
        _ => poll(&opts.poll, &mut summary)?,
    };

    if opts.stage != Stage::PollOnly {
        render(&opts.render, &snapshot, &mut summary)?;
        println!(
            "OK: render {} (painted={} missing_cells={})",
            opts.render.output.display(),
            summary.painted,
            summary.cells_missing
        );
    }
    Ok(summary)
}

/// Scrape both entity classes, then persist snapshots, histories and
/// manifests under the data directory.
fn poll(opts: &PollOptions, summary: &mut RunSummary) -> Result<CombinedSnapshot, Box<dyn Error>> {
    let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false);
    let fetcher = HttpFetcher::new(opts.timeout_secs)?;

    let sensors = collect(&fetcher, opts, EntityKind::Sensor);
    let drivers = collect(&fetcher, opts, EntityKind::Driver);
    summary.sensors = sensors.len();
    summary.drivers = drivers.len();

    store::write_sensor_snapshot(
        &opts.data_dir,
        &SensorSnapshot { timestamp_utc: ts.clone(), sensors: sensors.clone() },
    )?;
    store::write_driver_snapshot(
        &opts.data_dir,
        &DriverSnapshot { timestamp_utc: ts.clone(), drivers: drivers.clone() },
    )?;

    persist_entities(opts, &ts, EntityKind::Sensor, &sensors)?;
    persist_entities(opts, &ts, EntityKind::Driver, &drivers)?;

    let combined = CombinedSnapshot::build(&ts, &sensors, &drivers);
    store::write_combined_snapshot(&opts.data_dir, &combined)?;

    println!("OK: sensors={} drivers={}", summary.sensors, summary.drivers);
    Ok(combined)
}

fn collect(fetcher: &dyn Fetch, opts: &PollOptions, kind: EntityKind) -> Vec<Reading> {
    let rows = walk(fetcher, opts, kind);
    let unique = dedupe(rows, kind);
    logf!("{:?}: {} entities", kind, unique.len());
    unique
}

fn persist_entities(
    opts: &PollOptions,
    ts: &str,
    kind: EntityKind,
    readings: &[Reading],
) -> Result<(), Box<dyn Error>> {
    for r in readings {
        let path = history::history_path(&opts.data_dir, kind, r, opts.slug_names);
        history::append(&path, ts, &r.value)?;
    }
    let manifest = store::build_manifest(ts, kind, readings, opts.slug_names);
    store::write_manifest(&opts.data_dir, kind, &manifest)?;
    Ok(())
}

/// Resolve tokens and apply paint rules against the current snapshot.
/// A missing or malformed template is fatal; everything else degrades
/// per entity.
fn render(
    opts: &RenderOptions,
    snapshot: &CombinedSnapshot,
    summary: &mut RunSummary,
) -> Result<(), Box<dyn Error>> {
    let template = fs::read_to_string(&opts.template)
        .map_err(|e| format!("template {}: {}", opts.template.display(), e))?;

    let mut svg = substitute(&template, snapshot, opts.with_units);

    for rule in &opts.paint_rules {
        let Some(driver) = snapshot.drivers.iter().find(|r| r.item == rule.driver) else {
            logf!("paint: {} absent from snapshot", rule.driver);
            continue;
        };
        let state = DriverState::from_value(&driver.value);
        if !state.is_on() {
            logd!("paint: {} is {:?}, leaving '{}' as drawn", rule.driver, state, rule.cell);
            continue;
        }
        match paint(&svg, &rule.cell, &rule.color, rule.animate)? {
            Some(updated) => {
                svg = updated;
                summary.painted += 1;
            }
            None => {
                // configuration drift: rule points at a cell the template lost
                summary.cells_missing += 1;
                loge!("paint: cell '{}' not found in template", rule.cell);
            }
        }
    }

    fs::write(&opts.output, svg)?;
    Ok(())
}
