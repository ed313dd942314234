// src/cli.rs
use std::{env, path::PathBuf};

use crate::config::options::{AppOptions, PaintRule, Stage};
use crate::runner;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let opts = parse_cli()?;
    runner::run(&opts).map(|_| ())
}

fn parse_cli() -> Result<AppOptions, Box<dyn std::error::Error>> {
    let mut opts = AppOptions::default();
    let mut user_rules: Vec<PaintRule> = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "--base-url" => opts.poll.base_url = args.next().ok_or("Missing value for --base-url")?,
            "-d" | "--data-dir" => {
                opts.poll.data_dir = PathBuf::from(args.next().ok_or("Missing value for --data-dir")?);}
            "--template" => {
                opts.render.template = PathBuf::from(args.next().ok_or("Missing value for --template")?);}
            "-o" | "--out" => {
                opts.render.output = PathBuf::from(args.next().ok_or("Missing output path")?);}
            "--stride" => {
                let v: u32 = args.next().ok_or("Missing value for --stride")?.parse()?;
                if v == 0 { return Err("Stride must be positive".into()); }
                opts.poll.page_stride = v;}
            "--max-pages" => {
                let v: u32 = args.next().ok_or("Missing value for --max-pages")?.parse()?;
                if v == 0 { return Err("Page count must be positive".into()); }
                opts.poll.max_pages = v;}
            "--timeout" => {
                opts.poll.timeout_secs = args.next().ok_or("Missing value for --timeout")?.parse()?;}
            "--slug-names" => opts.poll.slug_names = true,
            "--bare-values" => opts.render.with_units = false,
            "--no-render" => opts.stage = Stage::PollOnly,
            "--render-only" => opts.stage = Stage::RenderOnly,
            "--paint" => {
                let v = args.next().ok_or("Missing value for --paint")?;
                user_rules.push(parse_paint_rule(&v)?);}
            "-h" | "--help" => {
                eprintln!("{}", include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    // any explicit rule replaces the compiled defaults wholesale
    if !user_rules.is_empty() {
        opts.render.paint_rules = user_rules;
    }
    Ok(opts)
}

/// `D4:bomba_acs:#2e7d32[:spin]`
fn parse_paint_rule(s: &str) -> Result<PaintRule, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = s.split(':').collect();
    match parts.as_slice() {
        [driver, cell, color] | [driver, cell, color, "spin"] => {
            if crate::data::ordinal_of(driver, crate::data::EntityKind::Driver).is_none() {
                return Err(format!("Invalid driver item in --paint: {}", driver).into());
            }
            Ok(PaintRule {
                driver: s!(*driver),
                cell: s!(*cell),
                color: s!(*color),
                animate: parts.len() == 4,
            })
        }
        _ => Err(format!("Invalid --paint rule: {} (want ITEM:CELL:COLOR[:spin])", s).into()),
    }
}
