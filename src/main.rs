// src/main.rs
use color_eyre::eyre::{Result, eyre};

use trend_scrape::cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    cli::run().map_err(|e| eyre!(e.to_string()))
}
