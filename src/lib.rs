// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod data;

pub mod scrape;
pub mod history;
pub mod store;
pub mod render;
pub mod runner;
