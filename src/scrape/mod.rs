// src/scrape/mod.rs

pub mod table;
pub mod rows;
pub mod walker;
pub mod dedupe;

pub use table::locate_table;
pub use rows::extract_rows;
pub use walker::walk;
pub use dedupe::dedupe;
