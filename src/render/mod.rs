// src/render/mod.rs

pub mod tokens;
pub mod paint;

pub use tokens::substitute;
pub use paint::{DriverState, paint};
