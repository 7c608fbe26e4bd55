//! Shared building blocks for the staff directory crates.

pub mod types;
pub mod utils;
