//! SeaORM entities of the staff directory and the helpers that touch them directly.

pub mod errors;
pub mod db;
pub mod employee;
pub mod credential;

#[cfg(test)]
mod tests;
