//! Statespace CLI support

pub mod commands;

pub use commands::*;
