//! Statespace Core Library
//! 
//! Core types, traits, and abstractions shared by the state model, the
//! explored set and the binary record protocol.

pub mod types;
pub mod traits;
pub mod error;
pub mod config;

pub use types::*;
pub use traits::*;
pub use error::*;
pub use config::*;
