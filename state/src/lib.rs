//! Statespace State Management
//! 
//! Provides the immutable marking model, its tangible/vanishing
//! classification, and the explored set that assigns integer ids to
//! markings during exploration.

pub mod marking;
pub mod hashed;
pub mod classified;
pub mod json;
pub mod explored;
pub mod snapshot;

pub use marking::*;
pub use hashed::*;
pub use classified::*;
pub use json::*;
pub use explored::*;
pub use snapshot::*;
