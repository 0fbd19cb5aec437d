//! Statespace Hashing Module
//! 
//! Single source of truth for state identity:
//! - canonical traversal of a marking (sorted places, sorted tokens)
//! - a funnel folding that traversal into any hash function
//! - primary (32-bit) and secondary (128-bit) hash selection
//!
//! States, classified states and the explored set all go through
//! [`hash_marking`], so they never disagree on what "equal" means.

pub mod hashing;
pub mod funnel;

pub use hashing::*;
pub use funnel::*;
