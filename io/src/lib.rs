//! Statespace I/O Layer
//! 
//! Persists the explored graph as two binary streams, a state dictionary
//! (id -> classified state) and transition records (id -> successor rates),
//! and replays them for analysis.

pub mod traits;
pub mod mapping;
pub mod codec;
pub mod reader;
pub mod processor;
pub mod graph;

pub use traits::*;
pub use mapping::*;
pub use codec::*;
pub use reader::*;
pub use processor::*;
pub use graph::*;
