//! Error types for statespace

use crate::types::{SecondaryHash, StateId};
use thiserror::Error;

/// Main error type for statespace
#[derive(Error, Debug)]
pub enum StateSpaceError {
    // ============ Stream Errors ============
    #[error("Corrupt {record} record")]
    CorruptRecord {
        record: &'static str,
        #[source]
        source: bincode::Error,
    },
    
    #[error("Invalid rate {rate} from state {state} to successor {successor}")]
    InvalidRate {
        state: StateId,
        successor: StateId,
        rate: f64,
    },
    
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("Serialization failed: {0}")]
    Serialization(#[source] bincode::Error),
    
    // ============ State Errors ============
    #[error("Invalid state document")]
    InvalidStateDocument(#[source] serde_json::Error),
    
    #[error("State not found: primary {primary:08x}, secondary {secondary}")]
    UnknownState {
        primary: u32,
        secondary: SecondaryHash,
    },
    
    // ============ Configuration Errors ============
    #[error("Invalid bucket count: {0}")]
    InvalidBucketCount(usize),
    
    #[error("Length mismatch: {states} states, {ids} ids")]
    LengthMismatch { states: usize, ids: usize },
    
    #[error("Cannot merge sets with {theirs} buckets into {ours} buckets")]
    IncompatibleSets { ours: usize, theirs: usize },
    
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StateSpaceError {
    pub fn corrupt(record: &'static str, source: bincode::Error) -> Self {
        StateSpaceError::CorruptRecord { record, source }
    }
}
