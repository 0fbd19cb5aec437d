//! Explored set snapshot functionality

use bincode::Options;
use serde::{Deserialize, Serialize};
use statespace_core::{SecondaryHash, StateId, StateSpaceError, StateSpaceResult, MAX_BUCKETS};
use tracing::debug;

use crate::explored::ExploredSet;

/// One stored hash and the bucket it lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub bucket: u64,
    pub secondary: SecondaryHash,
    pub id: StateId,
}

/// A complete copy of an explored set, for pausing and resuming a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploredSetSnapshot {
    /// Bucket count of the captured set
    pub buckets: u64,
    /// Every stored entry, in bucket order
    pub entries: Vec<SnapshotEntry>,
}

impl ExploredSetSnapshot {
    /// Capture the current contents of `set`
    pub fn from_set(set: &ExploredSet) -> Self {
        let entries = set
            .entries()
            .map(|(bucket, secondary, id)| SnapshotEntry {
                bucket: bucket as u64,
                secondary,
                id,
            })
            .collect();
        Self {
            buckets: set.bucket_count() as u64,
            entries,
        }
    }
    
    /// Rebuild the captured set
    pub fn restore(&self) -> StateSpaceResult<ExploredSet> {
        let buckets = usize::try_from(self.buckets)
            .ok()
            .filter(|&buckets| buckets <= MAX_BUCKETS)
            .ok_or_else(|| {
                corrupt_snapshot(format!(
                    "bucket count {} exceeds the limit of {}",
                    self.buckets, MAX_BUCKETS
                ))
            })?;
        let mut set = ExploredSet::new(buckets)?;
        for entry in &self.entries {
            if entry.bucket >= self.buckets {
                return Err(corrupt_snapshot(format!(
                    "bucket {} out of range for {} buckets",
                    entry.bucket, self.buckets
                )));
            }
            set.insert_at(entry.bucket as usize, entry.secondary, entry.id);
        }
        debug!(
            "Restored explored set with {} entries in {} buckets",
            set.len(),
            set.bucket_count()
        );
        Ok(set)
    }
    
    /// Serialize snapshot to bytes
    pub fn to_bytes(&self) -> StateSpaceResult<Vec<u8>> {
        bincode::serialize(self).map_err(StateSpaceError::Serialization)
    }
    
    /// Deserialize snapshot from bytes.
    ///
    /// Decoding never consumes more than `bytes.len()`, so a corrupt length
    /// prefix fails instead of allocating.
    pub fn from_bytes(bytes: &[u8]) -> StateSpaceResult<Self> {
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .allow_trailing_bytes()
            .with_limit(bytes.len() as u64)
            .deserialize(bytes)
            .map_err(StateSpaceError::Serialization)
    }
    
    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    
    /// Check if snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn corrupt_snapshot(message: String) -> StateSpaceError {
    StateSpaceError::corrupt("snapshot", Box::new(bincode::ErrorKind::Custom(message)))
}

impl ExploredSet {
    pub fn snapshot(&self) -> ExploredSetSnapshot {
        ExploredSetSnapshot::from_set(self)
    }
}
