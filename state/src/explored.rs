//! Double-hash explored set.
//!
//! Remembers which markings have been seen during exploration, and the id
//! each one was given, without keeping the markings themselves. The primary
//! hash picks one of a fixed number of buckets; inside a bucket the 128-bit
//! secondary hash is the key.
//!
//! # Identity guarantee
//!
//! There are no false negatives: a state whose hash pair was added is
//! always found. False positives are possible. Two distinct states are
//! merged when they land in the same bucket *and* share the secondary
//! hash; with `n` stored states the probability of any such merge is at
//! most `n(n-1)/2 * 2^-128` (about 1.5e-21 for a billion states). A merge
//! makes two markings one node of the generated chain, so the secondary
//! width must not be reduced without revisiting this bound.
//!
//! The set is not synchronised. Use one set per worker and [`ExploredSet::merge`]
//! them, or serialise access externally.

use statespace_core::{
    ExploredSetConfig, Hashable, MAX_BUCKETS, SecondaryHash, StateId, StateSpaceError, StateSpaceResult,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Bucketed store of secondary hash -> state id
#[derive(Debug, Clone)]
pub struct ExploredSet {
    buckets: Vec<BTreeMap<SecondaryHash, StateId>>,
    size: usize,
}

/// Occupancy figures for tuning the bucket count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExploredSetStats {
    pub buckets: usize,
    pub entries: usize,
    pub empty_buckets: usize,
    pub longest_bucket: usize,
}

impl ExploredSet {
    /// Create a set with `bucket_count` buckets. The count never changes.
    ///
    /// The count must be between 1 and [`MAX_BUCKETS`].
    pub fn new(bucket_count: usize) -> StateSpaceResult<Self> {
        if bucket_count == 0 || bucket_count > MAX_BUCKETS {
            return Err(StateSpaceError::InvalidBucketCount(bucket_count));
        }
        debug!("Creating explored set with {} buckets", bucket_count);
        Ok(Self {
            buckets: vec![BTreeMap::new(); bucket_count],
            size: 0,
        })
    }
    
    pub fn with_config(config: &ExploredSetConfig) -> StateSpaceResult<Self> {
        config.validate()?;
        Self::new(config.buckets)
    }
    
    /// Bucket index for a state
    pub fn location<H: Hashable + ?Sized>(&self, state: &H) -> usize {
        state.hash_pair().bucket(self.buckets.len())
    }
    
    /// Record `state` under `id`. Re-adding a known state replaces its id.
    pub fn add<H: Hashable + ?Sized>(&mut self, state: &H, id: StateId) {
        let hashes = state.hash_pair();
        let location = hashes.bucket(self.buckets.len());
        self.insert_at(location, hashes.secondary, id);
    }
    
    /// Add states and ids pairwise, in order.
    ///
    /// Nothing is added if the slices differ in length.
    pub fn add_all<H: Hashable>(&mut self, states: &[H], ids: &[StateId]) -> StateSpaceResult<()> {
        if states.len() != ids.len() {
            return Err(StateSpaceError::LengthMismatch {
                states: states.len(),
                ids: ids.len(),
            });
        }
        for (state, id) in states.iter().zip(ids) {
            self.add(state, *id);
        }
        Ok(())
    }
    
    /// True if a state with the same hash pair has been added
    pub fn contains<H: Hashable + ?Sized>(&self, state: &H) -> bool {
        let hashes = state.hash_pair();
        self.buckets[hashes.bucket(self.buckets.len())].contains_key(&hashes.secondary)
    }
    
    /// Id most recently assigned to `state`
    pub fn get_id<H: Hashable + ?Sized>(&self, state: &H) -> StateSpaceResult<StateId> {
        let hashes = state.hash_pair();
        self.buckets[hashes.bucket(self.buckets.len())]
            .get(&hashes.secondary)
            .copied()
            .ok_or(StateSpaceError::UnknownState {
                primary: hashes.primary,
                secondary: hashes.secondary,
            })
    }
    
    /// Fold another set into this one.
    ///
    /// Original states are gone, so entries can only move bucket for
    /// bucket; both sets need the same bucket count. Ids from `other` win
    /// where both sets hold a hash.
    pub fn merge(&mut self, other: &ExploredSet) -> StateSpaceResult<()> {
        if other.buckets.len() != self.buckets.len() {
            return Err(StateSpaceError::IncompatibleSets {
                ours: self.buckets.len(),
                theirs: other.buckets.len(),
            });
        }
        let before = self.size;
        for (location, bucket) in other.buckets.iter().enumerate() {
            for (secondary, id) in bucket {
                self.insert_at(location, *secondary, *id);
            }
        }
        debug!(
            "Merged {} entries into explored set, {} new",
            other.size,
            self.size - before
        );
        Ok(())
    }
    
    /// Remove every entry
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.size = 0;
        debug!("Cleared explored set");
    }
    
    /// Number of distinct hash entries
    pub fn len(&self) -> usize {
        self.size
    }
    
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
    
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
    
    pub fn stats(&self) -> ExploredSetStats {
        ExploredSetStats {
            buckets: self.buckets.len(),
            entries: self.size,
            empty_buckets: self.buckets.iter().filter(|b| b.is_empty()).count(),
            longest_bucket: self.buckets.iter().map(|b| b.len()).max().unwrap_or(0),
        }
    }
    
    /// All `(bucket, secondary, id)` entries in bucket order
    pub fn entries(&self) -> impl Iterator<Item = (usize, SecondaryHash, StateId)> + '_ {
        self.buckets.iter().enumerate().flat_map(|(location, bucket)| {
            bucket.iter().map(move |(secondary, id)| (location, *secondary, *id))
        })
    }
    
    /// Upsert into a bucket, returning true if the hash was new
    pub(crate) fn insert_at(&mut self, location: usize, secondary: SecondaryHash, id: StateId) -> bool {
        let added = self.buckets[location].insert(secondary, id).is_none();
        if added {
            self.size += 1;
        }
        added
    }
}
