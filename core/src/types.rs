//! Core types for statespace
//! 
//! Defines the identifiers, token maps and hash values used across the system.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Integer identity assigned to a state during exploration
pub type StateId = i32;

/// Number of tokens of one colour held by a place
pub type TokenCount = u32;

/// Token colour id -> count for a single place
pub type PlaceTokens = BTreeMap<String, TokenCount>;

/// Place id -> token counts. Iteration order is the canonical hashing order.
pub type TokenCounts = BTreeMap<String, PlaceTokens>;

/// Transition rates keyed by successor id
pub type SuccessorRates = BTreeMap<StateId, f64>;

/// 128-bit identity hash of a state
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SecondaryHash(pub u128);

impl SecondaryHash {
    pub const ZERO: SecondaryHash = SecondaryHash(0);
    
    /// Build from the leading 16 bytes of a digest, little-endian
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        SecondaryHash(u128::from_le_bytes(bytes))
    }
    
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_be_bytes())
    }
}

impl fmt::Display for SecondaryHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", &self.to_hex()[..16])
    }
}

impl fmt::Debug for SecondaryHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecondaryHash(0x{})", self.to_hex())
    }
}

/// Primary (sharding) and secondary (identity) hash of a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashPair {
    pub primary: u32,
    pub secondary: SecondaryHash,
}

impl HashPair {
    pub fn new(primary: u32, secondary: SecondaryHash) -> Self {
        Self { primary, secondary }
    }
    
    /// Bucket this pair falls into for a table of `buckets` slots
    pub fn bucket(&self, buckets: usize) -> usize {
        self.primary as usize % buckets
    }
}

impl fmt::Display for HashPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}/{}", self.primary, self.secondary)
    }
}

/// Outgoing transitions of one state, in integer form
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub state: StateId,
    pub successors: SuccessorRates,
}

impl Record {
    pub fn new(state: StateId, successors: SuccessorRates) -> Self {
        Self { state, successors }
    }
    
    /// Sum of the outgoing rates
    pub fn exit_rate(&self) -> f64 {
        self.successors.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_secondary_from_digest() {
        let mut digest = [0u8; 32];
        digest[0] = 1;
        digest[16] = 0xff;
        
        // Only the leading 16 bytes take part
        assert_eq!(SecondaryHash::from_digest(&digest), SecondaryHash(1));
    }
    
    #[test]
    fn test_bucket_selection() {
        let pair = HashPair::new(u32::MAX, SecondaryHash::ZERO);
        assert_eq!(pair.bucket(10), (u32::MAX % 10) as usize);
        assert!(pair.bucket(7) < 7);
    }
    
    #[test]
    fn test_record_exit_rate() {
        let mut successors = SuccessorRates::new();
        successors.insert(2, 1.5);
        successors.insert(3, 0.5);
        let record = Record::new(1, successors);
        
        assert_eq!(record.exit_rate(), 2.0);
    }
}
