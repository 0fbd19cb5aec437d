//! Core traits defining statespace interfaces

use crate::types::*;

/// Result type for statespace operations
pub type StateSpaceResult<T> = Result<T, crate::error::StateSpaceError>;

/// Types carrying a cached hash pair.
///
/// This is the only identity surface the explored set looks at; two values
/// with the same pair are treated as the same state.
pub trait Hashable {
    /// Cached primary and secondary hash
    fn hash_pair(&self) -> HashPair;
    
    /// Narrow hash used for bucket selection
    fn primary_hash(&self) -> u32 {
        self.hash_pair().primary
    }
    
    /// Wide hash used for identity inside a bucket
    fn secondary_hash(&self) -> SecondaryHash {
        self.hash_pair().secondary
    }
}

impl<T: Hashable + ?Sized> Hashable for &T {
    fn hash_pair(&self) -> HashPair {
        (**self).hash_pair()
    }
}

impl Hashable for HashPair {
    fn hash_pair(&self) -> HashPair {
        *self
    }
}
