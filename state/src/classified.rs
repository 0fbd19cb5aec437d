//! Tangible/vanishing classification of a state
//!
//! A tangible state is one in which all enabled transitions are timed.
//! A vanishing state has one or more enabled immediate transitions and
//! is left as soon as it is entered.

use statespace_core::{HashPair, Hashable, TokenCounts};
use statespace_hashing::hash_marking;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::hashed::HashedState;
use crate::marking::State;

/// A [`HashedState`] tagged as tangible or vanishing.
///
/// Its hash pair covers the flag as well as the marking, so the tangible
/// and vanishing versions of one marking are different identities.
#[derive(Debug, Clone)]
pub struct ClassifiedState {
    state: HashedState,
    tangible: bool,
    hashes: HashPair,
}

impl ClassifiedState {
    /// State whose enabled transitions are all timed
    pub fn tangible_state(state: HashedState) -> Self {
        Self::classify(state, true)
    }
    
    /// State with at least one enabled immediate transition
    pub fn vanishing_state(state: HashedState) -> Self {
        Self::classify(state, false)
    }
    
    fn classify(state: HashedState, tangible: bool) -> Self {
        let hashes = hash_marking(state.scheme(), Some(tangible), state.as_map());
        Self {
            state,
            tangible,
            hashes,
        }
    }
    
    pub fn is_tangible(&self) -> bool {
        self.tangible
    }
    
    /// The underlying unclassified state
    pub fn state(&self) -> &HashedState {
        &self.state
    }
    
    pub fn into_state(self) -> HashedState {
        self.state
    }
}

impl State for ClassifiedState {
    fn as_map(&self) -> &TokenCounts {
        self.state.as_map()
    }
}

impl Hashable for ClassifiedState {
    fn hash_pair(&self) -> HashPair {
        self.hashes
    }
}

impl PartialEq for ClassifiedState {
    fn eq(&self, other: &Self) -> bool {
        self.tangible == other.tangible && self.state == other.state
    }
}

impl Eq for ClassifiedState {}

impl Hash for ClassifiedState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tangible.hash(state);
        self.state.hash(state);
    }
}

impl fmt::Display for ClassifiedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tangible {
            write!(f, "Tangible: {}", self.state)
        } else {
            write!(f, "Vanishing: {}", self.state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashed::HashedStateBuilder;
    
    fn marking() -> HashedState {
        HashedStateBuilder::new()
            .place_with_token("P0", "Default", 1)
            .place_with_token("P1", "Default", 0)
            .build()
    }
    
    #[test]
    fn test_classification_flag() {
        assert!(ClassifiedState::tangible_state(marking()).is_tangible());
        assert!(!ClassifiedState::vanishing_state(marking()).is_tangible());
    }
    
    #[test]
    fn test_equality_requires_flag() {
        let tangible = ClassifiedState::tangible_state(marking());
        let vanishing = ClassifiedState::vanishing_state(marking());
        
        assert_eq!(tangible, ClassifiedState::tangible_state(marking()));
        assert_ne!(tangible, vanishing);
        assert_ne!(tangible.secondary_hash(), vanishing.secondary_hash());
    }
    
    #[test]
    fn test_delegates_to_state() {
        let classified = ClassifiedState::tangible_state(marking());
        
        assert!(classified.contains_tokens("P0"));
        assert_eq!(classified.token_count("P1", "Default"), Some(0));
        assert_eq!(classified.places().count(), 2);
        assert_eq!(classified.as_map(), marking().as_map());
    }
    
    #[test]
    fn test_display_prefix() {
        let tangible = ClassifiedState::tangible_state(marking());
        let vanishing = ClassifiedState::vanishing_state(marking());
        
        assert_eq!(tangible.to_string(), r#"Tangible: {"P0": {"Default": 1}, "P1": {"Default": 0}}"#);
        assert!(vanishing.to_string().starts_with("Vanishing: {"));
    }
}
