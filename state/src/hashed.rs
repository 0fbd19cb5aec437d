//! Hash-carrying state and its builder

use statespace_core::{HashPair, HashScheme, Hashable, PlaceTokens, TokenCount, TokenCounts};
use statespace_hashing::hash_marking;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::marking::{write_marking, State};

/// Immutable marking with its hash pair computed at construction.
///
/// Equality compares the token maps; the hash pair is derived from them
/// and only used as an identity surface by the explored set.
#[derive(Debug, Clone)]
pub struct HashedState {
    counts: TokenCounts,
    scheme: HashScheme,
    hashes: HashPair,
}

impl HashedState {
    /// Build with the default hash scheme
    pub fn new(counts: TokenCounts) -> Self {
        Self::with_scheme(counts, HashScheme::default())
    }
    
    pub fn with_scheme(counts: TokenCounts, scheme: HashScheme) -> Self {
        let hashes = hash_marking(&scheme, None, &counts);
        Self {
            counts,
            scheme,
            hashes,
        }
    }
    
    /// Scheme the hash pair was computed with
    pub fn scheme(&self) -> &HashScheme {
        &self.scheme
    }
    
    pub fn into_token_counts(self) -> TokenCounts {
        self.counts
    }
}

impl State for HashedState {
    fn as_map(&self) -> &TokenCounts {
        &self.counts
    }
}

impl Hashable for HashedState {
    fn hash_pair(&self) -> HashPair {
        self.hashes
    }
}

impl PartialEq for HashedState {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl Eq for HashedState {}

impl Hash for HashedState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.counts.hash(state);
    }
}

impl fmt::Display for HashedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_marking(f, &self.counts)
    }
}

/// Accumulates token counts and freezes them into a [`HashedState`]
#[derive(Debug, Clone, Default)]
pub struct HashedStateBuilder {
    counts: TokenCounts,
    scheme: HashScheme,
}

impl HashedStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Hash scheme for the built state
    pub fn scheme(mut self, scheme: HashScheme) -> Self {
        self.scheme = scheme;
        self
    }
    
    /// Set the count of one token in a place; last write wins
    pub fn place_with_token(
        mut self,
        place: impl Into<String>,
        token: impl Into<String>,
        count: TokenCount,
    ) -> Self {
        self.place(place).insert(token.into(), count);
        self
    }
    
    /// Merge a token map into a place, overwriting colliding tokens
    pub fn place_with_tokens<I, K>(mut self, place: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = (K, TokenCount)>,
        K: Into<String>,
    {
        let entry = self.place(place);
        for (token, count) in tokens {
            entry.insert(token.into(), count);
        }
        self
    }
    
    fn place(&mut self, place: impl Into<String>) -> &mut PlaceTokens {
        self.counts.entry(place.into()).or_default()
    }
    
    pub fn build(self) -> HashedState {
        HashedState::with_scheme(self.counts, self.scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use statespace_core::HashAlgorithm;
    
    #[test]
    fn test_simple() {
        let state = HashedStateBuilder::new()
            .place_with_token("P1", "Default", 1)
            .build();
        
        assert_eq!(state.token_count("P1", "Default"), Some(1));
    }
    
    #[test]
    fn test_contains_tokens() {
        let state = HashedStateBuilder::new()
            .place_with_token("P1", "Default", 1)
            .build();
        
        assert!(state.contains_tokens("P1"));
        assert!(!state.contains_tokens("P0"));
        assert!(state.tokens("P0").is_none());
    }
    
    #[test]
    fn test_simple_overwrites() {
        let state = HashedStateBuilder::new()
            .place_with_token("P1", "Default", 1)
            .place_with_token("P1", "Default", 6)
            .build();
        
        assert_eq!(state.token_count("P1", "Default"), Some(6));
    }
    
    #[test]
    fn test_multiple_coloured_tokens() {
        let state = HashedStateBuilder::new()
            .place_with_token("P1", "Default", 1)
            .place_with_token("P1", "Red", 6)
            .build();
        
        let tokens = state.tokens("P1").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens["Default"], 1);
        assert_eq!(tokens["Red"], 6);
    }
    
    #[test]
    fn test_multiple_places() {
        let state = HashedStateBuilder::new()
            .place_with_token("P2", "Default", 6)
            .place_with_token("P1", "Default", 1)
            .build();
        
        assert_eq!(state.token_count("P1", "Default"), Some(1));
        assert_eq!(state.token_count("P2", "Default"), Some(6));
        assert_eq!(state.places().collect::<Vec<_>>(), vec!["P1", "P2"]);
    }
    
    #[test]
    fn test_place_with_tokens_merges() {
        let state = HashedStateBuilder::new()
            .place_with_token("P1", "Default", 1)
            .place_with_token("P1", "Blue", 3)
            .place_with_tokens("P1", [("Default", 4), ("Red", 2)])
            .build();
        
        let tokens = state.tokens("P1").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens["Default"], 4);
        assert_eq!(tokens["Blue"], 3);
        assert_eq!(tokens["Red"], 2);
    }
    
    #[test]
    fn test_display() {
        let state = HashedStateBuilder::new()
            .place_with_token("P1", "Default", 0)
            .place_with_token("P0", "Red", 2)
            .place_with_token("P0", "Default", 1)
            .build();
        
        assert_eq!(
            state.to_string(),
            r#"{"P0": {"Default": 1, "Red": 2}, "P1": {"Default": 0}}"#
        );
    }
    
    #[test]
    fn test_equality_ignores_scheme() {
        let scheme = HashScheme::new(HashAlgorithm::Sha256, HashAlgorithm::Blake3).unwrap();
        let a = HashedStateBuilder::new().place_with_token("P0", "Default", 1).build();
        let b = HashedStateBuilder::new()
            .scheme(scheme)
            .place_with_token("P0", "Default", 1)
            .build();
        
        assert_eq!(a, b);
        assert_ne!(a.hash_pair(), b.hash_pair());
        assert_eq!(b.scheme(), &scheme);
    }
    
    #[test]
    fn test_rebuild_keeps_injected_scheme() {
        let scheme = HashScheme::new(HashAlgorithm::Sha256, HashAlgorithm::Blake3).unwrap();
        let state = HashedStateBuilder::new()
            .scheme(scheme)
            .place_with_token("P0", "Default", 2)
            .build();
        let hashes = state.hash_pair();
        
        let rebuilt = HashedState::with_scheme(state.clone().into_token_counts(), *state.scheme());
        assert_eq!(rebuilt.hash_pair(), hashes);
        assert_ne!(HashedState::new(rebuilt.into_token_counts()).hash_pair(), hashes);
    }
    
    proptest! {
        #[test]
        fn test_order_independent_hashes(
            entries in proptest::collection::btree_map(
                ("P[0-9]{1,2}", "(Default|Red|Blue)"),
                0u32..50,
                0..16,
            )
        ) {
            let mut forward = HashedStateBuilder::new();
            for ((place, token), count) in &entries {
                forward = forward.place_with_token(place.clone(), token.clone(), *count);
            }
            let mut reverse = HashedStateBuilder::new();
            for ((place, token), count) in entries.iter().rev() {
                reverse = reverse.place_with_token(place.clone(), token.clone(), *count);
            }
            
            let forward = forward.build();
            let reverse = reverse.build();
            prop_assert_eq!(&forward, &reverse);
            prop_assert_eq!(forward.primary_hash(), reverse.primary_hash());
            prop_assert_eq!(forward.secondary_hash(), reverse.secondary_hash());
        }
    }
}
