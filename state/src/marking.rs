//! The `State` interface shared by plain and classified markings

use statespace_core::{Hashable, PlaceTokens, TokenCount, TokenCounts};
use std::collections::btree_map::Keys;
use std::fmt;

/// A Petri net marking: place id -> {token id -> count}.
///
/// Implementors are immutable and carry a precomputed hash pair.
pub trait State: Hashable + fmt::Display {
    /// Full place -> token map, in canonical order
    fn as_map(&self) -> &TokenCounts;
    
    /// Token counts of `place`, `None` if the place is not part of the state
    fn tokens(&self, place: &str) -> Option<&PlaceTokens> {
        self.as_map().get(place)
    }
    
    /// Count of `token` in `place`, `None` if either is absent
    fn token_count(&self, place: &str, token: &str) -> Option<TokenCount> {
        self.tokens(place).and_then(|tokens| tokens.get(token).copied())
    }
    
    /// True if the state holds an entry for `place`
    fn contains_tokens(&self, place: &str) -> bool {
        self.as_map().contains_key(place)
    }
    
    /// All place ids, sorted
    fn places(&self) -> Keys<'_, String, PlaceTokens> {
        self.as_map().keys()
    }
}

/// Render a marking as `{"P0": {"Default": 1, "Red": 2}, "P1": {...}}`
pub(crate) fn write_marking(f: &mut fmt::Formatter<'_>, counts: &TokenCounts) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (place, tokens)) in counts.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "\"{}\": {{", place)?;
        for (j, (token, count)) in tokens.iter().enumerate() {
            if j > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{}\": {}", token, count)?;
        }
        write!(f, "}}")?;
    }
    write!(f, "}}")
}
