//! JSON state documents: `{"P0": {"Default": 1}, "P1": {"Default": 0}}`

use statespace_core::{HashScheme, StateSpaceError, StateSpaceResult, TokenCounts};

use crate::classified::ClassifiedState;
use crate::hashed::HashedState;
use crate::marking::State;

/// Parse a place -> {token -> count} document with the default scheme
pub fn state_from_json(json: &str) -> StateSpaceResult<HashedState> {
    state_from_json_with(json, HashScheme::default())
}

/// Parse a state document, hashing it under `scheme`.
///
/// Anything other than an object of objects of non-negative integers is
/// rejected with [`StateSpaceError::InvalidStateDocument`].
pub fn state_from_json_with(json: &str, scheme: HashScheme) -> StateSpaceResult<HashedState> {
    let counts: TokenCounts =
        serde_json::from_str(json).map_err(StateSpaceError::InvalidStateDocument)?;
    Ok(HashedState::with_scheme(counts, scheme))
}

pub fn tangible_state_from_json(json: &str) -> StateSpaceResult<ClassifiedState> {
    Ok(ClassifiedState::tangible_state(state_from_json(json)?))
}

pub fn vanishing_state_from_json(json: &str) -> StateSpaceResult<ClassifiedState> {
    Ok(ClassifiedState::vanishing_state(state_from_json(json)?))
}

/// Canonical JSON document of a state (places and tokens sorted)
pub fn state_to_json<S: State + ?Sized>(state: &S) -> StateSpaceResult<String> {
    serde_json::to_string(state.as_map()).map_err(StateSpaceError::InvalidStateDocument)
}
