//! Id assignment for a single state

use statespace_core::StateId;
use statespace_state::ClassifiedState;

/// A state dictionary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMapping {
    pub id: StateId,
    pub state: ClassifiedState,
}

impl StateMapping {
    pub fn new(id: StateId, state: ClassifiedState) -> Self {
        Self { id, state }
    }
}
