//! Reader, writer and processor contracts
//!
//! Streams are borrowed, never owned: callers open, flush and close them.

use statespace_core::{Record, StateId, StateSpaceResult, SuccessorRates};
use statespace_state::ClassifiedState;
use std::collections::HashMap;
use std::io::{BufRead, Write};

use crate::mapping::StateMapping;

/// Writes single records to an output stream
pub trait StateWriter {
    /// Write one transition record: a state and its successor rates
    fn write_transitions(
        &self,
        state: StateId,
        successors: &SuccessorRates,
        output: &mut dyn Write,
    ) -> StateSpaceResult<()>;
    
    /// Write one state dictionary record
    fn write_state(
        &self,
        state: &ClassifiedState,
        id: StateId,
        output: &mut dyn Write,
    ) -> StateSpaceResult<()>;
}

/// Reads single records from an input stream.
///
/// `Ok(None)` means the stream ended cleanly on a record boundary.
pub trait StateReader {
    fn read_record(&self, input: &mut dyn BufRead) -> StateSpaceResult<Option<Record>>;
    
    fn read_state(&self, input: &mut dyn BufRead) -> StateSpaceResult<Option<StateMapping>>;
}

/// Reads whole streams
pub trait MultiStateReader {
    /// Every transition record, in write order
    fn read_records(&self, input: &mut dyn BufRead) -> StateSpaceResult<Vec<Record>>;
    
    /// The full state dictionary; the last record for an id wins
    fn read_states(
        &self,
        input: &mut dyn BufRead,
    ) -> StateSpaceResult<HashMap<StateId, ClassifiedState>>;
}

/// Sink for what an explorer discovers
pub trait StateProcessor {
    /// Persist the outgoing transitions of `state`
    fn process_transitions(
        &mut self,
        state: StateId,
        successors: &SuccessorRates,
    ) -> StateSpaceResult<()>;
    
    /// Persist the id assigned to `state`
    fn process_state(&mut self, state: &ClassifiedState, id: StateId) -> StateSpaceResult<()>;
}

impl<T: StateWriter + ?Sized> StateWriter for &T {
    fn write_transitions(
        &self,
        state: StateId,
        successors: &SuccessorRates,
        output: &mut dyn Write,
    ) -> StateSpaceResult<()> {
        (**self).write_transitions(state, successors, output)
    }
    
    fn write_state(
        &self,
        state: &ClassifiedState,
        id: StateId,
        output: &mut dyn Write,
    ) -> StateSpaceResult<()> {
        (**self).write_state(state, id, output)
    }
}

impl<T: StateReader + ?Sized> StateReader for &T {
    fn read_record(&self, input: &mut dyn BufRead) -> StateSpaceResult<Option<Record>> {
        (**self).read_record(input)
    }
    
    fn read_state(&self, input: &mut dyn BufRead) -> StateSpaceResult<Option<StateMapping>> {
        (**self).read_state(input)
    }
}
