//! Processor writing discovered states and transitions to two streams

use statespace_core::{StateId, StateSpaceResult, SuccessorRates};
use statespace_state::ClassifiedState;
use std::io::Write;

use crate::traits::{StateProcessor, StateWriter};

/// Forwards each call to a [`StateWriter`], transitions to one stream and
/// id assignments to the other
pub struct StateIoProcessor<'a, W> {
    writer: W,
    transitions: &'a mut dyn Write,
    states: &'a mut dyn Write,
    transitions_written: usize,
    states_written: usize,
}

impl<'a, W: StateWriter> StateIoProcessor<'a, W> {
    pub fn new(writer: W, transitions: &'a mut dyn Write, states: &'a mut dyn Write) -> Self {
        Self {
            writer,
            transitions,
            states,
            transitions_written: 0,
            states_written: 0,
        }
    }
    
    /// Number of transition records written so far
    pub fn transitions_written(&self) -> usize {
        self.transitions_written
    }
    
    /// Number of state records written so far
    pub fn states_written(&self) -> usize {
        self.states_written
    }
}

impl<W: StateWriter> StateProcessor for StateIoProcessor<'_, W> {
    fn process_transitions(
        &mut self,
        state: StateId,
        successors: &SuccessorRates,
    ) -> StateSpaceResult<()> {
        self.writer
            .write_transitions(state, successors, &mut *self.transitions)?;
        self.transitions_written += 1;
        Ok(())
    }
    
    fn process_state(&mut self, state: &ClassifiedState, id: StateId) -> StateSpaceResult<()> {
        self.writer.write_state(state, id, &mut *self.states)?;
        self.states_written += 1;
        Ok(())
    }
}
