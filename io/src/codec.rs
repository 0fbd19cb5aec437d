//! Binary codec for state dictionary and transition streams.
//!
//! All values use bincode's fixed-width little-endian encoding:
//!
//! ```text
//! transition record:  i32 state | i32 n | n x (i32 successor | f64 rate)
//! state record:       i32 id | u8 tangible (0/1) | token map
//! token map:          u64 places | per place: string id, u64 tokens,
//!                     per token: string id, u32 count
//! string:             u64 byte length | UTF-8 bytes
//! ```
//!
//! Successors and token maps are written in ascending key order. There is
//! no framing between records; a stream is a plain concatenation.
//!
//! Readers hold each record to the same rules writers enforce: rates are
//! finite and positive, successors are unique, and no single field decodes
//! to more than [`MAX_FIELD_BYTES`].

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;
use statespace_core::{
    HashScheme, Record, StateId, StateSpaceError, StateSpaceResult, SuccessorRates, TokenCounts,
};
use statespace_state::{ClassifiedState, HashedState, State};
use std::io::{BufRead, Write};
use tracing::trace;

use crate::mapping::StateMapping;
use crate::traits::{StateReader, StateWriter};

const TRANSITION_RECORD: &str = "transition";
const STATE_RECORD: &str = "state";

/// Upper bound on the encoded size of one field; a whole token map is one field
pub const MAX_FIELD_BYTES: u64 = 64 * 1024 * 1024;

/// Reads and writes both record kinds.
///
/// States read back are hashed under the codec's scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryStateIo {
    scheme: HashScheme,
}

impl BinaryStateIo {
    pub fn new() -> Self {
        Self::default()
    }
    
    pub fn with_scheme(scheme: HashScheme) -> Self {
        Self { scheme }
    }
    
    pub fn scheme(&self) -> &HashScheme {
        &self.scheme
    }
}

/// True if nothing is left to read
fn at_end(input: &mut dyn BufRead) -> StateSpaceResult<bool> {
    Ok(input.fill_buf()?.is_empty())
}

fn read_field<T: DeserializeOwned>(input: &mut dyn BufRead, record: &'static str) -> StateSpaceResult<T> {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(MAX_FIELD_BYTES)
        .deserialize_from(&mut *input)
        .map_err(|e| StateSpaceError::corrupt(record, e))
}

fn malformed(record: &'static str, message: String) -> StateSpaceError {
    StateSpaceError::corrupt(record, Box::new(bincode::ErrorKind::Custom(message)))
}

fn valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

fn push_field<T: Serialize + ?Sized>(buffer: &mut Vec<u8>, value: &T) -> StateSpaceResult<()> {
    bincode::serialize_into(&mut *buffer, value).map_err(StateSpaceError::Serialization)
}

impl StateWriter for BinaryStateIo {
    fn write_transitions(
        &self,
        state: StateId,
        successors: &SuccessorRates,
        output: &mut dyn Write,
    ) -> StateSpaceResult<()> {
        // Validate and encode the whole record before touching the stream
        let count = i32::try_from(successors.len()).map_err(|_| {
            StateSpaceError::Config(format!(
                "state {} has {} successors, more than a record can hold",
                state,
                successors.len()
            ))
        })?;
        let mut buffer = Vec::with_capacity(8 + successors.len() * 12);
        push_field(&mut buffer, &state)?;
        push_field(&mut buffer, &count)?;
        for (successor, rate) in successors {
            if !valid_rate(*rate) {
                return Err(StateSpaceError::InvalidRate {
                    state,
                    successor: *successor,
                    rate: *rate,
                });
            }
            push_field(&mut buffer, successor)?;
            push_field(&mut buffer, rate)?;
        }
        output.write_all(&buffer)?;
        trace!("Wrote transitions for state {} ({} successors)", state, count);
        Ok(())
    }
    
    fn write_state(
        &self,
        state: &ClassifiedState,
        id: StateId,
        output: &mut dyn Write,
    ) -> StateSpaceResult<()> {
        let mut buffer = Vec::new();
        push_field(&mut buffer, &id)?;
        push_field(&mut buffer, &state.is_tangible())?;
        push_field(&mut buffer, state.as_map())?;
        output.write_all(&buffer)?;
        trace!("Wrote state {}", id);
        Ok(())
    }
}

impl StateReader for BinaryStateIo {
    fn read_record(&self, input: &mut dyn BufRead) -> StateSpaceResult<Option<Record>> {
        if at_end(input)? {
            return Ok(None);
        }
        let state: StateId = read_field(input, TRANSITION_RECORD)?;
        let count: i32 = read_field(input, TRANSITION_RECORD)?;
        if count < 0 {
            return Err(malformed(
                TRANSITION_RECORD,
                format!("negative successor count {} for state {}", count, state),
            ));
        }
        let mut successors = SuccessorRates::new();
        for _ in 0..count {
            let successor: StateId = read_field(input, TRANSITION_RECORD)?;
            let rate: f64 = read_field(input, TRANSITION_RECORD)?;
            if !valid_rate(rate) {
                return Err(malformed(
                    TRANSITION_RECORD,
                    format!("rate {} from state {} to {}", rate, state, successor),
                ));
            }
            if successors.insert(successor, rate).is_some() {
                return Err(malformed(
                    TRANSITION_RECORD,
                    format!("successor {} repeated for state {}", successor, state),
                ));
            }
        }
        trace!("Read transitions for state {} ({} successors)", state, count);
        Ok(Some(Record::new(state, successors)))
    }
    
    fn read_state(&self, input: &mut dyn BufRead) -> StateSpaceResult<Option<StateMapping>> {
        if at_end(input)? {
            return Ok(None);
        }
        let id: StateId = read_field(input, STATE_RECORD)?;
        let tangible: bool = read_field(input, STATE_RECORD)?;
        let counts: TokenCounts = read_field(input, STATE_RECORD)?;
        
        let state = HashedState::with_scheme(counts, self.scheme);
        let classified = if tangible {
            ClassifiedState::tangible_state(state)
        } else {
            ClassifiedState::vanishing_state(state)
        };
        trace!("Read state {}", id);
        Ok(Some(StateMapping::new(id, classified)))
    }
}
