//! Reads every record in a stream

use statespace_core::{Record, StateId, StateSpaceResult};
use statespace_state::ClassifiedState;
use std::collections::HashMap;
use std::io::BufRead;
use tracing::{debug, warn};

use crate::traits::{MultiStateReader, StateReader};

/// Drives a single-record reader until the stream is exhausted
#[derive(Debug, Clone, Default)]
pub struct EntireStateReader<R> {
    reader: R,
}

impl<R: StateReader> EntireStateReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
    
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: StateReader> MultiStateReader for EntireStateReader<R> {
    fn read_records(&self, input: &mut dyn BufRead) -> StateSpaceResult<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.reader.read_record(input)? {
            records.push(record);
        }
        debug!("Read {} transition records", records.len());
        Ok(records)
    }
    
    fn read_states(
        &self,
        input: &mut dyn BufRead,
    ) -> StateSpaceResult<HashMap<StateId, ClassifiedState>> {
        let mut mappings = HashMap::new();
        while let Some(mapping) = self.reader.read_state(input)? {
            if mappings.insert(mapping.id, mapping.state).is_some() {
                warn!("State id {} appears more than once, keeping the last", mapping.id);
            }
        }
        debug!("Read {} state mappings", mappings.len());
        Ok(mappings)
    }
}
