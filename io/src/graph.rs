//! In-memory replay of a persisted state space

use statespace_core::{Record, StateId, StateSpaceResult, SuccessorRates};
use statespace_state::ClassifiedState;
use std::collections::{BTreeSet, HashMap};
use std::io::BufRead;
use tracing::{info, warn};

use crate::traits::MultiStateReader;

/// State dictionary plus transition records, as read back from disk
#[derive(Debug, Clone, Default)]
pub struct StateGraph {
    states: HashMap<StateId, ClassifiedState>,
    records: Vec<Record>,
    index: HashMap<StateId, usize>,
}

impl StateGraph {
    pub fn new(states: HashMap<StateId, ClassifiedState>, records: Vec<Record>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.state, position))
            .collect();
        Self {
            states,
            records,
            index,
        }
    }
    
    /// Read both streams to the end
    pub fn load<M: MultiStateReader + ?Sized>(
        reader: &M,
        states: &mut dyn BufRead,
        transitions: &mut dyn BufRead,
    ) -> StateSpaceResult<Self> {
        let graph = Self::new(reader.read_states(states)?, reader.read_records(transitions)?);
        info!(
            "Loaded state graph: {} states, {} records, {} transitions",
            graph.len(),
            graph.records.len(),
            graph.transition_count()
        );
        let dangling = graph.dangling_successors();
        if !dangling.is_empty() {
            warn!("{} state ids are referenced but have no dictionary entry", dangling.len());
        }
        Ok(graph)
    }
    
    pub fn state(&self, id: StateId) -> Option<&ClassifiedState> {
        self.states.get(&id)
    }
    
    pub fn states(&self) -> &HashMap<StateId, ClassifiedState> {
        &self.states
    }
    
    pub fn records(&self) -> &[Record] {
        &self.records
    }
    
    /// Outgoing rates of `id`; the last record written for it wins
    pub fn successors(&self, id: StateId) -> Option<&SuccessorRates> {
        self.index.get(&id).map(|&position| &self.records[position].successors)
    }
    
    /// Number of states in the dictionary
    pub fn len(&self) -> usize {
        self.states.len()
    }
    
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
    
    /// Total number of edges over all records
    pub fn transition_count(&self) -> usize {
        self.records.iter().map(|r| r.successors.len()).sum()
    }
    
    pub fn tangible_ids(&self) -> Vec<StateId> {
        self.ids_where(true)
    }
    
    pub fn vanishing_ids(&self) -> Vec<StateId> {
        self.ids_where(false)
    }
    
    fn ids_where(&self, tangible: bool) -> Vec<StateId> {
        let mut ids: Vec<StateId> = self
            .states
            .iter()
            .filter(|(_, state)| state.is_tangible() == tangible)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }
    
    /// Ids used by transition records, as source or successor, that have
    /// no dictionary entry. Sorted, without duplicates.
    pub fn dangling_successors(&self) -> Vec<StateId> {
        let referenced: BTreeSet<StateId> = self
            .records
            .iter()
            .flat_map(|r| std::iter::once(r.state).chain(r.successors.keys().copied()))
            .collect();
        referenced
            .into_iter()
            .filter(|id| !self.states.contains_key(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::BinaryStateIo;
    use crate::reader::EntireStateReader;
    use crate::traits::StateWriter;
    use statespace_state::{tangible_state_from_json, vanishing_state_from_json};
    use std::io::Cursor;
    
    fn rates(entries: &[(StateId, f64)]) -> SuccessorRates {
        entries.iter().copied().collect()
    }
    
    fn streams() -> (Vec<u8>, Vec<u8>) {
        let io = BinaryStateIo::new();
        let mut states = Vec::new();
        let mut transitions = Vec::new();
        
        let s1 = tangible_state_from_json(r#"{"P0": {"Default": 1}, "P1": {"Default": 0}}"#).unwrap();
        let s2 = vanishing_state_from_json(r#"{"P0": {"Default": 0}, "P1": {"Default": 1}}"#).unwrap();
        io.write_state(&s1, 1, &mut states).unwrap();
        io.write_state(&s2, 2, &mut states).unwrap();
        io.write_transitions(1, &rates(&[(2, 1.0)]), &mut transitions).unwrap();
        io.write_transitions(2, &rates(&[(1, 2.0), (3, 0.5)]), &mut transitions).unwrap();
        (states, transitions)
    }
    
    #[test]
    fn test_load() {
        let (states, transitions) = streams();
        let reader = EntireStateReader::new(BinaryStateIo::new());
        let graph =
            StateGraph::load(&reader, &mut Cursor::new(states), &mut Cursor::new(transitions)).unwrap();
        
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.records().len(), 2);
        assert_eq!(graph.transition_count(), 3);
        assert!(graph.state(1).unwrap().is_tangible());
        assert_eq!(graph.tangible_ids(), vec![1]);
        assert_eq!(graph.vanishing_ids(), vec![2]);
        assert_eq!(graph.successors(2), Some(&rates(&[(1, 2.0), (3, 0.5)])));
        assert!(graph.successors(3).is_none());
    }
    
    #[test]
    fn test_dangling_successors() {
        let (states, transitions) = streams();
        let reader = EntireStateReader::new(BinaryStateIo::new());
        let graph =
            StateGraph::load(&reader, &mut Cursor::new(states), &mut Cursor::new(transitions)).unwrap();
        
        assert_eq!(graph.dangling_successors(), vec![3]);
    }
    
    #[test]
    fn test_empty_graph() {
        let graph = StateGraph::default();
        assert!(graph.is_empty());
        assert_eq!(graph.transition_count(), 0);
        assert!(graph.dangling_successors().is_empty());
    }
    
    #[test]
    fn test_last_record_wins_for_successors() {
        let records = vec![
            Record::new(1, rates(&[(2, 1.0)])),
            Record::new(1, rates(&[(3, 4.0)])),
        ];
        let graph = StateGraph::new(HashMap::new(), records);
        
        assert_eq!(graph.successors(1), Some(&rates(&[(3, 4.0)])));
    }
}
