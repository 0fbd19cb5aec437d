//! CLI Commands
//!
//! Each command writes its report to `out` so it can be checked in tests.

use anyhow::Context;
use statespace_core::{HashScheme, Hashable, StateId};
use statespace_io::{BinaryStateIo, EntireStateReader, MultiStateReader, StateGraph};
use statespace_state::{state_from_json_with, ClassifiedState};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::debug;

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn reader(scheme: HashScheme) -> EntireStateReader<BinaryStateIo> {
    EntireStateReader::new(BinaryStateIo::with_scheme(scheme))
}

/// Print the hash pairs of a JSON state document
pub fn hash_state(json: &str, scheme: HashScheme, out: &mut dyn Write) -> anyhow::Result<()> {
    let state = state_from_json_with(json, scheme)?;
    let tangible = ClassifiedState::tangible_state(state.clone());
    let vanishing = ClassifiedState::vanishing_state(state.clone());
    
    writeln!(out, "State:     {}", state)?;
    writeln!(out, "Scheme:    {} / {}", scheme.primary, scheme.secondary)?;
    writeln!(out, "Content:   {}", state.hash_pair())?;
    writeln!(out, "Tangible:  {}", tangible.hash_pair())?;
    writeln!(out, "Vanishing: {}", vanishing.hash_pair())?;
    Ok(())
}

/// Dump a state dictionary stream, ordered by id
pub fn dump_states(path: &Path, scheme: HashScheme, out: &mut dyn Write) -> anyhow::Result<()> {
    let states = reader(scheme)
        .read_states(&mut open(path)?)
        .with_context(|| format!("cannot read states from {}", path.display()))?;
    
    let mut ids: Vec<StateId> = states.keys().copied().collect();
    ids.sort_unstable();
    for id in ids {
        writeln!(out, "{}: {}", id, states[&id])?;
    }
    debug!("Dumped {} states", states.len());
    Ok(())
}

/// Dump a transition stream in write order
pub fn dump_transitions(path: &Path, scheme: HashScheme, out: &mut dyn Write) -> anyhow::Result<()> {
    let records = reader(scheme)
        .read_records(&mut open(path)?)
        .with_context(|| format!("cannot read transitions from {}", path.display()))?;
    
    for record in &records {
        let edges: Vec<String> = record
            .successors
            .iter()
            .map(|(successor, rate)| format!("{} ({})", successor, rate))
            .collect();
        writeln!(out, "{} -> {}", record.state, edges.join(", "))?;
    }
    debug!("Dumped {} records", records.len());
    Ok(())
}

/// Load both streams and print graph totals
pub fn summarize(
    states: &Path,
    transitions: &Path,
    scheme: HashScheme,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let graph = StateGraph::load(&reader(scheme), &mut open(states)?, &mut open(transitions)?)
        .context("cannot load state graph")?;
    
    writeln!(out, "States:      {}", graph.len())?;
    writeln!(out, "  tangible:  {}", graph.tangible_ids().len())?;
    writeln!(out, "  vanishing: {}", graph.vanishing_ids().len())?;
    writeln!(out, "Records:     {}", graph.records().len())?;
    writeln!(out, "Transitions: {}", graph.transition_count())?;
    
    let dangling = graph.dangling_successors();
    if !dangling.is_empty() {
        let ids: Vec<String> = dangling.iter().map(|id| id.to_string()).collect();
        writeln!(out, "Dangling:    {}", ids.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use statespace_core::SuccessorRates;
    use statespace_io::StateWriter;
    use statespace_state::tangible_state_from_json;
    use tempfile::TempDir;
    
    fn write_fixture(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
        let io = BinaryStateIo::new();
        let mut states = Vec::new();
        let mut transitions = Vec::new();
        
        let s1 = tangible_state_from_json(r#"{"P0": {"Default": 1}}"#).unwrap();
        let s2 = tangible_state_from_json(r#"{"P1": {"Default": 1}}"#).unwrap();
        io.write_state(&s2, 2, &mut states).unwrap();
        io.write_state(&s1, 1, &mut states).unwrap();
        let edges: SuccessorRates = [(2, 1.5), (9, 0.5)].into_iter().collect();
        io.write_transitions(1, &edges, &mut transitions).unwrap();
        
        let states_path = dir.join("states.bin");
        let transitions_path = dir.join("transitions.bin");
        std::fs::write(&states_path, states).unwrap();
        std::fs::write(&transitions_path, transitions).unwrap();
        (states_path, transitions_path)
    }
    
    #[test]
    fn test_hash_state() {
        let mut out = Vec::new();
        hash_state(r#"{"P0": {"Default": 1}}"#, HashScheme::default(), &mut out).unwrap();
        
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(r#"State:     {"P0": {"Default": 1}}"#));
        assert!(text.contains("Scheme:    blake3 / sha256"));
        assert_eq!(text.lines().count(), 5);
    }
    
    #[test]
    fn test_hash_state_rejects_bad_json() {
        let mut out = Vec::new();
        assert!(hash_state(r#"{"P0": 1}"#, HashScheme::default(), &mut out).is_err());
    }
    
    #[test]
    fn test_dump_states_sorted() {
        let dir = TempDir::new().unwrap();
        let (states, _) = write_fixture(dir.path());
        let mut out = Vec::new();
        dump_states(&states, HashScheme::default(), &mut out).unwrap();
        
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![
            r#"1: Tangible: {"P0": {"Default": 1}}"#,
            r#"2: Tangible: {"P1": {"Default": 1}}"#,
        ]);
    }
    
    #[test]
    fn test_dump_transitions() {
        let dir = TempDir::new().unwrap();
        let (_, transitions) = write_fixture(dir.path());
        let mut out = Vec::new();
        dump_transitions(&transitions, HashScheme::default(), &mut out).unwrap();
        
        assert_eq!(String::from_utf8(out).unwrap(), "1 -> 2 (1.5), 9 (0.5)\n");
    }
    
    #[test]
    fn test_summarize() {
        let dir = TempDir::new().unwrap();
        let (states, transitions) = write_fixture(dir.path());
        let mut out = Vec::new();
        summarize(&states, &transitions, HashScheme::default(), &mut out).unwrap();
        
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("States:      2"));
        assert!(text.contains("Transitions: 2"));
        assert!(text.contains("Dangling:    9"));
    }
    
    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let result = dump_states(&dir.path().join("absent.bin"), HashScheme::default(), &mut out);
        assert!(result.is_err());
    }
}
