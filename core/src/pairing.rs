//! Input/output sistering.

use crate::domain::{Port, PortKind, PortPair, Snapshot};

/// Couple scanned input and output ports into logical devices.
///
/// Every distinct `(name, occurrence)` present in either list yields exactly
/// one pair, its sides populated from whichever lists carry it. Inputs keep
/// their backend order, followed by the outputs that had no input sister.
pub fn pair_ports(inputs: Vec<Port>, outputs: Vec<Port>) -> Snapshot {
    let mut snapshot = Snapshot::new();
    collect_pairs(&inputs, &outputs, &mut snapshot);
    collect_pairs(&outputs, &inputs, &mut snapshot);
    snapshot
}

/// The opposite-kind port sharing name and occurrence, when one exists.
/// Occurrence numbering makes a second candidate impossible.
fn find_sister<'a>(port: &Port, candidates: &'a [Port]) -> Option<&'a Port> {
    candidates
        .iter()
        .find(|candidate| candidate.name == port.name && candidate.occurrence == port.occurrence)
}

fn collect_pairs(ports: &[Port], sisters: &[Port], snapshot: &mut Snapshot) {
    for port in ports {
        let sister = find_sister(port, sisters).cloned();
        let pair = match port.kind {
            PortKind::Input => PortPair::new(Some(port.clone()), sister),
            PortKind::Output => PortPair::new(sister, Some(port.clone())),
        };
        // Both directions discover a sistered pair; keep the first.
        if !snapshot.contains(pair.name(), pair.occurrence()) {
            snapshot.push(pair);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::MockBackend;
    use crate::scanner::PortScanner;

    fn scan(backend: &MockBackend, kind: PortKind) -> Vec<Port> {
        PortScanner::new(Arc::new(backend.clone())).scan(kind)
    }

    fn paired(inputs: &[&str], outputs: &[&str]) -> Snapshot {
        let backend = MockBackend::new();
        backend.set_ports(PortKind::Input, inputs);
        backend.set_ports(PortKind::Output, outputs);
        pair_ports(
            scan(&backend, PortKind::Input),
            scan(&backend, PortKind::Output),
        )
    }

    #[test]
    fn test_matching_sides_share_a_pair() {
        let snapshot = paired(&["Amelia"], &["Amelia"]);
        assert_eq!(snapshot.len(), 1);
        let pair = &snapshot.pairs()[0];
        assert!(pair.has_input());
        assert!(pair.has_output());
        assert_eq!(pair.occurrence(), 0);
    }

    #[test]
    fn test_one_pair_per_distinct_identity() {
        let snapshot = paired(&["brenna", "brenna"], &["brenna", "brenna"]);
        assert_eq!(snapshot.len(), 2);
        for (rank, pair) in snapshot.iter().enumerate() {
            assert_eq!(pair.occurrence(), rank);
            assert!(pair.has_input());
            assert!(pair.has_output());
        }
    }

    #[test]
    fn test_unpaired_sides_become_single_sided_pairs() {
        let snapshot = paired(&["Gabby1"], &["Gabby2"]);
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.pairs()[0].has_input());
        assert!(!snapshot.pairs()[0].has_output());
        assert!(!snapshot.pairs()[1].has_input());
        assert!(snapshot.pairs()[1].has_output());
    }

    #[test]
    fn test_inputs_precede_unpaired_outputs() {
        let snapshot = paired(&["x", "y"], &["y", "z"]);
        let names: Vec<&str> = snapshot.iter().map(|pair| pair.name()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
        assert!(snapshot.get("y0").unwrap().has_output());
    }

    #[test]
    fn test_same_occurrence_required_for_sistering() {
        // Second output "pad" has occurrence 1; only occurrence 0 has an
        // input sister.
        let snapshot = paired(&["pad"], &["pad", "pad"]);
        assert_eq!(snapshot.len(), 2);
        let first = snapshot.get("pad0").unwrap();
        assert!(first.has_input() && first.has_output());
        let second = snapshot.get("pad1").unwrap();
        assert!(!second.has_input() && second.has_output());
    }
}
