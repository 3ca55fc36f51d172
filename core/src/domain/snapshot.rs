//! Snapshot of the device set produced by one scan cycle.

use super::PortPair;
use crate::error::Result;

/// Ordered set of port pairs assembled by a single scan cycle.
///
/// The scan pipeline appends pairs while building a snapshot; afterwards it
/// is never mutated, only replaced wholesale. Order is deterministic given
/// the backend's enumeration order: inputs first, then outputs that had no
/// input sister.
///
/// Equality is structural and order-sensitive (see [`PortPair`]'s equality);
/// a reordering with no other change therefore counts as a difference.
#[derive(Debug, Default, PartialEq)]
pub struct Snapshot {
    pairs: Vec<PortPair>,
}

impl Snapshot {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, pair: PortPair) {
        self.pairs.push(pair);
    }

    /// Whether a pair with this name and occurrence is already present.
    pub fn contains(&self, name: &str, occurrence: usize) -> bool {
        self.pairs
            .iter()
            .any(|pair| pair.name() == name && pair.occurrence() == occurrence)
    }

    /// Find a pair by id. Returns `None` when absent.
    pub fn get(&self, id: &str) -> Option<&PortPair> {
        self.pairs.iter().find(|pair| pair.id() == id)
    }

    /// All pairs, in scan order.
    pub fn pairs(&self) -> &[PortPair] {
        &self.pairs
    }

    /// Number of devices in the snapshot.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the snapshot holds no devices.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate the pairs in scan order.
    pub fn iter(&self) -> std::slice::Iter<'_, PortPair> {
        self.pairs.iter()
    }

    /// Open every pair. Stops at the first backend failure.
    pub fn open_all(&self) -> Result<()> {
        for pair in &self.pairs {
            pair.open()?;
        }
        Ok(())
    }

    /// Close every pair. Stops at the first backend failure.
    pub fn close_all(&self) -> Result<()> {
        for pair in &self.pairs {
            pair.close()?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a PortPair;
    type IntoIter = std::slice::Iter<'a, PortPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockBackend;
    use crate::domain::{Port, PortKind};
    use crate::ports::PortBackend;

    fn in_pair(name: &str, occurrence: usize) -> PortPair {
        let backend = MockBackend::new();
        let port = Port::new(
            0,
            occurrence,
            PortKind::Input,
            name.to_string(),
            backend.handle(PortKind::Input),
        );
        PortPair::new(Some(port), None)
    }

    fn snapshot_of(names: &[&str]) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for name in names {
            snapshot.push(in_pair(name, 0));
        }
        snapshot
    }

    #[test]
    fn test_independently_built_snapshots_compare_equal() {
        assert_eq!(snapshot_of(&["a", "b"]), snapshot_of(&["a", "b"]));
    }

    #[test]
    fn test_length_mismatch_differs() {
        assert_ne!(snapshot_of(&["a"]), snapshot_of(&["a", "b"]));
    }

    #[test]
    fn test_reordering_differs() {
        assert_ne!(snapshot_of(&["a", "b"]), snapshot_of(&["b", "a"]));
    }

    #[test]
    fn test_get_by_id() {
        let snapshot = snapshot_of(&["pad", "keys"]);
        assert_eq!(snapshot.get("keys0").unwrap().name(), "keys");
        assert!(snapshot.get("missing0").is_none());
    }

    #[test]
    fn test_contains_matches_name_and_occurrence() {
        let mut snapshot = Snapshot::new();
        snapshot.push(in_pair("pad", 1));
        assert!(snapshot.contains("pad", 1));
        assert!(!snapshot.contains("pad", 0));
        assert!(!snapshot.contains("keys", 1));
    }
}
