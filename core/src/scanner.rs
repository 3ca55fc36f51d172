//! Port enumeration.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Port, PortKind};
use crate::ports::PortBackend;

/// Reads the backend's raw port table into typed [`Port`] records.
pub struct PortScanner {
    backend: Arc<dyn PortBackend>,
}

impl PortScanner {
    /// Create a scanner over the given backend.
    pub fn new(backend: Arc<dyn PortBackend>) -> Self {
        Self { backend }
    }

    /// Enumerate the backend's ports of `kind`, preserving backend order.
    ///
    /// Slots with an empty name are skipped: some drivers keep a closing
    /// virtual port in the count while already reporting its name as empty,
    /// and such a slot must not surface as a device. Occurrence numbers rank
    /// repeated names among the kept entries of this scan only; the count
    /// restarts at zero on the next scan.
    pub fn scan(&self, kind: PortKind) -> Vec<Port> {
        let count = self.backend.count(kind);
        let mut ports = Vec::with_capacity(count);
        let mut seen: HashMap<String, usize> = HashMap::new();

        for index in 0..count {
            let name = self.backend.name_at(kind, index);
            if name.is_empty() {
                continue;
            }

            let slot = seen.entry(name.clone()).or_insert(0);
            let occurrence = *slot;
            *slot += 1;

            ports.push(Port::new(
                index,
                occurrence,
                kind,
                name,
                self.backend.handle(kind),
            ));
        }

        ports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockBackend;

    fn scanner(backend: &MockBackend) -> PortScanner {
        PortScanner::new(Arc::new(backend.clone()))
    }

    #[test]
    fn test_skips_empty_names() {
        let backend = MockBackend::new();
        backend.set_ports(PortKind::Input, &["one", "", "two"]);

        let ports = scanner(&backend).scan(PortKind::Input);
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[0].name, "one");
        assert_eq!(ports[0].index, 0);
        assert_eq!(ports[1].name, "two");
        assert_eq!(ports[1].index, 2);
    }

    #[test]
    fn test_numbers_repeated_names_in_order() {
        let backend = MockBackend::new();
        backend.set_ports(PortKind::Output, &["pad", "pad", "keys", "pad"]);

        let ports = scanner(&backend).scan(PortKind::Output);
        let ranks: Vec<(usize, usize)> = ports.iter().map(|p| (p.index, p.occurrence)).collect();
        assert_eq!(ranks, vec![(0, 0), (1, 1), (2, 0), (3, 2)]);
    }

    #[test]
    fn test_occurrences_restart_each_scan() {
        let backend = MockBackend::new();
        backend.set_ports(PortKind::Input, &["pad", "pad"]);
        let scanner = scanner(&backend);

        let first: Vec<usize> = scanner
            .scan(PortKind::Input)
            .iter()
            .map(|p| p.occurrence)
            .collect();
        let second: Vec<usize> = scanner
            .scan(PortKind::Input)
            .iter()
            .map(|p| p.occurrence)
            .collect();
        assert_eq!(first, vec![0, 1]);
        assert_eq!(second, vec![0, 1]);
    }

    #[test]
    fn test_skipped_slots_consume_no_occurrence() {
        let backend = MockBackend::new();
        backend.set_ports(PortKind::Input, &["solo", "", "solo"]);

        let ports = scanner(&backend).scan(PortKind::Input);
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[1].index, 2);
        assert_eq!(ports[1].occurrence, 1);
    }
}
