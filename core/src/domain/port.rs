//! Raw port domain model.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ports::{MessageCallback, PortHandle};

/// Direction of a raw endpoint as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortKind {
    /// Receives messages from the device.
    Input,
    /// Sends messages to the device.
    Output,
}

impl std::fmt::Display for PortKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortKind::Input => write!(f, "input"),
            PortKind::Output => write!(f, "output"),
        }
    }
}

/// One raw endpoint reported by the backend during a single scan.
///
/// Ports are rebuilt from scratch on every scan cycle, so `index` is only
/// meaningful within the cycle that produced it. Clones share the underlying
/// backend handle; no two distinct ports ever share one.
#[derive(Clone)]
pub struct Port {
    /// Position in the backend's enumeration at scan time.
    pub index: usize,
    /// Zero-based rank among same-named, same-kind ports in this scan.
    pub occurrence: usize,
    /// Direction of the endpoint.
    pub kind: PortKind,
    /// Backend-reported name, never empty.
    pub name: String,
    handle: Arc<Mutex<Box<dyn PortHandle>>>,
}

impl Port {
    pub(crate) fn new(
        index: usize,
        occurrence: usize,
        kind: PortKind,
        name: String,
        handle: Box<dyn PortHandle>,
    ) -> Self {
        Self {
            index,
            occurrence,
            kind,
            name,
            handle: Arc::new(Mutex::new(handle)),
        }
    }

    /// Open the backend port at this port's enumeration index.
    pub fn open(&self) -> Result<()> {
        self.handle.lock().open(self.index)
    }

    /// Close the backend port.
    pub fn close(&self) -> Result<()> {
        self.handle.lock().close()
    }

    /// Transmit raw bytes through the backend port.
    pub fn send(&self, bytes: &[u8]) -> Result<()> {
        self.handle.lock().send(bytes)
    }

    /// Register a callback for messages arriving on the backend port.
    pub fn subscribe(&self, callback: MessageCallback) -> Result<()> {
        self.handle.lock().subscribe(callback)
    }
}

impl std::fmt::Debug for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Port")
            .field("index", &self.index)
            .field("occurrence", &self.occurrence)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(PortKind::Input.to_string(), "input");
        assert_eq!(PortKind::Output.to_string(), "output");
    }
}
