//! In-memory backend adapter.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::PortKind;
use crate::error::{Error, Result};
use crate::ports::{MessageCallback, PortBackend, PortHandle};

/// One recorded backend operation, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEvent {
    /// A handle opened the port at `index`.
    Opened { kind: PortKind, index: usize },
    /// A handle closed the port at `index`.
    Closed { kind: PortKind, index: usize },
    /// Bytes were transmitted through the output port at `index`.
    Sent { index: usize, bytes: Vec<u8> },
}

#[derive(Default)]
struct MockState {
    inputs: Vec<String>,
    outputs: Vec<String>,
    events: Vec<MockEvent>,
    fail_open: bool,
    subscribers: HashMap<usize, MessageCallback>,
}

impl MockState {
    fn names(&self, kind: PortKind) -> &Vec<String> {
        match kind {
            PortKind::Input => &self.inputs,
            PortKind::Output => &self.outputs,
        }
    }

    fn names_mut(&mut self, kind: PortKind) -> &mut Vec<String> {
        match kind {
            PortKind::Input => &mut self.inputs,
            PortKind::Output => &mut self.outputs,
        }
    }
}

/// Scriptable in-memory driver.
///
/// The port table is edited by hand, every open/close/send lands in an event
/// log for assertions, and inbound messages are injected with
/// [`emit`](MockBackend::emit). Clones share state, so a test can keep a
/// copy for scripting while the engine owns another. Empty-string names are
/// representable to reproduce drivers that keep a mid-teardown slot in the
/// count while already reporting its name as empty.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the port table for `kind`.
    pub fn set_ports(&self, kind: PortKind, names: &[&str]) {
        *self.state.lock().names_mut(kind) = names.iter().map(|name| name.to_string()).collect();
    }

    /// Append a port to the table for `kind`.
    pub fn add_port(&self, kind: PortKind, name: &str) {
        self.state.lock().names_mut(kind).push(name.to_string());
    }

    /// Remove the first port named `name` from the table for `kind`.
    pub fn remove_port(&self, kind: PortKind, name: &str) {
        let mut state = self.state.lock();
        let names = state.names_mut(kind);
        if let Some(position) = names.iter().position(|entry| entry == name) {
            names.remove(position);
        }
    }

    /// Make subsequent opens fail until cleared.
    pub fn set_fail_open(&self, fail: bool) {
        self.state.lock().fail_open = fail;
    }

    /// Everything recorded so far, in call order.
    pub fn events(&self) -> Vec<MockEvent> {
        self.state.lock().events.clone()
    }

    /// Drain the event log.
    pub fn take_events(&self) -> Vec<MockEvent> {
        std::mem::take(&mut self.state.lock().events)
    }

    /// Deliver a message to the subscriber of the open input port at
    /// `index`. Does nothing when no subscriber is registered there.
    pub fn emit(&self, index: usize, timestamp: f64, bytes: &[u8]) {
        // Take the callback out so it may re-enter the backend.
        let callback = self.state.lock().subscribers.remove(&index);
        if let Some(mut callback) = callback {
            callback(timestamp, bytes);
            self.state.lock().subscribers.insert(index, callback);
        }
    }
}

impl PortBackend for MockBackend {
    fn count(&self, kind: PortKind) -> usize {
        self.state.lock().names(kind).len()
    }

    fn name_at(&self, kind: PortKind, index: usize) -> String {
        self.state
            .lock()
            .names(kind)
            .get(index)
            .cloned()
            .unwrap_or_default()
    }

    fn handle(&self, kind: PortKind) -> Box<dyn PortHandle> {
        Box::new(MockHandle {
            kind,
            state: Arc::clone(&self.state),
            open_index: None,
        })
    }
}

struct MockHandle {
    kind: PortKind,
    state: Arc<Mutex<MockState>>,
    open_index: Option<usize>,
}

impl PortHandle for MockHandle {
    fn open(&mut self, index: usize) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_open {
            return Err(Error::Backend(format!(
                "cannot open {} port {}",
                self.kind, index
            )));
        }
        state.events.push(MockEvent::Opened {
            kind: self.kind,
            index,
        });
        self.open_index = Some(index);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(index) = self.open_index.take() {
            let mut state = self.state.lock();
            state.events.push(MockEvent::Closed {
                kind: self.kind,
                index,
            });
            if self.kind == PortKind::Input {
                state.subscribers.remove(&index);
            }
        }
        Ok(())
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        let index = self.open_index.ok_or(Error::NotOpen)?;
        self.state.lock().events.push(MockEvent::Sent {
            index,
            bytes: bytes.to_vec(),
        });
        Ok(())
    }

    fn subscribe(&mut self, callback: MessageCallback) -> Result<()> {
        if self.kind != PortKind::Input {
            return Err(Error::Backend(
                "subscriptions are input-only".to_string(),
            ));
        }
        let index = self.open_index.ok_or(Error::NotOpen)?;
        self.state.lock().subscribers.insert(index, callback);
        Ok(())
    }
}
