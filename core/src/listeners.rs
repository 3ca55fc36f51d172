//! Listener registration and fan-out.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;
use uuid::Uuid;

use crate::domain::PortPair;

/// Callback invoked with the full device list after each detected change.
pub type PairListener = Arc<dyn Fn(&[PortPair]) + Send + Sync>;

/// Insertion-ordered registry of change listeners.
#[derive(Default)]
pub struct ListenerHub {
    entries: Mutex<Vec<(Uuid, PairListener)>>,
}

impl ListenerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener and return the token that removes it again.
    /// Registration alone never triggers a notification.
    pub fn add<F>(&self, listener: F) -> Uuid
    where
        F: Fn(&[PortPair]) + Send + Sync + 'static,
    {
        let id = Uuid::new_v4();
        self.entries.lock().push((id, Arc::new(listener)));
        id
    }

    /// Remove the listener registered under `id`. Returns whether one was
    /// present.
    pub fn remove(&self, id: Uuid) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Invoke every registered listener with `pairs`, in registration order.
    ///
    /// The entry list is snapshotted up front and no lock is held while a
    /// callback runs, so listeners may add or remove entries mid-cycle; an
    /// entry removed during the fan-out is not invoked for the remainder of
    /// it. A panicking listener is logged and skipped without aborting the
    /// rest.
    pub fn notify(&self, pairs: &[PortPair]) {
        let snapshot: Vec<(Uuid, PairListener)> = self.entries.lock().clone();
        for (id, listener) in snapshot {
            let still_registered = self
                .entries
                .lock()
                .iter()
                .any(|(entry_id, _)| *entry_id == id);
            if !still_registered {
                continue;
            }
            if panic::catch_unwind(AssertUnwindSafe(|| listener(pairs))).is_err() {
                warn!(listener = %id, "device listener panicked during fan-out");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[test]
    fn test_fan_out_in_registration_order() {
        let hub = ListenerHub::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            hub.add(move |_| order.lock().push(tag));
        }

        hub.notify(&[]);
        assert_eq!(order.lock().as_slice(), &["first", "second", "third"]);
    }

    #[test]
    fn test_remove_unknown_id_is_ignored() {
        let hub = ListenerHub::new();
        hub.add(|_| {});
        assert!(!hub.remove(Uuid::new_v4()));
        assert_eq!(hub.len(), 1);
    }

    #[test]
    fn test_listener_removed_mid_fanout_is_skipped() {
        let hub = Arc::new(ListenerHub::new());
        let target = Arc::new(Mutex::new(None::<Uuid>));
        let invoked = Arc::new(AtomicBool::new(false));

        let remover_hub = Arc::clone(&hub);
        let remover_target = Arc::clone(&target);
        hub.add(move |_| {
            if let Some(id) = *remover_target.lock() {
                remover_hub.remove(id);
            }
        });

        let invoked_flag = Arc::clone(&invoked);
        let id = hub.add(move |_| invoked_flag.store(true, Ordering::SeqCst));
        *target.lock() = Some(id);

        hub.notify(&[]);
        assert!(!invoked.load(Ordering::SeqCst));
        assert_eq!(hub.len(), 1);
    }

    #[test]
    fn test_panicking_listener_does_not_abort_fanout() {
        let hub = ListenerHub::new();
        let reached = Arc::new(AtomicBool::new(false));

        hub.add(|_| panic!("listener failure"));
        let reached_flag = Arc::clone(&reached);
        hub.add(move |_| reached_flag.store(true, Ordering::SeqCst));

        hub.notify(&[]);
        assert!(reached.load(Ordering::SeqCst));
    }
}
