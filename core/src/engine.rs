//! Device engine - central state management and periodic scanning.
//!
//! The engine owns the current snapshot of paired devices, rescans the
//! backend on a timer, and fans changes out to registered listeners with
//! open/close lifecycle handling.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::domain::{PortKind, PortPair, Snapshot};
use crate::error::Result;
use crate::listeners::ListenerHub;
use crate::pairing::pair_ports;
use crate::ports::PortBackend;
use crate::scanner::PortScanner;

/// The central device engine.
///
/// Each engine is an independent context over one backend; nothing is
/// process-global, so several engines can coexist (and tests run in
/// isolation).
///
/// # Usage
/// ```
/// # use std::sync::Arc;
/// # use std::time::Duration;
/// # use portpair_core::{DeviceEngine, MockBackend};
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let engine = Arc::new(DeviceEngine::new(Arc::new(MockBackend::new())));
/// let id = engine.add_listener(|pairs| println!("{} devices", pairs.len()));
/// engine.start(Duration::from_millis(100));
/// // ...
/// engine.stop().unwrap();
/// engine.remove_listener(id);
/// # }
/// ```
pub struct DeviceEngine {
    scanner: PortScanner,
    config: EngineConfig,

    /// Current snapshot, swapped wholesale on each detected change so that
    /// concurrent readers observe either the old or the new device set,
    /// never a partial one.
    devices: RwLock<Arc<Snapshot>>,
    listeners: ListenerHub,

    /// Serializes scan cycles; manual and timer-driven scans never overlap.
    scan_gate: Mutex<()>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl DeviceEngine {
    /// Create an engine over `backend` with default configuration.
    pub fn new(backend: Arc<dyn PortBackend>) -> Self {
        Self::with_config(backend, EngineConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(backend: Arc<dyn PortBackend>, config: EngineConfig) -> Self {
        Self {
            scanner: PortScanner::new(backend),
            config,
            devices: RwLock::new(Arc::new(Snapshot::new())),
            listeners: ListenerHub::new(),
            scan_gate: Mutex::new(()),
            timer: Mutex::new(None),
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Begin periodic scanning at `interval`.
    ///
    /// The first cycle runs immediately; later cycles follow the interval.
    /// Calling `start` while already running cancels the existing timer and
    /// restarts at the new interval. Must be called from within a tokio
    /// runtime.
    pub fn start(self: &Arc<Self>, interval: Duration) {
        let mut timer = self.timer.lock();
        if let Some(task) = timer.take() {
            task.abort();
        }

        let engine = Arc::clone(self);
        *timer = Some(tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                // The next tick is the retry for transient failures.
                if let Err(error) = engine.scan_once() {
                    warn!(%error, "scan cycle failed");
                }
            }
        }));
    }

    /// Halt periodic scanning, close every open device, and clear the
    /// registry.
    ///
    /// Clearing means a later [`start`](Self::start) rebuilds the device set
    /// from scratch, reopening ports even when the backend never changed in
    /// between. Listeners are not invoked; the next scan cycle notifies them
    /// as usual. Does nothing when the engine is already stopped. An
    /// in-flight cycle is never interrupted mid-scan; cancellation lands on
    /// the next tick.
    pub fn stop(&self) -> Result<()> {
        let task = self.timer.lock().take();
        match task {
            Some(task) => {
                task.abort();
                let current = self.devices.read().clone();
                current.close_all()?;
                *self.devices.write() = Arc::new(Snapshot::new());
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Whether the periodic timer is active.
    pub fn is_running(&self) -> bool {
        self.timer.lock().is_some()
    }

    /// Run one scan cycle.
    ///
    /// Builds a fresh candidate snapshot and, when it structurally differs
    /// from the current one, closes the old devices, installs the candidate,
    /// opens its devices, and notifies listeners in registration order.
    /// Returns whether the device set changed. Backend open/close failures
    /// propagate to the caller; nothing is retried here.
    pub fn scan_once(&self) -> Result<bool> {
        let _cycle = self.scan_gate.lock();

        let inputs = self.scanner.scan(PortKind::Input);
        let outputs = self.scanner.scan(PortKind::Output);
        let candidate = pair_ports(inputs, outputs);

        let current = self.devices.read().clone();
        if *current == candidate {
            return Ok(false);
        }

        debug!(devices = candidate.len(), "device set changed");

        current.close_all()?;
        let candidate = Arc::new(candidate);
        *self.devices.write() = Arc::clone(&candidate);
        candidate.open_all()?;

        self.listeners.notify(candidate.pairs());
        Ok(true)
    }

    // ========================================================================
    // Listeners
    // ========================================================================

    /// Register a callback invoked with the full device list after each
    /// detected change. Returns the token for
    /// [`remove_listener`](Self::remove_listener). Registering never fires
    /// the callback by itself.
    ///
    /// Callbacks run inline during the scan cycle that detected the change;
    /// they must not block indefinitely or call [`scan_once`](Self::scan_once).
    pub fn add_listener<F>(&self, listener: F) -> Uuid
    where
        F: Fn(&[PortPair]) + Send + Sync + 'static,
    {
        self.listeners.add(listener)
    }

    /// Remove a previously registered listener. Unknown tokens are ignored.
    pub fn remove_listener(&self, id: Uuid) {
        self.listeners.remove(id);
    }

    // ========================================================================
    // Registry access
    // ========================================================================

    /// All currently known devices, in scan order.
    pub fn all(&self) -> Vec<PortPair> {
        self.devices.read().pairs().to_vec()
    }

    /// The device with the given id, or `None` when absent.
    pub fn get(&self, id: &str) -> Option<PortPair> {
        self.devices.read().get(id).cloned()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.devices.read().clone()
    }

    /// Close every device in the current snapshot without replacing it or
    /// touching the timer.
    pub fn close_all(&self) -> Result<()> {
        self.devices.read().close_all()
    }
}

impl Drop for DeviceEngine {
    fn drop(&mut self) {
        if let Some(task) = self.timer.lock().take() {
            task.abort();
        }
    }
}
