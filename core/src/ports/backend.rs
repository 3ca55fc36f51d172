//! Driver capability interface.

use crate::domain::PortKind;
use crate::error::Result;

/// Callback invoked for each message arriving on an open input port.
///
/// The timestamp is driver-defined; the payload is opaque bytes passed
/// through without interpretation.
pub type MessageCallback = Box<dyn FnMut(f64, &[u8]) + Send>;

/// Capability set exposed by a hardware driver.
///
/// The same code path serves both port kinds; implementations dispatch on
/// `kind` rather than providing one type per direction.
pub trait PortBackend: Send + Sync {
    /// Number of raw ports the driver currently reports for `kind`.
    fn count(&self, kind: PortKind) -> usize;

    /// Name of the port at `index`.
    ///
    /// Drivers may transiently report an empty name for a slot whose port is
    /// mid-teardown while still including it in [`count`](Self::count).
    fn name_at(&self, kind: PortKind, index: usize) -> String;

    /// Issue a fresh, unopened handle for a port of `kind`.
    fn handle(&self, kind: PortKind) -> Box<dyn PortHandle>;
}

/// Handle to one raw endpoint, exclusively owned by its port while open.
pub trait PortHandle: Send {
    /// Open the port at the given enumeration index. Failures propagate to
    /// the caller; nothing is retried here.
    fn open(&mut self, index: usize) -> Result<()>;

    /// Close the port. Closing a handle that is not open does nothing.
    fn close(&mut self) -> Result<()>;

    /// Transmit bytes through an open port.
    fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// Register the callback invoked for messages arriving on an open input
    /// port.
    fn subscribe(&mut self, callback: MessageCallback) -> Result<()>;
}
