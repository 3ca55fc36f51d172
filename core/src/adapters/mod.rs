//! Adapters layer - backend implementations.
//!
//! Real driver bindings implement [`crate::ports::PortBackend`] outside this
//! crate. The in-memory adapter here backs tests and demos.

mod mock;

pub use mock::{MockBackend, MockEvent};
