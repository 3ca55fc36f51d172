//! PortPair Core Library
//!
//! Maintains a live, logical view of the I/O ports exposed by a hardware
//! driver. Raw input and output endpoints are enumerated on a timer, grouped
//! into paired devices by name and occurrence, and every change to the
//! device set is fanned out to registered listeners with open/close
//! lifecycle handling.
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: device models (ports, pairs, snapshots)
//! - `ports`: trait definitions (driver capability interface)
//! - `adapters`: backend implementations (in-memory driver for tests/demos)
//! - `scanner` / `pairing`: the scan pipeline feeding the engine
//! - `engine`: central state, periodic scanning, listener fan-out
//!
//! Real hardware bindings live outside this crate behind [`PortBackend`];
//! message payloads pass through as opaque bytes.

// Hexagonal architecture layers
pub mod adapters;
pub mod domain;
pub mod ports;

pub mod config;
pub mod engine;
pub mod error;
pub mod listeners;
pub mod pairing;
pub mod scanner;

// Re-export domain types (primary API)
pub use domain::{DeviceInfo, Port, PortKind, PortPair, Snapshot};

// Re-export other commonly used types
pub use adapters::{MockBackend, MockEvent};
pub use config::EngineConfig;
pub use engine::DeviceEngine;
pub use error::{Error, Result};
pub use listeners::{ListenerHub, PairListener};
pub use pairing::pair_ports;
pub use ports::{MessageCallback, PortBackend, PortHandle};
pub use scanner::PortScanner;
