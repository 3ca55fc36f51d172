//! Error types for the portpair-core library.

use thiserror::Error;

/// Result type alias for port operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while operating driver ports.
///
/// Enumeration never fails: a slot the driver reports with an empty name is
/// filtered out during scanning rather than surfaced as an error, and a
/// lookup miss is `None`, not an `Err`.
#[derive(Error, Debug)]
pub enum Error {
    /// The backend driver rejected or failed an operation.
    #[error("backend error: {0}")]
    Backend(String),

    /// Operation on a handle that has not been opened.
    #[error("port is not open")]
    NotOpen,
}
