//! Error types for ramlink.

use thiserror::Error;

/// Main error type for all ramlink operations.
#[derive(Debug, Error)]
pub enum RamLinkError {
    /// I/O error on the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request range falls outside the store.
    #[error("out-of-range access: address {address} + length {length} exceeds capacity {capacity}")]
    OutOfRangeAccess {
        /// Requested start address.
        address: u64,
        /// Requested transfer length in bytes.
        length: u64,
        /// Store capacity in bytes.
        capacity: usize,
    },

    /// Transport closed while bytes were still expected.
    #[error("transport closed")]
    TransportClosed,
}

/// Result type alias using RamLinkError.
pub type Result<T> = std::result::Result<T, RamLinkError>;
