//! Error types for FrameKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using KvError
pub type Result<T> = std::result::Result<T, KvError>;

/// Unified error type for FrameKV operations
#[derive(Debug, Error)]
pub enum KvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("Short read: expected {expected} bytes, got {got}")]
    ShortRead { expected: usize, got: usize },

    #[error("Frame too large: {0} bytes (max 255)")]
    FrameTooLarge(usize),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Unknown operation tag: 0x{0:02x}")]
    UnknownOpTag(u8),

    #[error("Unknown result tag: 0x{0:02x}")]
    UnknownResultTag(u8),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Key not found: {}", String::from_utf8_lossy(.0))]
    KeyNotFound(Vec<u8>),

    #[error("Store error: {0}")]
    Store(String),

    // -------------------------------------------------------------------------
    // Client Errors
    // -------------------------------------------------------------------------
    #[error("Remote operation failed")]
    RemoteOperation,

    #[error("Connection is broken after an earlier transport failure")]
    ConnectionBroken,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KvError {
    /// Whether this error came from the transport rather than the remote side
    ///
    /// A client that sees a transport error must reconnect before reuse.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            KvError::Io(_) | KvError::ShortRead { .. } | KvError::UnknownResultTag(_)
        )
    }
}
