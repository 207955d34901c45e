//! Error types for a3s-link
//!
//! The bridge state machine itself never fails. These errors only surface
//! at the fallible edges: configuration, the wire codec, and push transport.

use thiserror::Error;

/// Errors that can occur around the link bridge
#[derive(Debug, Error)]
pub enum LinkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed channel message
    #[error("Failed to decode channel message: {0}")]
    Decode(String),

    /// The runtime side of a push channel has gone away
    #[error("Push channel '{0}' is closed")]
    ChannelClosed(String),
}

/// Result type alias for link operations
pub type Result<T> = std::result::Result<T, LinkError>;
