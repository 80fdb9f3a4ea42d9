//! Error types for element and lookup operations

use thiserror::Error;

/// Errors raised while loading or storing an element's configuration.
///
/// Rendering never produces these: see [`crate::markup`] for the fail-soft rules.
#[derive(Debug, Error)]
pub enum ElementError {
    /// The stored configuration blob could not be decoded
    #[error("Invalid stored data: {0}")]
    Decode(#[source] serde_json::Error),
    /// The configuration could not be encoded
    #[error("Could not encode element data: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Failure reported by a host lookup backend.
///
/// The transformer treats every `LookupError` exactly like a miss.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lookup failed: {message}")]
pub struct LookupError {
    pub message: String,
}

impl LookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
