//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed — malformed bytes, or a tag outside the
    /// protocol's closed sets. Fatal for the connection: it means the two
    /// ends disagree on the protocol version.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A message decoded cleanly but violates the protocol at this point
    /// of the exchange (e.g. a `DrawResponse` when no draw is in flight).
    #[error("protocol violation: {0}")]
    Violation(String),
}
