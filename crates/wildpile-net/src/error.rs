//! Error types for the channel layer.

use wildpile_protocol::ProtocolError;

/// Errors that can occur on a message channel.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    /// Binding a listener failed.
    #[error("bind failed: {0}")]
    Bind(#[source] std::io::Error),

    /// Accepting an incoming connection failed.
    #[error("accept failed: {0}")]
    Accept(#[source] std::io::Error),

    /// Connecting to a remote peer failed.
    #[error("connect failed: {0}")]
    Connect(String),

    /// Sending data failed.
    #[error("send failed: {0}")]
    Send(String),

    /// Receiving data failed.
    #[error("receive failed: {0}")]
    Receive(String),

    /// The peer closed the channel. For a participant mid-game this is
    /// fatal: the session records the seat as resigned.
    #[error("channel closed by peer")]
    ChannelClosed,

    /// The bytes on the channel did not decode as the expected message.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
