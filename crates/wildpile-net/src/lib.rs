//! Message channels for Wildpile.
//!
//! The game logic never touches a socket. It talks through two seams:
//!
//! - [`Connection`] — an ordered, reliable, bidirectional byte pipe.
//!   [`WsListener`]/[`connect`] provide the WebSocket implementation;
//!   [`memory::pair`] provides an in-process loopback so game logic is
//!   testable without any real transport.
//! - [`MessageChannel`] — a typed wrapper over any `Connection` plus a
//!   [`Codec`](wildpile_protocol::Codec): `send(&msg)` / `recv::<T>()`
//!   with decoding failures surfaced as fatal protocol errors.
//!
//! # Feature Flags
//!
//! - `websocket` (default) — WebSocket transport via `tokio-tungstenite`.

mod channel;
mod error;
pub mod memory;
#[cfg(feature = "websocket")]
mod websocket;

pub use channel::MessageChannel;
pub use error::NetError;
#[cfg(feature = "websocket")]
pub use websocket::{WsConnection, WsListener, connect};

use std::fmt;

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// An ordered, reliable, bidirectional byte pipe to one peer.
///
/// Methods take `&self` so a reader task and a writer task can share one
/// connection without serializing against each other. The futures are
/// `Send` because the session awaits them from spawned tasks that are
/// generic over the connection type.
pub trait Connection: Send + Sync + 'static {
    /// Sends one message's bytes to the peer.
    fn send(
        &self,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<(), NetError>> + Send;

    /// Receives the next message from the peer, awaiting until one
    /// arrives. Returns `Ok(None)` when the peer closed cleanly.
    fn recv(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>, NetError>> + Send;

    /// Closes the connection.
    fn close(&self) -> impl std::future::Future<Output = Result<(), NetError>> + Send;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
