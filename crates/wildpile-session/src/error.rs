//! Error types for the session.

use wildpile_engine::EngineError;
use wildpile_net::NetError;

/// Errors that abort a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A channel operation failed while the session still needed it.
    #[error(transparent)]
    Net(#[from] NetError),

    /// Authoritative state manipulation failed — a deal the deck cannot
    /// cover, a ledger underflow.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A connection's first message was not `Join`.
    #[error("expected Join to open the connection, got {0}")]
    BadHandshake(String),

    /// A connection did not send `Join` in time.
    #[error("timed out waiting for a Join")]
    JoinTimeout,

    /// A game needs at least two seats.
    #[error("session needs at least two seats, got {0}")]
    TooFewSeats(usize),

    /// Every reader task ended while a game was still running.
    #[error("all participants gone mid-game")]
    AllGone,
}
