//! Error types for the participant side.

use wildpile_engine::EngineError;
use wildpile_net::NetError;

/// Errors that end a participant's game. All of them are fatal for the
/// connection: local input problems are handled by re-prompting and never
/// surface here.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// The channel failed or closed mid-game.
    #[error(transparent)]
    Net(#[from] NetError),

    /// Mirrored state diverged (a ledger underflow, a bad seat index).
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The session sent a message that is valid protocol but impossible
    /// at this point of the exchange.
    #[error("unexpected message from session: {0}")]
    Unexpected(String),

    /// The session refused an action this participant believed legal —
    /// the two sides no longer agree on the game state.
    #[error("session rejected an action: {0}")]
    Desync(String),
}
