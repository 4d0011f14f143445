//! Unified error type for the Wildpile binary and facade.

use wildpile_engine::EngineError;
use wildpile_net::NetError;
use wildpile_player::PlayerError;
use wildpile_protocol::ProtocolError;
use wildpile_session::SessionError;

/// Top-level error wrapping every layer's error type, so binary code can
/// use `?` throughout.
#[derive(Debug, thiserror::Error)]
pub enum WildpileError {
    #[error(transparent)]
    Net(#[from] NetError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Player(#[from] PlayerError),
}
