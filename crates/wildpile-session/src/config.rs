//! Session configuration.

use std::time::Duration;

use wildpile_engine::DeckPolicy;

/// Configuration for one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Seats to fill before the first game starts.
    pub players: usize,

    /// Cards dealt to each seat at game start.
    pub hand_size: usize,

    /// How the draw pile is built each game.
    pub deck: DeckPolicy,

    /// Games to play back to back over the same connections. The first
    /// player rotates one seat per game.
    pub games: u64,

    /// How long the turn-holder may think before being treated as
    /// disconnected. `None` waits forever.
    pub turn_timeout: Option<Duration>,

    /// How long each connection gets to send its `Join`.
    pub join_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            players: 2,
            hand_size: 7,
            deck: DeckPolicy::Random,
            games: 1,
            turn_timeout: None,
            join_timeout: Duration::from_secs(30),
        }
    }
}
