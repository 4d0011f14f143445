//! Message schemas exchanged between a participant and the session.
//!
//! Three sum types cover the whole protocol:
//!
//! - [`ClientMessage`] — participant → session intents.
//! - [`ServerMessage`] — session → participant responses and broadcasts.
//! - [`Action`] — the broadcast record of one committed turn, tagged by
//!   `kind` over the closed set {`Draw`, `Skip`, `Play`}.
//!
//! Every enum is serde-tagged and matched exhaustively; a tag outside the
//! closed set fails decoding. That failure is a fatal protocol violation
//! (both ends are assumed to run matching protocol versions), never a
//! recoverable condition.

use serde::{Deserialize, Serialize};

use crate::Card;

/// Intents a participant sends to the session.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON:
/// `{ "type": "Play", "card": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// First message on every connection: claim a seat under this name.
    Join { username: String },

    /// Take `count` cards from the pile. `count` must equal the pending
    /// draw total (1 at rest, more under an unresolved penalty).
    Draw { count: u8 },

    /// Pass the turn without playing.
    Skip,

    /// Play this card from the sender's hand. For wild-type cards the
    /// color field carries the chosen color.
    Play { card: Card },
}

/// The broadcast record of one committed action.
///
/// `player` is the seat that acted; the payload shape follows the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Action {
    Draw { player: usize, count: u8 },
    Skip { player: usize },
    Play { player: usize, card: Card },
}

impl Action {
    /// The seat that performed this action.
    pub fn player(&self) -> usize {
        match *self {
            Action::Draw { player, .. }
            | Action::Skip { player }
            | Action::Play { player, .. } => player,
        }
    }
}

/// Messages the session sends to participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Per-seat game start. `hand` is the recipient's own cards only;
    /// `seat` is the recipient's index into `usernames` — every other
    /// seat is tracked by count, never by contents.
    GameStart {
        usernames: Vec<String>,
        seat: usize,
        hand: Vec<Card>,
        flipped: Card,
        first_player: usize,
    },

    /// The cards served for a `Draw`, sent to the issuing seat only.
    DrawResponse { cards: Vec<Card> },

    /// A committed action, broadcast to every seat except the actor.
    Action(Action),

    /// A seat disconnected or resigned and leaves the turn rotation.
    PlayerLeft { player: usize },

    /// Terminal: the game ended with this winning seat.
    GameOver { winner: usize },

    /// The session refused the sender's last intent (out of turn, bad
    /// count, illegal card). Sent to the offender only; a well-behaved
    /// participant never receives one.
    Rejected { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardColor, CardSymbol};

    fn card() -> Card {
        Card::new(CardColor::Red, CardSymbol::Number(5))
    }

    // =====================================================================
    // ClientMessage
    // =====================================================================

    #[test]
    fn test_client_join_json_shape() {
        let msg = ClientMessage::Join {
            username: "ada".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "Join");
        assert_eq!(json["username"], "ada");
    }

    #[test]
    fn test_client_message_round_trips() {
        let msgs = [
            ClientMessage::Join {
                username: "ada".into(),
            },
            ClientMessage::Draw { count: 4 },
            ClientMessage::Skip,
            ClientMessage::Play { card: card() },
        ];
        for msg in msgs {
            let bytes = serde_json::to_vec(&msg).unwrap();
            let decoded: ClientMessage =
                serde_json::from_slice(&bytes).unwrap();
            assert_eq!(msg, decoded);
        }
    }

    // =====================================================================
    // Action — the tagged dispatch set
    // =====================================================================

    #[test]
    fn test_action_kind_tags() {
        let json: serde_json::Value =
            serde_json::to_value(Action::Draw { player: 2, count: 2 })
                .unwrap();
        assert_eq!(json["kind"], "Draw");
        assert_eq!(json["player"], 2);
        assert_eq!(json["count"], 2);

        let json: serde_json::Value =
            serde_json::to_value(Action::Skip { player: 0 }).unwrap();
        assert_eq!(json["kind"], "Skip");

        let json: serde_json::Value = serde_json::to_value(Action::Play {
            player: 1,
            card: card(),
        })
        .unwrap();
        assert_eq!(json["kind"], "Play");
        assert!(json["card"].is_object());
    }

    #[test]
    fn test_action_round_trips() {
        let actions = [
            Action::Draw { player: 3, count: 6 },
            Action::Skip { player: 1 },
            Action::Play {
                player: 0,
                card: card(),
            },
        ];
        for action in actions {
            let bytes = serde_json::to_vec(&action).unwrap();
            let decoded: Action = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(action, decoded);
        }
    }

    #[test]
    fn test_action_player_accessor() {
        assert_eq!(Action::Draw { player: 3, count: 1 }.player(), 3);
        assert_eq!(Action::Skip { player: 1 }.player(), 1);
        assert_eq!(
            Action::Play {
                player: 2,
                card: card()
            }
            .player(),
            2
        );
    }

    #[test]
    fn test_unknown_action_kind_fails_decode() {
        // The closed set is {Draw, Skip, Play}; anything else is a
        // protocol-version mismatch and must not decode.
        let unknown = r#"{"kind": "Steal", "player": 0}"#;
        let result: Result<Action, _> = serde_json::from_str(unknown);
        assert!(result.is_err());
    }

    // =====================================================================
    // ServerMessage
    // =====================================================================

    #[test]
    fn test_game_start_round_trip() {
        let msg = ServerMessage::GameStart {
            usernames: vec!["ada".into(), "bob".into()],
            seat: 1,
            hand: vec![card(), Card::new(CardColor::Wild, CardSymbol::Wild)],
            flipped: Card::new(CardColor::Blue, CardSymbol::Reverse),
            first_player: 0,
        };
        let bytes = serde_json::to_vec(&msg).unwrap();
        let decoded: ServerMessage = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(msg, decoded);
    }

    #[test]
    fn test_action_broadcast_json_is_flat() {
        // The broadcast nests Action inside ServerMessage, but on the wire
        // both tags share one object: {"type":"Action","kind":"Skip",...}.
        let msg = ServerMessage::Action(Action::Skip { player: 2 });
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "Action");
        assert_eq!(json["kind"], "Skip");
        assert_eq!(json["player"], 2);
    }

    #[test]
    fn test_server_message_round_trips() {
        let msgs = [
            ServerMessage::DrawResponse {
                cards: vec![card(), card()],
            },
            ServerMessage::Action(Action::Draw { player: 1, count: 2 }),
            ServerMessage::PlayerLeft { player: 3 },
            ServerMessage::GameOver { winner: 0 },
            ServerMessage::Rejected {
                reason: "not your turn".into(),
            },
        ];
        for msg in msgs {
            let bytes = serde_json::to_vec(&msg).unwrap();
            let decoded: ServerMessage =
                serde_json::from_slice(&bytes).unwrap();
            assert_eq!(msg, decoded);
        }
    }

    #[test]
    fn test_unknown_server_message_fails_decode() {
        let unknown = r#"{"type": "Teleport", "player": 0}"#;
        let result: Result<ServerMessage, _> = serde_json::from_str(unknown);
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_fails_decode() {
        let result: Result<ClientMessage, _> =
            serde_json::from_slice(b"not json at all");
        assert!(result.is_err());
    }
}
