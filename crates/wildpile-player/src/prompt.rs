//! The injected input capability and the view it decides from.

use std::collections::VecDeque;
use std::fmt;

use wildpile_engine::Roster;
use wildpile_protocol::{Card, CardColor};

use crate::HandCards;

/// One of the three things a turn-holder can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnChoice {
    /// Take the pending number of cards from the pile.
    Draw,
    /// Pass without playing.
    Skip,
    /// Play the hand card at `index`. `color` is the chosen color when
    /// that card is wild-type; ignored otherwise.
    Play {
        index: usize,
        color: Option<CardColor>,
    },
}

/// Everything a prompt may look at when choosing: the own hand exactly,
/// everyone else by count, and the shared board.
pub struct TableView<'a> {
    pub seat: usize,
    pub hand: &'a HandCards,
    pub roster: &'a Roster,
    pub last_card: Card,
    pub current_player: usize,
    pub clockwise: bool,
    pub pending_draws: u8,
}

impl fmt::Display for TableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "hand {} (seat {})", self.hand, self.seat)?;
        writeln!(
            f,
            "last {}  turn {}  dir {}  pending {}",
            self.last_card,
            self.current_player,
            if self.clockwise { "cw" } else { "ccw" },
            self.pending_draws,
        )?;
        for (seat, stat) in self.roster.iter().enumerate() {
            writeln!(
                f,
                "  [{seat}] {} — {} cards{}",
                stat.username(),
                stat.hand_size(),
                if stat.resigned() { " (resigned)" } else { "" },
            )?;
        }
        Ok(())
    }
}

/// Where a participant's turn decisions come from.
///
/// The game loop calls [`choose`](Self::choose) when the participant holds
/// the turn, re-calling it after [`rejected`](Self::rejected) until the
/// choice is valid; nothing invalid ever reaches the wire.
/// [`observe`](Self::observe) fires after every applied action so an
/// implementation can re-render.
pub trait TurnPrompt: Send {
    /// Chooses this turn's action.
    async fn choose(&mut self, view: &TableView<'_>) -> TurnChoice;

    /// The previous choice was invalid for this reason; `choose` will be
    /// called again.
    fn rejected(&mut self, reason: &str) {
        tracing::warn!(reason, "choice rejected");
    }

    /// The table changed (an action was applied, a seat left, …).
    fn observe(&mut self, view: &TableView<'_>) {
        let _ = view;
    }
}

/// Replays a fixed sequence of choices. Drives bots in tests and demos;
/// panics if asked for more choices than it was given.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    script: VecDeque<TurnChoice>,
    rejections: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(choices: impl IntoIterator<Item = TurnChoice>) -> Self {
        Self {
            script: choices.into_iter().collect(),
            rejections: Vec::new(),
        }
    }

    /// Reasons passed to `rejected` so far.
    pub fn rejections(&self) -> &[String] {
        &self.rejections
    }
}

impl TurnPrompt for ScriptedPrompt {
    async fn choose(&mut self, _view: &TableView<'_>) -> TurnChoice {
        self.script.pop_front().expect("script ran out of choices")
    }

    fn rejected(&mut self, reason: &str) {
        self.rejections.push(reason.to_string());
    }
}

/// Plays the first legal card (wilds go as red), otherwise draws. Good
/// enough to finish a game unattended.
#[derive(Debug, Default)]
pub struct AutoPrompt;

impl TurnPrompt for AutoPrompt {
    async fn choose(&mut self, view: &TableView<'_>) -> TurnChoice {
        for (index, card) in view.hand.as_slice().iter().enumerate() {
            if wildpile_engine::can_follow(*card, view.last_card, view.pending_draws) {
                let color = card.is_wild().then_some(CardColor::Red);
                return TurnChoice::Play { index, color };
            }
        }
        TurnChoice::Draw
    }
}
