//! The participant's game loop.

use wildpile_engine::{
    BoardState, Roster, advance_past_resigned, apply_action, record_departure,
};
use wildpile_net::{Connection, MessageChannel, NetError};
use wildpile_protocol::{Action, Card, CardColor, ClientMessage, Codec, ServerMessage};

use crate::{HandCards, PlayerError, TableView, TurnChoice, TurnPrompt};

/// How one game ended, as announced by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: usize,
    pub winner_username: String,
    /// Whether the winning seat was this participant's.
    pub local_win: bool,
}

/// One participant: a channel to the session, an input capability, and —
/// per game — the exact own hand plus a mirror of the shared state.
pub struct Player<Conn, C, P> {
    username: String,
    channel: MessageChannel<Conn, C>,
    prompt: P,
}

impl<Conn, C, P> Player<Conn, C, P>
where
    Conn: Connection,
    C: Codec,
    P: TurnPrompt,
{
    pub fn new(username: impl Into<String>, channel: MessageChannel<Conn, C>, prompt: P) -> Self {
        Self {
            username: username.into(),
            channel,
            prompt,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The injected prompt (for inspecting scripted prompts in tests).
    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Claims a seat at the session. Must be the first message on the
    /// channel; the session seats players in join order.
    pub async fn join(&self) -> Result<(), PlayerError> {
        self.channel
            .send(&ClientMessage::Join {
                username: self.username.clone(),
            })
            .await?;
        tracing::info!(username = %self.username, "joined session");
        Ok(())
    }

    /// Plays one full game: waits for `GameStart`, then alternates
    /// between acting (own turn) and mirroring (remote turns) until the
    /// session announces the outcome.
    ///
    /// Returns `Ok(None)` when the session closes the channel instead of
    /// starting another game. Every call builds fresh per-game state;
    /// nothing carries over between games.
    pub async fn play_game(&mut self) -> Result<Option<GameOutcome>, PlayerError> {
        let (usernames, seat, cards, flipped, first_player) =
            match self.channel.recv::<ServerMessage>().await {
                Ok(ServerMessage::GameStart {
                    usernames,
                    seat,
                    hand,
                    flipped,
                    first_player,
                }) => (usernames, seat, hand, flipped, first_player),
                Ok(other) => {
                    return Err(PlayerError::Unexpected(message_name(&other).into()));
                }
                Err(NetError::ChannelClosed) => return Ok(None),
                Err(e) => return Err(e.into()),
            };

        tracing::info!(seat, players = usernames.len(), "game started");
        let hand_size = cards.len();
        let mut run = GameRun {
            channel: &self.channel,
            prompt: &mut self.prompt,
            seat,
            board: BoardState::new(usernames.len(), flipped, first_player)?,
            roster: Roster::new(&usernames, hand_size),
            hand: HandCards::new(cards),
        };
        run.run().await.map(Some)
    }
}

/// Cards served for a draw — unless the game ended underneath it.
enum Served {
    Cards(Vec<Card>),
    Over(GameOutcome),
}

/// The state of one game in flight. Dropped wholesale when the game ends.
struct GameRun<'a, Conn, C, P> {
    channel: &'a MessageChannel<Conn, C>,
    prompt: &'a mut P,
    seat: usize,
    board: BoardState,
    roster: Roster,
    hand: HandCards,
}

impl<Conn, C, P> GameRun<'_, Conn, C, P>
where
    Conn: Connection,
    C: Codec,
    P: TurnPrompt,
{
    async fn run(&mut self) -> Result<GameOutcome, PlayerError> {
        self.observe();
        loop {
            let outcome = if self.board.current_player() == self.seat {
                self.local_turn().await?
            } else {
                self.remote_turn().await?
            };
            if let Some(outcome) = outcome {
                tracing::info!(
                    winner = outcome.winner,
                    username = %outcome.winner_username,
                    "game over"
                );
                return Ok(outcome);
            }
        }
    }

    /// It is this participant's turn: prompt until a valid choice, send
    /// it, commit it locally. Invalid choices re-prompt with a reason and
    /// never touch state or the wire.
    async fn local_turn(&mut self) -> Result<Option<GameOutcome>, PlayerError> {
        loop {
            let choice = {
                // Built from field borrows so the prompt (a sibling
                // field) can be borrowed mutably alongside the view.
                let view = TableView {
                    seat: self.seat,
                    hand: &self.hand,
                    roster: &self.roster,
                    last_card: self.board.last_card(),
                    current_player: self.board.current_player(),
                    clockwise: self.board.clockwise(),
                    pending_draws: self.board.pending_draws(),
                };
                self.prompt.choose(&view).await
            };
            match choice {
                TurnChoice::Draw => {
                    let count = self.board.pending_draws();
                    self.channel.send(&ClientMessage::Draw { count }).await?;
                    match self.await_draw_response().await? {
                        Served::Over(outcome) => return Ok(Some(outcome)),
                        Served::Cards(cards) => {
                            // The pile may come up short; the ledger uses
                            // the count actually served, same as the
                            // broadcast every other seat gets.
                            let served = cards.len() as u8;
                            self.hand.extend(cards);
                            self.commit(&Action::Draw {
                                player: self.seat,
                                count: served,
                            })?;
                            return Ok(None);
                        }
                    }
                }
                TurnChoice::Skip => {
                    self.channel.send(&ClientMessage::Skip).await?;
                    self.commit(&Action::Skip { player: self.seat })?;
                    return Ok(None);
                }
                TurnChoice::Play { index, color } => {
                    let Some(held) = self.hand.get(index) else {
                        self.prompt.rejected(&format!("no card at index {index}"));
                        continue;
                    };
                    let card = if held.is_wild() {
                        match color {
                            Some(chosen) if chosen != CardColor::Wild => {
                                held.with_color(chosen)
                            }
                            _ => {
                                self.prompt.rejected("a wild needs a chosen color");
                                continue;
                            }
                        }
                    } else {
                        held
                    };
                    if !self.board.can_follow(card) {
                        self.prompt.rejected(&format!(
                            "{card} cannot follow {} (pending {})",
                            self.board.last_card(),
                            self.board.pending_draws(),
                        ));
                        continue;
                    }

                    self.hand.remove(index);
                    self.channel.send(&ClientMessage::Play { card }).await?;
                    self.commit(&Action::Play {
                        player: self.seat,
                        card,
                    })?;
                    if self.hand.is_empty() {
                        // Terminal: the session confirms with GameOver.
                        return Ok(Some(self.await_game_over().await?));
                    }
                    return Ok(None);
                }
            }
        }
    }

    /// Someone else holds the turn: block for exactly one broadcast and
    /// mirror it.
    async fn remote_turn(&mut self) -> Result<Option<GameOutcome>, PlayerError> {
        match self.channel.recv::<ServerMessage>().await? {
            ServerMessage::Action(action) => {
                if action.player() != self.board.current_player() {
                    return Err(PlayerError::Unexpected(format!(
                        "action by seat {} while seat {} holds the turn",
                        action.player(),
                        self.board.current_player(),
                    )));
                }
                self.commit(&action)?;
                if self.roster.winner().is_some() {
                    return Ok(Some(self.await_game_over().await?));
                }
                Ok(None)
            }
            ServerMessage::PlayerLeft { player } => {
                self.depart(player)?;
                if self.roster.sole_active() == Some(self.seat) {
                    // Forfeit in our favor; the session announces it.
                    return Ok(Some(self.await_game_over().await?));
                }
                Ok(None)
            }
            ServerMessage::GameOver { winner } => Ok(Some(self.outcome(winner))),
            ServerMessage::Rejected { reason } => Err(PlayerError::Desync(reason)),
            other => Err(PlayerError::Unexpected(message_name(&other).into())),
        }
    }

    /// Applies one committed action — exactly once, before the turn
    /// advances — then re-renders.
    fn commit(&mut self, action: &Action) -> Result<(), PlayerError> {
        apply_action(&mut self.board, &mut self.roster, action)?;
        advance_past_resigned(&mut self.board, &self.roster)?;
        self.observe();
        Ok(())
    }

    fn depart(&mut self, seat: usize) -> Result<(), PlayerError> {
        tracing::info!(seat, "seat left the game");
        record_departure(&mut self.board, &mut self.roster, seat)?;
        self.observe();
        Ok(())
    }

    /// Waits for the cards answering our Draw. Broadcasts about other
    /// seats leaving may interleave; anything else is a violation.
    async fn await_draw_response(&mut self) -> Result<Served, PlayerError> {
        loop {
            match self.channel.recv::<ServerMessage>().await? {
                ServerMessage::DrawResponse { cards } => {
                    return Ok(Served::Cards(cards));
                }
                ServerMessage::PlayerLeft { player } => self.depart(player)?,
                ServerMessage::GameOver { winner } => {
                    return Ok(Served::Over(self.outcome(winner)));
                }
                ServerMessage::Rejected { reason } => {
                    return Err(PlayerError::Desync(reason));
                }
                other => {
                    return Err(PlayerError::Unexpected(message_name(&other).into()));
                }
            }
        }
    }

    async fn await_game_over(&mut self) -> Result<GameOutcome, PlayerError> {
        loop {
            match self.channel.recv::<ServerMessage>().await? {
                ServerMessage::GameOver { winner } => return Ok(self.outcome(winner)),
                ServerMessage::PlayerLeft { player } => self.depart(player)?,
                other => {
                    return Err(PlayerError::Unexpected(message_name(&other).into()));
                }
            }
        }
    }

    fn outcome(&self, winner: usize) -> GameOutcome {
        GameOutcome {
            winner,
            winner_username: self
                .roster
                .stat(winner)
                .map(|s| s.username().to_string())
                .unwrap_or_default(),
            local_win: winner == self.seat,
        }
    }

    fn observe(&mut self) {
        let view = TableView {
            seat: self.seat,
            hand: &self.hand,
            roster: &self.roster,
            last_card: self.board.last_card(),
            current_player: self.board.current_player(),
            clockwise: self.board.clockwise(),
            pending_draws: self.board.pending_draws(),
        };
        self.prompt.observe(&view);
    }
}

fn message_name(msg: &ServerMessage) -> &'static str {
    match msg {
        ServerMessage::GameStart { .. } => "GameStart",
        ServerMessage::DrawResponse { .. } => "DrawResponse",
        ServerMessage::Action(_) => "Action",
        ServerMessage::PlayerLeft { .. } => "PlayerLeft",
        ServerMessage::GameOver { .. } => "GameOver",
        ServerMessage::Rejected { .. } => "Rejected",
    }
}
