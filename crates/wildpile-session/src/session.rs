//! The session actor: serialized commits, broadcast-after-commit.

use std::sync::Arc;

use tokio::sync::mpsc;
use wildpile_engine::{
    BoardState, Roster, advance_past_resigned, apply_action, record_departure,
};
use wildpile_net::{Connection, MessageChannel, NetError};
use wildpile_protocol::{Action, Card, CardColor, ClientMessage, Codec, ServerMessage};

use crate::{SessionConfig, SessionError};

/// What reader tasks feed into the actor's inbox.
enum Inbound {
    Msg { seat: usize, msg: ClientMessage },
    Gone { seat: usize },
}

struct SeatLink<Conn, C> {
    username: String,
    channel: Arc<MessageChannel<Conn, C>>,
}

/// One authoritative session over a fixed set of seated connections.
///
/// All state mutation happens on the actor's own task, one inbound intent
/// at a time; a broadcast never precedes its commit. Nothing is shared
/// with any other session instance.
pub struct Session<Conn, C> {
    config: SessionConfig,
    seats: Vec<SeatLink<Conn, C>>,
    connected: Vec<bool>,
}

impl<Conn, C> Session<Conn, C>
where
    Conn: Connection,
    C: Codec,
{
    /// Seats the given channels: each must open with `Join`, in channel
    /// order — the channel's position is its seat index for the whole
    /// session.
    pub async fn gather(
        channels: Vec<MessageChannel<Conn, C>>,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        if channels.len() < 2 {
            return Err(SessionError::TooFewSeats(channels.len()));
        }
        let mut seats = Vec::with_capacity(channels.len());
        for channel in channels {
            let msg = tokio::time::timeout(
                config.join_timeout,
                channel.recv::<ClientMessage>(),
            )
            .await
            .map_err(|_| SessionError::JoinTimeout)??;
            match msg {
                ClientMessage::Join { username } => {
                    tracing::info!(seat = seats.len(), %username, "seated");
                    seats.push(SeatLink {
                        username,
                        channel: Arc::new(channel),
                    });
                }
                other => {
                    return Err(SessionError::BadHandshake(
                        client_message_name(&other).into(),
                    ));
                }
            }
        }
        let connected = vec![true; seats.len()];
        Ok(Self {
            config,
            seats,
            connected,
        })
    }

    /// Runs the configured number of games, then closes every channel.
    ///
    /// A follow-up game starts only while every seat is still connected;
    /// each game rotates the first player by one seat and rebuilds all
    /// per-game state from scratch.
    pub async fn run(mut self) -> Result<(), SessionError> {
        let (tx, mut inbox) = mpsc::unbounded_channel();
        for (seat, link) in self.seats.iter().enumerate() {
            spawn_reader(seat, Arc::clone(&link.channel), tx.clone());
        }
        drop(tx);

        for game_index in 0..self.config.games {
            if !self.connected.iter().all(|&c| c) {
                break;
            }
            self.run_game(&mut inbox, game_index).await?;
        }

        for (seat, link) in self.seats.iter().enumerate() {
            if self.connected[seat] {
                let _ = link.channel.close().await;
            }
        }
        Ok(())
    }

    async fn run_game(
        &mut self,
        inbox: &mut mpsc::UnboundedReceiver<Inbound>,
        game_index: u64,
    ) -> Result<(), SessionError> {
        let n = self.seats.len();
        let mut deck = self.config.deck.build(game_index);
        let mut hands = deck.deal(n, self.config.hand_size)?;
        let flipped = deck.flip_starter()?;
        let first_player = (game_index as usize) % n;
        let usernames: Vec<String> =
            self.seats.iter().map(|s| s.username.clone()).collect();

        let mut board = BoardState::new(n, flipped, first_player)?;
        let mut roster = Roster::new(&usernames, self.config.hand_size);
        let mut discard: Vec<Card> = Vec::new();

        tracing::info!(game = game_index, players = n, %flipped, first_player, "dealing");
        for seat in 0..n {
            // A seat that died since gather surfaces through its reader
            // task; the deal must not abort the table.
            self.send_to(
                seat,
                &ServerMessage::GameStart {
                    usernames: usernames.clone(),
                    seat,
                    hand: hands[seat].clone(),
                    flipped,
                    first_player,
                },
            )
            .await;
        }

        loop {
            let inbound = self.next_inbound(inbox, &board).await?;
            match inbound {
                Inbound::Gone { seat } => {
                    if !self.connected[seat] {
                        continue;
                    }
                    self.connected[seat] = false;
                    record_departure(&mut board, &mut roster, seat)?;
                    tracing::info!(seat, "participant disconnected, resigned");
                    self.broadcast_except(seat, &ServerMessage::PlayerLeft { player: seat })
                        .await;
                    if let Some(sole) = roster.sole_active() {
                        tracing::info!(winner = sole, "won by forfeit");
                        self.broadcast(&ServerMessage::GameOver { winner: sole })
                            .await;
                        return Ok(());
                    }
                }

                Inbound::Msg { seat, msg } => {
                    if !self.connected[seat] {
                        continue;
                    }
                    // Only the turn-holder may act; this check is what the
                    // whole-table ordering guarantee rests on.
                    if seat != board.current_player() {
                        self.reject(seat, "not your turn").await;
                        continue;
                    }
                    match msg {
                        ClientMessage::Join { .. } => {
                            self.reject(seat, "already seated").await;
                        }

                        ClientMessage::Draw { count } => {
                            if count != board.pending_draws() {
                                let pending = board.pending_draws();
                                self.reject(
                                    seat,
                                    &format!("a draw must take exactly {pending}"),
                                )
                                .await;
                                continue;
                            }
                            if deck.remaining() < count as usize {
                                deck.recycle(std::mem::take(&mut discard));
                            }
                            let cards = deck.draw(count as usize);
                            let served = cards.len() as u8;
                            hands[seat].extend(cards.iter().copied());
                            apply_action(
                                &mut board,
                                &mut roster,
                                &Action::Draw { player: seat, count: served },
                            )?;

                            self.send_to(seat, &ServerMessage::DrawResponse { cards })
                                .await;
                            self.broadcast_except(
                                seat,
                                &ServerMessage::Action(Action::Draw {
                                    player: seat,
                                    count: served,
                                }),
                            )
                            .await;
                            advance_past_resigned(&mut board, &roster)?;
                        }

                        ClientMessage::Skip => {
                            apply_action(
                                &mut board,
                                &mut roster,
                                &Action::Skip { player: seat },
                            )?;
                            self.broadcast_except(
                                seat,
                                &ServerMessage::Action(Action::Skip { player: seat }),
                            )
                            .await;
                            advance_past_resigned(&mut board, &roster)?;
                        }

                        ClientMessage::Play { card } => {
                            if card.is_wild() && card.color == CardColor::Wild {
                                self.reject(seat, "a wild must carry a chosen color")
                                    .await;
                                continue;
                            }
                            let Some(index) = held_index(&hands[seat], card) else {
                                self.reject(seat, "card is not in your hand").await;
                                continue;
                            };
                            if !board.can_follow(card) {
                                let last = board.last_card();
                                self.reject(
                                    seat,
                                    &format!("{card} cannot follow {last}"),
                                )
                                .await;
                                continue;
                            }

                            discard.push(board.last_card());
                            hands[seat].remove(index);
                            apply_action(
                                &mut board,
                                &mut roster,
                                &Action::Play { player: seat, card },
                            )?;

                            self.broadcast_except(
                                seat,
                                &ServerMessage::Action(Action::Play {
                                    player: seat,
                                    card,
                                }),
                            )
                            .await;

                            if hands[seat].is_empty() {
                                tracing::info!(winner = seat, "hand emptied");
                                self.broadcast(&ServerMessage::GameOver {
                                    winner: seat,
                                })
                                .await;
                                return Ok(());
                            }
                            advance_past_resigned(&mut board, &roster)?;
                        }
                    }
                }
            }
        }
    }

    /// The next inbound intent. With a turn timeout configured, a stalled
    /// turn-holder is cut off and handled exactly like a disconnect.
    async fn next_inbound(
        &self,
        inbox: &mut mpsc::UnboundedReceiver<Inbound>,
        board: &BoardState,
    ) -> Result<Inbound, SessionError> {
        match self.config.turn_timeout {
            Some(limit) => match tokio::time::timeout(limit, inbox.recv()).await {
                Ok(inbound) => inbound.ok_or(SessionError::AllGone),
                Err(_) => {
                    let seat = board.current_player();
                    tracing::warn!(seat, "turn timed out");
                    let _ = self.seats[seat].channel.close().await;
                    Ok(Inbound::Gone { seat })
                }
            },
            None => inbox.recv().await.ok_or(SessionError::AllGone),
        }
    }

    /// Sends to one seat. Send failures are only logged: the seat's
    /// reader task will surface the death as `Gone`.
    async fn send_to(&self, seat: usize, msg: &ServerMessage) {
        if !self.connected[seat] {
            return;
        }
        if let Err(e) = self.seats[seat].channel.send(msg).await {
            tracing::debug!(seat, error = %e, "send failed");
        }
    }

    async fn broadcast(&self, msg: &ServerMessage) {
        for seat in 0..self.seats.len() {
            self.send_to(seat, msg).await;
        }
    }

    async fn broadcast_except(&self, except: usize, msg: &ServerMessage) {
        for seat in 0..self.seats.len() {
            if seat != except {
                self.send_to(seat, msg).await;
            }
        }
    }

    async fn reject(&self, seat: usize, reason: &str) {
        tracing::debug!(seat, reason, "rejecting action");
        self.send_to(
            seat,
            &ServerMessage::Rejected {
                reason: reason.to_string(),
            },
        )
        .await;
    }
}

/// Finds the played card in the authoritative hand. A played wild carries
/// its chosen color, so wilds match by symbol against the colorless copy
/// in the hand; everything else matches exactly.
fn held_index(hand: &[Card], played: Card) -> Option<usize> {
    if played.is_wild() {
        hand.iter().position(|c| c.symbol == played.symbol)
    } else {
        hand.iter().position(|c| *c == played)
    }
}

fn spawn_reader<Conn, C>(
    seat: usize,
    channel: Arc<MessageChannel<Conn, C>>,
    tx: mpsc::UnboundedSender<Inbound>,
) where
    Conn: Connection,
    C: Codec,
{
    tokio::spawn(async move {
        loop {
            match channel.recv::<ClientMessage>().await {
                Ok(msg) => {
                    if tx.send(Inbound::Msg { seat, msg }).is_err() {
                        break;
                    }
                }
                Err(NetError::ChannelClosed) => {
                    let _ = tx.send(Inbound::Gone { seat });
                    break;
                }
                Err(e) => {
                    // Undecodable intents are a fatal protocol violation
                    // for that connection.
                    tracing::warn!(seat, error = %e, "dropping connection");
                    let _ = channel.close().await;
                    let _ = tx.send(Inbound::Gone { seat });
                    break;
                }
            }
        }
    });
}

fn client_message_name(msg: &ClientMessage) -> &'static str {
    match msg {
        ClientMessage::Join { .. } => "Join",
        ClientMessage::Draw { .. } => "Draw",
        ClientMessage::Skip => "Skip",
        ClientMessage::Play { .. } => "Play",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildpile_protocol::CardSymbol;

    fn card(color: CardColor, symbol: CardSymbol) -> Card {
        Card::new(color, symbol)
    }

    #[test]
    fn test_held_index_exact_match_for_suit_cards() {
        let hand = vec![
            card(CardColor::Red, CardSymbol::Number(5)),
            card(CardColor::Blue, CardSymbol::Number(5)),
        ];
        assert_eq!(
            held_index(&hand, card(CardColor::Blue, CardSymbol::Number(5))),
            Some(1)
        );
        assert_eq!(
            held_index(&hand, card(CardColor::Green, CardSymbol::Number(5))),
            None
        );
    }

    #[test]
    fn test_held_index_matches_wilds_by_symbol() {
        let hand = vec![
            card(CardColor::Red, CardSymbol::Number(5)),
            card(CardColor::Wild, CardSymbol::DrawFour),
        ];
        // The played copy carries the chosen color.
        assert_eq!(
            held_index(&hand, card(CardColor::Green, CardSymbol::DrawFour)),
            Some(1)
        );
        assert_eq!(
            held_index(&hand, card(CardColor::Green, CardSymbol::Wild)),
            None
        );
    }
}
