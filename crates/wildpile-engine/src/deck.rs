//! The draw pile: composition, shuffling, dealing, recycling.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use wildpile_protocol::{Card, CardColor, CardSymbol};

use crate::EngineError;

/// The standard 108-card composition: per suit color one 0, two of each
/// 1–9, two Skip, two Reverse, two DrawTwo; plus four Wild and four
/// DrawFour.
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(108);
    for color in CardColor::SUITS {
        cards.push(Card::new(color, CardSymbol::Number(0)));
        for value in 1..=9 {
            cards.push(Card::new(color, CardSymbol::Number(value)));
            cards.push(Card::new(color, CardSymbol::Number(value)));
        }
        for symbol in [CardSymbol::Skip, CardSymbol::Reverse, CardSymbol::DrawTwo] {
            cards.push(Card::new(color, symbol));
            cards.push(Card::new(color, symbol));
        }
    }
    for _ in 0..4 {
        cards.push(Card::new(CardColor::Wild, CardSymbol::Wild));
        cards.push(Card::new(CardColor::Wild, CardSymbol::DrawFour));
    }
    cards
}

/// How the session builds the deck for each game.
#[derive(Debug, Clone)]
pub enum DeckPolicy {
    /// A fresh OS-random shuffle per game.
    Random,
    /// Reproducible shuffles: game `i` uses `seed + i`.
    Seeded(u64),
    /// An explicit pile in draw order — deals, the flip, and every draw
    /// come off this list front to back. For tests.
    Stacked(Vec<Card>),
}

impl Default for DeckPolicy {
    fn default() -> Self {
        DeckPolicy::Random
    }
}

impl DeckPolicy {
    /// Builds the pile for the `game_index`-th game of a session.
    pub fn build(&self, game_index: u64) -> Deck {
        match self {
            DeckPolicy::Random => Deck::shuffled(StdRng::from_os_rng()),
            DeckPolicy::Seeded(seed) => {
                Deck::shuffled(StdRng::seed_from_u64(seed.wrapping_add(game_index)))
            }
            DeckPolicy::Stacked(cards) => Deck::stacked(cards.clone()),
        }
    }
}

/// A draw pile. Cards leave from the top; recycled discards go in at the
/// bottom.
#[derive(Debug)]
pub struct Deck {
    // Top of the pile is the end of the Vec.
    pile: Vec<Card>,
    rng: StdRng,
}

impl Deck {
    /// A full standard deck, shuffled with `rng`.
    pub fn shuffled(mut rng: StdRng) -> Self {
        let mut pile = standard_deck();
        pile.shuffle(&mut rng);
        Self { pile, rng }
    }

    /// A pile that serves exactly `cards`, front of the list first.
    pub fn stacked(mut cards: Vec<Card>) -> Self {
        cards.reverse();
        Self {
            pile: cards,
            rng: StdRng::seed_from_u64(0),
        }
    }

    pub fn remaining(&self) -> usize {
        self.pile.len()
    }

    /// Takes up to `count` cards off the top. May return fewer when the
    /// pile runs dry; the caller recycles the discard pile first if it
    /// needs the full count.
    pub fn draw(&mut self, count: usize) -> Vec<Card> {
        std::iter::from_fn(|| self.pile.pop()).take(count).collect()
    }

    /// Deals `hand_size` consecutive cards to each of `players` seats,
    /// seat 0 first.
    pub fn deal(
        &mut self,
        players: usize,
        hand_size: usize,
    ) -> Result<Vec<Vec<Card>>, EngineError> {
        // +1 so a starter card can still be flipped after the deal.
        if self.pile.len() < players * hand_size + 1 {
            return Err(EngineError::NotEnoughCards {
                need: players * hand_size + 1,
                have: self.pile.len(),
            });
        }
        Ok((0..players).map(|_| self.draw(hand_size)).collect())
    }

    /// Flips the starter card: draws until a non-wild appears, slipping
    /// any wilds back under the pile (a colorless starter has no color to
    /// follow).
    pub fn flip_starter(&mut self) -> Result<Card, EngineError> {
        for _ in 0..=self.pile.len() {
            match self.pile.pop() {
                Some(card) if card.is_wild() => self.pile.insert(0, card),
                Some(card) => return Ok(card),
                None => break,
            }
        }
        Err(EngineError::NotEnoughCards {
            need: 1,
            have: self.pile.len(),
        })
    }

    /// Shuffles played-out cards back under the pile. Wilds lose their
    /// chosen color on the way in.
    pub fn recycle(&mut self, discard: Vec<Card>) {
        let mut cards: Vec<Card> = discard
            .into_iter()
            .map(|card| {
                if card.is_wild() {
                    card.with_color(CardColor::Wild)
                } else {
                    card
                }
            })
            .collect();
        cards.shuffle(&mut self.rng);
        self.pile.splice(0..0, cards);
    }
}
