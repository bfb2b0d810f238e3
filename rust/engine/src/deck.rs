use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
    fixed: bool,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
            fixed: false,
        }
    }

    /// A deck that deals `cards` in the given order. Shuffling only rewinds it.
    pub fn stacked(cards: Vec<Card>) -> Self {
        Self {
            cards,
            position: 0,
            rng: ChaCha20Rng::seed_from_u64(0),
            fixed: true,
        }
    }

    /// Stacks a deck for one hold'em hand.
    ///
    /// `holes` are in dealing order (the first seat left of the button
    /// first). Cards go out one at a time around the table twice, then burn,
    /// flop, burn, turn, burn, river. Burns and the tail of the deck are
    /// filled with the unused cards.
    pub fn arranged(holes: &[[Card; 2]], board: &[Card]) -> Result<Self, GameError> {
        let mut wanted: Vec<Card> = holes.iter().flat_map(|h| h.iter().copied()).collect();
        wanted.extend_from_slice(board);
        let mut spare: Vec<Card> = full_deck();
        for c in &wanted {
            let idx = spare
                .iter()
                .position(|s| s == c)
                .ok_or_else(|| GameError::DuplicateCard(c.to_string()))?;
            spare.remove(idx);
        }
        let mut spare = spare.into_iter();
        let mut burn = || spare.next().ok_or(GameError::DeckExhausted);

        let mut cards = Vec::with_capacity(52);
        cards.extend(holes.iter().map(|h| h[0]));
        cards.extend(holes.iter().map(|h| h[1]));
        for range in [0..3, 3..4, 4..5] {
            if board.len() < range.end {
                break;
            }
            cards.push(burn()?);
            cards.extend_from_slice(&board[range]);
        }
        cards.extend(spare);
        Ok(Self::stacked(cards))
    }

    pub fn shuffle(&mut self) {
        if self.fixed {
            self.position = 0;
            return;
        }
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.deal_card().ok_or(GameError::DeckExhausted)
    }

    pub fn burn_card(&mut self) {
        let _ = self.deal_card();
    }

    pub fn reset(&mut self) {
        if !self.fixed {
            self.cards = full_deck();
        }
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
