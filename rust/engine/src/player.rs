use crate::cards::Card;
use crate::errors::GameError;
use serde::{Deserialize, Serialize};

/// Represents a player action during a betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "lowercase")]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid if nothing is owed this street)
    Check,
    /// Call the current bet, capped at the remaining stack
    Call,
    /// Open the betting on a street with a bet of this size
    Bet(u32),
    /// Raise to this total street contribution (the new current bet)
    Raise(u32),
}

impl PlayerAction {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerAction::Fold => "fold",
            PlayerAction::Check => "check",
            PlayerAction::Call => "call",
            PlayerAction::Bet(_) => "bet",
            PlayerAction::Raise(_) => "raise",
        }
    }
}

/// A player occupying a seat. Stack carries over between hands; every other
/// field is per hand or per street.
#[derive(Debug, Clone)]
pub struct Player {
    seat: usize,
    name: String,
    stack: u32,
    contributed_this_street: u32,
    total_contributed: u32,
    in_hand: bool,
    all_in: bool,
    acted_this_round: bool,
    /// Number of full raises this street already answered by this seat.
    pub(crate) full_raises_seen: u32,
    hole: Option<[Card; 2]>,
}

impl Player {
    pub fn new(seat: usize, name: impl Into<String>, stack: u32) -> Self {
        Self {
            seat,
            name: name.into(),
            stack,
            contributed_this_street: 0,
            total_contributed: 0,
            in_hand: false,
            all_in: false,
            acted_this_round: false,
            full_raises_seen: 0,
            hole: None,
        }
    }

    pub fn seat(&self) -> usize {
        self.seat
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn contributed_this_street(&self) -> u32 {
        self.contributed_this_street
    }
    pub fn total_contributed(&self) -> u32 {
        self.total_contributed
    }
    pub fn in_hand(&self) -> bool {
        self.in_hand
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn has_acted_this_round(&self) -> bool {
        self.acted_this_round
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }

    /// Seated, dealt in, and still able to put chips in.
    pub fn can_act(&self) -> bool {
        self.in_hand && !self.all_in
    }

    pub fn add_chips(&mut self, amount: u32) -> Result<(), GameError> {
        self.stack = self
            .stack
            .checked_add(amount)
            .ok_or(GameError::ChipLimitExceeded { limit: u32::MAX })?;
        Ok(())
    }

    /// Moves `amount` from the stack into this street's contribution.
    /// Emptying the stack marks the player all-in.
    pub fn commit(&mut self, amount: u32) -> Result<(), GameError> {
        if amount > self.stack {
            return Err(GameError::InsufficientStack {
                amount,
                stack: self.stack,
            });
        }
        self.stack -= amount;
        self.contributed_this_street += amount;
        self.total_contributed += amount;
        if self.stack == 0 && self.in_hand {
            self.all_in = true;
        }
        Ok(())
    }

    pub(crate) fn deal_in(&mut self, hole: [Card; 2]) {
        self.reset_for_hand();
        self.hole = Some(hole);
        self.in_hand = true;
    }

    pub(crate) fn fold(&mut self) {
        self.in_hand = false;
        self.acted_this_round = true;
    }

    pub(crate) fn mark_acted(&mut self, acted: bool) {
        self.acted_this_round = acted;
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.contributed_this_street = 0;
        self.acted_this_round = false;
        self.full_raises_seen = 0;
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.reset_for_street();
        self.total_contributed = 0;
        self.in_hand = false;
        self.all_in = false;
        self.hole = None;
    }
}
