//! Computer-controlled seats for `play`, `deal` and `sim`.
//!
//! Bots only ever choose among [`Table::legal_actions`], so every action they
//! submit is accepted by the table.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use riverbed_engine::errors::GameError;
use riverbed_engine::player::PlayerAction;
use riverbed_engine::rules::LegalActions;
use riverbed_engine::table::Table;

/// Decision interface for a computer-controlled seat.
pub trait Bot: Send {
    /// Picks an action for `seat`, which must be the seat to act.
    fn get_action(&mut self, table: &Table, seat: usize) -> Result<PlayerAction, GameError>;

    fn name(&self) -> &str;
}

/// Checks when it can and calls otherwise. Never folds or raises.
#[derive(Debug, Default)]
pub struct CallingStation;

impl Bot for CallingStation {
    fn get_action(&mut self, table: &Table, seat: usize) -> Result<PlayerAction, GameError> {
        Ok(passive_action(&table.legal_actions(seat)?))
    }

    fn name(&self) -> &str {
        "calling-station"
    }
}

pub fn passive_action(legal: &LegalActions) -> PlayerAction {
    if legal.check {
        PlayerAction::Check
    } else if legal.call.is_some() {
        PlayerAction::Call
    } else {
        PlayerAction::Fold
    }
}

/// Mixes folds, calls, bets and raises from a seeded stream, so a given seed
/// replays the same decisions.
#[derive(Debug)]
pub struct RandomBot {
    rng: ChaCha20Rng,
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn choose(&mut self, legal: &LegalActions) -> PlayerAction {
        let roll: u8 = self.rng.random_range(0..100);
        if roll < 12 && !legal.check && legal.fold {
            return PlayerAction::Fold;
        }
        if roll >= 75 {
            if let Some(range) = legal.raise {
                return PlayerAction::Raise(self.pick_size(range.min, range.max));
            }
            if let Some(range) = legal.bet {
                return PlayerAction::Bet(self.pick_size(range.min, range.max));
            }
        }
        passive_action(legal)
    }

    // Mostly minimum sizes with the occasional shove.
    fn pick_size(&mut self, min: u32, max: u32) -> u32 {
        if self.rng.random_range(0..10) == 0 {
            max
        } else {
            self.rng.random_range(min..=min.saturating_mul(2).min(max))
        }
    }
}

impl Bot for RandomBot {
    fn get_action(&mut self, table: &Table, seat: usize) -> Result<PlayerAction, GameError> {
        let legal = table.legal_actions(seat)?;
        Ok(self.choose(&legal))
    }

    fn name(&self) -> &str {
        "random"
    }
}
