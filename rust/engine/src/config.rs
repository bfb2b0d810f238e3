use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Room settings a table is created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    /// Stack handed to a player who sits down without naming one
    pub buy_in_default: u32,
    pub buy_in_min: u32,
    pub max_seats: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 1,
            big_blind: 2,
            buy_in_default: 200,
            buy_in_min: 40,
            max_seats: 9,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: &str| Err(GameError::InvalidConfig(msg.to_string()));
        if self.small_blind == 0 || self.big_blind == 0 {
            return invalid("blinds must be > 0");
        }
        if self.small_blind > self.big_blind {
            return invalid("small blind must not exceed big blind");
        }
        if !(2..=10).contains(&self.max_seats) {
            return invalid("max_seats must be between 2 and 10");
        }
        if self.buy_in_min == 0 || self.buy_in_default < self.buy_in_min {
            return invalid("buy_in_default must be >= buy_in_min > 0");
        }
        Ok(())
    }
}
