use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::{Category, HandRank};
use crate::player::PlayerAction;
use crate::table::Stage;

/// Records a single player action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: usize,
    /// The betting street when this action occurred
    pub stage: Stage,
    pub action: PlayerAction,
}

/// Winner summary shown after a hand. `category` is absent when the pot was
/// won without a showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerInfo {
    pub seat: usize,
    pub name: String,
    pub amount: u32,
    pub category: Option<u8>,
    pub category_name: String,
    #[serde(skip)]
    pub hand: Option<HandRank>,
}

impl WinnerInfo {
    pub fn new(seat: usize, name: &str, amount: u32, hand: Option<HandRank>) -> Self {
        let category = hand.as_ref().map(|h| h.category);
        Self {
            seat,
            name: name.to_string(),
            amount,
            category: category.map(Category::code),
            category_name: category.map(Category::name).unwrap_or_default().to_string(),
            hand,
        }
    }
}

/// Record of the hand in progress (or the one just finished). It lives only
/// until the next hand starts.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// RNG seed used for the table's deck
    pub seed: Option<u64>,
    pub dealer_seat: usize,
    /// Chronological list of all player actions
    pub actions: Vec<ActionRecord>,
    pub board: Vec<Card>,
    #[serde(default)]
    pub winners: Vec<WinnerInfo>,
    /// Timestamp when the hand started (RFC3339 format)
    pub ts: String,
}

impl HandRecord {
    pub fn begin(seq: u32, seed: Option<u64>, dealer_seat: usize) -> Self {
        let now = Utc::now();
        Self {
            hand_id: format_hand_id(&now.format("%Y%m%d").to_string(), seq),
            seed,
            dealer_seat,
            actions: Vec::new(),
            board: Vec::new(),
            winners: Vec::new(),
            ts: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}
