//! Per-recipient views of a table for the presentation layer.

use serde::Serialize;

use crate::cards::Card;
use crate::history::WinnerInfo;
use crate::player::Player;
use crate::rules::LegalActions;
use crate::table::{Stage, Table};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub seat: usize,
    pub name: String,
    pub stack: u32,
    pub in_hand: bool,
    pub is_all_in: bool,
    pub has_acted_this_round: bool,
    pub contributed_this_street: u32,
    pub total_contributed: u32,
    /// Present only when the recipient may see these cards
    pub hole: Option<[Card; 2]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSnapshot {
    pub stage: Stage,
    pub players: Vec<PlayerSnapshot>,
    pub dealer_seat: Option<usize>,
    pub small_blind: u32,
    pub big_blind: u32,
    pub current_bet: u32,
    pub min_raise_increment: u32,
    pub pot: u32,
    pub community: Vec<Card>,
    pub turn_seat: Option<usize>,
    pub last_aggressor_seat: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub last_winners: Vec<WinnerInfo>,
    pub reveal_eligible: Vec<usize>,
    /// Options for the recipient when it is their turn
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_actions: Option<LegalActions>,
}

impl TableSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Table {
    /// Builds the state view sent to `viewer` (`None` for a spectator).
    ///
    /// A seat always sees its own hole cards. Other hole cards appear only
    /// once shown, which includes the winners of a contested showdown.
    pub fn snapshot(&self, viewer: Option<usize>) -> TableSnapshot {
        let players = self
            .players()
            .map(|p| self.player_snapshot(p, viewer))
            .collect();
        let show_winners = self.stage() == Stage::Showdown;
        TableSnapshot {
            stage: self.stage(),
            players,
            dealer_seat: self.dealer_seat(),
            small_blind: self.config().small_blind,
            big_blind: self.config().big_blind,
            current_bet: self.current_bet(),
            min_raise_increment: self.min_raise_increment(),
            pot: self.pot(),
            community: self.community().to_vec(),
            turn_seat: self.turn_seat(),
            last_aggressor_seat: self.last_aggressor_seat(),
            last_winners: if show_winners {
                self.last_winners().to_vec()
            } else {
                Vec::new()
            },
            reveal_eligible: self.reveal_eligible().iter().copied().collect(),
            legal_actions: viewer.and_then(|seat| self.legal_actions(seat).ok()),
        }
    }

    fn player_snapshot(&self, p: &Player, viewer: Option<usize>) -> PlayerSnapshot {
        let visible = viewer == Some(p.seat()) || self.is_revealed(p.seat());
        PlayerSnapshot {
            seat: p.seat(),
            name: p.name().to_string(),
            stack: p.stack(),
            in_hand: p.in_hand(),
            is_all_in: p.is_all_in(),
            has_acted_this_round: p.has_acted_this_round(),
            contributed_this_street: p.contributed_this_street(),
            total_contributed: p.total_contributed(),
            hole: if visible { p.hole_cards() } else { None },
        }
    }
}
