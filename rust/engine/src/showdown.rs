//! Pot tiering and distribution at the end of a hand.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::{evaluate, HandRank};
use crate::player::Player;
use crate::positions::clockwise_from;

/// A main or side pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pot {
    pub amount: u32,
    pub eligible_seats: Vec<usize>,
}

/// One seat's chips committed over the whole hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub seat: usize,
    pub amount: u32,
    pub in_hand: bool,
}

impl From<&Player> for Contribution {
    fn from(p: &Player) -> Self {
        Self {
            seat: p.seat(),
            amount: p.total_contributed(),
            in_hand: p.in_hand(),
        }
    }
}

/// Chips awarded to a seat, with the hand that won them when a showdown
/// took place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payout {
    pub seat: usize,
    pub amount: u32,
    pub hand: Option<HandRank>,
}

/// Cuts the hand's contributions into pots, smallest tier first.
///
/// Tiers are the distinct contribution levels of seats still in the hand.
/// Folded chips count toward every tier they reach but folded seats are never
/// eligible. Anything above the top tier goes into the last pot. Fails with
/// [`GameError::ChipLimitExceeded`] if a pot would not fit in `u32`.
///
/// ```
/// use riverbed_engine::showdown::{build_pots, Contribution};
///
/// let pots = build_pots(&[
///     Contribution { seat: 0, amount: 10, in_hand: true },
///     Contribution { seat: 1, amount: 30, in_hand: true },
///     Contribution { seat: 2, amount: 50, in_hand: true },
/// ])
/// .unwrap();
/// let amounts: Vec<u32> = pots.iter().map(|p| p.amount).collect();
/// assert_eq!(amounts, vec![30, 40, 20]);
/// assert_eq!(pots[2].eligible_seats, vec![2]);
/// ```
pub fn build_pots(contributions: &[Contribution]) -> Result<Vec<Pot>, GameError> {
    let mut levels: Vec<u32> = contributions
        .iter()
        .filter(|c| c.in_hand && c.amount > 0)
        .map(|c| c.amount)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::with_capacity(levels.len());
    let mut prev = 0u32;
    for &level in &levels {
        let amount = checked_total(
            contributions
                .iter()
                .map(|c| c.amount.min(level) - c.amount.min(prev)),
        )?;
        let mut eligible_seats: Vec<usize> = contributions
            .iter()
            .filter(|c| c.in_hand && c.amount >= level)
            .map(|c| c.seat)
            .collect();
        eligible_seats.sort_unstable();
        if amount > 0 {
            pots.push(Pot {
                amount,
                eligible_seats,
            });
        }
        prev = level;
    }

    let excess = checked_total(contributions.iter().map(|c| c.amount.saturating_sub(prev)))?;
    if excess > 0 {
        if let Some(last) = pots.last_mut() {
            last.amount = checked_total([last.amount, excess])?;
        }
    }
    Ok(pots)
}

fn checked_total(amounts: impl IntoIterator<Item = u32>) -> Result<u32, GameError> {
    amounts
        .into_iter()
        .try_fold(0u32, |acc, a| acc.checked_add(a))
        .ok_or(GameError::ChipLimitExceeded { limit: u32::MAX })
}

/// Distributes every pot of the hand.
///
/// `players` are the seated players, `seat_count` the table size used for
/// the odd-chip rule: leftover chips of a split go one by one to the winners
/// nearest the button's left.
///
/// # Errors
///
/// Propagates evaluation errors, e.g. a contested showdown reached before the
/// board has at least three cards.
pub fn resolve(
    players: &[&Player],
    community: &[Card],
    dealer_seat: usize,
    seat_count: usize,
) -> Result<Vec<Payout>, GameError> {
    let contributions: Vec<Contribution> = players.iter().map(|p| Contribution::from(*p)).collect();
    let pots = build_pots(&contributions)?;

    let contenders: Vec<&&Player> = players.iter().filter(|p| p.in_hand()).collect();
    let mut hands: HashMap<usize, HandRank> = HashMap::new();
    if contenders.len() > 1 {
        for p in contenders {
            let Some(hole) = p.hole_cards() else {
                continue;
            };
            let mut cards: Vec<Card> = hole.to_vec();
            cards.extend_from_slice(community);
            hands.insert(p.seat(), evaluate(&cards)?);
        }
    }

    let mut won: BTreeMap<usize, u32> = BTreeMap::new();
    for pot in &pots {
        let winners = pot_winners(pot, &hands);
        if winners.is_empty() {
            continue;
        }
        let share = pot.amount / winners.len() as u32;
        let mut odd = pot.amount % winners.len() as u32;
        for seat in clockwise_from(seat_count, dealer_seat).filter(|s| winners.contains(s)) {
            let mut amount = share;
            if odd > 0 {
                amount += 1;
                odd -= 1;
            }
            *won.entry(seat).or_default() += amount;
        }
    }

    Ok(won
        .into_iter()
        .filter(|&(_, amount)| amount > 0)
        .map(|(seat, amount)| Payout {
            seat,
            amount,
            hand: hands.get(&seat).cloned(),
        })
        .collect())
}

fn pot_winners(pot: &Pot, hands: &HashMap<usize, HandRank>) -> Vec<usize> {
    if pot.eligible_seats.len() == 1 {
        return pot.eligible_seats.clone();
    }
    let best = pot
        .eligible_seats
        .iter()
        .filter_map(|s| hands.get(s))
        .max();
    match best {
        Some(best) => pot
            .eligible_seats
            .iter()
            .copied()
            .filter(|s| hands.get(s) == Some(best))
            .collect(),
        None => pot.eligible_seats.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(seat: usize, amount: u32, in_hand: bool) -> Contribution {
        Contribution {
            seat,
            amount,
            in_hand,
        }
    }

    #[test]
    fn folded_chips_count_but_never_win() {
        let pots = build_pots(&[c(0, 40, false), c(1, 10, true), c(2, 100, true)]).unwrap();
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 30);
        assert_eq!(pots[0].eligible_seats, vec![1, 2]);
        assert_eq!(pots[1].amount, 30 + 90);
        assert_eq!(pots[1].eligible_seats, vec![2]);
    }

    #[test]
    fn chips_above_top_tier_join_last_pot() {
        let pots = build_pots(&[c(0, 60, false), c(1, 20, true), c(2, 20, true)]).unwrap();
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 100);
    }

    #[test]
    fn equal_contributions_make_one_pot() {
        let pots = build_pots(&[c(0, 1000, true), c(1, 1000, true)]).unwrap();
        assert_eq!(
            pots,
            vec![Pot {
                amount: 2000,
                eligible_seats: vec![0, 1]
            }]
        );
    }
}
