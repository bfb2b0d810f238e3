use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Hand categories, weakest first. The discriminant is the numeric category
/// code carried in winner summaries.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    Trips = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    Quads = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::Trips => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::Quads => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of evaluating a hand.
///
/// Ordering is derived: category first, then `tiebreakers` compared
/// lexicographically. Equal values mean a split pot.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    // rank values, most significant first; length depends on category
    pub tiebreakers: Vec<u8>,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.tiebreakers)
    }
}

/// Evaluates the best 5-card hand available in `cards` (5 to 7 cards).
///
/// # Errors
///
/// [`GameError::InvalidCardCount`] outside 5..=7 cards and
/// [`GameError::DuplicateCard`] if the same card appears twice.
///
/// # Examples
///
/// ```
/// use riverbed_engine::cards::parse_cards;
/// use riverbed_engine::hand::{evaluate, Category};
///
/// let cards = parse_cards("As Ks Qs Js Ts 2c 3c").unwrap();
/// let rank = evaluate(&cards).unwrap();
/// assert_eq!(rank.category, Category::StraightFlush);
/// assert_eq!(rank.tiebreakers, vec![14]);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandRank, GameError> {
    best_five(cards).map(|(rank, _)| rank)
}

/// Like [`evaluate`], but also returns the five cards that make the hand.
pub fn best_five(cards: &[Card]) -> Result<(HandRank, [Card; 5]), GameError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(GameError::InvalidCardCount(cards.len()));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    for c in cards {
        if !seen.insert(*c) {
            return Err(GameError::DuplicateCard(c.to_string()));
        }
    }

    let mut best: Option<(HandRank, [Card; 5])> = None;
    for idx in five_card_subsets(cards.len()) {
        let five = idx.map(|i| cards[i]);
        let rank = evaluate_five(&five);
        // strict comparison keeps the first subset found on ties
        let better = match &best {
            Some((b, _)) => rank > *b,
            None => true,
        };
        if better {
            best = Some((rank, five));
        }
    }
    best.ok_or(GameError::InvalidCardCount(cards.len()))
}

/// Classifies exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    let first_suit = cards[0].suit;
    let mut flush = true;
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1u16 << r;
        flush &= c.suit == first_suit;
    }
    let straight = straight_high_from_mask(rank_mask);

    if let (true, Some(high)) = (flush, straight) {
        return HandRank {
            category: Category::StraightFlush,
            tiebreakers: vec![high],
        };
    }

    // (count, rank) groups, biggest group first, then highest rank
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|r| rank_counts[*r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));
    let by_group: Vec<u8> = groups.iter().map(|&(_, r)| r).collect();

    let category = match (groups[0].0, groups.get(1).map(|g| g.0)) {
        (4, _) => Category::Quads,
        (3, Some(2)) => Category::FullHouse,
        _ if flush => Category::Flush,
        _ if straight.is_some() => Category::Straight,
        (3, _) => Category::Trips,
        (2, Some(2)) => Category::TwoPair,
        (2, _) => Category::Pair,
        _ => Category::HighCard,
    };

    let tiebreakers = match category {
        Category::Straight => straight.map(|h| vec![h]).unwrap_or_default(),
        _ => by_group,
    };
    HandRank {
        category,
        tiebreakers,
    }
}

pub fn compare_hands(a: &HandRank, b: &HandRank) -> Ordering {
    a.cmp(b)
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    // Treat Ace as 14 and optionally as 1
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    for high in (5..=14u8).rev() {
        let window = 0b1_1111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}

fn five_card_subsets(n: usize) -> Vec<[usize; 5]> {
    let mut out = Vec::with_capacity(21);
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        out.push([a, b, c, d, e]);
                    }
                }
            }
        }
    }
    out
}
