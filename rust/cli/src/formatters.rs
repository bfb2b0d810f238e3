//! Card, board, action and result formatters for terminal display.
//!
//! Suits render as Unicode symbols (♥ ♦ ♣ ♠) where the terminal supports
//! them and fall back to the letters h d c s elsewhere.
//!
//! ## Example
//!
//! ```rust
//! use riverbed_engine::cards::{Card, Rank, Suit};
//! use riverbed_cli::formatters::{format_card, format_board};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use riverbed_engine::cards::{Card, Suit};
use riverbed_engine::history::WinnerInfo;
use riverbed_engine::player::PlayerAction;
use riverbed_engine::rules::LegalActions;

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM) or VS Code (VSCODE_INJECTION). Unix-like systems are
/// assumed to support Unicode.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> char {
    if supports_unicode() {
        suit.symbol()
    } else {
        suit.letter()
    }
}

/// String like "A♠" (Unicode) or "As" (ASCII).
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.symbol(), format_suit(card.suit))
}

/// Formats a board in bracket notation, "[]" when empty.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Format a PlayerAction as a human-readable string.
///
/// ```rust
/// use riverbed_engine::player::PlayerAction;
/// # use riverbed_cli::formatters::format_action;
///
/// assert_eq!(format_action(&PlayerAction::Fold), "fold");
/// assert_eq!(format_action(&PlayerAction::Raise(12)), "raise to 12");
/// ```
pub fn format_action(action: &PlayerAction) -> String {
    match action {
        PlayerAction::Fold => "fold".to_string(),
        PlayerAction::Check => "check".to_string(),
        PlayerAction::Call => "call".to_string(),
        PlayerAction::Bet(amount) => format!("bet {}", amount),
        PlayerAction::Raise(amount) => format!("raise to {}", amount),
    }
}

/// One-line prompt hint, e.g. `fold | call 2 | raise 4-100`.
pub fn format_legal_actions(legal: &LegalActions) -> String {
    let mut parts = Vec::new();
    if legal.fold {
        parts.push("fold".to_string());
    }
    if legal.check {
        parts.push("check".to_string());
    }
    if let Some(amount) = legal.call {
        parts.push(format!("call {}", amount));
    }
    if let Some(range) = legal.bet {
        parts.push(format!("bet {}-{}", range.min, range.max));
    }
    if let Some(range) = legal.raise {
        if range.min == range.max {
            parts.push(format!("raise {}", range.min));
        } else {
            parts.push(format!("raise {}-{}", range.min, range.max));
        }
    }
    parts.join(" | ")
}

pub fn format_winner(winner: &WinnerInfo) -> String {
    if winner.category_name.is_empty() {
        format!("Seat {} ({}) wins {}", winner.seat, winner.name, winner.amount)
    } else {
        format!(
            "Seat {} ({}) wins {} with {}",
            winner.seat, winner.name, winner.amount, winner.category_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riverbed_engine::cards::Rank;
    use riverbed_engine::rules::AmountRange;

    #[test]
    fn test_format_card() {
        let card = Card::new(Rank::Ten, Suit::Hearts);
        let s = format_card(&card);
        assert!(s == "T♥" || s == "Th", "{}", s);
    }

    #[test]
    fn test_format_board_empty() {
        assert_eq!(format_board(&[]), "[]");
    }

    #[test]
    fn test_format_board_with_cards() {
        let board = [
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::Two, Suit::Clubs),
        ];
        let s = format_board(&board);
        assert!(s.starts_with("[A"));
        assert!(s.contains(" 2"));
        assert!(s.ends_with(']'));
    }

    #[test]
    fn test_format_action() {
        assert_eq!(format_action(&PlayerAction::Check), "check");
        assert_eq!(format_action(&PlayerAction::Call), "call");
        assert_eq!(format_action(&PlayerAction::Bet(40)), "bet 40");
    }

    #[test]
    fn test_format_legal_actions() {
        let legal = LegalActions {
            fold: true,
            check: false,
            call: Some(1),
            bet: None,
            raise: Some(AmountRange { min: 4, max: 100 }),
        };
        assert_eq!(format_legal_actions(&legal), "fold | call 1 | raise 4-100");

        let all_in_only = LegalActions {
            fold: true,
            check: false,
            call: Some(10),
            bet: None,
            raise: Some(AmountRange { min: 30, max: 30 }),
        };
        assert_eq!(format_legal_actions(&all_in_only), "fold | call 10 | raise 30");
    }

    #[test]
    fn test_format_winner() {
        let folded_to = WinnerInfo::new(1, "bob", 3, None);
        assert_eq!(format_winner(&folded_to), "Seat 1 (bob) wins 3");
    }
}
