//! Input parsing for interactive play and card arguments.

use riverbed_engine::cards::{Card, parse_cards};
use riverbed_engine::player::PlayerAction;

/// Outcome of parsing one line typed at the action prompt.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid player action parsed from input
    Action(PlayerAction),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input string into a PlayerAction or special commands.
///
/// Accepts the following input formats (case-insensitive):
/// - "f" or "fold" → Fold
/// - "x" or "check" → Check
/// - "c" or "call" → Call
/// - "bet X" → Bet of X chips
/// - "raise X" → Raise to a street total of X
/// - "q" or "quit" → Quit command
///
/// # Example
///
/// ```rust
/// # use riverbed_cli::validation::{parse_player_action, ParseResult};
/// use riverbed_engine::player::PlayerAction;
///
/// assert_eq!(
///     parse_player_action("raise 12"),
///     ParseResult::Action(PlayerAction::Raise(12))
/// );
/// assert_eq!(parse_player_action("Q"), ParseResult::Quit);
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&verb) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match verb {
        "q" | "quit" => ParseResult::Quit,
        "fold" | "f" => ParseResult::Action(PlayerAction::Fold),
        "check" | "x" => ParseResult::Action(PlayerAction::Check),
        "call" | "c" => ParseResult::Action(PlayerAction::Call),
        "bet" => parse_amount(&parts, "Bet", "bet 10").map_or_else(ParseResult::Invalid, |a| {
            ParseResult::Action(PlayerAction::Bet(a))
        }),
        "raise" => parse_amount(&parts, "Raise", "raise 20").map_or_else(ParseResult::Invalid, |a| {
            ParseResult::Action(PlayerAction::Raise(a))
        }),
        _ => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, check, call, bet <amount>, raise <amount>, q",
            verb
        )),
    }
}

fn parse_amount(parts: &[&str], label: &str, example: &str) -> Result<u32, String> {
    let Some(raw) = parts.get(1) else {
        return Err(format!("{} requires an amount (e.g., '{}')", label, example));
    };
    match raw.parse::<u32>() {
        Ok(amount) if amount > 0 => Ok(amount),
        Ok(_) => Err(format!("{} amount must be positive", label)),
        Err(_) => Err(format!("Invalid {} amount", label.to_lowercase())),
    }
}

/// Parses the `--cards` argument of `eval`: 5 to 7 distinct cards.
pub fn parse_card_list(input: &str) -> Result<Vec<Card>, String> {
    let cards = parse_cards(input).map_err(|e| e.to_string())?;
    if !(5..=7).contains(&cards.len()) {
        return Err(format!("expected 5 to 7 cards, got {}", cards.len()));
    }
    Ok(cards)
}
