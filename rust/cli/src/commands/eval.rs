//! Hand evaluation command.

use crate::error::CliError;
use crate::formatters::format_card;
use crate::validation::parse_card_list;
use riverbed_engine::hand::best_five;
use std::io::Write;

/// Evaluates 5 to 7 cards and prints the category, the tiebreak ranks and
/// the five cards that make the hand.
pub fn handle_eval_command(cards: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_card_list(cards).map_err(CliError::InvalidInput)?;
    let (rank, five) = best_five(&cards)?;
    let ranks: Vec<String> = rank.tiebreakers.iter().map(u8::to_string).collect();
    let shown: Vec<String> = five.iter().map(format_card).collect();

    writeln!(out, "Category: {}", rank.category)?;
    writeln!(out, "Tiebreakers: {}", ranks.join(" "))?;
    writeln!(out, "Best five: {}", shown.join(" "))?;
    Ok(())
}
