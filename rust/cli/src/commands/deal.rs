//! Deal command handler for single hand dealing and display.
//!
//! Deals one hand at a fresh table, checks it down with every seat calling,
//! then prints each seat's hole cards with its best hand and the winners.
//! The same seed always prints the same hand.

use crate::bots::{Bot, CallingStation};
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_board, format_card, format_winner};
use riverbed_engine::hand::evaluate;
use riverbed_engine::table::Table;
use std::io::Write;

/// Handle the deal command.
///
/// Blinds and buy-in come from the resolved configuration; `seed` falls back
/// to the configured seed and then to a random one.
pub fn handle_deal_command(
    seats: u8,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seats = usize::from(seats);
    let mut table = Table::new(cfg.table_config(seats), seed.or(cfg.seed))?;
    for seat in 0..seats {
        table.seat_player(seat, &format!("P{}", seat + 1), cfg.buy_in)?;
    }
    table.start_hand()?;

    let mut bot = CallingStation;
    while let Some(seat) = table.turn_seat() {
        let action = bot.get_action(&table, seat)?;
        table.apply_action(seat, action)?;
    }

    writeln!(out, "Seed: {}", table.seed())?;
    if let Some(dealer) = table.dealer_seat() {
        writeln!(out, "Dealer: seat {}", dealer)?;
    }
    let board = table.community().to_vec();
    for p in table.players() {
        let Some(hole) = p.hole_cards() else { continue };
        let mut cards = hole.to_vec();
        cards.extend_from_slice(&board);
        let best = evaluate(&cards)?;
        writeln!(
            out,
            "Seat {} ({}): {} {}  {}",
            p.seat(),
            p.name(),
            format_card(&hole[0]),
            format_card(&hole[1]),
            best.category
        )?;
    }
    writeln!(out, "Board: {}", format_board(&board))?;
    for winner in table.last_winners() {
        writeln!(out, "{}", format_winner(winner))?;
    }
    Ok(())
}
