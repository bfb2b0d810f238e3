//! # Play Command
//!
//! Interactive hold'em at a single table. The human sits in seat 0; every
//! other seat is a calling-station bot. Each prompt lists the legal actions
//! with their amounts. Typing `q` or closing stdin ends the session.

use crate::bots::{Bot, CallingStation};
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_action, format_board, format_card, format_legal_actions, format_winner};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_player_action};
use riverbed_engine::errors::GameError;
use riverbed_engine::table::Table;
use std::io::{BufRead, Write};
use tracing::info;

const HUMAN_SEAT: usize = 0;

/// Handle the play command: interactive poker gameplay
///
/// # Arguments
///
/// * `seats` - Table size (default: configured seats)
/// * `hands` - Number of hands to play (must be >= 1, default: 1)
/// * `seed` - RNG seed for reproducibility (default: configured, then random)
/// * `out` - Output stream for game display
/// * `err` - Error stream for warnings and errors
/// * `stdin` - Input stream for player actions
///
/// # Returns
///
/// * `Ok(())` when the requested hands are played or the player quits
/// * `Err(CliError)` if hands < 1, the configuration is invalid, or I/O fails
pub fn handle_play_command(
    seats: Option<u8>,
    hands: Option<u32>,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let hands = hands.unwrap_or(1);
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seats = seats.map(usize::from).unwrap_or(cfg.seats);

    let mut table = Table::new(cfg.table_config(seats), seed.or(cfg.seed))?;
    table.seat_player(HUMAN_SEAT, "You", cfg.buy_in)?;
    for seat in 1..seats {
        table.seat_player(seat, &format!("Bot{}", seat), cfg.buy_in)?;
    }
    writeln!(
        out,
        "play: seats={} hands={} seed={} blinds={}/{}",
        seats,
        hands,
        table.seed(),
        cfg.small_blind,
        cfg.big_blind
    )?;

    let mut played = 0u32;
    for i in 1..=hands {
        if table.player(HUMAN_SEAT).is_none_or(|p| p.stack() == 0) {
            writeln!(out, "You are out of chips.")?;
            break;
        }
        match table.start_hand() {
            Ok(()) => {}
            Err(GameError::NotEnoughPlayers(_)) => {
                writeln!(out, "No opponents with chips left.")?;
                break;
            }
            Err(e) => return Err(e.into()),
        }
        writeln!(out, "Hand {}", i)?;
        show_hand_start(&table, out)?;

        if !play_one_hand(&mut table, out, err, stdin)? {
            writeln!(out, "Session ended by player.")?;
            break;
        }
        show_hand_result(&table, out)?;
        played += 1;
    }

    info!(played, "play session finished");
    writeln!(out, "Hands played: {} (completed)", played)?;
    Ok(())
}

fn show_hand_start(table: &Table, out: &mut dyn Write) -> Result<(), CliError> {
    if let Some(dealer) = table.dealer_seat() {
        writeln!(out, "Dealer: seat {}", dealer)?;
    }
    if let Some(hole) = table.player(HUMAN_SEAT).and_then(|p| p.hole_cards()) {
        writeln!(out, "Your cards: {} {}", format_card(&hole[0]), format_card(&hole[1]))?;
    }
    Ok(())
}

/// Runs the hand to completion. Returns `false` if the player quit.
fn play_one_hand(
    table: &mut Table,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<bool, CliError> {
    let mut bot = CallingStation;
    while let Some(seat) = table.turn_seat() {
        if seat != HUMAN_SEAT {
            let action = bot.get_action(table, seat)?;
            table.apply_action(seat, action)?;
            writeln!(out, "Seat {}: {}", seat, format_action(&action))?;
            continue;
        }

        let legal = table.legal_actions(seat)?;
        writeln!(out, "Board: {}  Pot: {}", format_board(table.community()), table.pot())?;
        write!(out, "Enter action ({} | q): ", format_legal_actions(&legal))?;
        out.flush()?;

        let Some(input) = read_stdin_line(stdin) else {
            return Ok(false);
        };
        match parse_player_action(&input) {
            ParseResult::Action(action) => match table.apply_action(seat, action) {
                Ok(_) => writeln!(out, "Action: {}", format_action(&action))?,
                Err(e) => ui::write_error(err, &format!("Invalid action: {}", e))?,
            },
            ParseResult::Quit => return Ok(false),
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }
    Ok(true)
}

fn show_hand_result(table: &Table, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Board: {}", format_board(table.community()))?;
    for p in table.players() {
        if p.seat() != HUMAN_SEAT
            && table.is_revealed(p.seat())
            && let Some(hole) = p.hole_cards()
        {
            writeln!(
                out,
                "Seat {} shows {} {}",
                p.seat(),
                format_card(&hole[0]),
                format_card(&hole[1])
            )?;
        }
    }
    for winner in table.last_winners() {
        writeln!(out, "{}", format_winner(winner))?;
    }
    if let Some(me) = table.player(HUMAN_SEAT) {
        writeln!(out, "Your stack: {}", me.stack())?;
    }
    Ok(())
}
