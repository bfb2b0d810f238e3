//! Simulation command handler.
//!
//! Plays bot-only hands on several independent tables at once, one thread
//! per table. Busted seats rebuy before each deal so every table keeps
//! playing. After every hand the table's chips are checked against the
//! buy-ins it has received.

use crate::bots::{Bot, RandomBot};
use crate::config::{self, Config};
use crate::error::CliError;
use riverbed_engine::table::Table;
use std::io::Write;
use std::thread;
use tracing::{debug, info};

/// Per-table result of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub index: u32,
    pub seed: u64,
    pub hands: u64,
    pub showdowns: u64,
    pub rebuys: u64,
    pub chips: u64,
}

/// Handle the sim command: `tables` tables of `hands` hands each.
///
/// Table `i` deals from `seed + i`, so a run is reproducible per seed.
pub fn handle_sim_command(
    tables: u32,
    hands: u64,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    if tables == 0 {
        return Err(CliError::InvalidInput("tables must be >= 1".to_string()));
    }
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    writeln!(
        out,
        "sim: tables={} hands={} seats={} seed={}",
        tables, hands, cfg.seats, base_seed
    )?;

    let reports = run_tables(&cfg, tables, hands, base_seed)?;
    for r in &reports {
        writeln!(
            out,
            "Table {}: seed={} hands={} showdowns={} rebuys={} chips={}",
            r.index, r.seed, r.hands, r.showdowns, r.rebuys, r.chips
        )?;
    }
    let total_hands: u64 = reports.iter().map(|r| r.hands).sum();
    let total_showdowns: u64 = reports.iter().map(|r| r.showdowns).sum();
    writeln!(out, "Total hands: {}", total_hands)?;
    writeln!(out, "Total showdowns: {}", total_showdowns)?;
    writeln!(out, "Chip conservation: ok")?;
    info!(tables, total_hands, "simulation finished");
    Ok(())
}

/// Runs every table on its own scoped thread and returns the reports in
/// table order.
pub fn run_tables(
    cfg: &Config,
    tables: u32,
    hands: u64,
    base_seed: u64,
) -> Result<Vec<TableReport>, CliError> {
    thread::scope(|s| {
        let mut handles = Vec::with_capacity(tables as usize);
        for index in 0..tables {
            let seed = base_seed.wrapping_add(u64::from(index));
            handles.push(s.spawn(move || run_table(cfg, index, seed, hands)));
        }
        handles
            .into_iter()
            .map(|h| {
                h.join().unwrap_or_else(|_| {
                    Err(CliError::Internal("simulation thread panicked".to_string()))
                })
            })
            .collect()
    })
}

fn run_table(cfg: &Config, index: u32, seed: u64, hands: u64) -> Result<TableReport, CliError> {
    let mut table = Table::new(cfg.table_config(cfg.seats), Some(seed))?;
    for seat in 0..cfg.seats {
        table.seat_player(seat, &format!("T{}S{}", index, seat), cfg.buy_in)?;
    }
    let mut bot = RandomBot::new(seed);
    let mut bought_in = u64::from(cfg.buy_in) * cfg.seats as u64;
    let mut report = TableReport {
        index,
        seed,
        hands: 0,
        showdowns: 0,
        rebuys: 0,
        chips: 0,
    };

    for _ in 0..hands {
        for seat in 0..cfg.seats {
            if table.player(seat).is_some_and(|p| p.stack() == 0) {
                table.add_chips(seat, cfg.buy_in)?;
                bought_in += u64::from(cfg.buy_in);
                report.rebuys += 1;
            }
        }
        table.start_hand()?;
        while let Some(seat) = table.turn_seat() {
            let action = bot.get_action(&table, seat)?;
            table.apply_action(seat, action)?;
        }
        report.hands += 1;
        if table.last_winners().iter().any(|w| w.category.is_some()) {
            report.showdowns += 1;
        }

        let chips = table.chips_in_play();
        if chips != bought_in || table.pot() != 0 {
            return Err(CliError::Internal(format!(
                "chip conservation violated on table {} hand {}: expected {}, found {} (pot {})",
                index,
                report.hands,
                bought_in,
                chips,
                table.pot()
            )));
        }
    }
    report.chips = bought_in;
    debug!(index, seed, hands = report.hands, "table finished");
    Ok(report)
}
