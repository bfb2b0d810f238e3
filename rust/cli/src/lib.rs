//! # Riverbed CLI Library
//!
//! Command-line front end for the Riverbed hold'em engine: deal and evaluate
//! hands, play against bots at one table, or simulate many tables at once.
//!
//! ## Example Usage
//!
//! ```
//! use std::io;
//! let args = vec!["riverbed", "eval", "--cards", "As Ks Qs Js Ts 2c 3c"];
//! let code = riverbed_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `deal`: Deal a single hand for inspection
//! - `eval`: Evaluate 5 to 7 cards
//! - `play`: Play hands at seat 0 against bots
//! - `sim`: Run bot hands on parallel tables and check chip conservation
//! - `cfg`: Display the resolved configuration and its sources

use clap::Parser;
use std::io::{BufRead, Write};

pub mod bots;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, RiverbedCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_play_command,
    handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["deal", "eval", "play", "sim", "cfg"];

/// Main entry point for the CLI application.
///
/// Parses `args` and runs the subcommand. `play` reads its actions from the
/// process's stdin; see [`run_with_input`] to supply them directly.
///
/// # Returns
///
/// Exit code: [`exit_code::SUCCESS`] or [`exit_code::ERROR`]
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// Same as [`run`], reading interactive input from `input`.
///
/// # Example
///
/// ```
/// use std::io::{self, Cursor};
/// let args = vec!["riverbed", "play", "--seats", "2", "--seed", "42"];
/// let mut input = Cursor::new("fold\n");
/// let code = riverbed_cli::run_with_input(args, &mut input, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run_with_input<I, S>(
    args: I,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match RiverbedCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Deal { seats, seed } => handle_deal_command(seats, seed, out),
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Play { seats, hands, seed } => {
            handle_play_command(seats, hands, seed, out, err, input)
        }
        Commands::Sim {
            tables,
            hands,
            seed,
        } => handle_sim_command(tables, hands, seed, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let mut usage = format!("{}\nRiverbed Hold'em CLI\nUsage: riverbed <command> [options]\n\nCommands:\n", e);
    for c in COMMANDS {
        usage.push_str(&format!("  {}\n", c));
    }
    usage.push_str("\nFor full help, run: riverbed --help\n");
    let _ = write!(err, "{}", usage);
    exit_code::ERROR
}
