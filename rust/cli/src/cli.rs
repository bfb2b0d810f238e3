//! Command-line argument definitions.
//!
//! `RiverbedCli` is the clap parser; each [`Commands`] variant maps to one
//! handler in `commands`.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "riverbed", version, about = "Riverbed hold'em table CLI")]
pub struct RiverbedCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal one hand and show every seat's best hand
    Deal {
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=10))]
        seats: u8,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate 5 to 7 cards, e.g. --cards "As Ks Qs Js Ts 2c 3c"
    Eval {
        #[arg(long)]
        cards: String,
    },
    /// Play hands at seat 0 against check/call bots
    Play {
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=10))]
        seats: Option<u8>,
        #[arg(long)]
        hands: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run bot hands on several tables in parallel
    Sim {
        #[arg(long, default_value_t = 1)]
        tables: u32,
        #[arg(long)]
        hands: u64,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved table configuration and where each value came from
    Cfg,
}
