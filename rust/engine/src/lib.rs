//! # riverbed-engine: Texas Hold'em cash-game core
//!
//! The authoritative rules of a no-limit hold'em table: hand evaluation,
//! the betting-round state machine, and showdown with side pots. Rendering,
//! transport and lobby concerns live outside this crate and consume
//! [`snapshot::TableSnapshot`]s.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Best-of-7 hand evaluation and ordering
//! - [`player`] - Seat state and player actions
//! - [`rules`] - Legal action computation and validation
//! - [`positions`] - Button, blind and turn rotation
//! - [`table`] - The per-hand state machine
//! - [`showdown`] - Side pots and pot distribution
//! - [`snapshot`] - Per-recipient state views
//! - [`history`] - Record of the current hand
//! - [`config`] - Table settings
//! - [`errors`] - Error types for table operations
//!
//! ## Quick Start
//!
//! ```rust
//! use riverbed_engine::cards::parse_cards;
//! use riverbed_engine::hand::{evaluate, Category};
//!
//! let cards = parse_cards("Ah Ad Ac As Kh Kd 2c").unwrap();
//! let rank = evaluate(&cards).unwrap();
//! assert_eq!(rank.category, Category::Quads);
//! assert_eq!(rank.tiebreakers, vec![14, 13]);
//! ```
//!
//! ## Playing a hand
//!
//! ```rust
//! use riverbed_engine::config::TableConfig;
//! use riverbed_engine::player::PlayerAction;
//! use riverbed_engine::table::{Stage, Table};
//!
//! let mut table = Table::new(TableConfig::default(), Some(42)).unwrap();
//! table.seat_player(0, "alice", 200).unwrap();
//! table.seat_player(1, "bob", 200).unwrap();
//! table.seat_player(2, "carol", 200).unwrap();
//! table.start_hand().unwrap();
//!
//! while let Some(seat) = table.turn_seat() {
//!     table.apply_action(seat, PlayerAction::Fold).unwrap();
//! }
//! assert_eq!(table.stage(), Stage::Showdown);
//! assert_eq!(table.last_winners().len(), 1);
//! assert_eq!(table.chips_in_play(), 600);
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod history;
pub mod player;
pub mod positions;
pub mod rules;
pub mod showdown;
pub mod snapshot;
pub mod table;
