use thiserror::Error;

use crate::table::Stage;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GameError {
    #[error("It's not seat {actual}'s turn (expected seat {expected})")]
    NotYourTurn { expected: usize, actual: usize },
    #[error("Action not allowed while the table is in stage {stage}")]
    ActionNotAllowedInStage { stage: Stage },
    #[error("Illegal amount: {amount}, minimum: {minimum}")]
    IllegalAmount { amount: u32, minimum: u32 },
    #[error("Insufficient stack: requested {amount}, available {stack}")]
    InsufficientStack { amount: u32, stack: u32 },
    #[error("Unknown seat {0}")]
    UnknownSeat(usize),
    #[error("Seat {0} may not show or muck now")]
    RevealNotAllowed(usize),
    #[error("{action} is not available to seat {seat}")]
    ActionNotAvailable { seat: usize, action: &'static str },
    #[error("Hand evaluation needs 5 to 7 cards, got {0}")]
    InvalidCardCount(usize),
    #[error("Duplicate card {0}")]
    DuplicateCard(String),
    #[error("Invalid card '{0}'")]
    InvalidCard(String),
    #[error("At least two players with chips are required, found {0}")]
    NotEnoughPlayers(usize),
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("Seat {0} is already occupied")]
    SeatOccupied(usize),
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
    #[error("Chips on the table would exceed {limit}")]
    ChipLimitExceeded { limit: u32 },
    #[error("Deck exhausted")]
    DeckExhausted,
}
