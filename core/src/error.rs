use thiserror::Error;

use crate::{ClueNumber, Mode};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Clue {0} does not fit inside the grid")]
    ClueOutOfBounds(ClueNumber),
    #[error("Clue {0} has an empty or non-alphabetic answer")]
    InvalidAnswer(ClueNumber),
    #[error("Identifier {0} is used more than once")]
    DuplicateId(u16),
    #[error("Puzzle has no content")]
    EmptyPuzzle,
    #[error("Unknown item {0}")]
    UnknownItem(u16),
    #[error("Unknown option {0}")]
    UnknownOption(usize),
    #[error("Unknown drop zone")]
    UnknownZone,
    #[error("Unknown game mode")]
    UnknownMode,
    #[error("Unknown power-up")]
    UnknownPowerUp,
    #[error("Event for {event} while {active} is active")]
    ModeMismatch { event: Mode, active: Mode },
    #[error("No game selected")]
    NoActiveMode,
}

pub type Result<T> = core::result::Result<T, GameError>;
