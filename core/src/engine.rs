use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Game selectable from the games menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Crossword,
    Matching,
    Classification,
    Dilemma,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::Crossword,
        Mode::Matching,
        Mode::Classification,
        Mode::Dilemma,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Crossword => "crossword",
            Self::Matching => "matching",
            Self::Classification => "classification",
            Self::Dilemma => "dilemma",
        }
    }

    /// Title shown on the games menu.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Crossword => "Puzzle Challenge",
            Self::Matching => "Match the Definition",
            Self::Classification => "Drag & Drop Challenge",
            Self::Dilemma => "Legal Dilemma",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownMode)
    }
}

/// Common contract of the four game modes.
///
/// An engine owns all of its puzzle state. Transitions take one event at a time and report
/// points through the [`ScoreSink`]; a transition that returns `Err` has not changed anything.
pub trait ModeEngine {
    type Event;
    type Snapshot;

    const MODE: Mode;

    /// Applies a single UI event, returning whether anything observable changed.
    fn handle<S: ScoreSink>(&mut self, event: Self::Event, sink: &mut S) -> Result<bool>;

    /// Restores the initial state, keeping the puzzle definition.
    fn reset(&mut self);

    fn is_complete(&self) -> bool;

    /// Mode-local score in points, never negative.
    fn score(&self) -> Points;

    fn snapshot(&self) -> Self::Snapshot;
}
