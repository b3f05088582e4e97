use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// User-facing status line emitted by an engine transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    WorkingOn {
        number: ClueNumber,
        direction: Direction,
    },
    WordCorrect {
        answer: String,
    },
    WordIncorrect,
    SelectWordFirst,
    CrosswordSolved,
    SelectDefinition,
    MatchCorrect,
    MatchIncorrect,
    DropCorrect,
    DropIncorrect,
    AlreadyPlaced,
    GameReset,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Message::*;
        match self {
            WorkingOn { number, direction } => {
                write!(f, "You are working on: {number} {direction}. Press Enter to check.")
            }
            WordCorrect { answer } => {
                write!(f, "Correct! 🎉 The word \"{answer}\" is a perfect match.")
            }
            WordIncorrect | MatchIncorrect | DropIncorrect => f.write_str("Incorrect. Try again! 😢"),
            SelectWordFirst => f.write_str("Please select a word to check."),
            CrosswordSolved => f.write_str("Case Closed! You've solved the entire crossword! 🎉"),
            SelectDefinition => f.write_str("Now select the matching definition."),
            MatchCorrect | DropCorrect => f.write_str("Correct! 🎉"),
            AlreadyPlaced => f.write_str("You've already placed that item!"),
            GameReset => f.write_str("Game reset!"),
        }
    }
}
