//! Mini-game engines behind the legal-literacy "Games" page.
//!
//! Four independent modes share one scoring contract: every engine reports points through a
//! [`ScoreSink`], and [`GameSession`] owns the [`ScoreLedger`] together with whichever engine
//! is currently selected. Everything is synchronous and in-memory; randomness only enters
//! through an explicit seed.

#![no_std]

extern crate alloc;

pub use classification::*;
pub use content::*;
pub use crossword::*;
pub use dilemma::*;
pub use engine::*;
pub use error::*;
pub use matching::*;
pub use message::*;
pub use score::*;
pub use session::*;
pub use types::*;

mod classification;
mod content;
mod crossword;
mod dilemma;
mod engine;
mod error;
mod matching;
mod message;
mod score;
mod session;
mod types;
