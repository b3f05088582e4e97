use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seeds every shuffle drawn during the session.
    pub seed: u64,
}

/// The engine behind the currently selected game.
#[derive(Clone, Debug)]
pub enum ActiveGame {
    Crossword(CrosswordEngine),
    Matching(MatchingEngine),
    Classification(ClassificationEngine),
    Dilemma(DilemmaEngine),
}

impl ActiveGame {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Crossword(_) => CrosswordEngine::MODE,
            Self::Matching(_) => MatchingEngine::MODE,
            Self::Classification(_) => ClassificationEngine::MODE,
            Self::Dilemma(_) => DilemmaEngine::MODE,
        }
    }

    pub fn reset(&mut self) {
        match self {
            Self::Crossword(engine) => engine.reset(),
            Self::Matching(engine) => engine.reset(),
            Self::Classification(engine) => engine.reset(),
            Self::Dilemma(engine) => engine.reset(),
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Self::Crossword(engine) => engine.is_complete(),
            Self::Matching(engine) => engine.is_complete(),
            Self::Classification(engine) => engine.is_complete(),
            Self::Dilemma(engine) => engine.is_complete(),
        }
    }

    pub fn score(&self) -> Points {
        match self {
            Self::Crossword(engine) => engine.score(),
            Self::Matching(engine) => engine.score(),
            Self::Classification(engine) => engine.score(),
            Self::Dilemma(engine) => engine.score(),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        match self {
            Self::Crossword(engine) => GameSnapshot::Crossword(engine.snapshot()),
            Self::Matching(engine) => GameSnapshot::Matching(engine.snapshot()),
            Self::Classification(engine) => GameSnapshot::Classification(engine.snapshot()),
            Self::Dilemma(engine) => GameSnapshot::Dilemma(engine.snapshot()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Crossword(CrosswordEvent),
    Matching(MatchingEvent),
    Classification(ClassificationEvent),
    Dilemma(DilemmaEvent),
}

impl GameEvent {
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Crossword(_) => Mode::Crossword,
            Self::Matching(_) => Mode::Matching,
            Self::Classification(_) => Mode::Classification,
            Self::Dilemma(_) => Mode::Dilemma,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum GameSnapshot {
    Crossword(CrosswordSnapshot),
    Matching(MatchingSnapshot),
    Classification(ClassificationSnapshot),
    Dilemma(DilemmaSnapshot),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub points: Points,
    pub power_ups: Vec<PowerUp>,
    pub game: Option<GameSnapshot>,
}

/// What a dispatched event did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Update {
    pub changed: bool,
    /// Session points gained by this event.
    pub points: Points,
}

/// Owns the score ledger and at most one engine at a time.
#[derive(Clone, Debug)]
pub struct GameSession {
    puzzles: PuzzleSet,
    ledger: ScoreLedger,
    active: Option<ActiveGame>,
    rng: SmallRng,
}

impl GameSession {
    pub fn new(puzzles: PuzzleSet, config: SessionConfig) -> Self {
        log::debug!("session seed: {}", config.seed);
        Self {
            puzzles,
            ledger: ScoreLedger::new(),
            active: None,
            rng: SmallRng::seed_from_u64(config.seed),
        }
    }

    pub fn mode(&self) -> Option<Mode> {
        self.active.as_ref().map(ActiveGame::mode)
    }

    pub fn active(&self) -> Option<&ActiveGame> {
        self.active.as_ref()
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn puzzles(&self) -> &PuzzleSet {
        &self.puzzles
    }

    /// Replaces any running game with a fresh one of `mode`.
    ///
    /// On error the previous game is kept.
    pub fn select_mode(&mut self, mode: Mode) -> Result<()> {
        let puzzles = &self.puzzles;
        let game = match mode {
            Mode::Crossword => ActiveGame::Crossword(CrosswordEngine::new(puzzles.crossword.clone())?),
            Mode::Matching => {
                let seed = self.rng.next_u64();
                ActiveGame::Matching(MatchingEngine::new(puzzles.pairs.clone(), seed)?)
            }
            Mode::Classification => {
                ActiveGame::Classification(ClassificationEngine::new(puzzles.practices.clone())?)
            }
            Mode::Dilemma => ActiveGame::Dilemma(DilemmaEngine::new(puzzles.dilemmas.clone())?),
        };

        if let Some(previous) = self.active.replace(game) {
            log::debug!("{} discarded", previous.mode());
        }
        log::debug!("{mode} selected");
        Ok(())
    }

    pub fn clear_mode(&mut self) {
        if let Some(previous) = self.active.take() {
            log::debug!("{} discarded", previous.mode());
        }
    }

    /// "Play again": resets the running game, keeping session points.
    pub fn reset_game(&mut self) -> Result<()> {
        self.active.as_mut().ok_or(GameError::NoActiveMode)?.reset();
        Ok(())
    }

    pub fn dispatch(&mut self, event: GameEvent) -> Result<Update> {
        let active = self.active.as_mut().ok_or(GameError::NoActiveMode)?;
        let before = self.ledger.total();
        log::trace!("event: {event:?}");

        let changed = match (active, event) {
            (ActiveGame::Crossword(engine), GameEvent::Crossword(event)) => {
                engine.handle(event, &mut self.ledger)?
            }
            (ActiveGame::Matching(engine), GameEvent::Matching(event)) => {
                engine.handle(event, &mut self.ledger)?
            }
            (ActiveGame::Classification(engine), GameEvent::Classification(event)) => {
                engine.handle(event, &mut self.ledger)?
            }
            (ActiveGame::Dilemma(engine), GameEvent::Dilemma(event)) => {
                engine.handle(event, &mut self.ledger)?
            }
            (active, event) => {
                return Err(GameError::ModeMismatch {
                    event: event.mode(),
                    active: active.mode(),
                });
            }
        };

        Ok(Update {
            changed,
            points: self.ledger.total() - before,
        })
    }

    /// Exposed for hosts; nothing in the games unlocks power-ups on its own.
    pub fn unlock_power_up(&mut self, power_up: PowerUp) {
        self.ledger.unlock_power_up(power_up);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            points: self.ledger.total(),
            power_ups: self.ledger.power_ups().collect(),
            game: self.active.as_ref().map(ActiveGame::snapshot),
        }
    }
}
