use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DilemmaOption {
    pub text: String,
    pub consequence: String,
    pub is_correct: bool,
}

impl DilemmaOption {
    pub fn new(text: impl Into<String>, consequence: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            consequence: consequence.into(),
            is_correct,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DilemmaStep {
    pub situation: String,
    pub options: Vec<DilemmaOption>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ChoiceOutcome {
    NoChange,
    Correct,
    Incorrect,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AdvanceOutcome {
    NoChange,
    Next,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DilemmaEvent {
    Choose(usize),
    Advance,
}

/// The recorded answer for the current step, as shown after choosing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChoiceView {
    pub option: usize,
    pub consequence: String,
    pub correct: bool,
    /// Index of the canonically correct option, revealed once an answer is recorded.
    pub correct_option: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DilemmaSnapshot {
    pub step: usize,
    pub step_count: usize,
    pub situation: String,
    pub options: Vec<String>,
    pub choice: Option<ChoiceView>,
    /// Advancing from here finishes the game.
    pub is_last_step: bool,
    pub score: Points,
    pub complete: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DilemmaEngine {
    steps: Vec<DilemmaStep>,
    cursor: usize,
    /// Chosen option per step.
    answers: Vec<Option<usize>>,
    score: Points,
    complete: bool,
}

impl DilemmaEngine {
    pub fn new(steps: Vec<DilemmaStep>) -> Result<Self> {
        if steps.is_empty() || steps.iter().any(|step| step.options.is_empty()) {
            return Err(GameError::EmptyPuzzle);
        }
        for (index, step) in steps.iter().enumerate() {
            let correct = step.options.iter().filter(|option| option.is_correct).count();
            if correct != 1 {
                log::warn!("Dilemma step {index} has {correct} correct options, expected 1");
            }
        }

        let answers = vec![None; steps.len()];
        Ok(Self {
            steps,
            cursor: 0,
            answers,
            score: 0,
            complete: false,
        })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step(&self) -> &DilemmaStep {
        &self.steps[self.cursor]
    }

    pub fn is_last_step(&self) -> bool {
        self.cursor + 1 == self.steps.len()
    }

    /// Option chosen on the current step.
    pub fn chosen(&self) -> Option<&DilemmaOption> {
        let index = self.answers[self.cursor]?;
        self.current_step().options.get(index)
    }

    pub fn choose_option(&mut self, index: usize, sink: &mut impl ScoreSink) -> Result<ChoiceOutcome> {
        let option = self
            .current_step()
            .options
            .get(index)
            .ok_or(GameError::UnknownOption(index))?;
        if self.complete || self.answers[self.cursor].is_some() {
            return Ok(ChoiceOutcome::NoChange);
        }

        let is_correct = option.is_correct;
        self.answers[self.cursor] = Some(index);
        log::trace!("step {} answered with option {index}", self.cursor);

        if is_correct {
            self.score += POINTS_PER_CORRECT;
            sink.add_points(POINTS_PER_CORRECT);
            Ok(ChoiceOutcome::Correct)
        } else {
            Ok(ChoiceOutcome::Incorrect)
        }
    }

    pub fn advance(&mut self) -> AdvanceOutcome {
        if self.complete {
            return AdvanceOutcome::NoChange;
        }
        if self.is_last_step() {
            self.complete = true;
            log::debug!("dilemmas finished with {} points", self.score);
            return AdvanceOutcome::Completed;
        }

        self.cursor += 1;
        self.answers[self.cursor] = None;
        AdvanceOutcome::Next
    }
}

impl ModeEngine for DilemmaEngine {
    type Event = DilemmaEvent;
    type Snapshot = DilemmaSnapshot;

    const MODE: Mode = Mode::Dilemma;

    fn handle<S: ScoreSink>(&mut self, event: DilemmaEvent, sink: &mut S) -> Result<bool> {
        Ok(match event {
            DilemmaEvent::Choose(index) => self.choose_option(index, sink)? != ChoiceOutcome::NoChange,
            DilemmaEvent::Advance => self.advance() != AdvanceOutcome::NoChange,
        })
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.answers.fill(None);
        self.score = 0;
        self.complete = false;
        log::debug!("dilemmas reset");
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn score(&self) -> Points {
        self.score
    }

    fn snapshot(&self) -> DilemmaSnapshot {
        let step = self.current_step();
        let choice = self.answers[self.cursor].and_then(|index| {
            let option = step.options.get(index)?;
            Some(ChoiceView {
                option: index,
                consequence: option.consequence.clone(),
                correct: option.is_correct,
                correct_option: step.options.iter().position(|option| option.is_correct),
            })
        });

        DilemmaSnapshot {
            step: self.cursor,
            step_count: self.steps.len(),
            situation: step.situation.clone(),
            options: step.options.iter().map(|option| option.text.clone()).collect(),
            choice,
            is_last_step: self.is_last_step(),
            score: self.score,
            complete: self.complete,
        }
    }
}
