use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub number: ClueNumber,
    pub direction: Direction,
    pub prompt: String,
    pub answer: String,
    /// First letter of the word, `(row, col)`.
    pub origin: Coord2,
}

impl Clue {
    pub fn new(
        number: ClueNumber,
        direction: Direction,
        prompt: impl Into<String>,
        answer: impl Into<String>,
        origin: Coord2,
    ) -> Self {
        Self {
            number,
            direction,
            prompt: prompt.into(),
            answer: answer.into(),
            origin,
        }
    }

    pub fn len(&self) -> Coord {
        Coord::try_from(self.answer.len()).unwrap_or(Coord::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }

    /// Cells along the word, in reading order.
    pub fn cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        (0..self.len()).filter_map(move |offset| self.direction.cell_at(self.origin, offset))
    }

    /// Letter index of `coords` within this word, if the word passes through it.
    pub fn offset_of(&self, (row, col): Coord2) -> Option<usize> {
        let (origin_row, origin_col) = self.origin;
        let offset = match self.direction {
            Direction::Across if row == origin_row => col.checked_sub(origin_col)?,
            Direction::Down if col == origin_col => row.checked_sub(origin_row)?,
            _ => return None,
        };
        let offset = usize::from(offset);
        (offset < self.answer.len()).then_some(offset)
    }

    pub fn covers(&self, coords: Coord2) -> bool {
        self.offset_of(coords).is_some()
    }

    /// Canonical letter at `coords`.
    pub fn letter_at(&self, coords: Coord2) -> Option<char> {
        let offset = self.offset_of(coords)?;
        self.answer.as_bytes().get(offset).copied().map(char::from)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosswordPuzzle {
    /// Grid size as `(rows, cols)`.
    pub size: Coord2,
    pub clues: Vec<Clue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub letter: Option<char>,
    pub blocked: bool,
    /// Numbers of the clues whose first letter sits here.
    pub anchors: SmallVec<[ClueNumber; 2]>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            letter: None,
            blocked: true,
            anchors: SmallVec::new(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClueSelection {
    Selected(ClueNumber),
    Cleared,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EditOutcome {
    /// Not a single letter, or a blocked cell.
    Rejected,
    /// Cell belongs to a solved word.
    ReadOnly,
    NoChange,
    Changed,
}

impl EditOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfirmOutcome {
    NoSelection,
    Incorrect,
    Correct(ClueNumber),
    Solved(ClueNumber),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrosswordEvent {
    SelectCell(Coord2),
    InputLetter { coords: Coord2, input: String },
    MoveFocus(Step),
    Confirm,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellView {
    Blocked,
    Open {
        letter: Option<char>,
        anchors: SmallVec<[ClueNumber; 2]>,
        solved: bool,
        highlighted: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClueView {
    pub number: ClueNumber,
    pub direction: Direction,
    pub prompt: String,
    pub solved: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrosswordSnapshot {
    pub cells: Array2<CellView>,
    pub across: Vec<ClueView>,
    pub down: Vec<ClueView>,
    pub active: Option<ClueNumber>,
    pub focus: Option<Coord2>,
    pub score: Points,
    pub complete: bool,
    pub message: Option<Message>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CrosswordEngine {
    puzzle: CrosswordPuzzle,
    grid: Array2<Cell>,
    solved: BTreeSet<ClueNumber>,
    /// Index into `puzzle.clues`.
    active: Option<usize>,
    focus: Option<Coord2>,
    message: Option<Message>,
}

impl CrosswordEngine {
    pub fn new(mut puzzle: CrosswordPuzzle) -> Result<Self> {
        validate_puzzle(&mut puzzle)?;
        let grid = build_grid(&puzzle);
        Ok(Self {
            puzzle,
            grid,
            solved: BTreeSet::new(),
            active: None,
            focus: None,
            message: None,
        })
    }

    pub fn size(&self) -> Coord2 {
        self.puzzle.size
    }

    pub fn cell_at(&self, coords: Coord2) -> &Cell {
        &self.grid[coords.to_nd_index()]
    }

    pub fn clues(&self, direction: Direction) -> impl Iterator<Item = &Clue> {
        self.puzzle
            .clues
            .iter()
            .filter(move |clue| clue.direction == direction)
    }

    pub fn active_clue(&self) -> Option<&Clue> {
        self.active.map(|index| &self.puzzle.clues[index])
    }

    pub fn focus(&self) -> Option<Coord2> {
        self.focus
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn is_solved(&self, number: ClueNumber) -> bool {
        self.solved.contains(&number)
    }

    pub fn solved_count(&self) -> usize {
        self.solved.len()
    }

    /// Whether `coords` lies on a solved word.
    pub fn is_read_only(&self, coords: Coord2) -> bool {
        self.solved_clue_at(coords).is_some()
    }

    /// Letter to show in a cell: the canonical one once any word through it is solved.
    pub fn display_letter(&self, coords: Coord2) -> Option<char> {
        match self.solved_clue_at(coords) {
            Some(clue) => clue.letter_at(coords),
            None => self.grid[coords.to_nd_index()].letter,
        }
    }

    pub fn select_cell(&mut self, coords: Coord2) -> Result<ClueSelection> {
        let coords = self.validate_coords(coords)?;

        match self.clue_index_at(coords) {
            Some(index) if !self.solved.contains(&self.puzzle.clues[index].number) => {
                let clue = &self.puzzle.clues[index];
                let number = clue.number;
                self.message = Some(Message::WorkingOn {
                    number,
                    direction: clue.direction,
                });
                self.focus = Some(clue.origin);
                self.active = Some(index);
                log::trace!("selected {number} {} at {coords:?}", clue.direction);
                Ok(ClueSelection::Selected(number))
            }
            _ => {
                self.active = None;
                self.message = None;
                Ok(ClueSelection::Cleared)
            }
        }
    }

    pub fn input_letter(&mut self, coords: Coord2, input: &str) -> Result<EditOutcome> {
        let coords = self.validate_coords(coords)?;

        let mut chars = input.chars();
        let letter = match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
            _ => return Ok(EditOutcome::Rejected),
        };

        if self.grid[coords.to_nd_index()].blocked {
            return Ok(EditOutcome::Rejected);
        }
        if self.is_read_only(coords) {
            return Ok(EditOutcome::ReadOnly);
        }

        self.focus = Some(coords);
        let cell = &mut self.grid[coords.to_nd_index()];
        if cell.letter == letter {
            return Ok(EditOutcome::NoChange);
        }
        cell.letter = letter;
        log::trace!("{coords:?} <- {letter:?}");
        Ok(EditOutcome::Changed)
    }

    /// Moves the focus one cell, staying on open cells inside the grid.
    pub fn move_focus(&mut self, step: Step) -> Option<Coord2> {
        let next = step.apply(self.focus?, self.size())?;
        if self.grid[next.to_nd_index()].blocked {
            return None;
        }
        self.focus = Some(next);
        Some(next)
    }

    pub fn confirm_active_word(&mut self, sink: &mut impl ScoreSink) -> ConfirmOutcome {
        let Some(index) = self.active else {
            self.message = Some(Message::SelectWordFirst);
            return ConfirmOutcome::NoSelection;
        };

        let clue = &self.puzzle.clues[index];
        let matches = clue
            .cells()
            .zip(clue.answer.chars())
            .all(|(coords, expected)| self.grid[coords.to_nd_index()].letter == Some(expected));

        if !matches {
            self.message = Some(Message::WordIncorrect);
            return ConfirmOutcome::Incorrect;
        }

        let number = clue.number;
        let answer = clue.answer.clone();
        self.solved.insert(number);
        self.active = None;
        sink.add_points(POINTS_PER_CORRECT);
        log::debug!("clue {number} solved ({}/{})", self.solved.len(), self.puzzle.clues.len());

        if self.is_complete() {
            self.message = Some(Message::CrosswordSolved);
            ConfirmOutcome::Solved(number)
        } else {
            self.message = Some(Message::WordCorrect { answer });
            ConfirmOutcome::Correct(number)
        }
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Across words take precedence over down words through the same cell.
    fn clue_index_at(&self, coords: Coord2) -> Option<usize> {
        let find = |direction| {
            self.puzzle
                .clues
                .iter()
                .position(|clue| clue.direction == direction && clue.covers(coords))
        };
        find(Direction::Across).or_else(|| find(Direction::Down))
    }

    fn solved_clue_at(&self, coords: Coord2) -> Option<&Clue> {
        self.puzzle
            .clues
            .iter()
            .find(|clue| self.solved.contains(&clue.number) && clue.covers(coords))
    }

    fn clue_views(&self, direction: Direction) -> Vec<ClueView> {
        self.clues(direction)
            .map(|clue| ClueView {
                number: clue.number,
                direction: clue.direction,
                prompt: clue.prompt.clone(),
                solved: self.is_solved(clue.number),
            })
            .collect()
    }
}

impl ModeEngine for CrosswordEngine {
    type Event = CrosswordEvent;
    type Snapshot = CrosswordSnapshot;

    const MODE: Mode = Mode::Crossword;

    fn handle<S: ScoreSink>(&mut self, event: CrosswordEvent, sink: &mut S) -> Result<bool> {
        Ok(match event {
            CrosswordEvent::SelectCell(coords) => {
                self.select_cell(coords)?;
                true
            }
            CrosswordEvent::InputLetter { coords, input } => {
                self.input_letter(coords, &input)?.has_update()
            }
            CrosswordEvent::MoveFocus(step) => self.move_focus(step).is_some(),
            CrosswordEvent::Confirm => {
                self.confirm_active_word(sink);
                true
            }
        })
    }

    fn reset(&mut self) {
        self.grid = build_grid(&self.puzzle);
        self.solved.clear();
        self.active = None;
        self.focus = None;
        self.message = None;
        log::debug!("crossword reset");
    }

    fn is_complete(&self) -> bool {
        self.solved.len() == self.puzzle.clues.len()
    }

    fn score(&self) -> Points {
        Points::try_from(self.solved.len()).unwrap_or(Points::MAX) * POINTS_PER_CORRECT
    }

    fn snapshot(&self) -> CrosswordSnapshot {
        let active = self.active_clue();
        let cells = Array2::from_shape_fn(self.size().to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let cell = &self.grid[coords.to_nd_index()];
            if cell.blocked {
                return CellView::Blocked;
            }
            CellView::Open {
                letter: self.display_letter(coords),
                anchors: cell.anchors.clone(),
                solved: self.is_read_only(coords),
                highlighted: active.is_some_and(|clue| clue.covers(coords)),
            }
        });

        CrosswordSnapshot {
            cells,
            across: self.clue_views(Direction::Across),
            down: self.clue_views(Direction::Down),
            active: active.map(|clue| clue.number),
            focus: self.focus,
            score: self.score(),
            complete: self.is_complete(),
            message: self.message.clone(),
        }
    }
}

/// Checks that every word fits and normalizes answers to upper case.
fn validate_puzzle(puzzle: &mut CrosswordPuzzle) -> Result<()> {
    let (rows, cols) = puzzle.size;
    if rows == 0 || cols == 0 || puzzle.clues.is_empty() {
        return Err(GameError::EmptyPuzzle);
    }

    let mut numbers = BTreeSet::new();
    for clue in &mut puzzle.clues {
        if !numbers.insert(clue.number) {
            return Err(GameError::DuplicateId(clue.number.into()));
        }
        if clue.is_empty()
            || clue.answer.len() > usize::from(Coord::MAX)
            || !clue.answer.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(GameError::InvalidAnswer(clue.number));
        }
        clue.answer.make_ascii_uppercase();

        let fits = clue.cells().count() == clue.answer.len()
            && clue.cells().all(|(row, col)| row < rows && col < cols);
        if !fits {
            return Err(GameError::ClueOutOfBounds(clue.number));
        }
    }

    let mut expected: Array2<Option<char>> = Array2::default(puzzle.size.to_nd_index());
    for clue in &puzzle.clues {
        for (coords, letter) in clue.cells().zip(clue.answer.chars()) {
            let slot = &mut expected[coords.to_nd_index()];
            match *slot {
                Some(existing) if existing != letter => log::warn!(
                    "Clue {} disagrees with a crossing word at {coords:?}: {letter} vs {existing}",
                    clue.number
                ),
                _ => *slot = Some(letter),
            }
        }
    }

    Ok(())
}

fn build_grid(puzzle: &CrosswordPuzzle) -> Array2<Cell> {
    let mut grid: Array2<Cell> = Array2::default(puzzle.size.to_nd_index());
    for clue in &puzzle.clues {
        for coords in clue.cells() {
            grid[coords.to_nd_index()].blocked = false;
        }
        grid[clue.origin.to_nd_index()].anchors.push(clue.number);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn puzzle() -> CrosswordPuzzle {
        CrosswordPuzzle {
            size: (8, 8),
            clues: vec![
                Clue::new(1, Direction::Across, "A contract for renting property", "LEASE", (0, 0)),
                Clue::new(2, Direction::Down, "A legal professional", "ATTORNEY", (0, 2)),
            ],
        }
    }

    fn engine() -> CrosswordEngine {
        CrosswordEngine::new(puzzle()).unwrap()
    }

    fn type_word(engine: &mut CrosswordEngine, clue: &Clue, word: &str) {
        for (coords, letter) in clue.cells().zip(word.chars()) {
            let mut buf = [0; 4];
            engine.input_letter(coords, letter.encode_utf8(&mut buf)).unwrap();
        }
    }

    #[test]
    fn grid_opens_exactly_the_word_paths() {
        let engine = engine();

        assert!(!engine.cell_at((0, 4)).blocked);
        assert!(!engine.cell_at((7, 2)).blocked);
        assert!(engine.cell_at((1, 0)).blocked);
        assert!(engine.cell_at((0, 5)).blocked);
        assert_eq!(engine.cell_at((0, 0)).anchors.as_slice(), &[1]);
        assert_eq!(engine.cell_at((0, 2)).anchors.as_slice(), &[2]);
    }

    #[test]
    fn typing_and_confirming_solves_the_word() {
        let mut engine = engine();
        let mut ledger = ScoreLedger::new();
        let lease = puzzle().clues[0].clone();

        assert_eq!(engine.select_cell((0, 3)).unwrap(), ClueSelection::Selected(1));
        assert_eq!(engine.focus(), Some((0, 0)));
        type_word(&mut engine, &lease, "lease");

        assert_eq!(engine.confirm_active_word(&mut ledger), ConfirmOutcome::Correct(1));
        assert!(engine.is_solved(1));
        assert_eq!(ledger.total(), 10);
        assert_eq!(engine.score(), 10);
        assert!(matches!(engine.message(), Some(Message::WordCorrect { answer }) if answer == "LEASE"));
        assert!(engine.active_clue().is_none());
    }

    #[test]
    fn wrong_word_only_changes_message() {
        let mut engine = engine();
        let mut ledger = ScoreLedger::new();
        let lease = puzzle().clues[0].clone();

        engine.select_cell((0, 0)).unwrap();
        type_word(&mut engine, &lease, "LEASH");
        let before = engine.solved_count();

        assert_eq!(engine.confirm_active_word(&mut ledger), ConfirmOutcome::Incorrect);
        assert_eq!(engine.solved_count(), before);
        assert_eq!(ledger.total(), 0);
        assert_eq!(engine.message(), Some(&Message::WordIncorrect));
    }

    #[test]
    fn confirm_without_selection_asks_for_a_word() {
        let mut engine = engine();
        let mut ledger = ScoreLedger::new();

        assert_eq!(engine.confirm_active_word(&mut ledger), ConfirmOutcome::NoSelection);
        assert_eq!(engine.message(), Some(&Message::SelectWordFirst));
    }

    #[test]
    fn across_wins_on_shared_cell() {
        let mut engine = engine();

        assert_eq!(engine.select_cell((0, 2)).unwrap(), ClueSelection::Selected(1));
        assert_eq!(engine.select_cell((1, 2)).unwrap(), ClueSelection::Selected(2));
    }

    #[test]
    fn selecting_solved_word_clears_selection() {
        let mut engine = engine();
        let mut ledger = ScoreLedger::new();
        let lease = puzzle().clues[0].clone();

        engine.select_cell((0, 0)).unwrap();
        type_word(&mut engine, &lease, "LEASE");
        engine.confirm_active_word(&mut ledger);
        engine.select_cell((1, 2)).unwrap();

        assert_eq!(engine.select_cell((0, 1)).unwrap(), ClueSelection::Cleared);
        assert!(engine.active_clue().is_none());
        assert_eq!(engine.message(), None);
    }

    #[test]
    fn input_accepts_single_letters_only() {
        let mut engine = engine();

        assert_eq!(engine.input_letter((0, 0), "l").unwrap(), EditOutcome::Changed);
        assert_eq!(engine.cell_at((0, 0)).letter, Some('L'));
        assert_eq!(engine.input_letter((0, 0), "7").unwrap(), EditOutcome::Rejected);
        assert_eq!(engine.input_letter((0, 0), "ab").unwrap(), EditOutcome::Rejected);
        assert_eq!(engine.input_letter((0, 0), "é").unwrap(), EditOutcome::Rejected);
        assert_eq!(engine.input_letter((1, 0), "a").unwrap(), EditOutcome::Rejected);
        assert_eq!(engine.cell_at((0, 0)).letter, Some('L'));
        assert_eq!(engine.input_letter((0, 0), "").unwrap(), EditOutcome::Changed);
        assert_eq!(engine.cell_at((0, 0)).letter, None);
        assert_eq!(engine.input_letter((9, 0), "a"), Err(GameError::InvalidCoords));
    }

    #[test]
    fn solved_cells_are_read_only_and_show_canonical_letters() {
        let mut engine = engine();
        let mut ledger = ScoreLedger::new();
        let attorney = puzzle().clues[1].clone();

        engine.select_cell((3, 2)).unwrap();
        type_word(&mut engine, &attorney, "ATTORNEY");
        engine.confirm_active_word(&mut ledger);

        assert_eq!(engine.input_letter((0, 2), "Q").unwrap(), EditOutcome::ReadOnly);
        assert_eq!(engine.display_letter((0, 2)), Some('A'));
        assert_eq!(engine.display_letter((0, 1)), None);
        assert_eq!(engine.input_letter((0, 1), "e").unwrap(), EditOutcome::Changed);
    }

    #[test]
    fn solving_every_clue_completes_the_puzzle() {
        let mut engine = engine();
        let mut ledger = ScoreLedger::new();
        let clues = puzzle().clues;

        engine.select_cell((0, 0)).unwrap();
        type_word(&mut engine, &clues[0], "LEASE");
        engine.confirm_active_word(&mut ledger);
        assert!(!engine.is_complete());

        engine.select_cell((5, 2)).unwrap();
        type_word(&mut engine, &clues[1], "ATTORNEY");

        assert_eq!(engine.confirm_active_word(&mut ledger), ConfirmOutcome::Solved(2));
        assert!(engine.is_complete());
        assert_eq!(engine.message(), Some(&Message::CrosswordSolved));
        assert_eq!(ledger.total(), 20);
    }

    #[test]
    fn focus_moves_over_open_cells_only() {
        let mut engine = engine();

        assert_eq!(engine.move_focus(Step::Right), None);
        engine.select_cell((0, 0)).unwrap();
        assert_eq!(engine.move_focus(Step::Right), Some((0, 1)));
        assert_eq!(engine.move_focus(Step::Down), None);
        assert_eq!(engine.move_focus(Step::Up), None);
        assert_eq!(engine.focus(), Some((0, 1)));
    }

    #[test]
    fn reset_forgets_progress() {
        let mut engine = engine();
        let mut ledger = ScoreLedger::new();
        let lease = puzzle().clues[0].clone();

        engine.select_cell((0, 0)).unwrap();
        type_word(&mut engine, &lease, "LEASE");
        engine.confirm_active_word(&mut ledger);
        engine.input_letter((4, 2), "r").unwrap();

        engine.reset();

        assert_eq!(engine.snapshot(), CrosswordEngine::new(puzzle()).unwrap().snapshot());
        assert_eq!(ledger.total(), 10);
    }

    #[test]
    fn construction_rejects_bad_clues() {
        let mut overflow = puzzle();
        overflow.clues[0].origin = (0, 5);
        assert_eq!(
            CrosswordEngine::new(overflow),
            Err(GameError::ClueOutOfBounds(1))
        );

        let mut numbers = puzzle();
        numbers.clues[1].number = 1;
        assert_eq!(CrosswordEngine::new(numbers), Err(GameError::DuplicateId(1)));

        let mut answer = puzzle();
        answer.clues[0].answer = "LE ASE".into();
        assert_eq!(CrosswordEngine::new(answer), Err(GameError::InvalidAnswer(1)));
    }

    #[test]
    fn lowercase_answers_are_normalized() {
        let mut lower = puzzle();
        lower.clues[0].answer = "lease".into();
        let mut engine = CrosswordEngine::new(lower).unwrap();
        let mut ledger = ScoreLedger::new();

        engine.select_cell((0, 0)).unwrap();
        type_word(&mut engine, &puzzle().clues[0], "LEASE");

        assert_eq!(engine.confirm_active_word(&mut ledger), ConfirmOutcome::Correct(1));
    }
}
