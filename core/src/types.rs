use core::fmt;
use serde::{Deserialize, Serialize};

/// Single grid axis, used for crossword width, height and positions.
pub type Coord = u8;

/// Grid position `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Number printed on a crossword clue and its anchor cell.
pub type ClueNumber = u8;

/// Score unit shared by every mode and the session ledger.
pub type Points = u32;

/// Points awarded for any correct answer, in every mode.
pub const POINTS_PER_CORRECT: Points = 10;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// Position of the `offset`-th letter of a word starting at `origin`.
    pub const fn cell_at(self, origin: Coord2, offset: Coord) -> Option<Coord2> {
        let (row, col) = origin;
        match self {
            Self::Across => match col.checked_add(offset) {
                Some(col) => Some((row, col)),
                None => None,
            },
            Self::Down => match row.checked_add(offset) {
                Some(row) => Some((row, col)),
                None => None,
            },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Across => "Across",
            Self::Down => "Down",
        })
    }
}

/// Arrow-key movement of the crossword focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Up,
    Down,
    Left,
    Right,
}

impl Step {
    const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Applies this step to `coords`, returning a value only when it remains in bounds.
    pub fn apply(self, coords: Coord2, bounds: Coord2) -> Option<Coord2> {
        let (row, col) = coords;
        let (drow, dcol) = self.delta();
        let (max_row, max_col) = bounds;

        let next_row = row.checked_add_signed(drow)?;
        if next_row >= max_row {
            return None;
        }

        let next_col = col.checked_add_signed(dcol)?;
        if next_col >= max_col {
            return None;
        }

        Some((next_row, next_col))
    }
}
