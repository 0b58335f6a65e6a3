//! Common functionalities.

use std::fmt::{self, Display, Formatter};

use fixedbitset::FixedBitSet;
use thiserror::Error;

use crate::{board::Position, equation::Representation};

/// Set of board positions.
pub type Positions = hashbrown::HashSet<Position>;
/// Move vector: bit `i` is set iff position (or variable) `i` is clicked.
pub type Solution = FixedBitSet;

/// State of a single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Lit. Nothing to do.
    Lit,
    /// Unlit. Needs an odd number of toggles.
    Unlit,
    /// Greyed out. Never toggled, never clicked.
    Disabled,
}

impl CellState {
    /// Decodes the grid text encoding.
    ///
    /// `'0'` is lit and `'1'` is unlit. Anything else is read as disabled.
    #[must_use]
    pub fn from_char(ch: char) -> Self {
        match ch {
            '0' => CellState::Lit,
            '1' => CellState::Unlit,
            _ => CellState::Disabled,
        }
    }

    /// Encodes back to the grid text encoding.
    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            CellState::Lit => '0',
            CellState::Unlit => '1',
            CellState::Disabled => '2',
        }
    }

    /// State after being toggled once.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            CellState::Lit => CellState::Unlit,
            CellState::Unlit => CellState::Lit,
            CellState::Disabled => CellState::Disabled,
        }
    }
}

impl Display for CellState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let glyph = match self {
            CellState::Lit => '0',
            CellState::Unlit => '.',
            CellState::Disabled => '*',
        };
        write!(f, "{glyph}")
    }
}

/// Error type for equations and systems of equations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Gf2Error {
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cannot combine {lhs:?} row with {rhs:?} row")]
    RepresentationMismatch {
        lhs: Representation,
        rhs: Representation,
    },
    #[error("cannot combine rows of length {lhs} and {rhs}")]
    LengthMismatch { lhs: usize, rhs: usize },
    #[error("row {row} has {len} coefficients in a system of {rows} rows")]
    NotSquare { row: usize, len: usize, rows: usize },
    #[error("row {row} cannot be added to itself")]
    SelfCombination { row: usize },
    #[error("system is not eliminated")]
    NotEliminated,
}

/// Error type for board construction and geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("empty board")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Jagged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{cells} cells cannot be split into {rows} rows")]
    Indivisible { cells: usize, rows: usize },
    #[error("position {index} out of range for board of {len} cells")]
    OutOfRange { index: usize, len: usize },
}

/// Error type for solution verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("move vector has {found} entries, board has {expected} cells")]
    LengthMismatch { expected: usize, found: usize },
    #[error("move clicks disabled cell {index}")]
    DisabledMove { index: usize },
    #[error("cell {index} left unlit")]
    UnlitCell { index: usize },
}
