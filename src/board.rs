//! Board geometry.
//!
//! A [`Board`] is an immutable snapshot of the grid. Clicking a selectable cell
//! toggles every cell reachable from it along its row and column, stopping at
//! disabled cells and at the edges.

use std::{
    fmt::{self, Display, Formatter},
    iter,
    str::FromStr,
};

use itertools::Itertools;

use crate::{
    common::{BoardError, CellState, Positions},
    internal::utils,
};

/// Grid coordinate together with the column count of its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    row: usize,
    col: usize,
    cols: usize,
}

impl Position {
    /// Creates a position from its coordinates.
    ///
    /// # Errors
    ///
    /// - If `(row, col)` is outside of `board`.
    pub fn new(row: usize, col: usize, board: &Board) -> Result<Self, BoardError> {
        if row >= board.rows || col >= board.cols {
            return Err(BoardError::OutOfRange {
                index: row.saturating_mul(board.cols).saturating_add(col),
                len: board.len(),
            });
        }
        Ok(Self {
            row,
            col,
            cols: board.cols,
        })
    }

    /// Creates a position from its flat index `row * cols + col`.
    ///
    /// # Errors
    ///
    /// - If `index` is not less than `board.len()`.
    pub fn from_index(index: usize, board: &Board) -> Result<Self, BoardError> {
        if index >= board.len() {
            return Err(BoardError::OutOfRange {
                index,
                len: board.len(),
            });
        }
        Ok(Self::at(index, board.cols))
    }

    /// Unchecked counterpart of [`Position::from_index`].
    pub(crate) fn at(index: usize, cols: usize) -> Self {
        Self {
            row: index / cols,
            col: index % cols,
            cols,
        }
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn col(&self) -> usize {
        self.col
    }

    /// Flat zero-based index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.row * self.cols + self.col
    }
}

/// Rectangular puzzle grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Cells in row-major order.
    cells: Vec<CellState>,
    rows: usize,
    cols: usize,
    /// Flat indices of the disabled cells, ascending.
    disabled: Vec<usize>,
    /// Flat index to variable index. `None` for disabled cells.
    scaled: Vec<Option<usize>>,
}

impl Board {
    /// Parses the comma-separated text form, e.g. `"11,02"`.
    ///
    /// `'0'` is lit, `'1'` is unlit and anything else is disabled.
    ///
    /// # Errors
    ///
    /// - If `text` is empty.
    /// - If rows have different lengths.
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(BoardError::Empty);
        }
        let lines = text.split(',').map(str::trim).collect_vec();
        let expected = lines[0].chars().count();
        if let Some((row, line)) = lines
            .iter()
            .find_position(|line| line.chars().count() != expected)
        {
            return Err(BoardError::Jagged {
                row,
                expected,
                found: line.chars().count(),
            });
        }
        let cells = lines
            .iter()
            .flat_map(|line| line.chars())
            .map(CellState::from_char)
            .collect();
        Self::from_cells(cells, lines.len())
    }

    /// Creates a board from row-major cells and the number of rows.
    ///
    /// # Errors
    ///
    /// - If `cells` is empty or `rows` is zero.
    /// - If `rows` does not divide the number of cells.
    pub fn from_cells(cells: Vec<CellState>, rows: usize) -> Result<Self, BoardError> {
        if cells.is_empty() || rows == 0 {
            return Err(BoardError::Empty);
        }
        if cells.len() % rows != 0 {
            return Err(BoardError::Indivisible {
                cells: cells.len(),
                rows,
            });
        }
        let cols = cells.len() / rows;
        let disabled = cells
            .iter()
            .positions(|&cell| cell == CellState::Disabled)
            .collect();
        let scaled = utils::scaled_indices(&cells);
        Ok(Self {
            cells,
            rows,
            cols,
            disabled,
            scaled,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<CellState> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cell_at(row * self.cols + col)
    }

    #[must_use]
    pub fn cell_at(&self, index: usize) -> Option<CellState> {
        self.cells.get(index).copied()
    }

    /// Flat indices of the disabled cells.
    #[must_use]
    pub fn disabled(&self) -> &[usize] {
        &self.disabled
    }

    /// Number of unknowns, i.e. selectable cells.
    #[must_use]
    pub fn variables(&self) -> usize {
        self.len() - self.disabled.len()
    }

    /// Dense variable index of the cell at `index`.
    ///
    /// `None` if the cell is disabled or out of range.
    #[must_use]
    pub fn scaled_index(&self, index: usize) -> Option<usize> {
        self.scaled.get(index).copied().flatten()
    }

    pub(crate) fn scaled_indices(&self) -> &[Option<usize>] {
        &self.scaled
    }

    fn is_selectable(&self, row: usize, col: usize) -> bool {
        matches!(
            self.cell(row, col),
            Some(CellState::Lit | CellState::Unlit)
        )
    }

    /// Cells toggled by clicking `p`, including `p` itself.
    ///
    /// Empty if `p` is disabled or does not belong to this board.
    #[must_use]
    pub fn reachable_from(&self, p: &Position) -> Positions {
        let mut ret = Positions::new();
        if p.cols != self.cols || !self.is_selectable(p.row, p.col) {
            return ret;
        }
        let at = |row, col| Position {
            row,
            col,
            cols: self.cols,
        };
        // Column sweep
        let up = (0..p.row)
            .rev()
            .take_while(|&r| self.is_selectable(r, p.col));
        let down = (p.row + 1..self.rows).take_while(|&r| self.is_selectable(r, p.col));
        ret.extend(
            iter::once(p.row)
                .chain(up)
                .chain(down)
                .map(|r| at(r, p.col)),
        );
        // Row sweep
        let left = (0..p.col)
            .rev()
            .take_while(|&c| self.is_selectable(p.row, c));
        let right = (p.col + 1..self.cols).take_while(|&c| self.is_selectable(p.row, c));
        ret.extend(left.chain(right).map(|c| at(p.row, c)));
        ret
    }

    /// Encodes back to the comma-separated text form.
    #[must_use]
    pub fn encode(&self) -> String {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.to_char()).collect::<String>())
            .join(",")
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
