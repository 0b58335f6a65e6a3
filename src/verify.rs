//! Verification of move vectors by simulated clicking.
//!
//! # Note
//!
//! - Works on a plain copy of the cells; the board itself is never touched.
//! - Independent of the equation system, so it also checks the solver.

use crate::{
    board::{Board, Position},
    common::{CellState, Solution, VerificationError},
};

/// Clicks every cell set in `moves` and returns the resulting cells.
///
/// # Errors
///
/// - If `moves` does not have one bit per cell.
/// - If `moves` clicks a disabled cell.
pub fn apply_moves(board: &Board, moves: &Solution) -> Result<Vec<CellState>, VerificationError> {
    if moves.len() != board.len() {
        Err(VerificationError::LengthMismatch {
            expected: board.len(),
            found: moves.len(),
        })?;
    }
    let mut cells = board.cells().to_vec();
    for index in moves.ones() {
        if board.cell_at(index) == Some(CellState::Disabled) {
            Err(VerificationError::DisabledMove { index })?;
        }
        let p = Position::at(index, board.cols());
        for q in board.reachable_from(&p) {
            let cell = &mut cells[q.index()];
            *cell = cell.toggled();
        }
    }
    Ok(cells)
}

/// Checks that `moves` lights up every selectable cell of `board`.
///
/// # Errors
///
/// - See [`apply_moves`].
/// - If some cell is left unlit.
pub fn check_solution(board: &Board, moves: &Solution) -> Result<(), VerificationError> {
    let cells = apply_moves(board, moves)?;
    if let Some(index) = cells.iter().position(|&cell| cell == CellState::Unlit) {
        Err(VerificationError::UnlitCell { index })?;
    }
    Ok(())
}
