//! Builds the equation system of a board.

use crate::{
    board::{Board, Position},
    common::{CellState, Gf2Error},
    equation::Equation,
    system::EquationSystem,
};

/// Generates one equation per selectable cell.
///
/// Row `scaled(p)` has `1` at the variable of every cell toggled by clicking `p`
/// and right-hand side `1` iff `p` is unlit. Disabled cells take no part.
///
/// # Errors
///
/// Never fails for a well-formed board; the error of [`EquationSystem::from_rows`] is forwarded.
pub fn generate<E: Equation>(board: &Board) -> Result<EquationSystem<E>, Gf2Error> {
    let k = board.variables();
    tracing::debug!(
        "generating {k} equations for {}x{} board",
        board.rows(),
        board.cols()
    );
    let scaled = board.scaled_indices();
    let mut rows = Vec::with_capacity(k);
    let mut co = vec![false; k];
    for (index, &cell) in board.cells().iter().enumerate() {
        if cell == CellState::Disabled {
            continue;
        }
        // Scaled indices increase with flat indices
        debug_assert_eq!(scaled[index], Some(rows.len()));
        co.fill(false);
        let p = Position::at(index, board.cols());
        for q in board.reachable_from(&p) {
            if let Some(c) = scaled[q.index()] {
                co[c] = true;
            }
        }
        rows.push(E::from_coefficients(&co, cell == CellState::Unlit));
    }
    EquationSystem::from_rows(rows)
}
