//! End-to-end solver: board to moves.

use anyhow::Context;
use fixedbitset::FixedBitSet;

use crate::{
    board::Board,
    common::Solution,
    equation::{Equation, PackedEquation},
    generator,
    internal::utils,
    system::{Elimination, EquationSystem},
};

/// Solver of a single board.
///
/// Owns a snapshot of the board and its equation system; both are discarded with it.
#[derive(Debug, Clone)]
pub struct Solver<E: Equation = PackedEquation> {
    board: Board,
    system: EquationSystem<E>,
}

impl<E: Equation> Solver<E> {
    /// Creates a `Solver` from a board.
    ///
    /// # Errors
    ///
    /// - If the equation system cannot be generated.
    pub fn new(board: &Board) -> anyhow::Result<Self> {
        let system = generator::generate(board).context("failed to generate equations")?;
        Ok(Self {
            board: board.clone(),
            system,
        })
    }

    #[must_use]
    pub fn system(&self) -> &EquationSystem<E> {
        &self.system
    }

    /// Solves the board.
    ///
    /// Returns one bit per cell of the board; disabled cells are never clicked.
    ///
    /// # Errors
    ///
    /// - If elimination fails.
    pub fn solve(&mut self, method: Elimination) -> anyhow::Result<Solution> {
        let dense = self
            .system
            .solve(method)
            .with_context(|| format!("failed to solve {} equations", self.system.len()))?;
        let moves = expand(&self.board, &dense);
        tracing::debug!("{} of {} cells clicked", moves.count_ones(..), moves.len());
        Ok(moves)
    }
}

/// Expands a solution over the selectable cells to one bit per board cell.
///
/// Disabled cells get `0`.
#[must_use]
pub fn expand(board: &Board, dense: &FixedBitSet) -> Solution {
    utils::scatter(dense, board.scaled_indices())
}

/// Solves `board` with packed rows, going parallel for large boards.
///
/// # Errors
///
/// - See [`Solver::solve`].
pub fn solve(board: &Board) -> anyhow::Result<Solution> {
    let method = Elimination::auto(board.variables());
    Solver::<PackedEquation>::new(board)?.solve(method)
}
