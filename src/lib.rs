//! Crossflip solver.
//!
//! Clicking a cell toggles every cell along its row and column up to the first
//! disabled cell or edge. Each selectable cell gives one equation over GF(2):
//! the parity of the clicks reaching it must equal `1` iff it is unlit.
//! The resulting square system is solved by Gaussian elimination.
//!
//! ```
//! use crossflip::{verify, Board};
//!
//! let board = Board::parse("21,10").unwrap();
//! let moves = crossflip::solve(&board).unwrap();
//! verify::check_solution(&board, &moves).unwrap();
//! ```
#![warn(clippy::pedantic)]

#[macro_use]
mod internal;

pub mod board;
pub mod common;
pub mod equation;
pub mod generator;
pub mod solver;
pub mod system;
pub mod verify;

pub use board::{Board, Position};
pub use common::{BoardError, CellState, Gf2Error, Positions, Solution, VerificationError};
pub use equation::{
    AnyEquation, ByteEquation, CharEquation, Equation, PackedEquation, Representation,
};
pub use generator::generate;
pub use solver::{expand, solve, Solver};
pub use system::{Elimination, EquationSystem, PARALLEL_THRESHOLD};
