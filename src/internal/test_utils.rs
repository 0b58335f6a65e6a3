//! Testing utilities.

use std::sync::LazyLock;

use fixedbitset::FixedBitSet;
use rand::{thread_rng, Rng};

use crate::{
    board::{Board, Position},
    common::CellState,
    equation::Equation,
    system::EquationSystem,
};

macro_rules! board {
    ($($row:literal),+ $(,)?) => {
        $crate::board::Board::parse(&[$($row),+].join(",")).expect("fixture is well-formed")
    };
}

pub static LEVEL0: LazyLock<Board> = LazyLock::new(|| {
    // . .
    // 0 *
    board!["11", "02"]
});

pub static LEVEL2: LazyLock<Board> = LazyLock::new(|| {
    // * .
    // . 0
    board!["21", "10"]
});

pub static OPEN: LazyLock<Board> = LazyLock::new(|| {
    // 0 . 0
    // . . .
    // 0 . 0
    board!["010", "111", "010"]
});

pub static WALLED: LazyLock<Board> = LazyLock::new(|| {
    // . . 0 * .
    // 0 * . . .
    // . . * 0 .
    // * . . . 0
    board!["11021", "02111", "11201", "21110"]
});

/// Computes `co * x` row by row.
pub fn compute_lhs(co: &[Vec<bool>], x: &FixedBitSet) -> FixedBitSet {
    let mut lhs = FixedBitSet::with_capacity(co.len());
    for (r, row) in co.iter().enumerate() {
        let mut sum = false;
        for (c, &a) in row.iter().enumerate() {
            sum ^= a && x[c];
        }
        lhs.set(r, sum);
    }
    lhs
}

pub fn rand_co(n: usize, p: f64) -> Vec<Vec<bool>> {
    assert!((0.0..=1.0).contains(&p));
    let mut rng = thread_rng();
    (0..n)
        .map(|_| (0..n).map(|_| rng.gen::<f64>() < p).collect())
        .collect()
}

pub fn rand_bits(n: usize, p: f64) -> FixedBitSet {
    assert!((0.0..=1.0).contains(&p));
    let mut rng = thread_rng();
    let mut bits = FixedBitSet::with_capacity(n);
    for i in 0..n {
        bits.set(i, rng.gen::<f64>() < p);
    }
    bits
}

/// Builds a system with right-hand side `co * x` for a random `x`, so that it is solvable.
pub fn rand_solvable<E: Equation>(co: &[Vec<bool>], p: f64) -> (FixedBitSet, EquationSystem<E>) {
    let x = rand_bits(co.len(), p);
    let rhs = compute_lhs(co, &x);
    let rows = co
        .iter()
        .enumerate()
        .map(|(r, row)| E::from_coefficients(row, rhs[r]))
        .collect();
    (rhs, EquationSystem::from_rows(rows).unwrap())
}

/// Scrambles an all-lit copy of `board` with random clicks, keeping its walls.
///
/// The result is solvable by construction.
pub fn scrambled(board: &Board, p: f64) -> Board {
    let mut cells = board
        .cells()
        .iter()
        .map(|&cell| match cell {
            CellState::Disabled => CellState::Disabled,
            _ => CellState::Lit,
        })
        .collect::<Vec<_>>();
    let clicks = rand_bits(board.len(), p);
    for i in clicks.ones() {
        let pos = Position::from_index(i, board).unwrap();
        for q in board.reachable_from(&pos) {
            cells[q.index()] = cells[q.index()].toggled();
        }
    }
    Board::from_cells(cells, board.rows()).unwrap()
}

/// Random board with about `p_wall` of its cells disabled.
pub fn rand_board(rows: usize, cols: usize, p_wall: f64) -> Board {
    let mut rng = thread_rng();
    let cells = (0..rows * cols)
        .map(|_| {
            if rng.gen::<f64>() < p_wall {
                CellState::Disabled
            } else {
                CellState::Lit
            }
        })
        .collect();
    Board::from_cells(cells, rows).unwrap()
}
