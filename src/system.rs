//! Square systems of GF(2) equations.

use std::{
    collections::BTreeMap,
    fmt::{self, Debug, Formatter},
};

use fixedbitset::FixedBitSet;
use rayon::prelude::*;

use crate::{
    common::Gf2Error,
    equation::Equation,
    internal::utils,
};

/// Number of variables from which [`Elimination::auto`] goes parallel.
pub const PARALLEL_THRESHOLD: usize = 256;

/// How rows below a pivot are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Elimination {
    /// One row after another on the calling thread.
    #[default]
    Sequential,
    /// All rows of a column at once on the rayon pool, joined before the next column.
    Parallel,
}

impl Elimination {
    /// Picks [`Elimination::Parallel`] for systems of at least [`PARALLEL_THRESHOLD`] variables.
    #[must_use]
    pub fn auto(variables: usize) -> Self {
        if variables >= PARALLEL_THRESHOLD {
            Elimination::Parallel
        } else {
            Elimination::Sequential
        }
    }

    /// Adds `pivot` to every row in `below` with `1` at `col`.
    ///
    /// Rows are disjoint and `pivot` is shared read-only.
    fn reduce_below<E: Equation>(
        self,
        pivot: &E,
        below: &mut [E],
        col: usize,
    ) -> Result<(), Gf2Error> {
        let reduce = |row: &mut E| -> Result<(), Gf2Error> {
            if row.coefficient(col)? {
                row.add(pivot)?;
            }
            Ok(())
        };
        match self {
            Elimination::Sequential => below.iter_mut().try_for_each(reduce),
            Elimination::Parallel => below.par_iter_mut().try_for_each(reduce),
        }
    }
}

/// Borrows `rows[src]` and `rows[dst]` at a time.
fn pair_mut<E>(rows: &mut [E], src: usize, dst: usize) -> (&E, &mut E) {
    debug_assert_ne!(src, dst);
    if src < dst {
        let (lo, hi) = rows.split_at_mut(dst);
        (&lo[src], &mut hi[0])
    } else {
        let (lo, hi) = rows.split_at_mut(src);
        (&hi[0], &mut lo[dst])
    }
}

/// Augmented `k x k` matrix `[A | b]` over GF(2), one [`Equation`] per row.
#[derive(Clone, PartialEq, Eq)]
pub struct EquationSystem<E: Equation> {
    /// Rows of `[A | b]`.
    rows: Vec<E>,
    /// Number of pivots. Available after elimination until the next mutation.
    rank: Option<usize>,
}

impl<E: Equation> EquationSystem<E> {
    /// Creates a system from its rows.
    ///
    /// # Errors
    ///
    /// - If the number of coefficients of any row differs from the number of rows.
    pub fn from_rows(rows: Vec<E>) -> Result<Self, Gf2Error> {
        let n = rows.len();
        if let Some((row, eq)) = rows.iter().enumerate().find(|(_, eq)| eq.len() != n) {
            return Err(Gf2Error::NotSquare {
                row,
                len: eq.len(),
                rows: n,
            });
        }
        Ok(Self { rows, rank: None })
    }

    /// Number of equations, equal to the number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rank found by the last elimination, `None` if not eliminated since the last mutation.
    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    fn check_row(&self, row: usize) -> Result<(), Gf2Error> {
        if row < self.len() {
            Ok(())
        } else {
            Err(Gf2Error::IndexOutOfRange {
                index: row,
                len: self.len(),
            })
        }
    }

    /// Equation at `row`.
    ///
    /// # Errors
    ///
    /// - If `row` is out of range.
    pub fn row(&self, row: usize) -> Result<&E, Gf2Error> {
        self.check_row(row)?;
        Ok(&self.rows[row])
    }

    #[must_use]
    pub fn rows(&self) -> &[E] {
        &self.rows
    }

    /// `A[row][col]`.
    ///
    /// # Errors
    ///
    /// - If `row` or `col` is out of range.
    pub fn coefficient(&self, row: usize, col: usize) -> Result<bool, Gf2Error> {
        self.row(row)?.coefficient(col)
    }

    /// Copy of the right-hand side `b`.
    #[must_use]
    pub fn rhs(&self) -> FixedBitSet {
        let mut b = FixedBitSet::with_capacity(self.len());
        for (r, row) in self.rows.iter().enumerate() {
            b.set(r, row.rhs());
        }
        b
    }

    /// Exchanges rows `a` and `b`, right-hand side included.
    ///
    /// # Errors
    ///
    /// - If `a` or `b` is out of range.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<(), Gf2Error> {
        self.check_row(a)?;
        self.check_row(b)?;
        self.rows.swap(a, b);
        self.rank = None;
        Ok(())
    }

    /// Adds row `source` into row `target`, right-hand side included.
    ///
    /// # Errors
    ///
    /// - If `target` or `source` is out of range.
    /// - If `target == source`.
    /// - If the rows cannot be combined (see [`Equation::add`]).
    pub fn add_row_into(&mut self, target: usize, source: usize) -> Result<(), Gf2Error> {
        self.check_row(target)?;
        self.check_row(source)?;
        if target == source {
            return Err(Gf2Error::SelfCombination { row: target });
        }
        let (src, dst) = pair_mut(&mut self.rows, source, target);
        dst.add(src)?;
        self.rank = None;
        Ok(())
    }

    /// Overwrites the equation at `row`.
    ///
    /// # Errors
    ///
    /// - If `row` is out of range.
    /// - If `eq` has a wrong number of coefficients.
    pub fn replace_row(&mut self, row: usize, eq: E) -> Result<(), Gf2Error> {
        self.check_row(row)?;
        if eq.len() != self.len() {
            return Err(Gf2Error::NotSquare {
                row,
                len: eq.len(),
                rows: self.len(),
            });
        }
        self.rows[row] = eq;
        self.rank = None;
        Ok(())
    }

    /// Bottom-most row in `r..` with `1` at `col`.
    fn find_pivot(&self, r: usize, col: usize) -> Result<Option<usize>, Gf2Error> {
        for k in (r..self.len()).rev() {
            if self.rows[k].coefficient(col)? {
                return Ok(Some(k));
            }
        }
        Ok(None)
    }

    /// Forward pass. Returns the rank.
    fn eliminate_lower(&mut self, method: Elimination) -> Result<usize, Gf2Error> {
        let mut r = 0;
        for c in 0..self.len() {
            // Free variable: reuse `r` for the next column
            let Some(pivot) = self.find_pivot(r, c)? else {
                tracing::trace!("column {c}: no pivot");
                continue;
            };
            tracing::trace!("column {c}: pivot {pivot} -> {r}");
            self.rows.swap(r, pivot);
            let (upper, below) = self.rows.split_at_mut(r + 1);
            method.reduce_below(&upper[r], below, c)?;
            r += 1;
        }
        Ok(r)
    }

    /// Moves zero rows onto the diagonal of the free variables.
    ///
    /// Rows `i..` are rotated by one whenever `A[i][i] = 0`, so the bottom row
    /// (all zero if any pivot is missing) comes up to `i`.
    fn repair_diagonal(&mut self) -> Result<(), Gf2Error> {
        for i in 0..self.len() {
            if self.rows[i].coefficient(i)? {
                continue;
            }
            self.rows[i..].rotate_right(1);
        }
        Ok(())
    }

    /// Checks that `A` is upper triangular with exactly `rank` ones on the diagonal.
    fn validate_aftereliminate(&self) -> bool {
        let Some(rank) = self.rank else {
            return false;
        };
        let mut ones = 0;
        for (r, row) in self.rows.iter().enumerate() {
            if (0..r).any(|c| row.get(c) == Some(true)) {
                return false;
            }
            if row.get(r) == Some(true) {
                ones += 1;
            }
        }
        ones == rank
    }

    /// Brings the system into row-echelon form with pivots on the diagonal.
    ///
    /// Pivots are searched from the bottom up. Guaranteed to be no-op if
    /// already eliminated and not mutated since.
    ///
    /// # Errors
    ///
    /// - If rows cannot be combined (see [`Equation::add`]).
    pub fn eliminate(&mut self, method: Elimination) -> Result<(), Gf2Error> {
        // Already eliminated
        if self.rank.is_some() {
            return Ok(());
        }
        let n = self.len();
        tracing::debug!("eliminating {n}x{n} system ({method:?})");
        let rank = self.eliminate_lower(method)?;
        self.repair_diagonal()?;
        self.rank = Some(rank);
        debug_assert!(self.validate_aftereliminate());
        tracing::debug!("rank {rank}, {} free variables", n - rank);
        Ok(())
    }

    /// Solves the eliminated system from the bottom up.
    ///
    /// Free variables are set to `0`. Does not modify the system.
    ///
    /// # Errors
    ///
    /// - If the system has not been eliminated since its last mutation.
    pub fn back_substitute(&self) -> Result<FixedBitSet, Gf2Error> {
        if self.rank.is_none() {
            return Err(Gf2Error::NotEliminated);
        }
        let n = self.len();
        let mut work = self.rhs();
        let mut x = FixedBitSet::with_capacity(n);
        for i in (0..n).rev() {
            if !self.rows[i].coefficient(i)? {
                if work[i] {
                    tracing::warn!("row {i} reads 0 = 1; system has no exact solution");
                }
                continue;
            }
            if !work[i] {
                continue;
            }
            x.insert(i);
            for j in 0..i {
                if self.rows[j].coefficient(i)? {
                    work.toggle(j);
                }
            }
        }
        Ok(x)
    }

    /// Eliminates if not done yet, then back-substitutes.
    ///
    /// # Errors
    ///
    /// - See [`EquationSystem::eliminate`].
    pub fn solve(&mut self, method: Elimination) -> Result<FixedBitSet, Gf2Error> {
        self.eliminate(method)?;
        self.back_substitute()
    }
}

impl<E: Equation> Debug for EquationSystem<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut ret = f.debug_struct("EquationSystem");
        ret.field("len", &self.len()).field("rank", &self.rank);
        let mut co = BTreeMap::new();
        for (r, row) in self.rows.iter().enumerate() {
            co.insert(r, utils::bitstring((0..row.len()).filter_map(|c| row.get(c))));
        }
        ret.field("co", &co);
        ret.field("rhs", &utils::bitstring(self.rows.iter().map(Equation::rhs)));
        ret.finish()
    }
}
