//! Utilities.

use fixedbitset::FixedBitSet;

use crate::common::CellState;

/// Computes the dense index of every selectable cell.
///
/// Disabled cells map to `None`; the others are numbered `0, 1, ...` in order.
pub fn scaled_indices(cells: &[CellState]) -> Vec<Option<usize>> {
    let mut next = 0;
    cells
        .iter()
        .map(|&cell| {
            if cell == CellState::Disabled {
                return None;
            }
            next += 1;
            Some(next - 1)
        })
        .collect()
}

/// Scatters `dense[scaled[i]]` to `i`, leaving unmapped slots zero.
pub fn scatter(dense: &FixedBitSet, scaled: &[Option<usize>]) -> FixedBitSet {
    let mut full = FixedBitSet::with_capacity(scaled.len());
    for (i, s) in scaled.iter().enumerate() {
        if let Some(s) = *s {
            full.set(i, dense.contains(s));
        }
    }
    full
}

/// Renders bits as `0`/`1` characters.
pub fn bitstring(bits: impl IntoIterator<Item = bool>) -> String {
    bits.into_iter().map(|b| if b { '1' } else { '0' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_indices() {
        use CellState::{Disabled as D, Lit as L, Unlit as U};
        let cells = [D, U, L, D, D, U];
        assert_eq!(
            scaled_indices(&cells),
            vec![None, Some(0), Some(1), None, None, Some(2)]
        );
        assert!(scaled_indices(&[D, D]).iter().all(Option::is_none));
        assert!(scaled_indices(&[]).is_empty());
    }

    #[test]
    fn test_scatter() {
        let scaled = [Some(0), None, Some(1), Some(2)];
        let dense = FixedBitSet::with_capacity_and_blocks(3, vec![0b101]);
        let full = scatter(&dense, &scaled);
        assert_eq!(full.len(), 4);
        assert_eq!(format!("{full}"), "1001");
    }

    #[test]
    fn test_bitstring() {
        assert_eq!(bitstring([true, false, true]), "101");
        assert_eq!(bitstring([]), "");
    }
}
