use std::iter::FusedIterator;

use crate::bitset::bitset_ops;
use crate::{Position, BOARD_SIZE};

/// A compact set of [`Position`]s, e.g. every cell a piece can walk to.
///
/// Allows intersection/union with other such sets via bitwise ops, and
/// iterates in row-major order.
///
/// ```
/// use labyrinth::{Position, PositionSet};
/// let a = Position::new(0, 0).unwrap();
/// let b = Position::new(3, 4).unwrap();
/// let set = PositionSet::new().insert(b).insert(a).insert(a);
/// assert_eq!(set.len(), 2);
/// assert_eq!(Vec::from_iter(set), vec![a, b]);
/// ```
///
/// Like [`Position`], this is [`Copy`], and "mutating" methods return a new value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionSet {
    // Only the low 49 bits are used.
    bits: u64,
}

const VALID_BITS: u64 = (1u64 << (BOARD_SIZE * BOARD_SIZE)) - 1;

bitset_ops!(PositionSet, u64, VALID_BITS);

impl PositionSet {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    /// The set of every cell on the board.
    pub fn full() -> Self {
        Self { bits: VALID_BITS }
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn contains(self, position: Position) -> bool {
        (self.bits & (1u64 << position.to_index())) != 0
    }

    #[must_use]
    pub fn insert(self, position: Position) -> Self {
        Self {
            bits: self.bits | (1u64 << position.to_index()),
        }
    }

    #[must_use]
    pub fn remove(self, position: Position) -> Self {
        Self {
            bits: self.bits & !(1u64 << position.to_index()),
        }
    }
}

impl FromIterator<Position> for PositionSet {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        let mut bits = 0;
        for position in iter {
            bits |= 1u64 << position.to_index();
        }
        Self { bits }
    }
}

impl IntoIterator for PositionSet {
    type Item = Position;

    type IntoIter = PositionSetIter;

    fn into_iter(self) -> Self::IntoIter {
        PositionSetIter { bits: self.bits }
    }
}

/// Iterator for a [`PositionSet`], in row-major order.
#[derive(Clone, Copy, Debug)]
pub struct PositionSetIter {
    bits: u64,
}

impl Iterator for PositionSetIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            // At most 48, so this fits
            let idx = self.bits.trailing_zeros() as u8;
            self.bits ^= 1u64 << idx;
            Some(Position::from_index(idx))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for PositionSetIter {}

impl FusedIterator for PositionSetIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_stays_on_the_board() {
        let p = Position::new(6, 6).unwrap();
        let set = !PositionSet::new().insert(p);
        assert_eq!(set.len(), 48);
        assert!(!set.contains(p));
        assert_eq!(!PositionSet::new(), PositionSet::full());
        assert_eq!(PositionSet::full().into_iter().count(), 49);
    }

    #[test]
    fn set_operations() {
        let a = Position::new(1, 2).unwrap();
        let b = Position::new(5, 0).unwrap();
        let c = Position::new(6, 3).unwrap();
        let ab = PositionSet::from_iter([a, b]);
        let bc = PositionSet::from_iter([b, c]);
        assert_eq!(Vec::from_iter(ab & bc), vec![b]);
        assert_eq!(Vec::from_iter(ab | bc), vec![a, b, c]);
        assert!(ab.remove(a).remove(b).is_empty());
    }
}
