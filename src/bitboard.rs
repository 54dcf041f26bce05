//! A fixed-size grid mask using const generics.
//!
//! Cells of an `N×N` grid are packed row-major into an unsigned integer `T`.
//! The board uses it for ship occupancy; the targeting model uses it for
//! hit/miss views of a shadow board.

use core::fmt;
use core::ops::{BitAnd, BitOr};
use core::mem;
use num_traits::{PrimInt, Unsigned, Zero};

use crate::config::BOARD_SIZE;
use crate::coordinate::Coordinate;

/// Mask sized for the game grid.
pub type GridMask = BitBoard<u128, { BOARD_SIZE as usize }>;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitBoardError {
    /// Requested grid `N*N` does not fit into `T`.
    #[error("grid of {n}x{n} does not fit in {capacity} bits")]
    SizeTooLarge { n: usize, capacity: usize },
    /// Row or column outside `[0, N)`.
    #[error("cell ({row}, {col}) is out of bounds")]
    IndexOutOfBounds { row: usize, col: usize },
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    const CELLS: usize = N * N;

    /// Empty mask. Size is not checked; see [`BitBoard::try_new`].
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Empty mask, failing when `N*N` exceeds the width of `T`.
    pub fn try_new() -> Result<Self, BitBoardError> {
        let capacity = mem::size_of::<T>() * 8;
        if Self::CELLS > capacity {
            Err(BitBoardError::SizeTooLarge { n: N, capacity })
        } else {
            Ok(Self::new())
        }
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitBoardError> {
        let idx = Self::index(row, col)?;
        Ok(((self.bits >> idx) & T::one()) != T::zero())
    }

    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        let idx = Self::index(row, col)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    /// Whether the cell at `coord` is set. Coordinates outside `N` read as unset.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.get(coord.row() as usize, coord.column() as usize)
            .unwrap_or(false)
    }

    pub fn insert(&mut self, coord: Coordinate) -> Result<(), BitBoardError> {
        self.set(coord.row() as usize, coord.column() as usize)
    }

    /// Iterate set cells as `(row, col)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..Self::CELLS)
            .filter(move |&idx| ((self.bits >> idx) & T::one()) != T::zero())
            .map(|idx| (idx / N, idx % N))
    }

    #[inline]
    fn index(row: usize, col: usize) -> Result<usize, BitBoardError> {
        if row >= N || col >= N {
            return Err(BitBoardError::IndexOutOfBounds { row, col });
        }
        Ok(row * N + col)
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        BitBoard { bits: self.bits | rhs.bits }
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        BitBoard { bits: self.bits & rhs.bits }
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}x{}>", N, N)?;
        for r in 0..N {
            for c in 0..N {
                let ch = if self.get(r, c).unwrap_or(false) { '1' } else { '.' };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
