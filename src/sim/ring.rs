//! Ring selection over the tile grid
//!
//! The floor is a row-major grid of tiles. Each shrink round removes the
//! outermost still-present band: a concentric ring on single-arena maps, or
//! the outermost remaining row on each platform of multi-platform maps.
//!
//! Rounds are strictly nested; an index selected in one round can never be
//! selected again in a later round.

use serde::{Deserialize, Serialize};

use crate::tile_index;

/// Row-major index of a tile on its map
pub type TileIndex = usize;

/// Concentric-ring plan for a single rectangular arena
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridPlan {
    pub rows: usize,
    pub cols: usize,
    /// Shrinking stops once the remaining side is at or below this
    pub min_remaining: usize,
}

impl GridPlan {
    pub fn new(rows: usize, cols: usize, min_remaining: usize) -> Self {
        Self {
            rows,
            cols,
            min_remaining,
        }
    }

    /// Total number of tiles on the grid
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Side length of the square region still standing after `drop_round`
    /// rings have been removed. Negative once the grid is over-shrunk.
    #[inline]
    pub fn remaining_side(&self, drop_round: usize) -> i64 {
        self.rows.min(self.cols) as i64 - 2 * drop_round as i64
    }

    /// True once no further ring can be produced
    #[inline]
    pub fn is_exhausted(&self, drop_round: usize) -> bool {
        self.remaining_side(drop_round) <= self.min_remaining as i64
    }

    /// Indices forming the outermost remaining ring for `drop_round`.
    ///
    /// Empty once exhausted; the caller must treat that as "stop shrinking",
    /// never as an error.
    pub fn ring_indices(&self, drop_round: usize) -> Vec<TileIndex> {
        if self.is_exhausted(drop_round) {
            return Vec::new();
        }

        let top = drop_round;
        let bottom = self.rows - 1 - drop_round;
        let left = drop_round;
        let right = self.cols - 1 - drop_round;

        let mut indices = Vec::with_capacity(2 * (right - left + bottom - top + 2));

        for col in left..=right {
            indices.push(tile_index(top, col, self.cols));
        }
        if bottom > top {
            for col in left..=right {
                indices.push(tile_index(bottom, col, self.cols));
            }
        }
        for row in top + 1..bottom {
            indices.push(tile_index(row, left, self.cols));
            if right > left {
                indices.push(tile_index(row, right, self.cols));
            }
        }

        indices
    }
}

/// Which edge of a platform faces the arena rim.
///
/// Platforms on the negative side of the map centre collapse from row 0
/// inward; platforms on the positive side collapse from the last row inward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformSide {
    Negative,
    Positive,
}

/// An independent sub-grid of a multi-platform map.
///
/// Tile indices are global: the platform owns the contiguous row-major block
/// starting at `first_index`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Platform {
    /// Smallest global tile index owned by this platform
    pub first_index: TileIndex,
    pub rows: usize,
    pub cols: usize,
    pub side: PlatformSide,
    /// Rows left standing once shrinking stops
    pub min_remaining: usize,
}

impl Platform {
    pub fn new(
        first_index: TileIndex,
        rows: usize,
        cols: usize,
        side: PlatformSide,
        min_remaining: usize,
    ) -> Self {
        Self {
            first_index,
            rows,
            cols,
            side,
            min_remaining,
        }
    }

    #[inline]
    pub fn tile_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Global index range owned by this platform
    #[inline]
    pub fn index_range(&self) -> std::ops::Range<TileIndex> {
        self.first_index..self.first_index + self.tile_count()
    }

    #[inline]
    pub fn remaining_rows(&self, drop_round: usize) -> i64 {
        self.rows as i64 - drop_round as i64
    }

    #[inline]
    pub fn is_exhausted(&self, drop_round: usize) -> bool {
        self.remaining_rows(drop_round) <= self.min_remaining as i64
    }

    /// Indices of the outermost remaining row for `drop_round`, or empty
    /// once the platform has shrunk to its floor.
    pub fn edge_row_indices(&self, drop_round: usize) -> Vec<TileIndex> {
        if self.is_exhausted(drop_round) {
            return Vec::new();
        }

        let row = match self.side {
            PlatformSide::Negative => drop_round,
            PlatformSide::Positive => self.rows - 1 - drop_round,
        };

        (0..self.cols)
            .map(|col| self.first_index + tile_index(row, col, self.cols))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_ring_4x4_round_0() {
        let plan = GridPlan::new(4, 4, 0);
        let mut ring = plan.ring_indices(0);
        ring.sort_unstable();
        assert_eq!(ring, vec![0, 1, 2, 3, 4, 7, 8, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_ring_4x4_round_1_then_exhausted() {
        let plan = GridPlan::new(4, 4, 0);
        let mut ring = plan.ring_indices(1);
        ring.sort_unstable();
        assert_eq!(ring, vec![5, 6, 9, 10]);

        assert!(plan.is_exhausted(2));
        assert!(plan.ring_indices(2).is_empty());
    }

    #[test]
    fn test_ring_respects_floor() {
        // Floor of 2 leaves the inner 2x2 standing
        let plan = GridPlan::new(4, 4, 2);
        assert!(!plan.ring_indices(0).is_empty());
        assert!(plan.is_exhausted(1));
        assert!(plan.ring_indices(1).is_empty());
    }

    #[test]
    fn test_ring_overshrunk_is_noop() {
        let plan = GridPlan::new(4, 4, 0);
        // Rounds far past exhaustion must not panic or produce indices
        for round in 2..100 {
            assert!(plan.ring_indices(round).is_empty());
        }
    }

    #[test]
    fn test_ring_single_row_remainder() {
        // 3x5: round 1 leaves a 1x3 strip, which is its own final ring
        let plan = GridPlan::new(3, 5, 0);
        let mut ring = plan.ring_indices(1);
        ring.sort_unstable();
        assert_eq!(ring, vec![6, 7, 8]);
        assert!(plan.ring_indices(2).is_empty());
    }

    #[test]
    fn test_platform_negative_side_peels_row_zero_first() {
        let plat = Platform::new(100, 4, 3, PlatformSide::Negative, 1);
        assert_eq!(plat.edge_row_indices(0), vec![100, 101, 102]);
        assert_eq!(plat.edge_row_indices(1), vec![103, 104, 105]);
        // min_remaining = 1 keeps the last row
        assert!(plat.is_exhausted(3));
        assert!(plat.edge_row_indices(3).is_empty());
    }

    #[test]
    fn test_platform_positive_side_peels_last_row_first() {
        let plat = Platform::new(0, 4, 3, PlatformSide::Positive, 0);
        assert_eq!(plat.edge_row_indices(0), vec![9, 10, 11]);
        assert_eq!(plat.edge_row_indices(3), vec![0, 1, 2]);
        assert!(plat.edge_row_indices(4).is_empty());
    }

    proptest! {
        /// Rings partition the grid: every index dropped exactly once across
        /// all rounds until exhaustion (with a floor of zero).
        #[test]
        fn prop_rings_partition_grid(rows in 1usize..=12, cols in 1usize..=12) {
            let plan = GridPlan::new(rows, cols, 0);
            let mut seen = HashSet::new();

            let mut round = 0;
            while !plan.is_exhausted(round) {
                for index in plan.ring_indices(round) {
                    prop_assert!(index < plan.tile_count(), "index out of range");
                    prop_assert!(seen.insert(index), "index dropped twice: {index}");
                }
                round += 1;
            }

            prop_assert_eq!(seen.len(), plan.tile_count());
        }

        /// Platform rows partition the platform the same way
        #[test]
        fn prop_platform_rows_partition(
            rows in 1usize..=10,
            cols in 1usize..=10,
            first in 0usize..1000,
            positive in proptest::bool::ANY,
        ) {
            let side = if positive { PlatformSide::Positive } else { PlatformSide::Negative };
            let plat = Platform::new(first, rows, cols, side, 0);
            let mut seen = HashSet::new();

            let mut round = 0;
            while !plat.is_exhausted(round) {
                for index in plat.edge_row_indices(round) {
                    prop_assert!(plat.index_range().contains(&index));
                    prop_assert!(seen.insert(index));
                }
                round += 1;
            }

            prop_assert_eq!(seen.len(), plat.tile_count());
        }
    }
}
