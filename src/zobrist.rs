//! Position fingerprints for the superko rule.
//!
//! Every (intersection, colour) pair has a fixed random key; a position's
//! fingerprint is the XOR of the keys of all stones on the board, so placing
//! or removing a stone updates it in O(1). The key table is generated once per
//! process from a fixed seed and shared read-only by every board.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::constants::{MAX_POINTS, MAX_SIZE, ZOBRIST_SEED};
use crate::grid::{Color, Grid};

static ZOBRIST_KEYS: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::new);

pub fn zobrist_keys() -> &'static ZobristKeys {
    &ZOBRIST_KEYS
}

#[derive(Debug, Clone)]
pub struct ZobristKeys {
    stones: Vec<[u64; 2]>,
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = fastrand::Rng::with_seed(ZOBRIST_SEED);
        let stones = (0..MAX_POINTS).map(|_| [rng.u64(..), rng.u64(..)]).collect();
        Self { stones }
    }

    /// Key for a stone of `color` at `(x, y)`. Keys are laid out by
    /// coordinate, so every board size draws from the same table.
    pub fn stone(&self, x: usize, y: usize, color: Color) -> u64 {
        self.stones[y * MAX_SIZE + x][color.index()]
    }

    /// Fingerprint of a whole grid, computed from scratch.
    pub fn grid_hash(&self, grid: &Grid) -> u64 {
        grid.iter()
            .filter_map(|i| i.color().map(|c| self.stone(i.x, i.y, c)))
            .fold(0, |h, k| h ^ k)
    }
}

/// Fingerprints of every position reached by a successful move.
#[derive(Debug, Clone, Default)]
pub struct PositionHistory {
    seen: HashSet<u64>,
}

impl PositionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, hash: u64) -> bool {
        self.seen.contains(&hash)
    }

    pub fn record(&mut self, hash: u64) {
        self.seen.insert(hash);
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
