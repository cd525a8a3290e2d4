//! Defaults and limits for the rules engine.
//!
//! Board size is chosen at runtime through [`Board::new`](crate::board::Board::new);
//! the values here are what callers get when they do not care.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
pub const DEFAULT_SIZE: usize = 19;

/// Largest supported board. The hash table is laid out for this many columns.
pub const MAX_SIZE: usize = 25;

/// Number of intersections covered by the hash table.
pub const MAX_POINTS: usize = MAX_SIZE * MAX_SIZE;

// =============================================================================
// Scoring
// =============================================================================

/// Default komi (compensation points for White).
pub const DEFAULT_KOMI: f32 = 7.5;

// =============================================================================
// Position Hashing
// =============================================================================

/// Seed for the position hash table. Fixed so fingerprints are reproducible
/// across runs and processes.
pub const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

// =============================================================================
// Playouts
// =============================================================================

/// Hard cap on the length of a random playout (3 times the area of a 19x19 board).
pub const MAX_PLAYOUT_MOVES: usize = DEFAULT_SIZE * DEFAULT_SIZE * 3;
