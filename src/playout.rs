//! Random playouts (random game simulation).
//!
//! A playout plays random sensible moves until both sides pass or the move
//! limit is hit, then scores the final position. Candidates come from
//! [`Board::is_valid_move`], the same analysis a move generator would use.
//!
//! Each playout owns its board. To run playouts in parallel, clone or build one
//! board per thread; boards share nothing mutable.

use crate::board::{Board, MoveAnalysis};
use crate::grid::{Color, Point};
use crate::territory::Score;

/// How a playout ended.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayoutResult {
    /// Stones placed during the playout (passes not included).
    pub moves_played: usize,
    pub score: Score,
    pub winner: Option<Color>,
    pub hash: u64,
}

/// Every legal point for the side to move, with its analysis.
pub fn candidate_moves(board: &Board) -> Vec<(Point, MoveAnalysis)> {
    let size = board.size();
    (0..size * size)
        .map(|v| board.point_of(v))
        .map(|(x, y)| ((x, y), board.is_valid_move(x, y)))
        .filter(|(_, analysis)| analysis.legal)
        .collect()
}

/// Pick a random sensible move, or `None` if the side to move should pass.
pub fn choose_random_move(board: &Board, rng: &mut fastrand::Rng) -> Option<Point> {
    let candidates: Vec<Point> = candidate_moves(board)
        .into_iter()
        .filter(|(_, analysis)| analysis.sensible)
        .map(|(pt, _)| pt)
        .collect();
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.usize(..candidates.len())])
    }
}

/// Play random moves on `board` until two consecutive passes or `max_moves`
/// stones have been placed, then score it.
pub fn random_playout(board: &mut Board, rng: &mut fastrand::Rng, max_moves: usize) -> PlayoutResult {
    let mut moves_played = 0;
    while board.consecutive_passes() < 2 && moves_played < max_moves {
        match choose_random_move(board, rng) {
            Some((x, y)) if board.play(x, y) => moves_played += 1,
            _ => board.pass(),
        }
    }

    let score = board.score();
    PlayoutResult {
        moves_played,
        score,
        winner: score.winner(),
        hash: board.hash(),
    }
}
