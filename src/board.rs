//! The board engine: stone placement, captures, suicide and superko.
//!
//! A move is first evaluated against the current grid, groups and position
//! history without touching any of them. The evaluation yields a placement
//! describing everything the move would change. [`Board::try_play`]
//! applies it; [`Board::is_valid_move`] only reports on it. Both paths go
//! through the same evaluation, so they can never disagree on legality.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::constants::{DEFAULT_KOMI, DEFAULT_SIZE, MAX_SIZE};
use crate::error::{BoardError, MoveError};
use crate::grid::{Color, Grid, Intersection, Point, Vertex};
use crate::group::{Group, GroupArena, GroupId};
use crate::zobrist::{PositionHistory, zobrist_keys};

/// Stones captured by each colour over the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    fn add(&mut self, color: Color, count: u32) {
        match color {
            Color::Black => self.black += count,
            Color::White => self.white += count,
        }
    }
}

/// What a move would do, as reported by [`Board::is_valid_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveAnalysis {
    pub legal: bool,
    /// Enemy stones the move would capture.
    pub captures: usize,
    /// Size of the mover's resulting group when it is left with exactly one
    /// liberty, 0 otherwise.
    pub self_atari_size: usize,
    /// Liberties of the mover's resulting group, after captures.
    pub liberties: usize,
    /// Legal and not filling one of the mover's own true eyes.
    pub sensible: bool,
}

impl MoveAnalysis {
    fn illegal() -> Self {
        Self::default()
    }
}

/// The observable effects of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub point: Point,
    pub color: Color,
    pub captured: Vec<Point>,
    pub group_size: usize,
    pub liberties: usize,
    pub hash: u64,
}

/// The diff of a legal placement, computed without mutating the board.
#[derive(Debug)]
struct Placement {
    vertex: Vertex,
    color: Color,
    friends: Vec<GroupId>,
    captured: Vec<GroupId>,
    captured_stones: usize,
    group_size: usize,
    liberties: usize,
    hash: u64,
}

#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    groups: GroupArena,
    komi: f32,
    next: Color,
    moves: usize,
    passes: usize,
    captures: Captures,
    hash: u64,
    history: PositionHistory,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(DEFAULT_SIZE, DEFAULT_KOMI)
    }
}

impl Board {
    /// A new `size`x`size` board at move 0 with Black to play.
    pub fn new(size: usize, komi: f32) -> Result<Self, BoardError> {
        if size == 0 || size > MAX_SIZE {
            return Err(BoardError::UnsupportedSize(size));
        }
        if !komi.is_finite() {
            return Err(BoardError::InvalidKomi(komi));
        }
        Ok(Self::empty(size, komi))
    }

    fn empty(size: usize, komi: f32) -> Self {
        Board {
            grid: Grid::new(size),
            groups: GroupArena::new(),
            komi,
            next: Color::Black,
            moves: 0,
            passes: 0,
            captures: Captures::default(),
            hash: 0,
            history: PositionHistory::new(),
        }
    }

    // -- Accessors --

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    pub fn next_to_play(&self) -> Color {
        self.next
    }

    /// Moves played so far, passes included.
    pub fn move_number(&self) -> usize {
        self.moves
    }

    pub fn consecutive_passes(&self) -> usize {
        self.passes
    }

    pub fn captures(&self) -> Captures {
        self.captures
    }

    /// Fingerprint of the current position.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Number of distinct positions reached by successful moves.
    pub fn seen_positions(&self) -> usize {
        self.history.len()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn intersection(&self, x: usize, y: usize) -> Option<&Intersection> {
        self.grid.vertex(x, y).map(|v| self.grid.get(v))
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        self.intersection(x, y).and_then(Intersection::color)
    }

    pub fn turn_played(&self, x: usize, y: usize) -> Option<usize> {
        self.intersection(x, y).and_then(Intersection::turn_played)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id)
    }

    pub fn group_at(&self, x: usize, y: usize) -> Option<&Group> {
        self.intersection(x, y)
            .and_then(Intersection::group)
            .and_then(|id| self.groups.get(id))
    }

    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.groups.iter()
    }

    pub fn point_of(&self, v: Vertex) -> Point {
        self.grid.point(v)
    }

    /// Every point the side to move may legally play.
    pub fn legal_moves(&self) -> Vec<Point> {
        self.grid
            .iter()
            .filter(|i| i.is_empty() && self.evaluate(i.x, i.y).is_ok())
            .map(|i| (i.x, i.y))
            .collect()
    }

    // -- Game actions --

    /// Play at `(x, y)` for the side to move. Returns whether the move was accepted.
    pub fn play(&mut self, x: usize, y: usize) -> bool {
        self.try_play(x, y).is_ok()
    }

    /// Play at `(x, y)` for the side to move.
    ///
    /// On rejection the board is left exactly as it was.
    pub fn try_play(&mut self, x: usize, y: usize) -> Result<MoveOutcome, MoveError> {
        let placement = self.evaluate(x, y).inspect_err(|err| {
            debug!(x, y, color = %self.next, %err, "move rejected");
        })?;
        Ok(self.apply(placement))
    }

    /// Pass. Never touches the grid or the position history.
    pub fn pass(&mut self) {
        trace!(color = %self.next, move_number = self.moves, "pass");
        self.next = self.next.opp();
        self.moves += 1;
        self.passes += 1;
    }

    /// Report what playing at `(x, y)` would do, without playing it.
    pub fn is_valid_move(&self, x: usize, y: usize) -> MoveAnalysis {
        match self.evaluate(x, y) {
            Ok(p) => MoveAnalysis {
                legal: true,
                captures: p.captured_stones,
                self_atari_size: if p.liberties == 1 { p.group_size } else { 0 },
                liberties: p.liberties,
                sensible: self.grid.eye(p.vertex) != Some(p.color),
            },
            Err(_) => MoveAnalysis::illegal(),
        }
    }

    /// Override the side to move, for callers that name the colour of each move.
    pub fn set_next_to_play(&mut self, color: Color) {
        self.next = color;
    }

    /// Seed Black handicap stones on an empty board. White moves next.
    ///
    /// Seeding is not a move: the move counter and position history are untouched.
    pub fn place_handicap(&mut self, points: &[Point]) -> Result<(), BoardError> {
        if self.moves > 0 || !self.groups.is_empty() {
            return Err(BoardError::HandicapAfterStart);
        }
        if points.len() >= self.grid.len() {
            return Err(BoardError::TooManyHandicapStones(points.len()));
        }

        let mut vertices = Vec::with_capacity(points.len());
        for &(x, y) in points {
            let v = self
                .grid
                .vertex(x, y)
                .ok_or(MoveError::OutOfBounds { x, y })?;
            if vertices.contains(&v) {
                return Err(MoveError::Occupied.into());
            }
            vertices.push(v);
        }

        for v in vertices {
            self.occupy(v, Color::Black);
            let friends = self.friendly_neighbors(v, Color::Black);
            self.groups.merge(&mut self.grid, &friends, v, Color::Black);
        }
        self.hash = zobrist_keys().grid_hash(&self.grid);
        if !points.is_empty() {
            self.next = Color::White;
        }
        debug!(stones = points.len(), "handicap placed");
        Ok(())
    }

    // -- Move evaluation --

    /// Decide whether the side to move may play at `(x, y)` and compute the
    /// resulting diff: captures first, then suicide, then superko.
    fn evaluate(&self, x: usize, y: usize) -> Result<Placement, MoveError> {
        let v = self
            .grid
            .vertex(x, y)
            .ok_or(MoveError::OutOfBounds { x, y })?;
        if self.grid.color(v).is_some() {
            return Err(MoveError::Occupied);
        }

        let color = self.next;
        let keys = zobrist_keys();
        let mut hash = self.hash ^ keys.stone(x, y, color);

        let mut friends = Vec::with_capacity(4);
        let mut captured = Vec::with_capacity(4);
        let mut liberties = BTreeSet::new();
        for n in self.grid.neighbors(v) {
            let Some(group) = self.grid.group(n) else {
                liberties.insert(n);
                continue;
            };
            let Some(g) = self.groups.get(group) else {
                continue;
            };
            if g.color() == color {
                if !friends.contains(&group) {
                    friends.push(group);
                }
            } else if g.liberty_count() == 1 && !captured.contains(&group) {
                // Its only liberty is `v`.
                captured.push(group);
            }
        }

        for g in friends.iter().filter_map(|&id| self.groups.get(id)) {
            liberties.extend(g.liberties().iter().copied());
        }
        liberties.remove(&v);

        let mut captured_stones = 0;
        for g in captured.iter().filter_map(|&id| self.groups.get(id)) {
            captured_stones += g.len();
            for &s in g.stones() {
                let (sx, sy) = self.grid.point(s);
                hash ^= keys.stone(sx, sy, g.color());
                let frees_liberty = self.grid.neighbors(s).any(|n| {
                    n == v || self.grid.group(n).is_some_and(|id| friends.contains(&id))
                });
                if frees_liberty {
                    liberties.insert(s);
                }
            }
        }

        if captured.is_empty() && liberties.is_empty() {
            return Err(MoveError::Suicide);
        }
        if self.history.contains(hash) {
            return Err(MoveError::Superko);
        }

        let group_size = 1 + friends
            .iter()
            .filter_map(|&id| self.groups.get(id))
            .map(Group::len)
            .sum::<usize>();

        Ok(Placement {
            vertex: v,
            color,
            friends,
            captured,
            captured_stones,
            group_size,
            liberties: liberties.len(),
            hash,
        })
    }

    /// Commit a placement produced by [`Board::evaluate`] on this exact position.
    fn apply(&mut self, placement: Placement) -> MoveOutcome {
        let Placement {
            vertex: v,
            color,
            friends,
            captured,
            captured_stones,
            hash,
            ..
        } = placement;

        self.occupy(v, color);
        self.grid.stamp(v, self.moves);

        let mut captured_points = Vec::with_capacity(captured_stones);
        for id in captured {
            captured_points.extend(self.remove_group(id));
        }
        let id = self.groups.merge(&mut self.grid, &friends, v, color);

        self.captures.add(color, captured_stones as u32);
        self.hash = hash;
        self.history.record(hash);
        self.moves += 1;
        self.passes = 0;
        self.next = color.opp();

        let point = self.grid.point(v);
        let (group_size, liberties) = self
            .groups
            .get(id)
            .map_or((1, 0), |g| (g.len(), g.liberty_count()));
        trace!(
            ?point,
            %color,
            captured = captured_points.len(),
            liberties,
            "move played"
        );

        MoveOutcome {
            point,
            color,
            captured: captured_points,
            group_size,
            liberties,
            hash,
        }
    }

    /// Put a stone on the grid and take `v` off the liberty sets of its
    /// neighbouring groups. The stone joins a group on the following merge.
    fn occupy(&mut self, v: Vertex, color: Color) {
        self.grid.place(v, color);
        for n in self.grid.neighbors(v) {
            if let Some(g) = self.grid.group(n).and_then(|id| self.groups.get_mut(id)) {
                g.remove_liberty(v);
            }
        }
    }

    fn friendly_neighbors(&self, v: Vertex, color: Color) -> Vec<GroupId> {
        let mut friends = Vec::with_capacity(4);
        for n in self.grid.neighbors(v) {
            if self.grid.color(n) != Some(color) {
                continue;
            }
            if let Some(id) = self.grid.group(n) {
                if !friends.contains(&id) {
                    friends.push(id);
                }
            }
        }
        friends
    }

    /// Take a captured group off the board. Its stones become liberties of
    /// every surviving group they touch.
    fn remove_group(&mut self, id: GroupId) -> Vec<Point> {
        let Some(group) = self.groups.remove(id) else {
            return Vec::new();
        };
        for &s in group.stones() {
            self.grid.clear(s);
        }
        for &s in group.stones() {
            for n in self.grid.neighbors(s) {
                if let Some(g) = self.grid.group(n).and_then(|nid| self.groups.get_mut(nid)) {
                    g.add_liberty(s);
                }
            }
        }
        group.stones().iter().map(|&s| self.grid.point(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Check the group partition, liberty sets and fingerprint against a
    /// from-scratch recomputation.
    fn assert_consistent(board: &Board) {
        let grid = board.grid();
        let mut owned = vec![false; grid.len()];
        for (id, group) in board.groups() {
            assert!(!group.is_empty(), "empty group {id:?}");
            for &s in group.stones() {
                assert!(!owned[s], "stone {:?} in two groups", grid.point(s));
                owned[s] = true;
                assert_eq!(grid.group(s), Some(id));
                assert_eq!(grid.color(s), Some(group.color()));
            }
            let expected: BTreeSet<Vertex> = group
                .stones()
                .iter()
                .flat_map(|&s| grid.neighbors(s))
                .filter(|&n| grid.color(n).is_none())
                .collect();
            assert_eq!(group.liberties(), &expected, "liberties of {id:?}");
        }
        for v in 0..grid.len() {
            assert_eq!(owned[v], grid.color(v).is_some(), "{:?}", grid.point(v));
        }
        assert_eq!(board.hash(), zobrist_keys().grid_hash(grid));
    }

    fn board9() -> Board {
        Board::new(9, 7.5).unwrap()
    }

    #[test]
    fn test_new_board() {
        let board = board9();
        assert_eq!(board.size(), 9);
        assert_eq!(board.komi(), 7.5);
        assert_eq!(board.next_to_play(), Color::Black);
        assert_eq!(board.move_number(), 0);
        assert_eq!(board.captures(), Captures::default());
        assert_eq!(board.hash(), 0);
        assert_eq!(board.seen_positions(), 0);
        assert_eq!(board.groups().count(), 0);
    }

    #[test]
    fn test_default_board() {
        let board = Board::default();
        assert_eq!(board.size(), DEFAULT_SIZE);
        assert_eq!(board.komi(), DEFAULT_KOMI);
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert_eq!(Board::new(0, 7.5).unwrap_err(), BoardError::UnsupportedSize(0));
        assert_eq!(
            Board::new(MAX_SIZE + 1, 7.5).unwrap_err(),
            BoardError::UnsupportedSize(MAX_SIZE + 1)
        );
        assert!(matches!(
            Board::new(9, f32::NAN).unwrap_err(),
            BoardError::InvalidKomi(_)
        ));
        assert!(Board::new(MAX_SIZE, 0.0).is_ok());
    }

    #[test]
    fn test_play_alternates() {
        let mut board = board9();
        assert!(board.play(2, 2));
        assert_eq!(board.color_at(2, 2), Some(Color::Black));
        assert_eq!(board.next_to_play(), Color::White);
        assert!(board.play(6, 6));
        assert_eq!(board.color_at(6, 6), Some(Color::White));
        assert_eq!(board.next_to_play(), Color::Black);
        assert_eq!(board.move_number(), 2);
        assert_eq!(board.seen_positions(), 2);
        assert_consistent(&board);
    }

    #[test]
    fn test_rejects_out_of_bounds_and_occupied() {
        let mut board = board9();
        assert_eq!(
            board.try_play(9, 0),
            Err(MoveError::OutOfBounds { x: 9, y: 0 })
        );
        assert!(board.play(4, 4));
        let hash = board.hash();
        assert_eq!(board.try_play(4, 4), Err(MoveError::Occupied));
        assert_eq!(board.next_to_play(), Color::White);
        assert_eq!(board.hash(), hash);
        assert_eq!(board.move_number(), 1);
    }

    #[test]
    fn test_corner_suicide_leaves_board_unchanged() {
        let mut board = board9();
        assert!(board.play(1, 0));
        assert!(board.play(5, 5));
        assert!(board.play(0, 1));
        let before = board.clone();

        assert_eq!(board.try_play(0, 0), Err(MoveError::Suicide));
        assert_eq!(board.color_at(0, 0), None);
        assert_eq!(board.next_to_play(), Color::White);
        assert_eq!(board.hash(), before.hash());
        assert_eq!(board.move_number(), before.move_number());
        assert_eq!(board.seen_positions(), before.seen_positions());
        assert_consistent(&board);
    }

    #[test]
    fn test_capture_single_stone() {
        let mut board = board9();
        // White stone at (4,4) surrounded by Black.
        for (b, w) in [((3, 4), (4, 4)), ((5, 4), (8, 8)), ((4, 3), (8, 7))] {
            assert!(board.play(b.0, b.1));
            assert!(board.play(w.0, w.1));
        }
        let outcome = board.try_play(4, 5).unwrap();
        assert_eq!(outcome.captured, vec![(4, 4)]);
        assert_eq!(board.color_at(4, 4), None);
        assert_eq!(board.captures().black, 1);
        assert_eq!(board.captures().get(Color::White), 0);
        assert_consistent(&board);
    }

    #[test]
    fn test_capture_restores_liberties_before_suicide_check() {
        let mut board = board9();
        //  . W B
        //  . W B
        //  W B .
        assert!(board.play(2, 0));
        assert!(board.play(1, 0));
        assert!(board.play(2, 1));
        assert!(board.play(1, 1));
        assert!(board.play(1, 2));
        assert!(board.play(0, 2));
        // White (1,0),(1,1) now has liberties (0,0),(0,1).
        assert!(board.play(0, 0));
        assert!(board.play(8, 8));
        // (0,1) has no empty neighbour, but it takes the last liberty of the
        // White pair.
        let outcome = board.try_play(0, 1).unwrap();
        assert_eq!(outcome.captured.len(), 2);
        assert_eq!(board.color_at(1, 0), None);
        assert_eq!(board.color_at(1, 1), None);
        assert_eq!(board.captures().black, 2);
        assert_consistent(&board);
    }

    #[test]
    fn test_ko_and_retake_after_elsewhere() {
        let mut board = board9();
        for (x, y) in [(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (2, 2), (2, 1)] {
            assert!(board.play(x, y));
        }
        // White takes the ko.
        let outcome = board.try_play(1, 1).unwrap();
        assert_eq!(outcome.captured, vec![(2, 1)]);
        // Immediate retake repeats the previous position.
        assert_eq!(board.try_play(2, 1), Err(MoveError::Superko));
        assert_eq!(board.next_to_play(), Color::Black);
        assert!(board.play(8, 8));
        assert!(board.play(8, 0));
        assert!(board.play(2, 1));
        assert_eq!(board.color_at(1, 1), None);
        assert_consistent(&board);
    }

    #[test]
    fn test_is_valid_move_does_not_mutate() {
        let mut board = board9();
        assert!(board.play(4, 4));
        let hash = board.hash();
        let analysis = board.is_valid_move(4, 5);
        assert!(analysis.legal);
        assert!(analysis.sensible);
        assert_eq!(analysis.liberties, 3);
        assert_eq!(board.hash(), hash);
        assert_eq!(board.color_at(4, 5), None);
        assert_eq!(board.next_to_play(), Color::White);
        assert_eq!(board.is_valid_move(4, 4), MoveAnalysis::default());
    }

    #[test]
    fn test_filling_own_eye_is_not_sensible() {
        let mut board = board9();
        assert!(board.play(1, 0));
        assert!(board.play(8, 8));
        assert!(board.play(0, 1));
        assert!(board.play(8, 7));
        let analysis = board.is_valid_move(0, 0);
        assert!(analysis.legal);
        assert!(!analysis.sensible);
    }

    #[test]
    fn test_pass() {
        let mut board = board9();
        board.pass();
        assert_eq!(board.next_to_play(), Color::White);
        assert_eq!(board.move_number(), 1);
        assert_eq!(board.consecutive_passes(), 1);
        assert_eq!(board.seen_positions(), 0);
        board.pass();
        assert_eq!(board.consecutive_passes(), 2);
        assert!(board.play(3, 3));
        assert_eq!(board.consecutive_passes(), 0);
    }

    #[test]
    fn test_turn_played_survives_capture() {
        let mut board = board9();
        assert!(board.play(1, 0));
        assert!(board.play(0, 0));
        assert!(board.play(0, 1));
        assert_eq!(board.color_at(0, 0), None);
        assert_eq!(board.turn_played(0, 0), Some(1));
        assert_eq!(board.turn_played(0, 1), Some(2));
        assert_eq!(board.turn_played(5, 5), None);
    }

    #[test]
    fn test_handicap() {
        let mut board = board9();
        board.place_handicap(&[(2, 2), (6, 6), (2, 3)]).unwrap();
        assert_eq!(board.next_to_play(), Color::White);
        assert_eq!(board.move_number(), 0);
        assert_eq!(board.seen_positions(), 0);
        assert_eq!(board.group_at(2, 2).map(Group::len), Some(2));
        assert_consistent(&board);

        assert_eq!(
            board.place_handicap(&[(4, 4)]),
            Err(BoardError::HandicapAfterStart)
        );
    }

    #[test]
    fn test_handicap_rejects_bad_points() {
        let mut board = board9();
        assert_eq!(
            board.place_handicap(&[(2, 2), (2, 2)]),
            Err(BoardError::InvalidHandicapPoint(MoveError::Occupied))
        );
        assert_eq!(
            board.place_handicap(&[(9, 9)]),
            Err(BoardError::InvalidHandicapPoint(MoveError::OutOfBounds { x: 9, y: 9 }))
        );
        let mut tiny = Board::new(1, 0.0).unwrap();
        assert_eq!(
            tiny.place_handicap(&[(0, 0)]),
            Err(BoardError::TooManyHandicapStones(1))
        );
        assert_eq!(board.groups().count(), 0);
        assert_eq!(board.next_to_play(), Color::Black);
    }

    #[test]
    fn test_set_next_to_play() {
        let mut board = board9();
        board.set_next_to_play(Color::White);
        assert!(board.play(3, 3));
        assert_eq!(board.color_at(3, 3), Some(Color::White));
        assert_eq!(board.next_to_play(), Color::Black);
    }

    #[test]
    fn test_legal_moves_excludes_suicide() {
        let mut board = Board::new(3, 0.0).unwrap();
        assert!(board.play(1, 0));
        assert!(board.play(2, 2));
        assert!(board.play(0, 1));
        let moves = board.legal_moves();
        assert!(!moves.contains(&(0, 0)));
        assert!(!moves.contains(&(1, 0)));
        assert!(moves.contains(&(1, 1)));
    }
}
