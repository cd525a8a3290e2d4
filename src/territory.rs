//! Area scoring.
//!
//! Empty intersections are split into maximal orthogonally connected regions
//! with an explicit stack. A region touching stones of only one colour belongs
//! to that colour; a region touching both, or none, is neutral. Scoring reads
//! the board and never changes it.

use crate::board::Board;
use crate::grid::{Color, Grid, Point};

/// A connected region of empty intersections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Territory {
    owner: Option<Color>,
    points: Vec<Point>,
}

impl Territory {
    /// The colour that alone surrounds the region; `None` for dame.
    pub fn owner(&self) -> Option<Color> {
        self.owner
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Every empty region on a board, with a region label per intersection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerritoryMap {
    size: usize,
    regions: Vec<Territory>,
    labels: Vec<Option<usize>>,
}

impl TerritoryMap {
    /// Label all empty regions of `grid`.
    pub fn compute(grid: &Grid) -> Self {
        let mut labels: Vec<Option<usize>> = vec![None; grid.len()];
        let mut regions = Vec::new();

        for start in 0..grid.len() {
            if grid.color(start).is_some() || labels[start].is_some() {
                continue;
            }
            let label = regions.len();
            let mut points = Vec::new();
            let (mut black, mut white) = (false, false);
            let mut stack = vec![start];
            labels[start] = Some(label);

            while let Some(v) = stack.pop() {
                points.push(grid.point(v));
                for n in grid.neighbors(v) {
                    match grid.color(n) {
                        Some(Color::Black) => black = true,
                        Some(Color::White) => white = true,
                        None if labels[n].is_none() => {
                            labels[n] = Some(label);
                            stack.push(n);
                        }
                        None => {}
                    }
                }
            }

            let owner = match (black, white) {
                (true, false) => Some(Color::Black),
                (false, true) => Some(Color::White),
                _ => None,
            };
            regions.push(Territory { owner, points });
        }

        Self {
            size: grid.size(),
            regions,
            labels,
        }
    }

    pub fn regions(&self) -> &[Territory] {
        &self.regions
    }

    /// The region containing `(x, y)`, if that point is empty.
    pub fn territory_at(&self, x: usize, y: usize) -> Option<&Territory> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.labels[y * self.size + x].map(|label| &self.regions[label])
    }

    pub fn owner_at(&self, x: usize, y: usize) -> Option<Color> {
        self.territory_at(x, y).and_then(Territory::owner)
    }

    /// Intersections of territory owned by `color`.
    pub fn area(&self, color: Color) -> usize {
        self.regions
            .iter()
            .filter(|t| t.owner == Some(color))
            .map(Territory::len)
            .sum()
    }
}

/// Final score of both sides, komi included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub black: f32,
    pub white: f32,
}

impl Score {
    pub fn get(&self, color: Color) -> f32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// Black's lead; negative when White is ahead.
    pub fn margin(&self) -> f32 {
        self.black - self.white
    }

    /// The side with the strictly higher score; `None` on a tie.
    pub fn winner(&self) -> Option<Color> {
        if self.black > self.white {
            Some(Color::Black)
        } else if self.white > self.black {
            Some(Color::White)
        } else {
            None
        }
    }
}

impl Board {
    pub fn territory(&self) -> TerritoryMap {
        TerritoryMap::compute(self.grid())
    }

    /// Area score: stones on the board, plus surrounded territory, plus
    /// stones captured over the game. White also receives komi.
    pub fn score(&self) -> Score {
        let territory = self.territory();
        let mut stones = [0usize; 2];
        for color in self.grid().iter().filter_map(|i| i.color()) {
            stones[color.index()] += 1;
        }
        let total = |color: Color| {
            (stones[color.index()] + territory.area(color)) as f32
                + self.captures().get(color) as f32
        };
        Score {
            black: total(Color::Black),
            white: total(Color::White) + self.komi(),
        }
    }

    pub fn winner(&self) -> Option<Color> {
        self.score().winner()
    }
}
