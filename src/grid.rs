//! Board geometry: colours, coordinates and the intersection grid.
//!
//! Intersections are stored in a flat vector indexed by `x + y * size`.
//! Every cell is allocated once when the grid is built and lives as long
//! as the board; only its colour, group index and turn stamp change.

use std::fmt;

use crate::group::GroupId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opp(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// `(x, y)`: column then row, both starting at 0.
pub type Point = (usize, usize);

/// Flat index of an intersection: `x + y * size`.
pub type Vertex = usize;

/// One cell of the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Intersection {
    pub x: usize,
    pub y: usize,
    color: Option<Color>,
    group: Option<GroupId>,
    turn_played: Option<usize>,
}

impl Intersection {
    fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            color: None,
            group: None,
            turn_played: None,
        }
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none()
    }

    /// Index of the owning group; `None` while the point is empty.
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// Move number at which a stone was last played here.
    pub fn turn_played(&self) -> Option<usize> {
        self.turn_played
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<Intersection>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        let cells = (0..size * size)
            .map(|v| Intersection::new(v % size, v / size))
            .collect();
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// Flat index of `(x, y)`, or `None` when off the board.
    pub fn vertex(&self, x: usize, y: usize) -> Option<Vertex> {
        self.contains(x, y).then(|| y * self.size + x)
    }

    pub fn point(&self, v: Vertex) -> Point {
        (v % self.size, v / self.size)
    }

    pub fn get(&self, v: Vertex) -> &Intersection {
        &self.cells[v]
    }

    pub fn color(&self, v: Vertex) -> Option<Color> {
        self.cells[v].color
    }

    pub fn group(&self, v: Vertex) -> Option<GroupId> {
        self.cells[v].group
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intersection> {
        self.cells.iter()
    }

    /// The 4 orthogonal neighbours that are on the board.
    pub fn neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + use<> {
        let s = self.size;
        let (x, y) = (v % s, v / s);
        [
            (x > 0).then(|| v - 1),
            (x + 1 < s).then(|| v + 1),
            (y > 0).then(|| v - s),
            (y + 1 < s).then(|| v + s),
        ]
        .into_iter()
        .flatten()
    }

    fn at_edge(&self, v: Vertex) -> bool {
        let s = self.size;
        let (x, y) = (v % s, v / s);
        x == 0 || y == 0 || x + 1 == s || y + 1 == s
    }

    fn diagonals(&self, v: Vertex) -> impl Iterator<Item = Vertex> + use<> {
        let s = self.size;
        let (x, y) = (v % s, v / s);
        let left = x > 0;
        let right = x + 1 < s;
        let up = y > 0;
        let down = y + 1 < s;
        [
            (left && up).then(|| v - s - 1),
            (right && up).then(|| v - s + 1),
            (left && down).then(|| v + s - 1),
            (right && down).then(|| v + s + 1),
        ]
        .into_iter()
        .flatten()
    }

    /// Colour of the stones surrounding an empty point, if all of its
    /// on-board neighbours share one colour. May be a false eye.
    pub fn eyeish(&self, v: Vertex) -> Option<Color> {
        let mut eyecolor = None;
        for n in self.neighbors(v) {
            let c = self.color(n)?;
            match eyecolor {
                None => eyecolor = Some(c),
                Some(e) if e != c => return None,
                Some(_) => {}
            }
        }
        eyecolor
    }

    /// Colour of a true eye at `v`.
    ///
    /// A true eye is eyeish and has at most one opposing stone on its
    /// diagonals when it touches the edge, none otherwise.
    pub fn eye(&self, v: Vertex) -> Option<Color> {
        let eyecolor = self.eyeish(v)?;
        let false_count = self
            .diagonals(v)
            .filter(|&d| self.color(d) == Some(eyecolor.opp()))
            .count();
        let tolerance = if self.at_edge(v) { 1 } else { 0 };
        (false_count <= tolerance).then_some(eyecolor)
    }

    pub(crate) fn place(&mut self, v: Vertex, color: Color) {
        self.cells[v].color = Some(color);
    }

    pub(crate) fn stamp(&mut self, v: Vertex, turn: usize) {
        self.cells[v].turn_played = Some(turn);
    }

    pub(crate) fn set_group(&mut self, v: Vertex, group: GroupId) {
        self.cells[v].group = Some(group);
    }

    pub(crate) fn clear(&mut self, v: Vertex) {
        let cell = &mut self.cells[v];
        cell.color = None;
        cell.group = None;
    }
}
