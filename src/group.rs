//! Connected groups of same-coloured stones and their liberties.
//!
//! Groups live in an index arena. Each occupied intersection stores the
//! [`GroupId`] of its group; removing a group frees its slot for reuse, so
//! an id is only meaningful while the stones that carry it are on the board.

use std::collections::BTreeSet;

use crate::grid::{Color, Grid, Vertex};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

/// A maximal set of orthogonally connected stones of one colour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    color: Color,
    stones: Vec<Vertex>,
    liberties: BTreeSet<Vertex>,
}

impl Group {
    fn new(color: Color) -> Self {
        Self {
            color,
            stones: Vec::new(),
            liberties: BTreeSet::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn stones(&self) -> &[Vertex] {
        &self.stones
    }

    pub fn liberties(&self) -> &BTreeSet<Vertex> {
        &self.liberties
    }

    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    pub fn liberty_count(&self) -> usize {
        self.liberties.len()
    }

    /// Extend the group by one stone, folding its empty neighbours into the
    /// liberty set. The stone must already be on the grid.
    pub(crate) fn add_intersection(&mut self, v: Vertex, color: Color, grid: &Grid) {
        self.color = color;
        self.stones.push(v);
        self.liberties.remove(&v);
        self.liberties
            .extend(grid.neighbors(v).filter(|&n| grid.color(n).is_none()));
    }

    /// Rebuild the liberty set by scanning the neighbours of every member.
    fn recompute_liberties(&mut self, grid: &Grid) {
        self.liberties = self
            .stones
            .iter()
            .flat_map(|&s| grid.neighbors(s))
            .filter(|&n| grid.color(n).is_none())
            .collect();
    }

    pub(crate) fn add_liberty(&mut self, v: Vertex) {
        self.liberties.insert(v);
    }

    pub(crate) fn remove_liberty(&mut self, v: Vertex) {
        self.liberties.remove(&v);
    }
}

/// Slot storage for the live groups on a board.
#[derive(Clone, Debug, Default)]
pub struct GroupArena {
    slots: Vec<Option<Group>>,
    free: Vec<usize>,
}

impl GroupArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Number of live groups.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, g)| g.as_ref().map(|g| (GroupId(i), g)))
    }

    fn insert(&mut self, group: Group) -> GroupId {
        match self.free.pop() {
            Some(i) => {
                self.slots[i] = Some(group);
                GroupId(i)
            }
            None => {
                self.slots.push(Some(group));
                GroupId(self.slots.len() - 1)
            }
        }
    }

    pub(crate) fn remove(&mut self, id: GroupId) -> Option<Group> {
        let group = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        Some(group)
    }

    /// Join `ids` and the newly placed stone at `v` into one group.
    ///
    /// The inputs are dropped from the arena and replaced by the result; the
    /// grid's group indices are rewritten for every member. With no inputs the
    /// result is a fresh singleton. The stone at `v` must already be on the grid.
    pub(crate) fn merge(
        &mut self,
        grid: &mut Grid,
        ids: &[GroupId],
        v: Vertex,
        color: Color,
    ) -> GroupId {
        let mut merged = Group::new(color);
        for &id in ids {
            if let Some(old) = self.remove(id) {
                merged.stones.extend(old.stones);
            }
        }
        merged.recompute_liberties(grid);
        merged.add_intersection(v, color, grid);

        let id = self.insert(merged);
        if let Some(group) = self.get(id) {
            for &s in &group.stones {
                grid.set_group(s, id);
            }
        }
        id
    }
}
