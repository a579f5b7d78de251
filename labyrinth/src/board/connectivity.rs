use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::{cell, Board, Grid};
use crate::{Direction, Position, PositionSet};

impl Board {
    /// Are these two cells directly linked?
    ///
    /// That is the case when they are grid neighbours, and each tile has an
    /// opening towards the other one.
    pub fn are_adjacent(&self, source: Position, dest: Position) -> bool {
        are_adjacent(&self.tiles, source, dest)
    }

    /// Can a piece walk from `source` to `dest`? Every cell is connected to itself.
    pub fn exist_path_between(&self, source: Position, dest: Position) -> bool {
        source == dest || self.reachable_from(source).contains(dest)
    }

    /// All cells a piece on `start` can walk to, including `start`.
    ///
    /// Breadth-first search over the adjacency mapping.
    pub fn reachable_from(&self, start: Position) -> PositionSet {
        let mut reached = PositionSet::new().insert(start);
        let mut queue = VecDeque::from([start]);
        while let Some(position) = queue.pop_front() {
            for &next in self.adjacency.get(&position).into_iter().flatten() {
                if !reached.contains(next) {
                    reached = reached.insert(next);
                    queue.push_back(next);
                }
            }
        }
        reached
    }
}

pub(super) fn are_adjacent(tiles: &Grid, source: Position, dest: Position) -> bool {
    match source.direction_to(dest) {
        Some(direction) => {
            cell(tiles, source).is_going(direction)
                && cell(tiles, dest).is_going(direction.opposite())
        }
        None => false,
    }
}

/// Builds the adjacency mapping of the whole grid from scratch.
///
/// Every position gets an entry, possibly an empty one.
pub(super) fn compute_adjacency(tiles: &Grid) -> BTreeMap<Position, BTreeSet<Position>> {
    Position::all()
        .map(|position| {
            let linked = Direction::ALL
                .into_iter()
                .filter_map(|direction| position.neighbour(direction))
                .filter(|&neighbour| are_adjacent(tiles, position, neighbour))
                .collect();
            (position, linked)
        })
        .collect()
}
