use serde::{Deserialize, Serialize};

use super::SIZE;
use crate::{Direction, Position, Tile, BOARD_SIZE};

/// The edge of the maze a tile is pushed in from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// The side a tile enters from when pushed in at `position`.
    ///
    /// `None` unless `position` is an insertion point: an edge cell that is not
    /// a corner, at the end of a movable (odd) row or column.
    pub fn of_insertion_point(position: Position) -> Option<Side> {
        if position.is_corner() {
            return None;
        }
        let last = BOARD_SIZE - 1;
        let (row, column) = (position.row(), position.column());
        let (side, line_idx) = if row == 0 {
            (Side::Top, column)
        } else if row == last {
            (Side::Bottom, column)
        } else if column == 0 {
            (Side::Left, row)
        } else if column == last {
            (Side::Right, row)
        } else {
            return None;
        };
        (line_idx % 2 == 1).then_some(side)
    }

    /// The direction in which the tiles of the line move.
    pub fn push_direction(self) -> Direction {
        match self {
            Side::Top => Direction::Down,
            Side::Right => Direction::Left,
            Side::Bottom => Direction::Up,
            Side::Left => Direction::Right,
        }
    }
}

/// All 12 insertion points, whether blocked or not.
pub fn insertion_points() -> impl Iterator<Item = Position> {
    Position::all().filter(|&position| Side::of_insertion_point(position).is_some())
}

/// The insertion point at the other end of the same row or column.
///
/// Pushing a tile in there right after an insertion at `position` would
/// just push the same tile back out.
pub fn opposite_insertion_point(position: Position) -> Option<Position> {
    let side = Side::of_insertion_point(position)?;
    Some(line_from(position, side)[SIZE - 1])
}

// The cells of the line that is shifted when inserting at `entry`, starting
// with `entry` and ordered in the push direction.
pub(super) fn line_from(entry: Position, side: Side) -> [Position; SIZE] {
    let last = BOARD_SIZE - 1;
    let (row, column) = (entry.row(), entry.column());
    let mut line = [entry; SIZE];
    for (step, cell) in (0u8..).zip(line.iter_mut()) {
        let (r, c) = match side {
            Side::Top => (step, column),
            Side::Bottom => (last - step, column),
            Side::Left => (row, step),
            Side::Right => (row, last - step),
        };
        *cell = Position::new_unchecked(r, c);
    }
    line
}

/// How an insertion moved the cells of one row or column.
///
/// Every cell of the line moved one step in the push direction. The cell
/// that fell off the far end re-enters at the entry point, so anything
/// standing on it lands on the newly inserted tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Displacement {
    side: Side,
    /// Starts at the entry point, in push direction
    line: [Position; SIZE],
    ejected: Tile,
}

impl Displacement {
    pub(super) fn new(side: Side, line: [Position; SIZE], ejected: Tile) -> Self {
        Self {
            side,
            line,
            ejected,
        }
    }

    /// The tile that was pushed out.
    pub fn ejected(&self) -> Tile {
        self.ejected
    }

    /// Where the tile was pushed in.
    pub fn entry(&self) -> Position {
        self.line[0]
    }

    /// Where the ejected tile used to be.
    pub fn exit(&self) -> Position {
        self.line[SIZE - 1]
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// The direction in which the line moved.
    pub fn direction(&self) -> Direction {
        self.side.push_direction()
    }

    /// The new position of whatever stood on `position` before the insertion.
    pub fn apply(&self, position: Position) -> Position {
        match self.line.iter().position(|&p| p == position) {
            Some(idx) => self.line[(idx + 1) % SIZE],
            None => position,
        }
    }

    /// `(old, new)` for every cell of the shifted line.
    pub fn moves(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        (0..SIZE).map(move |idx| (self.line[idx], self.line[(idx + 1) % SIZE]))
    }
}
