use serde::{Deserialize, Serialize};

use crate::{Direction, InvalidArgument};

/// The maze has this many rows, and this many columns.
pub const BOARD_SIZE: u8 = 7;

/// Whether the tile at this position is glued to the board.
///
/// These are the 16 positions with an even row and an even column. Their
/// tiles never rotate and never move, which also means that only the odd
/// rows and columns can be shifted.
pub fn is_fixed_position(position: Position) -> bool {
    position.row % 2 == 0 && position.column % 2 == 0
}

/// A cell of the maze.
///
/// A `Position` is always inside the board, the only way to get one is through
/// the bounds-checking [`Position::new()`] (or deserialization, which goes
/// through the same check).
///
/// Positions are ordered by row first, then column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Position {
    row: u8,
    column: u8,
}

impl Position {
    pub fn new(row: u8, column: u8) -> Result<Self, InvalidArgument> {
        if row < BOARD_SIZE && column < BOARD_SIZE {
            Ok(Self { row, column })
        } else {
            Err(InvalidArgument::OutOfBounds { row, column })
        }
    }

    // Only for coordinates that are known to be in bounds
    pub(crate) const fn new_unchecked(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn column(self) -> u8 {
        self.column
    }

    /// All 49 positions, in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |column| Position { row, column }))
    }

    /// Row-major index in `0..49`.
    pub fn to_index(self) -> u8 {
        self.row * BOARD_SIZE + self.column
    }

    pub(crate) fn from_index(index: u8) -> Self {
        debug_assert!(index < BOARD_SIZE * BOARD_SIZE);
        Self {
            row: index / BOARD_SIZE,
            column: index % BOARD_SIZE,
        }
    }

    pub fn is_fixed(self) -> bool {
        is_fixed_position(self)
    }

    pub fn is_on_edge(self) -> bool {
        self.row == 0
            || self.row == BOARD_SIZE - 1
            || self.column == 0
            || self.column == BOARD_SIZE - 1
    }

    pub fn is_corner(self) -> bool {
        (self.row == 0 || self.row == BOARD_SIZE - 1)
            && (self.column == 0 || self.column == BOARD_SIZE - 1)
    }

    /// The next cell in the given direction, or `None` when that would leave the board.
    pub fn neighbour(self, direction: Direction) -> Option<Position> {
        let (d_row, d_column) = direction.offset();
        let row = self.row.checked_add_signed(d_row)?;
        let column = self.column.checked_add_signed(d_column)?;
        (row < BOARD_SIZE && column < BOARD_SIZE).then_some(Position { row, column })
    }

    /// If `other` is a direct grid neighbour, the direction in which it lies.
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.neighbour(direction) == Some(other))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl TryFrom<(u8, u8)> for Position {
    type Error = InvalidArgument;

    fn try_from((row, column): (u8, u8)) -> Result<Self, Self::Error> {
        Position::new(row, column)
    }
}

impl From<Position> for (u8, u8) {
    fn from(position: Position) -> Self {
        (position.row, position.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds() {
        assert!(Position::new(6, 6).is_ok());
        assert_eq!(
            Position::new(7, 12),
            Err(InvalidArgument::OutOfBounds { row: 7, column: 12 })
        );
        assert!(Position::new(0, 7).is_err());
    }

    #[test]
    fn sixteen_fixed_positions() {
        let fixed: Vec<Position> = Position::all().filter(|p| p.is_fixed()).collect();
        assert_eq!(fixed.len(), 16);
        assert!(fixed.contains(&Position::new(0, 0).unwrap()));
        assert!(fixed.contains(&Position::new(4, 2).unwrap()));
        assert!(!Position::new(4, 5).unwrap().is_fixed());
    }

    #[test]
    fn ordering_is_row_major() {
        let positions: Vec<Position> = Position::all().collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
        assert!(Position::new(0, 6).unwrap() < Position::new(1, 0).unwrap());
        for (idx, p) in positions.into_iter().enumerate() {
            assert_eq!(usize::from(p.to_index()), idx);
            assert_eq!(Position::from_index(p.to_index()), p);
        }
    }

    #[test]
    fn neighbours_stay_on_the_board() {
        let corner = Position::new(0, 0).unwrap();
        assert_eq!(corner.neighbour(Direction::Up), None);
        assert_eq!(corner.neighbour(Direction::Left), None);
        assert_eq!(corner.neighbour(Direction::Right), Position::new(0, 1).ok());
        assert_eq!(corner.neighbour(Direction::Down), Position::new(1, 0).ok());
        let far = Position::new(6, 6).unwrap();
        assert_eq!(far.neighbour(Direction::Down), None);
        assert_eq!(far.neighbour(Direction::Right), None);
        assert_eq!(
            corner.direction_to(Position::new(1, 0).unwrap()),
            Some(Direction::Down)
        );
        assert_eq!(corner.direction_to(Position::new(1, 1).unwrap()), None);
        assert_eq!(corner.direction_to(corner), None);
    }

    #[test]
    fn edges_and_corners() {
        assert!(Position::new(0, 3).unwrap().is_on_edge());
        assert!(!Position::new(0, 3).unwrap().is_corner());
        assert!(Position::new(6, 0).unwrap().is_corner());
        assert!(!Position::new(3, 3).unwrap().is_on_edge());
    }

    #[test]
    fn deserialization_checks_bounds() {
        let p: Position = serde_json::from_str("[2, 5]").unwrap();
        assert_eq!(p, Position::new(2, 5).unwrap());
        assert!(serde_json::from_str::<Position>("[9, 0]").is_err());
    }
}
