use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{InvalidOperation, Object};

/// One of the four absolute directions on the board.
///
/// "Up" is towards row 0, "Left" towards column 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// In clockwise order, starting with [`Direction::Up`].
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(self) -> Direction {
        Direction::ALL[(self as usize + 2) % 4]
    }

    /// The direction after turning clockwise by 90° `quarter_turns` times.
    pub fn rotated_clockwise(self, quarter_turns: u8) -> Direction {
        Direction::ALL[(self as usize + usize::from(quarter_turns)) % 4]
    }

    /// `(row, column)` delta of one step in this direction.
    pub(crate) fn offset(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// The set of directions a tile opens to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Openings {
    // One bit per direction, in the order of `Direction::ALL`
    bits: u8,
}

impl Openings {
    pub fn contains(self, direction: Direction) -> bool {
        self.bits & (1 << direction as u8) != 0
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }

    #[must_use]
    fn rotated_clockwise(self, quarter_turns: u8) -> Self {
        let n = quarter_turns % 4;
        Self {
            bits: ((self.bits << n) | (self.bits >> (4 - n))) & 0b1111,
        }
    }
}

impl FromIterator<Direction> for Openings {
    fn from_iter<T: IntoIterator<Item = Direction>>(iter: T) -> Self {
        let mut bits = 0;
        for direction in iter {
            bits |= 1 << direction as u8;
        }
        Self { bits }
    }
}

/// The path pattern printed on a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Two openings on opposite sides, `│`.
    Straight,
    /// Two openings on adjacent sides, `└`.
    Corner,
    /// Three openings, `┬`.
    TJunction,
}

impl Shape {
    /// The openings without any rotation applied.
    pub fn openings(self) -> Openings {
        use Direction::*;
        match self {
            Shape::Straight => Openings::from_iter([Up, Down]),
            Shape::Corner => Openings::from_iter([Up, Right]),
            Shape::TJunction => Openings::from_iter([Right, Down, Left]),
        }
    }
}

/// A clockwise rotation in steps of 90°.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    #[serde(rename = "0")]
    Deg0,
    #[serde(rename = "90")]
    Deg90,
    #[serde(rename = "180")]
    Deg180,
    #[serde(rename = "270")]
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub fn quarter_turns(self) -> u8 {
        self as u8
    }

    /// This rotation plus another 90°.
    pub fn next(self) -> Rotation {
        Rotation::ALL[(self as usize + 1) % 4]
    }
}

/// A single maze tile.
///
/// Fixed tiles are glued to the board: they can neither rotate nor be pushed
/// around. Their rotation is set once, on construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    shape: Shape,
    rotation: Rotation,
    movable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    objective: Option<Object>,
}

impl Tile {
    pub fn new(shape: Shape, rotation: Rotation, movable: bool) -> Self {
        Self {
            shape,
            rotation,
            movable,
            objective: None,
        }
    }

    pub fn fixed(shape: Shape, rotation: Rotation) -> Self {
        Self::new(shape, rotation, false)
    }

    pub fn movable(shape: Shape) -> Self {
        Self::new(shape, Rotation::Deg0, true)
    }

    /// Marks the tile with an objective.
    #[must_use]
    pub fn with_objective(self, object: Object) -> Self {
        Self {
            objective: Some(object),
            ..self
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn is_movable(&self) -> bool {
        self.movable
    }

    pub fn objective(&self) -> Option<Object> {
        self.objective
    }

    pub fn is_straight(&self) -> bool {
        self.shape == Shape::Straight
    }

    pub fn is_corner(&self) -> bool {
        self.shape == Shape::Corner
    }

    pub fn is_t_junction(&self) -> bool {
        self.shape == Shape::TJunction
    }

    /// The absolute directions this tile opens to, rotation included.
    pub fn openings(&self) -> Openings {
        self.shape
            .openings()
            .rotated_clockwise(self.rotation.quarter_turns())
    }

    /// Does the path on this tile lead out in the given direction?
    pub fn is_going(&self, direction: Direction) -> bool {
        self.openings().contains(direction)
    }

    /// Turns this tile by 90° clockwise.
    pub fn rotate(&mut self) -> Result<(), InvalidOperation> {
        if !self.movable {
            return Err(InvalidOperation::RotateFixedTile);
        }
        self.rotation = self.rotation.next();
        Ok(())
    }

    /// Render the paths of this tile as a box-drawing character.
    pub fn box_char(&self) -> char {
        let openings = self.openings();
        let going = |d| openings.contains(d);
        use Direction::*;
        match (going(Up), going(Right), going(Down), going(Left)) {
            (true, false, true, false) => '│',
            (false, true, false, true) => '─',
            (true, true, false, false) => '└',
            (false, true, true, false) => '┌',
            (false, false, true, true) => '┐',
            (true, false, false, true) => '┘',
            (false, true, true, true) => '┬',
            (true, false, true, true) => '┤',
            (true, true, false, true) => '┴',
            (true, true, true, false) => '├',
            // Every shape has two or three openings
            _ => unreachable!("tile with openings {:?}", openings),
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.box_char())
    }
}

/// The error type for the [`FromStr`] instance of [`Tile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileFromStrErr {
    Empty,
    MoreThanOneChar,
    UnknownChar(char),
}

impl std::error::Error for TileFromStrErr {}

impl std::fmt::Display for TileFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileFromStrErr::Empty => write!(f, "Expected a tile character, got nothing"),
            TileFromStrErr::MoreThanOneChar => write!(f, "Expected a single tile character"),
            TileFromStrErr::UnknownChar(c) => write!(f, "'{}' is not a tile character", c),
        }
    }
}

/// Parses a movable tile without objective from its box-drawing character.
impl FromStr for Tile {
    type Err = TileFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let c = chars.next().ok_or(TileFromStrErr::Empty)?;
        if chars.next().is_some() {
            return Err(TileFromStrErr::MoreThanOneChar);
        }
        for shape in [Shape::Straight, Shape::Corner, Shape::TJunction] {
            for rotation in Rotation::ALL {
                let tile = Tile::new(shape, rotation, true);
                if tile.box_char() == c {
                    return Ok(tile);
                }
            }
        }
        Err(TileFromStrErr::UnknownChar(c))
    }
}

/// Shorthand for creating a movable tile from its box-drawing character.
///
/// This macro is just calling the [`FromStr`] instance of [`Tile`].
/// ```
/// # use labyrinth::{tile, Direction, Rotation, Shape, Tile};
/// let t = tile!("┐");
/// assert_eq!(t, Tile::new(Shape::Corner, Rotation::Deg180, true));
/// assert!(t.is_going(Direction::Left) && t.is_going(Direction::Down));
/// ```
#[macro_export]
macro_rules! tile {
    ($c:literal) => {
        <$crate::Tile as std::str::FromStr>::from_str($c)
            .expect("Invalid tile character given to tile! macro")
    };
}
#[allow(unused_imports)]
pub(crate) use tile;
