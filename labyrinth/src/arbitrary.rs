use quickcheck::{Arbitrary, Gen};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    insertion_points, Board, Direction, Object, Position, Rotation, Shape, Tile, ALL_OBJECTS,
    BOARD_SIZE,
};

impl Arbitrary for Position {
    fn arbitrary(g: &mut Gen) -> Self {
        let row = u8::arbitrary(g) % BOARD_SIZE;
        let column = u8::arbitrary(g) % BOARD_SIZE;
        Position::new_unchecked(row, column)
    }
}

impl Arbitrary for Direction {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Direction::ALL).unwrap()
    }
}

impl Arbitrary for Rotation {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Rotation::ALL).unwrap()
    }
}

impl Arbitrary for Shape {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Shape::Straight, Shape::Corner, Shape::TJunction])
            .unwrap()
    }
}

impl Arbitrary for Object {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&ALL_OBJECTS).unwrap()
    }
}

impl Arbitrary for Tile {
    fn arbitrary(g: &mut Gen) -> Self {
        let tile = Tile::new(Shape::arbitrary(g), Rotation::arbitrary(g), bool::arbitrary(g));
        match Option::<Object>::arbitrary(g) {
            Some(object) => tile.with_objective(object),
            None => tile,
        }
    }
}

/// A freshly dealt board, and a series of insertions to play on it.
#[derive(Clone, Debug)]
pub struct InsertionSequence {
    pub seed: u64,
    /// Index into the insertion points, and how often to rotate the spare first
    pub insertions: Vec<(u8, u8)>,
}

impl InsertionSequence {
    pub fn board(&self) -> Board {
        Board::new(&mut StdRng::seed_from_u64(self.seed))
    }

    /// Plays the insertions. The ones that hit the blocked insertion point are skipped.
    pub fn play(&self) -> Board {
        let points: Vec<Position> = insertion_points().collect();
        let mut board = self.board();
        for &(point_idx, rotations) in &self.insertions {
            for _ in 0..rotations % 4 {
                board.rotate_spare().unwrap();
            }
            let point = points[usize::from(point_idx) % points.len()];
            let _ = board.insert_spare(point);
        }
        board
    }
}

impl Arbitrary for InsertionSequence {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            seed: u64::arbitrary(g),
            insertions: Vec::arbitrary(g),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let seed = self.seed;
        Box::new(
            self.insertions
                .shrink()
                .map(move |insertions| InsertionSequence { seed, insertions }),
        )
    }
}

/// Builds a board from one string of box-drawing characters per row.
///
/// The tiles on fixed positions are made fixed, all others are movable.
pub fn board_from_rows(rows: [&str; 7], spare: &str) -> Board {
    let mut tiles = [[Tile::movable(Shape::Straight); 7]; 7];
    for (row, line) in (0u8..).zip(rows) {
        let chars: Vec<char> = line.chars().collect();
        assert_eq!(chars.len(), 7, "Row {} must have 7 tiles", row);
        for (column, c) in (0u8..).zip(chars) {
            let tile: Tile = c.to_string().parse().unwrap();
            let tile = if Position::new_unchecked(row, column).is_fixed() {
                Tile::fixed(tile.shape(), tile.rotation())
            } else {
                tile
            };
            tiles[usize::from(row)][usize::from(column)] = tile;
        }
    }
    Board::from_tiles(tiles, spare.parse().unwrap()).unwrap()
}
