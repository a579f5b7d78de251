use rand::seq::SliceRandom;
use rand::Rng;

use super::{cell_mut, Board, Grid, SIZE};
use crate::{Object, Position, Rotation, Shape, Tile, ALL_OBJECTS};

/// How many objectives are printed on the fixed tiles. The rest go onto movable tiles.
const NUM_FIXED_OBJECTIVES: usize = 12;

/// The movable tiles of the game: shape, how many there are, and how many
/// of those carry an objective.
const MOVABLE_TILES: [(Shape, usize, usize); 3] = [
    (Shape::Straight, 12, 0),
    (Shape::Corner, 16, 6),
    (Shape::TJunction, 6, 6),
];

impl Board {
    /// Deals a new maze.
    ///
    /// The 16 fixed tiles are always the same: four corners, each opening
    /// towards the inside, and twelve T-junctions. The 34 movable tiles are
    /// shuffled and randomly rotated; 33 of them fill the remaining cells and
    /// the last one becomes the spare.
    ///
    /// Each of the 24 objects is printed on exactly one tile: one on every
    /// fixed T-junction, and the rest on randomly picked movable corners and
    /// T-junctions.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut objects: Vec<Object> = ALL_OBJECTS.to_vec();
        objects.shuffle(rng);
        let mut objects = objects.into_iter();

        // Start from an arbitrary movable tile, every cell is overwritten below
        let mut tiles: Grid = [[Tile::movable(Shape::Straight); SIZE]; SIZE];
        for position in Position::all().filter(|p| p.is_fixed()) {
            let mut tile = fixed_tile(position);
            if tile.is_t_junction() {
                if let Some(object) = objects.next() {
                    tile = tile.with_objective(object);
                }
            }
            *cell_mut(&mut tiles, position) = tile;
        }
        debug_assert_eq!(objects.len(), ALL_OBJECTS.len() - NUM_FIXED_OBJECTIVES);

        let mut movable = Vec::with_capacity(34);
        for (shape, count, with_objective) in MOVABLE_TILES {
            for idx in 0..count {
                let rotation = Rotation::ALL[rng.gen_range(0..4)];
                let mut tile = Tile::new(shape, rotation, true);
                if idx < with_objective {
                    if let Some(object) = objects.next() {
                        tile = tile.with_objective(object);
                    }
                }
                movable.push(tile);
            }
        }
        movable.shuffle(rng);

        let mut movable = movable.into_iter();
        for position in Position::all().filter(|p| !p.is_fixed()) {
            if let Some(tile) = movable.next() {
                *cell_mut(&mut tiles, position) = tile;
            }
        }
        let spare = movable
            .next()
            .unwrap_or_else(|| Tile::movable(Shape::Straight));
        Board::assemble(tiles, spare)
    }
}

// The tile glued to a fixed position. Corners open towards the inside of the
// board, T-junctions on the edges open away from the edge, and the four inner
// T-junctions open away from the center.
fn fixed_tile(position: Position) -> Tile {
    use Rotation::*;
    let (shape, rotation) = match (position.row(), position.column()) {
        (0, 0) => (Shape::Corner, Deg90),
        (0, 6) => (Shape::Corner, Deg180),
        (6, 0) => (Shape::Corner, Deg0),
        (6, 6) => (Shape::Corner, Deg270),
        (0, _) | (2, 4) => (Shape::TJunction, Deg0),
        (_, 6) | (4, 4) => (Shape::TJunction, Deg90),
        (6, _) | (4, 2) => (Shape::TJunction, Deg180),
        _ => (Shape::TJunction, Deg270),
    };
    Tile::fixed(shape, rotation)
}
