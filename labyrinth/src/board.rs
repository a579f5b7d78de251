mod connectivity;
mod insertion;
mod layout;

use std::collections::{BTreeMap, BTreeSet};

pub use insertion::*;
use insertion::line_from;
use tracing::debug;

use crate::{InvalidArgument, InvalidOperation, Position, Tile, BOARD_SIZE};

pub(crate) const SIZE: usize = BOARD_SIZE as usize;

/// The tiles of the maze, indexed by `[row][column]`.
pub type Grid = [[Tile; SIZE]; SIZE];

/// The maze: a 7 x 7 grid of tiles plus the spare tile.
///
/// The only way to change the grid is to push a tile in with
/// [`Self::insert_at()`] or [`Self::insert_spare()`].
#[derive(Clone, Debug)]
pub struct Board {
    tiles: Grid,
    /// The tile outside the maze: the one that was pushed out last, or the
    /// one that comes with a newly dealt board.
    spare: Tile,
    /// For every position, the neighbouring positions that a path leads to.
    ///
    /// This is derived from `tiles` and rebuilt after every insertion.
    adjacency: BTreeMap<Position, BTreeSet<Position>>,
    last_insertion: Option<Position>,
}

impl Board {
    /// Creates a board from explicitly given tiles.
    ///
    /// The tiles on [fixed positions](crate::is_fixed_position) must be fixed,
    /// all others and the spare must be movable.
    pub fn from_tiles(tiles: Grid, spare: Tile) -> Result<Self, InvalidArgument> {
        for position in Position::all() {
            let tile = cell(&tiles, position);
            match (position.is_fixed(), tile.is_movable()) {
                (true, true) => {
                    return Err(InvalidArgument::MovableTileOnFixedPosition { position })
                }
                (false, false) => {
                    return Err(InvalidArgument::FixedTileOnMovablePosition { position })
                }
                _ => (),
            }
        }
        if !spare.is_movable() {
            return Err(InvalidArgument::FixedSpareTile);
        }
        Ok(Self::assemble(tiles, spare))
    }

    // Does not validate the tiles
    fn assemble(tiles: Grid, spare: Tile) -> Self {
        let adjacency = connectivity::compute_adjacency(&tiles);
        Self {
            tiles,
            spare,
            adjacency,
            last_insertion: None,
        }
    }

    pub fn tile_at(&self, position: Position) -> &Tile {
        cell(&self.tiles, position)
    }

    pub fn tiles(&self) -> &Grid {
        &self.tiles
    }

    /// The tile that will be inserted next, i.e. the one most recently pushed out.
    pub fn spare(&self) -> &Tile {
        &self.spare
    }

    /// Turns the spare tile by 90° clockwise.
    pub fn rotate_spare(&mut self) -> Result<(), InvalidOperation> {
        self.spare.rotate()
    }

    pub fn last_insertion(&self) -> Option<Position> {
        self.last_insertion
    }

    /// For every position, the neighbouring positions that are directly linked by a path.
    pub fn adjacency(&self) -> &BTreeMap<Position, BTreeSet<Position>> {
        &self.adjacency
    }

    /// The insertion point that is currently blocked because it would
    /// push the last inserted tile straight back out.
    pub fn blocked_insertion_point(&self) -> Option<Position> {
        self.last_insertion.and_then(opposite_insertion_point)
    }

    /// Checks whether a tile can be pushed in at this position right now.
    pub fn check_insertion_point(&self, position: Position) -> Result<Side, InvalidArgument> {
        let side = Side::of_insertion_point(position)
            .ok_or(InvalidArgument::NotAnInsertionPoint { position })?;
        if self.blocked_insertion_point() == Some(position) {
            return Err(InvalidArgument::ReversesLastInsertion { position });
        }
        Ok(side)
    }

    pub fn is_insertable(&self, position: Position) -> bool {
        self.check_insertion_point(position).is_ok()
    }

    /// The positions where a tile can be pushed in right now.
    pub fn insertion_points(&self) -> Vec<Position> {
        insertion_points()
            .filter(|&position| self.is_insertable(position))
            .collect()
    }

    /// Pushes `tile` into the maze at `position`.
    ///
    /// The whole row or column moves by one cell, and the tile at the far end
    /// falls out and becomes the new spare. The returned [`Displacement`]
    /// describes where every cell of the line went, so that the pieces on it
    /// can be moved along.
    ///
    /// On error, nothing is changed.
    pub fn insert_at(
        &mut self,
        tile: Tile,
        position: Position,
    ) -> Result<Displacement, InvalidArgument> {
        let side = self.check_insertion_point(position)?;
        if !tile.is_movable() {
            return Err(InvalidArgument::FixedSpareTile);
        }
        let line = line_from(position, side);
        let ejected = self.shift_line(&line, tile);
        self.spare = ejected;
        self.last_insertion = Some(position);
        self.adjacency = connectivity::compute_adjacency(&self.tiles);
        debug!(%position, inserted = %tile, %ejected, "Inserted tile");
        Ok(Displacement::new(side, line, ejected))
    }

    /// Pushes the spare tile into the maze, see [`Self::insert_at()`].
    pub fn insert_spare(&mut self, position: Position) -> Result<Displacement, InvalidArgument> {
        self.insert_at(self.spare, position)
    }

    // Moves every tile of the line one step away from line[0], puts `tile` on
    // line[0] and returns what was on the last cell.
    fn shift_line(&mut self, line: &[Position; SIZE], tile: Tile) -> Tile {
        let ejected = *self.tile_at(line[SIZE - 1]);
        for idx in (1..SIZE).rev() {
            let moved = *self.tile_at(line[idx - 1]);
            *cell_mut(&mut self.tiles, line[idx]) = moved;
        }
        *cell_mut(&mut self.tiles, line[0]) = tile;
        ejected
    }
}

fn cell(tiles: &Grid, position: Position) -> &Tile {
    &tiles[usize::from(position.row())][usize::from(position.column())]
}

fn cell_mut(tiles: &mut Grid, position: Position) -> &mut Tile {
    &mut tiles[usize::from(position.row())][usize::from(position.column())]
}
