pub use board::*;
pub use errors::*;
pub use game::*;
pub use objective::*;
pub use player::*;
pub use position::*;
pub use position_set::*;
pub use snapshot::*;
pub use tile::*;

#[cfg(test)]
mod arbitrary;
mod bitset;
mod board;
mod errors;
mod game;
mod objective;
mod player;
mod position;
mod position_set;
mod snapshot;
mod tile;
