mod game;
mod policy;
mod recording;
pub use game::*;
pub use policy::*;
pub use recording::*;

use labyrinth::GameConfig;

pub struct Config {
    pub game: GameConfig,
    /// A game that has not been won after this many turns is abandoned.
    pub max_turns: usize,
}
