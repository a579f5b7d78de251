use serde::{Deserialize, Serialize};

use crate::{Color, Game, Grid, Object, ObjectiveCard, Player, Position, Tile, TurnPhase};

/// A read-only copy of a game's state, for whoever shows or records games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Indexed by `[row][column]`
    pub tiles: Grid,
    pub spare: Tile,
    pub last_insertion: Option<Position>,
    /// In turn order
    pub players: Vec<PlayerSnapshot>,
    /// Whose turn it is
    pub current: Color,
    pub winner: Option<Color>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub color: Color,
    pub position: Position,
    pub phase: TurnPhase,
    pub objective: Option<Object>,
    pub cards: Vec<ObjectiveCard>,
}

impl GameSnapshot {
    pub fn new(game: &Game) -> Self {
        let board = game.board();
        Self {
            tiles: *board.tiles(),
            spare: *board.spare(),
            last_insertion: board.last_insertion(),
            players: game.players().iter().map(PlayerSnapshot::new).collect(),
            current: game.current_player().color(),
            winner: game.winner(),
        }
    }

    pub fn player(&self, color: Color) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|player| player.color == color)
    }
}

impl PlayerSnapshot {
    pub fn new(player: &Player) -> Self {
        Self {
            color: player.color(),
            position: player.position(),
            phase: player.phase(),
            objective: player.objective(),
            cards: player.objectives().cards().to_vec(),
        }
    }

    pub fn num_found(&self) -> usize {
        self.cards.iter().filter(|card| card.turned_over).count()
    }
}
