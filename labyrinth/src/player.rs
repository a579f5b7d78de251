use serde::{Deserialize, Serialize};

use crate::{InvalidOperation, Object, ObjectiveCard, ObjectivesDeck, Position};

/// The color of a player's piece. Each player of a game has a different color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Green,
}

impl Color {
    /// The order in which colors are handed out to players.
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Yellow, Color::Green];

    /// The color after this one in [`Color::ALL`], wrapping around.
    pub fn next(self) -> Color {
        Color::ALL[(self as usize + 1) % Color::ALL.len()]
    }

    /// The corner where pieces of this color start, and must return to.
    pub fn home(self) -> Position {
        match self {
            Color::Red => Position::new_unchecked(0, 0),
            Color::Yellow => Position::new_unchecked(0, 6),
            Color::Green => Position::new_unchecked(6, 0),
            Color::Blue => Position::new_unchecked(6, 6),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Green => "green",
        };
        write!(f, "{}", name)
    }
}

/// Where a player is within their own turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// Has to shift the maze next.
    Waiting,
    /// Has shifted the maze and may move the piece.
    ReadyToMove,
    /// Has moved (or passed) and is done with this turn.
    Done,
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnPhase::Waiting => write!(f, "waiting"),
            TurnPhase::ReadyToMove => write!(f, "ready to move"),
            TurnPhase::Done => write!(f, "done"),
        }
    }
}

/// The state of a single player during one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    color: Color,
    position: Position,
    phase: TurnPhase,
    objectives: ObjectivesDeck,
    /// Index into `objectives`
    current_objective: Option<usize>,
}

impl Player {
    /// Creates a waiting player on its home corner, hunting for the first
    /// objective of the deck.
    pub fn new(color: Color, objectives: ObjectivesDeck) -> Self {
        let current_objective = objectives.current_index();
        Self {
            color,
            position: color.home(),
            phase: TurnPhase::Waiting,
            objectives,
            current_objective,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn objectives(&self) -> &ObjectivesDeck {
        &self.objectives
    }

    pub fn is_at(&self, position: Position) -> bool {
        self.position == position
    }

    /// Puts the piece on `position`. Whether it could get there is up to the caller.
    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    pub fn current_objective(&self) -> Option<&ObjectiveCard> {
        self.current_objective
            .and_then(|idx| self.objectives.get(idx))
    }

    /// The object this player is looking for right now, if any is left.
    pub fn objective(&self) -> Option<Object> {
        self.current_objective()
            .filter(|card| !card.turned_over)
            .map(|card| card.object)
    }

    pub fn turn_current_objective_over(&mut self) -> Result<Object, InvalidOperation> {
        let idx = self
            .current_objective
            .ok_or(InvalidOperation::NoCurrentObjective)?;
        let object = self
            .objectives
            .get(idx)
            .map(|card| card.object)
            .ok_or(InvalidOperation::NoCurrentObjective)?;
        self.objectives.turn_over(idx);
        Ok(object)
    }

    /// Moves on to the first objective that has not been found yet.
    pub fn next_objective(&mut self) -> Result<Object, InvalidOperation> {
        let idx = self
            .objectives
            .current_index()
            .ok_or(InvalidOperation::AllObjectivesFound)?;
        self.current_objective = Some(idx);
        Ok(self.objectives.cards()[idx].object)
    }

    pub fn has_found_all_objectives(&self) -> bool {
        self.objectives.are_all_cards_turned_over()
    }

    pub fn is_returned_to_initial_pos(&self) -> bool {
        self.position == self.color.home()
    }

    pub fn has_won(&self) -> bool {
        self.has_found_all_objectives() && self.is_returned_to_initial_pos()
    }

    pub fn is_waiting(&self) -> bool {
        self.phase == TurnPhase::Waiting
    }

    pub fn is_ready_to_move(&self) -> bool {
        self.phase == TurnPhase::ReadyToMove
    }

    pub fn is_done(&self) -> bool {
        self.phase == TurnPhase::Done
    }

    pub fn set_waiting(&mut self) {
        self.phase = TurnPhase::Waiting;
    }

    /// The player has shifted the maze.
    pub fn set_ready_to_move(&mut self) -> Result<(), InvalidOperation> {
        if !self.is_waiting() {
            return Err(InvalidOperation::NotWaiting { phase: self.phase });
        }
        self.phase = TurnPhase::ReadyToMove;
        Ok(())
    }

    /// The player has moved the piece, or decided to stay.
    pub fn set_done(&mut self) -> Result<(), InvalidOperation> {
        if !self.is_ready_to_move() {
            return Err(InvalidOperation::NotReadyToMove { phase: self.phase });
        }
        self.phase = TurnPhase::Done;
        Ok(())
    }
}
