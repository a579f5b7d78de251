use crate::{Color, Object, Position, TurnPhase};

/// The error type for a value that is not acceptable, such as a position
/// off the board or a move to an unreachable cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    OutOfBounds { row: u8, column: u8 },
    NotAnInsertionPoint { position: Position },
    ReversesLastInsertion { position: Position },
    Unreachable { from: Position, to: Position },
    MovableTileOnFixedPosition { position: Position },
    FixedTileOnMovablePosition { position: Position },
    FixedSpareTile,
    EmptyObjectivesDeck,
    DuplicateObjective { object: Object },
    DuplicateColor { color: Color },
    PlayerCount { count: usize },
    ObjectiveCount { count: usize },
}

impl std::error::Error for InvalidArgument {}

impl std::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidArgument::OutOfBounds { row, column } =>
                write!(f, "Position ({}, {}) is out of the bounds of the maze", row, column),
            InvalidArgument::NotAnInsertionPoint { position } =>
                write!(f, "A tile cannot be inserted at {}, only at the ends of movable rows and columns", position),
            InvalidArgument::ReversesLastInsertion { position } =>
                write!(f, "Inserting at {} would undo the previous insertion", position),
            InvalidArgument::Unreachable { from, to } =>
                write!(f, "There is no path from {} to {}", from, to),
            InvalidArgument::MovableTileOnFixedPosition { position } =>
                write!(f, "The tile at {} must be fixed", position),
            InvalidArgument::FixedTileOnMovablePosition { position } =>
                write!(f, "The tile at {} must be movable", position),
            InvalidArgument::FixedSpareTile =>
                write!(f, "The spare tile must be movable"),
            InvalidArgument::EmptyObjectivesDeck =>
                write!(f, "An objectives deck needs at least one card"),
            InvalidArgument::DuplicateObjective { object } =>
                write!(f, "The objective {:?} appears more than once", object),
            InvalidArgument::DuplicateColor { color } =>
                write!(f, "More than one player has the color {}", color),
            InvalidArgument::PlayerCount { count } =>
                write!(f, "A game needs 2 to 4 players, got {}", count),
            InvalidArgument::ObjectiveCount { count } =>
                write!(f, "A game uses 16 to 24 objectives, got {}", count),
        }
    }
}

/// The error type for an action taken at the wrong time, or on something
/// that doesn't support it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidOperation {
    RotateFixedTile,
    NotWaiting { phase: TurnPhase },
    NotReadyToMove { phase: TurnPhase },
    TurnNotDone { phase: TurnPhase },
    AllObjectivesFound,
    NoCurrentObjective,
    GameOver { winner: Color },
}

impl std::error::Error for InvalidOperation {}

impl std::fmt::Display for InvalidOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidOperation::RotateFixedTile =>
                write!(f, "The tile cannot be rotated because it is not movable"),
            InvalidOperation::NotWaiting { phase } =>
                write!(f, "The maze can only be shifted at the start of a turn, but the player is {}", phase),
            InvalidOperation::NotReadyToMove { phase } =>
                write!(f, "The piece can only be moved after shifting the maze, but the player is {}", phase),
            InvalidOperation::TurnNotDone { phase } =>
                write!(f, "The turn cannot end before the piece has moved, but the player is {}", phase),
            InvalidOperation::AllObjectivesFound =>
                write!(f, "All objectives have been turned over"),
            InvalidOperation::NoCurrentObjective =>
                write!(f, "There is no current objective to turn over"),
            InvalidOperation::GameOver { winner } =>
                write!(f, "The game is over, {} has won", winner),
        }
    }
}

/// The error type for one action in a [`Game`](crate::Game).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalAction {
    InvalidArgument(InvalidArgument),
    InvalidOperation(InvalidOperation),
}

impl IllegalAction {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, IllegalAction::InvalidArgument(_))
    }

    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, IllegalAction::InvalidOperation(_))
    }
}

impl From<InvalidArgument> for IllegalAction {
    fn from(err: InvalidArgument) -> Self {
        IllegalAction::InvalidArgument(err)
    }
}

impl From<InvalidOperation> for IllegalAction {
    fn from(err: InvalidOperation) -> Self {
        IllegalAction::InvalidOperation(err)
    }
}

impl std::error::Error for IllegalAction {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalAction::InvalidArgument(err) => Some(err),
            IllegalAction::InvalidOperation(err) => Some(err),
        }
    }
}

impl std::fmt::Display for IllegalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalAction::InvalidArgument(_) => write!(f, "Invalid argument for this action"),
            IllegalAction::InvalidOperation(_) => write!(f, "This action is not allowed now"),
        }
    }
}
