use labyrinth::{Color, Game, IllegalAction};
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::policy::{choose_insertion_point, choose_rotations, choose_target};
use crate::recording::{Action, Recorder};
use crate::Config;

pub enum GameResult {
    WonBy { color: Color, turns: usize },
    /// Nobody won within the turn limit.
    Unfinished { turns: usize },
    /// The engine refused an action that was chosen among the legal ones.
    IllegalAction { color: Color, turn: usize, err: IllegalAction },
}

impl GameResult {
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameResult::WonBy { color, .. } => Some(*color),
            _ => None,
        }
    }
}

enum TurnOutcome {
    Continue,
    Won,
}

/// Plays one game with random legal actions.
///
/// Returns an error only when the game cannot be set up or recorded, not
/// when an action is refused.
pub fn play_game(
    config: &Config,
    rng: &mut StdRng,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    let mut game = Game::new(&config.game, rng)?;

    let mut result = GameResult::Unfinished {
        turns: config.max_turns,
    };
    for turn in 1..=config.max_turns {
        let color = game.current_player().color();
        match play_turn(&mut game, rng, recorder) {
            Ok(TurnOutcome::Continue) => {}
            Ok(TurnOutcome::Won) => {
                result = GameResult::WonBy { color, turns: turn };
                break;
            }
            Err(err) => {
                result = GameResult::IllegalAction { color, turn, err };
                break;
            }
        }
    }

    if let Some(rec) = recorder {
        let path = rec.write_game_recording(game.snapshot())?;
        debug!(path = %path.display(), "Recorded game");
    }
    Ok(result)
}

fn play_turn(
    game: &mut Game,
    rng: &mut StdRng,
    recorder: &mut Option<Recorder>,
) -> Result<TurnOutcome, IllegalAction> {
    let color = game.current_player().color();
    let mut record = |action: Action| {
        if let Some(rec) = recorder.as_mut() {
            rec.store_action(color, action);
        }
    };

    for _ in 0..choose_rotations(rng) {
        game.rotate_spare()?;
        record(Action::RotateSpare {
            spare: *game.board().spare(),
        });
    }

    let position = choose_insertion_point(game.board(), rng);
    let ejected = game.select_insertion_position(position)?;
    record(Action::Insert { position, ejected });

    let target = choose_target(game, rng);
    let outcome = game.move_current_player(target)?;
    trace!(%color, from = %outcome.from, to = %outcome.to, "Moved");
    record(Action::Move { outcome });
    if outcome.won {
        return Ok(TurnOutcome::Won);
    }

    let next = game.end_turn()?;
    record(Action::EndTurn { next });
    Ok(TurnOutcome::Continue)
}
