use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use labyrinth::{Color, GameSnapshot, MoveOutcome, Position, Tile};
use serde::{Deserialize, Serialize};

/// Writes one JSON file per game, numbered `game_000001.json` and onwards.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    actions: Vec<RecordedAction>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            actions: Vec::new(),
        })
    }

    pub fn store_action(&mut self, player: Color, action: Action) {
        self.actions.push(RecordedAction { player, action });
    }

    /// Writes the actions stored since the last recording, followed by the final state.
    pub fn write_game_recording(&mut self, final_state: GameSnapshot) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let recording = GameRecording {
            actions: std::mem::take(&mut self.actions),
            final_state,
        };
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Serialize, Deserialize)]
pub struct GameRecording {
    pub actions: Vec<RecordedAction>,
    pub final_state: GameSnapshot,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedAction {
    pub player: Color,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    RotateSpare { spare: Tile },
    Insert { position: Position, ejected: Tile },
    Move { outcome: MoveOutcome },
    EndTurn { next: Color },
}
