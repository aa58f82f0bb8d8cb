use std::{
    collections::HashMap,
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
};

use chrono::Utc;
use types::GameResult;
use uuid::Uuid;

use super::{GameHandle, TranscriptWriter};
use crate::collectors::GameMetadata;
use crate::models::{StreamLine, TranscriptEntry, TranscriptRecord};
use crate::TranscriptError;

struct OpenGame {
    file: BufWriter<File>,
    next_sequence: usize,
}

/// Appends every record to `<dir>/<game-id>.jsonl` as it happens, so a
/// crashed game still leaves everything up to the crash on disk.
pub struct StreamingTranscriptWriter {
    dir: PathBuf,
    open_games: HashMap<GameHandle, OpenGame>,
}

impl StreamingTranscriptWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            open_games: HashMap::new(),
        }
    }

    pub fn path_for(&self, game_id: Uuid) -> PathBuf {
        self.dir.join(format!("{game_id}.jsonl"))
    }

    fn write_line(game: &mut OpenGame, line: &StreamLine) -> Result<(), TranscriptError> {
        serde_json::to_writer(&mut game.file, line)?;
        game.file.write_all(b"\n")?;
        game.file.flush()?;
        Ok(())
    }

    fn open_game(&mut self, handle: GameHandle) -> Result<&mut OpenGame, TranscriptError> {
        self.open_games
            .get_mut(&handle)
            .ok_or(TranscriptError::GameNotFound(handle.as_uuid()))
    }
}

impl TranscriptWriter for StreamingTranscriptWriter {
    fn start_game(&mut self, metadata: GameMetadata) -> Result<GameHandle, TranscriptError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(metadata.game_id);
        let handle = GameHandle::new(metadata.game_id);
        let mut game = OpenGame {
            file: BufWriter::new(File::create(&path)?),
            next_sequence: 0,
        };
        Self::write_line(&mut game, &StreamLine::Started(metadata))?;
        log::info!("Streaming transcript to {}", path.display());
        self.open_games.insert(handle, game);
        Ok(handle)
    }

    fn record(
        &mut self,
        handle: GameHandle,
        record: &TranscriptRecord,
    ) -> Result<(), TranscriptError> {
        let game = self.open_game(handle)?;
        let entry = TranscriptEntry {
            sequence: game.next_sequence,
            recorded_at: Utc::now(),
            record: record.clone(),
        };
        game.next_sequence += 1;
        Self::write_line(game, &StreamLine::Entry(entry))
    }

    fn finish_game(&mut self, handle: GameHandle, result: &GameResult) -> Result<(), TranscriptError> {
        let game = self.open_game(handle)?;
        Self::write_line(
            game,
            &StreamLine::Finished {
                finished_at: Utc::now(),
                result: result.clone(),
            },
        )?;
        self.open_games.remove(&handle);
        Ok(())
    }

    fn abort_game(&mut self, handle: GameHandle, reason: &str) -> Result<(), TranscriptError> {
        let game = self.open_game(handle)?;
        Self::write_line(
            game,
            &StreamLine::Aborted {
                aborted_at: Utc::now(),
                reason: reason.to_string(),
            },
        )?;
        self.open_games.remove(&handle);
        Ok(())
    }
}
