use std::{
    collections::HashMap,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use types::GameResult;
use uuid::Uuid;

use super::{GameHandle, TranscriptWriter};
use crate::collectors::{GameEventCollector, GameMetadata};
use crate::models::TranscriptRecord;
use crate::TranscriptError;

/// Holds each game in memory and writes `<dir>/<game-id>.json` once it ends.
pub struct BulkTranscriptWriter {
    dir: PathBuf,
    active_games: HashMap<GameHandle, GameEventCollector>,
}

impl BulkTranscriptWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            active_games: HashMap::new(),
        }
    }

    pub fn path_for(&self, game_id: Uuid) -> PathBuf {
        self.dir.join(format!("{game_id}.json"))
    }

    pub fn save_collector(&self, collector: GameEventCollector) -> Result<PathBuf, TranscriptError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(collector.metadata.game_id);
        write_json(&path, &collector.into_transcript())?;
        log::info!("Wrote transcript to {}", path.display());
        Ok(path)
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), TranscriptError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

impl TranscriptWriter for BulkTranscriptWriter {
    fn start_game(&mut self, metadata: GameMetadata) -> Result<GameHandle, TranscriptError> {
        let handle = GameHandle::new(metadata.game_id);
        self.active_games
            .insert(handle, GameEventCollector::new(metadata));
        Ok(handle)
    }

    fn record(
        &mut self,
        handle: GameHandle,
        record: &TranscriptRecord,
    ) -> Result<(), TranscriptError> {
        let collector = self
            .active_games
            .get_mut(&handle)
            .ok_or(TranscriptError::GameNotFound(handle.as_uuid()))?;
        collector.add_record(record.clone());
        Ok(())
    }

    fn finish_game(&mut self, handle: GameHandle, result: &GameResult) -> Result<(), TranscriptError> {
        let mut collector = self
            .active_games
            .remove(&handle)
            .ok_or(TranscriptError::GameNotFound(handle.as_uuid()))?;
        collector.set_result(result.clone());
        self.save_collector(collector)?;
        Ok(())
    }

    fn abort_game(&mut self, handle: GameHandle, reason: &str) -> Result<(), TranscriptError> {
        let mut collector = self
            .active_games
            .remove(&handle)
            .ok_or(TranscriptError::GameNotFound(handle.as_uuid()))?;
        collector.set_aborted(reason);
        self.save_collector(collector)?;
        Ok(())
    }
}
