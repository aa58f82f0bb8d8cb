pub mod collectors;
pub mod config;
pub mod error;
pub mod models;
pub mod writers;

pub use collectors::{GameEventCollector, GameMetadata};
pub use config::{TranscriptConfig, TranscriptSettings};
pub use error::TranscriptError;
pub use models::{GameTranscript, StreamLine, TranscriptEntry, TranscriptRecord};
pub use writers::{BulkTranscriptWriter, GameHandle, StreamingTranscriptWriter, TranscriptWriter};

// NoopRecorder for when no transcript is wanted
pub struct NoopRecorder;

impl TranscriptWriter for NoopRecorder {
    fn start_game(&mut self, metadata: GameMetadata) -> Result<GameHandle, TranscriptError> {
        Ok(GameHandle::new(metadata.game_id))
    }

    fn record(
        &mut self,
        _handle: GameHandle,
        _record: &TranscriptRecord,
    ) -> Result<(), TranscriptError> {
        Ok(())
    }

    fn finish_game(
        &mut self,
        _handle: GameHandle,
        _result: &types::GameResult,
    ) -> Result<(), TranscriptError> {
        Ok(())
    }

    fn abort_game(&mut self, _handle: GameHandle, _reason: &str) -> Result<(), TranscriptError> {
        Ok(())
    }
}
