use types::GameResult;

use super::game_handle::GameHandle;
use crate::{collectors::GameMetadata, models::TranscriptRecord, TranscriptError};

/// Destination for a game's record. Writers never influence the game; the
/// caller logs their errors and carries on.
pub trait TranscriptWriter {
    fn start_game(&mut self, metadata: GameMetadata) -> Result<GameHandle, TranscriptError>;
    fn record(&mut self, handle: GameHandle, record: &TranscriptRecord)
        -> Result<(), TranscriptError>;
    fn finish_game(&mut self, handle: GameHandle, result: &GameResult)
        -> Result<(), TranscriptError>;
    /// Closes a game that stopped before a result, keeping what was recorded.
    fn abort_game(&mut self, handle: GameHandle, reason: &str) -> Result<(), TranscriptError>;
}
