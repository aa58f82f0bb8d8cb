use chrono::Utc;
use types::GameResult;

use super::GameMetadata;
use crate::models::{GameTranscript, TranscriptEntry, TranscriptRecord};

/// Accumulates a game in memory until it is finished.
#[derive(Debug, Clone)]
pub struct GameEventCollector {
    pub metadata: GameMetadata,
    pub entries: Vec<TranscriptEntry>,
    pub result: Option<GameResult>,
    pub aborted: Option<String>,
}

impl GameEventCollector {
    pub fn new(metadata: GameMetadata) -> Self {
        Self {
            metadata,
            entries: Vec::new(),
            result: None,
            aborted: None,
        }
    }

    /// Stamps the record with the next sequence number and the current time.
    pub fn add_record(&mut self, record: TranscriptRecord) -> &TranscriptEntry {
        let entry = TranscriptEntry {
            sequence: self.entries.len(),
            recorded_at: Utc::now(),
            record,
        };
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn set_result(&mut self, result: GameResult) {
        self.result = Some(result);
    }

    pub fn set_aborted(&mut self, reason: impl Into<String>) {
        self.aborted = Some(reason.into());
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn into_transcript(self) -> GameTranscript {
        GameTranscript {
            finished_at: self.result.as_ref().map(|_| Utc::now()),
            metadata: self.metadata,
            entries: self.entries,
            result: self.result,
            aborted: self.aborted,
        }
    }
}
