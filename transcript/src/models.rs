use std::{fs::File, io::BufReader, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use types::{GameEvent, GameResult, NightActionRecord, Phase, Utterance, VotingRound};

use crate::{collectors::GameMetadata, TranscriptError};

/// One thing worth keeping from a game, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranscriptRecord {
    PhaseStarted { phase: Phase },
    NightAction(NightActionRecord),
    Utterance(Utterance),
    InvalidVote { voter: String, raw: String },
    VotingRound(VotingRound),
    Tie { candidates: Vec<String> },
    Eliminated { player: Option<String> },
}

impl TranscriptRecord {
    /// `None` for events that carry nothing new. The final result is handed to
    /// the writer separately when the game finishes.
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        let record = match event {
            GameEvent::PhaseStarted(phase) => TranscriptRecord::PhaseStarted { phase: *phase },
            GameEvent::NightAction(record) => TranscriptRecord::NightAction(record.clone()),
            GameEvent::Utterance(utterance) => TranscriptRecord::Utterance(utterance.clone()),
            GameEvent::InvalidVote { voter, raw } => TranscriptRecord::InvalidVote {
                voter: voter.clone(),
                raw: raw.clone(),
            },
            GameEvent::VotingRound(round) => TranscriptRecord::VotingRound(round.clone()),
            GameEvent::Tie { candidates } => TranscriptRecord::Tie {
                candidates: candidates.clone(),
            },
            GameEvent::Eliminated(player) => TranscriptRecord::Eliminated {
                player: player.clone(),
            },
            GameEvent::DiscussionRound { .. } | GameEvent::GameOver(_) => return None,
        };
        Some(record)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub sequence: usize,
    pub recorded_at: DateTime<Utc>,
    pub record: TranscriptRecord,
}

/// The whole game in one document, as written by the bulk writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTranscript {
    pub metadata: GameMetadata,
    pub finished_at: Option<DateTime<Utc>>,
    pub entries: Vec<TranscriptEntry>,
    pub result: Option<GameResult>,
    /// Why the game stopped early, if it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
}

impl GameTranscript {
    pub fn load(path: &Path) -> Result<Self, TranscriptError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn utterances(&self) -> impl Iterator<Item = &Utterance> {
        self.entries.iter().filter_map(|entry| match &entry.record {
            TranscriptRecord::Utterance(utterance) => Some(utterance),
            _ => None,
        })
    }

    pub fn night_actions(&self) -> impl Iterator<Item = &NightActionRecord> {
        self.entries.iter().filter_map(|entry| match &entry.record {
            TranscriptRecord::NightAction(record) => Some(record),
            _ => None,
        })
    }
}

/// A line of a `.jsonl` transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "line", rename_all = "snake_case")]
pub enum StreamLine {
    Started(GameMetadata),
    Entry(TranscriptEntry),
    Finished {
        finished_at: DateTime<Utc>,
        result: GameResult,
    },
    Aborted {
        aborted_at: DateTime<Utc>,
        reason: String,
    },
}

impl StreamLine {
    pub fn read_all(path: &Path) -> Result<Vec<Self>, TranscriptError> {
        let text = std::fs::read_to_string(path)?;
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(TranscriptError::from))
            .collect()
    }
}
