use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Transcript I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Game not found: {0}")]
    GameNotFound(Uuid),
}
