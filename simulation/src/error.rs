use thiserror::Error;
use types::{ConfigurationError, GameError};

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Llm(#[from] strategies::LlmError),

    #[error(transparent)]
    Game(#[from] GameError),
}
