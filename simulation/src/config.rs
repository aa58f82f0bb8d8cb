use std::path::Path;

use serde::{Deserialize, Serialize};
use strategies::LlmConfig;
use transcript::TranscriptSettings;
use types::GameConfig;

use crate::SimulationError;

/// Top level of a YAML config file. Every section is optional.
///
/// ```yaml
/// game:
///   players: [AI_P1, AI_P2, AI_P3, AI_P4, AI_P5]
///   conversation_rounds: 3
///   seed: 7
/// llm:
///   model: openai/gpt-4o-mini
/// transcript:
///   dir: logs
///   streaming: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub game: GameConfig,
    pub llm: LlmConfig,
    pub transcript: TranscriptSettings,
}

impl SimulationConfig {
    pub fn load(path: &Path) -> Result<Self, SimulationError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, SimulationError> {
        let config: SimulationConfig = serde_yaml::from_str(text)?;
        config.game.role_pool()?;
        Ok(config)
    }
}
