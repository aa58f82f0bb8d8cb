use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::writers::{BulkTranscriptWriter, StreamingTranscriptWriter, TranscriptWriter};

pub const DEFAULT_DIR: &str = "logs";

/// The `transcript:` section of a YAML config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    pub dir: Option<String>,
    pub streaming: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptConfig {
    pub dir: PathBuf,
    pub streaming: bool,
}

impl TranscriptConfig {
    pub fn from_cli_or_env_or_yaml(
        cli_arg: Option<String>,
        yaml_config: Option<String>,
        streaming: bool,
    ) -> Self {
        let dir = if let Some(arg) = cli_arg {
            arg
        } else if let Ok(env) = std::env::var("TRANSCRIPT_DIR") {
            env
        } else if let Some(yaml) = yaml_config {
            yaml
        } else {
            DEFAULT_DIR.to_string()
        };

        Self {
            dir: PathBuf::from(dir),
            streaming,
        }
    }

    pub fn create_writer(&self) -> Box<dyn TranscriptWriter> {
        if self.streaming {
            Box::new(StreamingTranscriptWriter::new(&self.dir))
        } else {
            Box::new(BulkTranscriptWriter::new(&self.dir))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_argument_wins() {
        let config = TranscriptConfig::from_cli_or_env_or_yaml(
            Some("cli_dir".to_string()),
            Some("yaml_dir".to_string()),
            true,
        );
        assert_eq!(config.dir, PathBuf::from("cli_dir"));
        assert!(config.streaming);
    }

    #[test]
    fn test_yaml_then_default() {
        if std::env::var("TRANSCRIPT_DIR").is_ok() {
            return;
        }
        let config =
            TranscriptConfig::from_cli_or_env_or_yaml(None, Some("yaml_dir".to_string()), false);
        assert_eq!(config.dir, PathBuf::from("yaml_dir"));
        let config = TranscriptConfig::from_cli_or_env_or_yaml(None, None, false);
        assert_eq!(config.dir, PathBuf::from(DEFAULT_DIR));
    }
}
