use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{ConfigurationError, Role};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Temperatures {
    pub conversation: f32,
    pub voting: f32,
}

impl Default for Temperatures {
    fn default() -> Self {
        Self {
            conversation: 0.8,
            voting: 0.2,
        }
    }
}

/// Everything a game needs to know up front. Read-only once the game starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub players: Vec<String>,
    /// Role names, one per card: players plus three center cards.
    pub roles: Vec<String>,
    pub conversation_rounds: usize,
    pub temperatures: Temperatures,
    pub seed: Option<u64>,
    pub shuffle_speaking_order: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: (1..=5).map(|n| format!("AI_P{n}")).collect(),
            roles: Role::default_pool().iter().map(Role::to_string).collect(),
            conversation_rounds: 3,
            temperatures: Temperatures::default(),
            seed: None,
            shuffle_speaking_order: false,
        }
    }
}

impl GameConfig {
    pub fn role_pool(&self) -> Result<Vec<Role>, ConfigurationError> {
        self.roles.iter().map(|name| name.parse()).collect()
    }

    /// Checks a seating of `player_names` against this configuration.
    pub fn validate(&self, player_names: &[String]) -> Result<Vec<Role>, ConfigurationError> {
        if player_names.is_empty() {
            return Err(ConfigurationError::NoPlayers);
        }
        let mut seen = HashSet::new();
        for name in player_names {
            if !seen.insert(name.as_str()) {
                return Err(ConfigurationError::DuplicatePlayer(name.clone()));
            }
        }
        if self.conversation_rounds == 0 {
            return Err(ConfigurationError::NoConversationRounds);
        }
        self.role_pool()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_five_players_eight_cards() {
        let config = GameConfig::default();
        assert_eq!(config.players, vec!["AI_P1", "AI_P2", "AI_P3", "AI_P4", "AI_P5"]);
        assert_eq!(config.role_pool().unwrap(), Role::default_pool());
        assert_eq!(config.conversation_rounds, 3);
    }

    #[test]
    fn test_unknown_role_name_is_rejected() {
        let config = GameConfig {
            roles: vec!["Werewolf".to_string(), "Doppelganger".to_string()],
            ..Default::default()
        };
        assert_eq!(
            config.role_pool(),
            Err(ConfigurationError::UnknownRole("Doppelganger".to_string()))
        );
    }

    #[test]
    fn test_duplicate_players_are_rejected() {
        let config = GameConfig::default();
        let names = vec!["AI_P1".to_string(), "AI_P1".to_string()];
        assert_eq!(
            config.validate(&names),
            Err(ConfigurationError::DuplicatePlayer("AI_P1".to_string()))
        );
    }
}
