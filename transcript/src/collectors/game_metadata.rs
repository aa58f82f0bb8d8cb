use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use types::{GameState, Role};
use uuid::Uuid;

/// What is known about a game before the first night action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    pub game_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub num_players: usize,
    pub player_order: Vec<String>,
    /// Cards as dealt, by seat.
    pub dealt_roles: Vec<Role>,
    pub center: Vec<Role>,
    pub seed: Option<u64>,
    pub configuration: Option<serde_json::Value>,
}

impl GameMetadata {
    pub fn from_game(game: &GameState) -> Self {
        let configuration = match serde_json::to_value(&game.config) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("Unable to serialize game configuration: {err}");
                None
            }
        };
        Self {
            game_id: game.id,
            started_at: Utc::now(),
            num_players: game.table.len(),
            player_order: game.names(),
            dealt_roles: game
                .table
                .iter()
                .map(|player| player.state.original_role)
                .collect(),
            center: game.assignment().center_roles().to_vec(),
            seed: game.config.seed,
            configuration,
        }
    }
}
