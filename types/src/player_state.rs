use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{action::NightActionRecord, game_state::Phase, Role};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub seat: usize,
    pub original_role: Role,
    /// Cleared once the player is voted out.
    pub alive: bool,
    pub vote: Option<String>,
}

impl PartialEq for PlayerState {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (dealt {})", self.name, self.original_role)
    }
}

impl PlayerState {
    pub fn new(name: String, seat: usize, original_role: Role) -> Self {
        Self {
            name,
            seat,
            original_role,
            alive: true,
            vote: None,
        }
    }
}

/// Everything a single player is allowed to know privately: the card they were
/// dealt and the results of their own night action. Never another player's.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateInfo {
    pub name: String,
    pub seat: usize,
    pub original_role: Role,
    pub night_knowledge: Vec<NightActionRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub round: usize,
    pub speaker: String,
    pub text: String,
}

impl Display for Utterance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.speaker, self.text)
    }
}

#[derive(Clone, Debug)]
pub struct PublicInfo {
    pub phase: Phase,
    pub players: Vec<String>,
    pub conversation_rounds: usize,
    /// Every card in the game, dealt or in the center, sorted by role.
    pub role_pool: Vec<Role>,
    pub transcript: Vec<Utterance>,
}
