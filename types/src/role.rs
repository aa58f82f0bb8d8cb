use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Werewolf,
    Seer,
    Robber,
    Troublemaker,
    Villager,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Village,
    Werewolf,
}

impl Role {
    /// Order in which roles wake up during the night. Werewolves have to see the
    /// dealt cards before the Robber and Troublemaker move anything around.
    pub const NIGHT_ORDER: [Role; 5] = [
        Role::Werewolf,
        Role::Seer,
        Role::Robber,
        Role::Troublemaker,
        Role::Villager,
    ];

    pub fn team(&self) -> Team {
        match self {
            Role::Werewolf => Team::Werewolf,
            Role::Seer | Role::Robber | Role::Troublemaker | Role::Villager => Team::Village,
        }
    }

    pub fn is_werewolf(&self) -> bool {
        self.team() == Team::Werewolf
    }

    /// Five players, three center cards.
    pub fn default_pool() -> Vec<Role> {
        vec![
            Role::Werewolf,
            Role::Werewolf,
            Role::Seer,
            Role::Robber,
            Role::Troublemaker,
            Role::Villager,
            Role::Villager,
            Role::Villager,
        ]
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Werewolf => write!(f, "Werewolf"),
            Role::Seer => write!(f, "Seer"),
            Role::Robber => write!(f, "Robber"),
            Role::Troublemaker => write!(f, "Troublemaker"),
            Role::Villager => write!(f, "Villager"),
        }
    }
}

impl FromStr for Role {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "werewolf" => Ok(Role::Werewolf),
            "seer" => Ok(Role::Seer),
            "robber" => Ok(Role::Robber),
            "troublemaker" => Ok(Role::Troublemaker),
            "villager" => Ok(Role::Villager),
            _ => Err(ConfigurationError::UnknownRole(s.to_string())),
        }
    }
}

impl Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Village => write!(f, "Village"),
            Team::Werewolf => write!(f, "Werewolf"),
        }
    }
}
