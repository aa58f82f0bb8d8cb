use thiserror::Error;

use crate::{action::NightAction, assignment::Slot, game_state::Phase, Role};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Role pool has {pool} cards but {players} players need {expected}")]
    PoolSize {
        pool: usize,
        players: usize,
        expected: usize,
    },

    #[error("A game needs at least one player")]
    NoPlayers,

    #[error("Duplicate player name: {0}")]
    DuplicatePlayer(String),

    #[error("conversation_rounds must be at least 1")]
    NoConversationRounds,

    #[error("Dealt cards {dealt:?} do not match the configured roles {configured:?}")]
    DealMismatch {
        configured: Vec<Role>,
        dealt: Vec<Role>,
    },
}

#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Completion provider failed: {0}")]
    Provider(String),

    #[error("Input error: {0}")]
    Input(#[from] std::io::Error),

    #[error("Strategy has no response left for {0}")]
    Exhausted(String),
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Night resolution invariant violated: slot {slot:?} is not part of the assignment")]
    Invariant { slot: Slot },

    #[error("{actor} attempted a night action they are not permitted: {action:?}")]
    IllegalAction { actor: String, action: NightAction },

    #[error("Cannot enter {requested:?} while in {current:?}")]
    PhaseOrder { current: Phase, requested: Phase },

    #[error("Strategy for {player} failed: {source}")]
    Strategy {
        player: String,
        #[source]
        source: StrategyError,
    },
}
