pub mod action;
pub mod assignment;
pub mod config;
pub mod day;
pub mod error;
pub mod event;
pub mod game_state;
pub mod night;
pub mod outcome;
pub mod player;
pub mod player_state;
pub mod role;
pub mod voting;

pub use action::{NightAction, NightActionRecord, Observation};
pub use assignment::{RoleAssignment, Slot, CENTER_CARDS};
pub use config::{GameConfig, Temperatures};
pub use error::{ConfigurationError, GameError, StrategyError};
pub use event::{EventSink, GameEvent, NoopSink};
pub use game_state::{GameState, Phase};
pub use outcome::{determine_winner, GameResult, PlayerOutcome, Winner};
pub use player::{Decision, Player, Strategy};
pub use player_state::{PlayerState, PrivateInfo, PublicInfo, Utterance};
pub use role::{Role, Team};
pub use voting::{Ballot, VoteOutcome, VoteTally, VotingRound};
