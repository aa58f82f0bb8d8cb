use std::fmt::Debug;

use crate::{
    action::NightAction,
    error::StrategyError,
    voting::VoteTally,
    PlayerState, PrivateInfo, PublicInfo,
};

/// What the game is asking a player for during the day.
#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    Discuss {
        round: usize,
        total_rounds: usize,
        position: usize,
    },
    Vote {
        candidates: Vec<String>,
    },
    /// Second ballot after a tie; `candidates` excludes the voter.
    Revote {
        candidates: Vec<String>,
        tied: Vec<String>,
        previous: VoteTally,
    },
}

impl Decision {
    pub fn candidates(&self) -> Option<&[String]> {
        match self {
            Decision::Discuss { .. } => None,
            Decision::Vote { candidates } | Decision::Revote { candidates, .. } => {
                Some(candidates)
            }
        }
    }

    pub fn is_vote(&self) -> bool {
        self.candidates().is_some()
    }
}

/// The agent behind a seat. Calls are blocking: the game waits for each answer
/// before moving on to the next player.
pub trait Strategy: Debug {
    fn select_night_action(
        &mut self,
        private_info: &PrivateInfo,
        public_info: &PublicInfo,
        available_actions: &[NightAction],
    ) -> NightAction;

    /// One utterance for [`Decision::Discuss`], otherwise the name of the
    /// player being voted for.
    fn generate(
        &mut self,
        private_info: &PrivateInfo,
        public_info: &PublicInfo,
        decision: &Decision,
    ) -> Result<String, StrategyError>;
}

#[derive(Debug)]
pub struct Player {
    pub state: PlayerState,
    pub strategy: Box<dyn Strategy>,
}
