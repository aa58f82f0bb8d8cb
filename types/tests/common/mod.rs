#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use types::{
    Decision, GameConfig, GameState, NightAction, PrivateInfo, PublicInfo, Role, RoleAssignment,
    Strategy, StrategyError,
};

/// Plays back canned answers and remembers what it was shown.
#[derive(Debug, Default)]
pub struct Scripted {
    pub night_action: Option<NightAction>,
    pub lines: VecDeque<String>,
    pub votes: VecDeque<String>,
    pub fail: bool,
    pub seen: Rc<RefCell<Vec<(PrivateInfo, Decision, usize)>>>,
}

impl Scripted {
    pub fn voting(votes: &[&str]) -> Self {
        Self {
            votes: votes.iter().map(|v| v.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn night(action: NightAction) -> Self {
        Self {
            night_action: Some(action),
            ..Default::default()
        }
    }
}

impl Strategy for Scripted {
    fn select_night_action(
        &mut self,
        _private_info: &PrivateInfo,
        _public_info: &PublicInfo,
        available_actions: &[NightAction],
    ) -> NightAction {
        self.night_action
            .filter(|action| available_actions.contains(action))
            .unwrap_or(available_actions[0])
    }

    fn generate(
        &mut self,
        private_info: &PrivateInfo,
        public_info: &PublicInfo,
        decision: &Decision,
    ) -> Result<String, StrategyError> {
        self.seen.borrow_mut().push((
            private_info.clone(),
            decision.clone(),
            public_info.transcript.len(),
        ));
        if self.fail {
            return Err(StrategyError::Provider("connection refused".to_string()));
        }
        match decision {
            Decision::Discuss { round, .. } => Ok(self
                .lines
                .pop_front()
                .unwrap_or_else(|| format!("{} speaking in round {round}", private_info.name))),
            Decision::Vote { candidates } | Decision::Revote { candidates, .. } => Ok(self
                .votes
                .pop_front()
                .unwrap_or_else(|| candidates[0].clone())),
        }
    }
}

pub fn names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("AI_P{i}")).collect()
}

pub fn game_with(
    players: Vec<Role>,
    center: Vec<Role>,
    strategies: Vec<Scripted>,
) -> GameState {
    let config = GameConfig {
        players: names(players.len()),
        roles: players
            .iter()
            .chain(center.iter())
            .map(|r| r.to_string())
            .collect(),
        conversation_rounds: 2,
        seed: Some(7),
        ..Default::default()
    };
    let inputs = names(players.len())
        .into_iter()
        .zip(strategies)
        .map(|(name, strategy)| (name, Box::new(strategy) as Box<dyn Strategy>))
        .collect();
    let assignment = RoleAssignment::from_parts(players, center).expect("valid deal");
    GameState::with_assignment(&config, inputs, assignment).expect("valid game")
}

pub fn default_strategies(n: usize) -> Vec<Scripted> {
    (0..n).map(|_| Scripted::default()).collect()
}
