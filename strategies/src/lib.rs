pub mod input_strategy;
pub mod llm;
pub mod scripted;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use types::{
    Decision, NightAction, Observation, PrivateInfo, PublicInfo, Role, Slot, Strategy,
    StrategyError,
};

pub use crate::input_strategy::InputStrategy;
pub use crate::llm::{ChatCompletion, LlmClient, LlmConfig, LlmError, LlmStrategy, PromptManager};
pub use crate::scripted::ScriptedStrategy;

const SMALL_TALK: [&str; 4] = [
    "I don't have much to go on yet.",
    "Somebody here is not telling the truth.",
    "Let's hear from everyone before we decide.",
    "I'm keeping an eye on the quiet ones.",
];

#[derive(Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomStrategy {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn select_night_action(
        &mut self,
        _private_info: &PrivateInfo,
        _public_info: &PublicInfo,
        available_actions: &[NightAction],
    ) -> NightAction {
        available_actions
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(NightAction::Pass)
    }

    fn generate(
        &mut self,
        _private_info: &PrivateInfo,
        _public_info: &PublicInfo,
        decision: &Decision,
    ) -> Result<String, StrategyError> {
        match decision.candidates() {
            Some(candidates) => candidates
                .choose(&mut self.rng)
                .cloned()
                .ok_or_else(|| StrategyError::Exhausted("an empty ballot".to_string())),
            None => Ok(SMALL_TALK
                .choose(&mut self.rng)
                .map(|line| line.to_string())
                .unwrap_or_default()),
        }
    }
}

/// Plays it straight: claims the card it was dealt, shares what it saw and
/// votes for a werewolf it knows about. A dealt werewolf claims Villager and
/// votes for someone outside the pack.
#[derive(Debug, Default)]
pub struct DefaultStrategy {}

impl Strategy for DefaultStrategy {
    fn select_night_action(
        &mut self,
        _private_info: &PrivateInfo,
        _public_info: &PublicInfo,
        available_actions: &[NightAction],
    ) -> NightAction {
        // first listed action is always a real move when one exists
        available_actions
            .first()
            .copied()
            .unwrap_or(NightAction::Pass)
    }

    fn generate(
        &mut self,
        private_info: &PrivateInfo,
        public_info: &PublicInfo,
        decision: &Decision,
    ) -> Result<String, StrategyError> {
        match decision {
            Decision::Discuss { round: 1, .. } => Ok(opening_claim(private_info)),
            Decision::Discuss { .. } => Ok(match known_werewolf(private_info, public_info) {
                Some(name) => format!("I still think {name} is a werewolf."),
                None => "I have nothing new to add.".to_string(),
            }),
            Decision::Vote { candidates } | Decision::Revote { candidates, .. } => {
                pick_vote(private_info, public_info, candidates)
            }
        }
    }
}

fn opening_claim(private_info: &PrivateInfo) -> String {
    if private_info.original_role.is_werewolf() {
        return "I am a Villager. As a villager, I did nothing during the night.".to_string();
    }
    let mut claim = format!("I am the {}.", private_info.original_role);
    for record in &private_info.night_knowledge {
        claim.push(' ');
        claim.push_str(&record.description);
    }
    claim
}

/// A player this agent has seen holding a Werewolf card.
fn known_werewolf(private_info: &PrivateInfo, public_info: &PublicInfo) -> Option<String> {
    private_info
        .night_knowledge
        .iter()
        .find_map(|record| match &record.observation {
            Observation::Saw(seen) => seen.iter().find_map(|(slot, role)| match slot {
                Slot::Player(seat) if *role == Role::Werewolf => {
                    public_info.players.get(*seat).cloned()
                }
                _ => None,
            }),
            _ => None,
        })
}

fn pick_vote(
    private_info: &PrivateInfo,
    public_info: &PublicInfo,
    candidates: &[String],
) -> Result<String, StrategyError> {
    let pack: Vec<&String> = private_info
        .night_knowledge
        .iter()
        .flat_map(|record| match &record.observation {
            Observation::Werewolves(names) => names.iter().collect(),
            _ => vec![],
        })
        .collect();

    let choice = if private_info.original_role.is_werewolf() {
        candidates.iter().find(|c| !pack.contains(c))
    } else {
        known_werewolf(private_info, public_info)
            .and_then(|name| candidates.iter().find(|c| **c == name))
    };
    choice
        .or_else(|| candidates.first())
        .cloned()
        .ok_or_else(|| StrategyError::Exhausted("an empty ballot".to_string()))
}
