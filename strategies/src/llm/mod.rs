mod client;
mod prompts;

use std::{cmp::Reverse, sync::Arc};

use itertools::Itertools;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use regex::Regex;
use types::{
    Decision, NightAction, PrivateInfo, PublicInfo, Role, Strategy, StrategyError, Temperatures,
};

pub use client::{
    ChatCompletion, ChatMessage, ChatRole, LlmClient, LlmConfig, LlmError, DEFAULT_MODEL,
    OPENROUTER_BASE_URL,
};
pub use prompts::PromptManager;

/// A seat played by a chat model. Night choices are made locally with fixed
/// odds; only the day needs the model.
#[derive(Debug)]
pub struct LlmStrategy<C: ChatCompletion = LlmClient> {
    client: C,
    prompts: Arc<PromptManager>,
    temperatures: Temperatures,
    rng: StdRng,
}

impl<C: ChatCompletion + std::fmt::Debug> LlmStrategy<C> {
    pub fn new(
        client: C,
        prompts: Arc<PromptManager>,
        temperatures: Temperatures,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            client,
            prompts,
            temperatures,
            rng,
        }
    }

    /// Context shared by every day decision, then the decision prompt itself.
    pub fn build_messages(
        &self,
        private_info: &PrivateInfo,
        public_info: &PublicInfo,
        decision: &Decision,
    ) -> Vec<ChatMessage> {
        let mut messages = vec![
            ChatMessage::system(self.prompts.game_context(
                &private_info.name,
                &public_info.players,
                &public_info.role_pool,
            )),
            ChatMessage::system(self.prompts.role_prompt(private_info.original_role)),
        ];
        if !private_info.night_knowledge.is_empty() {
            messages.push(ChatMessage::system(format!(
                "Your night action: {}",
                private_info
                    .night_knowledge
                    .iter()
                    .map(|record| record.description.as_str())
                    .join(" ")
            )));
        }
        messages.extend(
            public_info
                .transcript
                .iter()
                .map(|utterance| ChatMessage::assistant(utterance.to_string())),
        );

        let prompt = match decision {
            Decision::Discuss {
                round,
                total_rounds,
                position,
            } => self
                .prompts
                .response_prompt(&private_info.name, *round, *total_rounds, *position),
            Decision::Vote { candidates } => self.prompts.vote_prompt(candidates),
            Decision::Revote {
                candidates,
                tied,
                previous,
            } => self.prompts.tie_vote_prompt(tied, previous, candidates),
        };
        messages.push(ChatMessage::user(prompt));
        messages
    }
}

impl<C: ChatCompletion + std::fmt::Debug> Strategy for LlmStrategy<C> {
    fn select_night_action(
        &mut self,
        private_info: &PrivateInfo,
        _public_info: &PublicInfo,
        available_actions: &[NightAction],
    ) -> NightAction {
        weighted_night_action(private_info.original_role, available_actions, &mut self.rng)
    }

    fn generate(
        &mut self,
        private_info: &PrivateInfo,
        public_info: &PublicInfo,
        decision: &Decision,
    ) -> Result<String, StrategyError> {
        let messages = self.build_messages(private_info, public_info, decision);
        let temperature = match decision {
            Decision::Discuss { .. } => self.temperatures.conversation,
            Decision::Vote { .. } | Decision::Revote { .. } => self.temperatures.voting,
        };
        log::debug!(
            "Prompting for {} with {} messages",
            private_info.name,
            messages.len()
        );
        let reply = self.client.complete(&messages, temperature)?;
        Ok(match decision.candidates() {
            Some(candidates) => extract_vote(&reply, candidates),
            None => reply,
        })
    }
}

/// Seer looks at a player half the time, Robber robs four times in five,
/// Troublemaker swaps half the time, a lone Werewolf peeks at a random center
/// card.
pub fn weighted_night_action<R: Rng + ?Sized>(
    role: Role,
    available_actions: &[NightAction],
    rng: &mut R,
) -> NightAction {
    let pick = |rng: &mut R, wanted: fn(&NightAction) -> bool| {
        let matching: Vec<NightAction> = available_actions
            .iter()
            .copied()
            .filter(|action| wanted(action))
            .collect();
        matching.choose(rng).copied()
    };
    let is_pass: fn(&NightAction) -> bool = |action| *action == NightAction::Pass;

    let chosen = match role {
        Role::Werewolf => pick(rng, |action| *action == NightAction::RecognizePack)
            .or_else(|| pick(rng, |action| matches!(action, NightAction::ViewCenter { .. }))),
        Role::Seer => {
            if rng.gen_bool(0.5) {
                pick(rng, |action| matches!(action, NightAction::ViewPlayer { .. }))
            } else {
                pick(rng, |action| {
                    matches!(action, NightAction::ViewCenterPair { .. })
                })
            }
        }
        Role::Robber => {
            if rng.gen_bool(0.8) {
                pick(rng, |action| matches!(action, NightAction::Rob { .. }))
            } else {
                pick(rng, is_pass)
            }
        }
        Role::Troublemaker => {
            if rng.gen_bool(0.5) {
                pick(rng, |action| matches!(action, NightAction::SwapPlayers { .. }))
            } else {
                pick(rng, is_pass)
            }
        }
        Role::Villager => pick(rng, is_pass),
    };
    chosen
        .or_else(|| available_actions.first().copied())
        .unwrap_or(NightAction::Pass)
}

/// Pulls a candidate name out of a model's vote reply. Quotes and periods are
/// dropped; a sentence resolves to the candidate it names first. Anything else
/// comes back as cleaned text for the game to reject.
pub fn extract_vote(reply: &str, candidates: &[String]) -> String {
    let cleaned = reply
        .trim()
        .replace(['\'', '"', '.'], "")
        .trim()
        .to_string();
    if let Some(exact) = candidates
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(&cleaned))
    {
        return exact.clone();
    }
    if cleaned.contains(char::is_whitespace) {
        // whole-word matches only, the longest name wins at a shared start
        if let Some((_, _, named)) = candidates
            .iter()
            .filter_map(|candidate| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(candidate));
                let found = Regex::new(&pattern).ok()?.find(&cleaned)?;
                Some((found.start(), Reverse(candidate.len()), candidate))
            })
            .min_by_key(|(at, longer, _)| (*at, *longer))
        {
            return named.clone();
        }
    }
    cleaned
}
