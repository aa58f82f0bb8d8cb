use std::{collections::HashMap, path::Path};

use itertools::Itertools;
use types::{Role, VoteTally};

use super::LlmError;

const GAME_RULE: &str = include_str!("../../prompts/game_rule.txt");
const RESPONSE_RULE: &str = include_str!("../../prompts/response_rule.txt");
const VOTE_RULE: &str = include_str!("../../prompts/vote_rule.txt");
const VOTE_RULE_TIE: &str = include_str!("../../prompts/vote_rule_tie.txt");

const ROBBER_REMINDER: &str = "REMINDER: If you robbed another player's card during the night, \
you saw what role you took. However, the Troublemaker acts after you, so you might have been \
swapped again without knowing it. Pay attention to the discussion to figure out if the \
Troublemaker affected you.";

const TROUBLEMAKER_REMINDER: &str = "REMINDER: If you swapped two players' cards, you don't know \
what roles you swapped, you only know WHO you swapped. Those players don't know they were \
swapped. You cannot swap yourself.";

const DEFAULT_REMINDER: &str = "IMPORTANT: Your role may have changed during the night. The \
Robber might have stolen your card, or the Troublemaker might have swapped you with another \
player. You won't know unless you deduce it from the discussion. Pay attention to conflicting \
claims and try to figure out if you were affected.";

fn role_file(role: Role) -> String {
    format!("{}_role.txt", role.to_string().to_lowercase())
}

fn default_role_prompt(role: Role) -> &'static str {
    match role {
        Role::Werewolf => include_str!("../../prompts/werewolf_role.txt"),
        Role::Seer => include_str!("../../prompts/seer_role.txt"),
        Role::Robber => include_str!("../../prompts/robber_role.txt"),
        Role::Troublemaker => include_str!("../../prompts/troublemaker_role.txt"),
        Role::Villager => include_str!("../../prompts/villager_role.txt"),
    }
}

/// Prompt texts, loaded once and shared by every seat. The built-in texts can
/// be replaced file by file from a directory.
#[derive(Clone, Debug, PartialEq)]
pub struct PromptManager {
    game_rule: String,
    response_rule: String,
    vote_rule: String,
    vote_rule_tie: String,
    roles: HashMap<Role, String>,
}

impl Default for PromptManager {
    fn default() -> Self {
        Self {
            game_rule: GAME_RULE.trim().to_string(),
            response_rule: RESPONSE_RULE.trim().to_string(),
            vote_rule: VOTE_RULE.trim().to_string(),
            vote_rule_tie: VOTE_RULE_TIE.trim().to_string(),
            roles: Role::NIGHT_ORDER
                .iter()
                .map(|&role| (role, default_role_prompt(role).trim().to_string()))
                .collect(),
        }
    }
}

impl PromptManager {
    /// Built-in prompts with any of `game_rule.txt`, `response_rule.txt`,
    /// `vote_rule.txt`, `vote_rule_tie.txt` or `<role>_role.txt` found in
    /// `dir` taking their place.
    pub fn load(dir: &Path) -> Result<Self, LlmError> {
        let mut prompts = Self::default();
        for (file, slot) in [
            ("game_rule.txt", &mut prompts.game_rule),
            ("response_rule.txt", &mut prompts.response_rule),
            ("vote_rule.txt", &mut prompts.vote_rule),
            ("vote_rule_tie.txt", &mut prompts.vote_rule_tie),
        ] {
            if let Some(text) = read_override(&dir.join(file))? {
                *slot = text;
            }
        }
        for role in Role::NIGHT_ORDER {
            if let Some(text) = read_override(&dir.join(role_file(role)))? {
                prompts.roles.insert(role, text);
            }
        }
        Ok(prompts)
    }

    /// Game rules with `{other_players}`, `{card_count}` and `{card_pool}`
    /// filled in from the table, then the seating and who the agent is.
    pub fn game_context(&self, player: &str, players: &[String], role_pool: &[Role]) -> String {
        let card_pool = Role::NIGHT_ORDER
            .iter()
            .filter_map(|&role| {
                let count = role_pool.iter().filter(|&&r| r == role).count();
                (count > 0).then(|| format!("{count} {role}"))
            })
            .join(", ");
        let rules = self
            .game_rule
            .replace("{other_players}", &players.len().saturating_sub(1).to_string())
            .replace("{card_count}", &role_pool.len().to_string())
            .replace("{card_pool}", &card_pool);
        format!(
            "{rules}\n\nThe players at the table are: {}.\n\nYou are {player} in this game.",
            players.iter().join(", ")
        )
    }

    /// The role text for the card a player was dealt, followed by a reminder
    /// that the card may have moved since.
    pub fn role_prompt(&self, role: Role) -> String {
        let reminder = match role {
            Role::Robber => ROBBER_REMINDER,
            Role::Troublemaker => TROUBLEMAKER_REMINDER,
            _ => DEFAULT_REMINDER,
        };
        let text = self.roles.get(&role).map(String::as_str).unwrap_or_default();
        format!("{text}\n\n{reminder}")
    }

    pub fn response_prompt(
        &self,
        player: &str,
        round: usize,
        total_rounds: usize,
        position: usize,
    ) -> String {
        format!(
            "{player}, {}\nPlease note you are now in position {position} in discussion round \
             {round} of {total_rounds} total rounds. Please adjust your strategy accordingly.",
            self.response_rule
        )
    }

    pub fn vote_prompt(&self, candidates: &[String]) -> String {
        format!(
            "{}\nYou may vote for: {}",
            self.vote_rule,
            candidates.iter().join(", ")
        )
    }

    pub fn tie_vote_prompt(
        &self,
        tied: &[String],
        previous: &VoteTally,
        candidates: &[String],
    ) -> String {
        format!(
            "The last round of voting results are: {previous}\nThese players are tied: [{}]\n{}\nYou may vote for: {}",
            tied.iter().join(", "),
            self.vote_rule_tie,
            candidates.iter().join(", ")
        )
    }
}

fn read_override(path: &Path) -> Result<Option<String>, LlmError> {
    if !path.exists() {
        log::debug!("No prompt override at {path:?}, using the built-in text");
        return Ok(None);
    }
    std::fs::read_to_string(path)
        .map(|text| Some(text.trim().to_string()))
        .map_err(|source| LlmError::Prompt {
            path: path.to_path_buf(),
            source,
        })
}
