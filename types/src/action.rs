use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{assignment::Slot, Role};

/// A single night choice. Targets are seat indices or center card indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NightAction {
    /// Werewolves with company open their eyes and see each other.
    RecognizePack,
    /// A lone werewolf peeks at one center card.
    ViewCenter { index: usize },
    ViewPlayer { target: usize },
    ViewCenterPair { first: usize, second: usize },
    Rob { target: usize },
    SwapPlayers { first: usize, second: usize },
    Pass,
}

impl Display for NightAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NightAction::RecognizePack => write!(f, "Look for the other werewolves"),
            NightAction::ViewCenter { index } => write!(f, "View center card {}", index + 1),
            NightAction::ViewPlayer { target } => write!(f, "View the card at seat {}", target + 1),
            NightAction::ViewCenterPair { first, second } => {
                write!(f, "View center cards {} and {}", first + 1, second + 1)
            }
            NightAction::Rob { target } => write!(f, "Rob the card at seat {}", target + 1),
            NightAction::SwapPlayers { first, second } => {
                write!(f, "Swap the cards at seats {} and {}", first + 1, second + 1)
            }
            NightAction::Pass => write!(f, "Do nothing"),
        }
    }
}

/// What the acting player learned from their own action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Observation {
    Werewolves(Vec<String>),
    Saw(Vec<(Slot, Role)>),
    Became(Role),
    Swapped { first: String, second: String },
    Nothing,
}

/// Written once per acting player during the night and never changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightActionRecord {
    pub actor: String,
    pub seat: usize,
    pub role: Role,
    pub action: NightAction,
    pub observation: Observation,
    pub description: String,
}

impl NightActionRecord {
    pub fn new(
        actor: &str,
        seat: usize,
        role: Role,
        action: NightAction,
        observation: Observation,
        names: &[String],
    ) -> Self {
        let description = describe(role, &action, &observation, names);
        Self {
            actor: actor.to_string(),
            seat,
            role,
            action,
            observation,
            description,
        }
    }

    pub fn mutated_assignment(&self) -> bool {
        matches!(
            self.action,
            NightAction::Rob { .. } | NightAction::SwapPlayers { .. }
        )
    }
}

impl Display for NightActionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.actor, self.role, self.description)
    }
}

fn slot_name(slot: &Slot, names: &[String]) -> String {
    match slot {
        Slot::Player(seat) => names
            .get(*seat)
            .map(|name| format!("player {name}"))
            .unwrap_or_else(|| slot.to_string()),
        Slot::Center(_) => slot.to_string(),
    }
}

/// First-person account of a night action, as the player would recall it.
fn describe(role: Role, action: &NightAction, observation: &Observation, names: &[String]) -> String {
    match (action, observation) {
        (NightAction::RecognizePack, Observation::Werewolves(others)) => format!(
            "I have seen that players [{}] are werewolves.",
            others.iter().join(", ")
        ),
        (NightAction::ViewCenter { .. }, Observation::Saw(seen)) => format!(
            "I am the only werewolf. I have seen {}.",
            seen.iter()
                .map(|(slot, role)| format!("{}: {role}", slot_name(slot, names)))
                .join(" and ")
        ),
        (NightAction::ViewPlayer { .. }, Observation::Saw(seen)) => seen
            .iter()
            .map(|(slot, role)| format!("I have seen that {} is a {role}.", slot_name(slot, names)))
            .join(" "),
        (NightAction::ViewCenterPair { .. }, Observation::Saw(seen)) => format!(
            "I have seen the center cards: {}.",
            seen.iter()
                .map(|(slot, role)| format!("{}: {role}", slot_name(slot, names)))
                .join(" and ")
        ),
        (NightAction::Rob { target }, Observation::Became(new_role)) => format!(
            "I swapped roles with {} and now I am a {new_role}.",
            slot_name(&Slot::Player(*target), names)
        ),
        (NightAction::SwapPlayers { .. }, Observation::Swapped { first, second }) => {
            format!("I swapped roles between player {first} and player {second}.")
        }
        (NightAction::Pass, _) => match role {
            Role::Robber => "I had the opportunity to swap but chose not to do anything.".to_string(),
            Role::Troublemaker => {
                "I had the opportunity to swap between players but chose not to do anything."
                    .to_string()
            }
            Role::Villager => "As a villager, I did nothing during the night.".to_string(),
            _ => "I did nothing during the night.".to_string(),
        },
        (action, observation) => format!("{action}: {observation:?}"),
    }
}
