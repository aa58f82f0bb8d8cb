use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{voting::VoteTally, Role, Team};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Village,
    Werewolves,
    /// No werewolf among the players, yet somebody was eliminated.
    Nobody,
}

impl Winner {
    pub fn teams(&self) -> Vec<Team> {
        match self {
            Winner::Village => vec![Team::Village],
            Winner::Werewolves => vec![Team::Werewolf],
            Winner::Nobody => vec![],
        }
    }
}

impl Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Village => write!(f, "Village Team Victory!"),
            Winner::Werewolves => write!(f, "Werewolf Team Victory!"),
            Winner::Nobody => write!(f, "Nobody wins!"),
        }
    }
}

/// Teams are decided by the cards players hold after the night.
pub fn determine_winner(ending_roles: &[Role], eliminated: Option<usize>) -> Winner {
    let werewolves_in_play = ending_roles.iter().any(Role::is_werewolf);
    let eliminated_role = eliminated.and_then(|seat| ending_roles.get(seat));

    if !werewolves_in_play {
        return match eliminated_role {
            None => Winner::Village,
            Some(_) => Winner::Nobody,
        };
    }

    match eliminated_role {
        Some(role) if role.is_werewolf() => Winner::Village,
        _ => Winner::Werewolves,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerOutcome {
    pub name: String,
    pub original_role: Role,
    pub ending_role: Role,
    pub team: Team,
    pub votes_received: usize,
    pub won: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Winner,
    pub winning_teams: Vec<Team>,
    pub eliminated: Option<String>,
    pub players: Vec<PlayerOutcome>,
    pub center: Vec<Role>,
    pub tally: VoteTally,
}

impl GameResult {
    pub fn new(
        names: &[String],
        original_roles: &[Role],
        ending_roles: &[Role],
        center: &[Role],
        eliminated: Option<usize>,
        tally: VoteTally,
    ) -> Self {
        let winner = determine_winner(ending_roles, eliminated);
        let winning_teams = winner.teams();
        let players = names
            .iter()
            .zip(original_roles.iter().zip(ending_roles.iter()))
            .map(|(name, (&original_role, &ending_role))| {
                let team = ending_role.team();
                PlayerOutcome {
                    name: name.clone(),
                    original_role,
                    ending_role,
                    team,
                    votes_received: tally.votes_for(name),
                    won: winning_teams.contains(&team),
                }
            })
            .collect();
        Self {
            winner,
            winning_teams,
            eliminated: eliminated.and_then(|seat| names.get(seat).cloned()),
            players,
            center: center.to_vec(),
            tally,
        }
    }

    pub fn winners(&self) -> Vec<&str> {
        self.players
            .iter()
            .filter(|p| p.won)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Plain-text summary in the shape of the voting results log.
    pub fn recap(&self) -> String {
        let mut lines = vec!["Final Vote Count:".to_string()];
        for player in &self.players {
            lines.push(format!(
                "{} (Started as: {}, Ended as: {}): {} vote(s)",
                player.name, player.original_role, player.ending_role, player.votes_received
            ));
        }
        lines.push(format!(
            "Eliminated: {}",
            self.eliminated.as_deref().unwrap_or("nobody")
        ));
        lines.push(String::new());
        lines.push(format!("Game Result: {}", self.winner));
        lines.join("\n")
    }
}

impl Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.recap())
    }
}
