use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub voter: String,
    /// `None` when the answer did not name an eligible candidate.
    pub target: Option<String>,
    pub raw: String,
}

/// Votes per candidate, kept in seat order so ties list players predictably.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub counts: Vec<(String, usize)>,
}

impl VoteTally {
    pub fn from_ballots(candidates: &[String], ballots: &[Ballot]) -> Self {
        let counts = candidates
            .iter()
            .map(|candidate| {
                let votes = ballots
                    .iter()
                    .filter(|ballot| ballot.target.as_ref() == Some(candidate))
                    .count();
                (candidate.clone(), votes)
            })
            .collect();
        Self { counts }
    }

    pub fn votes_for(&self, name: &str) -> usize {
        self.counts
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map_or(0, |(_, votes)| *votes)
    }

    /// Candidates sharing the highest count. Empty when nobody got a vote.
    pub fn leaders(&self) -> Vec<String> {
        let Some(max) = self.counts.iter().map(|(_, votes)| *votes).max() else {
            return vec![];
        };
        if max == 0 {
            return vec![];
        }
        self.counts
            .iter()
            .filter(|(_, votes)| *votes == max)
            .map(|(candidate, _)| candidate.clone())
            .collect()
    }

    pub fn outcome(&self) -> VoteOutcome {
        let mut leaders = self.leaders();
        match leaders.len() {
            0 => VoteOutcome::NoVotes,
            1 => VoteOutcome::Eliminated(leaders.remove(0)),
            _ => VoteOutcome::Tie(leaders),
        }
    }
}

impl Display for VoteTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.counts
                .iter()
                .map(|(candidate, votes)| format!("{candidate}: {votes} vote(s)"))
                .join(", ")
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoteOutcome {
    Eliminated(String),
    Tie(Vec<String>),
    NoVotes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingRound {
    pub revote: bool,
    pub candidates: Vec<String>,
    pub ballots: Vec<Ballot>,
    pub tally: VoteTally,
}

/// Matches a strategy's answer against the eligible names, ignoring case and
/// surrounding whitespace.
pub fn resolve_vote(raw: &str, eligible: &[String]) -> Option<String> {
    let answer = raw.trim();
    eligible
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(answer))
        .cloned()
}
