use std::{collections::HashMap, fmt::Display};

use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{error::GameError, ConfigurationError, Role};

pub const CENTER_CARDS: usize = 3;

/// A place a role card can sit: in front of a player, or in the center.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    Player(usize),
    Center(usize),
}

impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Player(seat) => write!(f, "seat {}", seat + 1),
            Slot::Center(idx) => write!(f, "center card {}", idx + 1),
        }
    }
}

/// Current role of every slot. Only ever changed by [`RoleAssignment::swap`],
/// so the multiset of roles is fixed from the deal onwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    players: Vec<Role>,
    center: Vec<Role>,
}

impl RoleAssignment {
    /// Shuffles `pool` and deals the first `num_players` cards to the players,
    /// the rest to the center.
    pub fn deal<R: Rng + ?Sized>(
        num_players: usize,
        pool: &[Role],
        rng: &mut R,
    ) -> Result<Self, ConfigurationError> {
        if num_players == 0 {
            return Err(ConfigurationError::NoPlayers);
        }
        let expected = num_players + CENTER_CARDS;
        if pool.len() != expected {
            return Err(ConfigurationError::PoolSize {
                pool: pool.len(),
                players: num_players,
                expected,
            });
        }

        let mut deck = pool.to_vec();
        deck.shuffle(rng);
        let center = deck.split_off(num_players);
        log::debug!("Dealt {deck:?}, center {center:?}");
        Ok(Self {
            players: deck,
            center,
        })
    }

    /// Builds an assignment from known cards, mostly useful for replaying a deal.
    pub fn from_parts(players: Vec<Role>, center: Vec<Role>) -> Result<Self, ConfigurationError> {
        if players.is_empty() {
            return Err(ConfigurationError::NoPlayers);
        }
        if center.len() != CENTER_CARDS {
            return Err(ConfigurationError::PoolSize {
                pool: players.len() + center.len(),
                players: players.len(),
                expected: players.len() + CENTER_CARDS,
            });
        }
        Ok(Self { players, center })
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn get(&self, slot: Slot) -> Result<Role, GameError> {
        let role = match slot {
            Slot::Player(seat) => self.players.get(seat),
            Slot::Center(idx) => self.center.get(idx),
        };
        role.copied().ok_or(GameError::Invariant { slot })
    }

    /// Exchanges the roles of two slots.
    pub fn swap(&mut self, first: Slot, second: Slot) -> Result<(), GameError> {
        let first_role = self.get(first)?;
        let second_role = self.get(second)?;
        *self.slot_mut(first)? = second_role;
        *self.slot_mut(second)? = first_role;
        Ok(())
    }

    fn slot_mut(&mut self, slot: Slot) -> Result<&mut Role, GameError> {
        match slot {
            Slot::Player(seat) => self.players.get_mut(seat),
            Slot::Center(idx) => self.center.get_mut(idx),
        }
        .ok_or(GameError::Invariant { slot })
    }

    pub fn player_roles(&self) -> &[Role] {
        &self.players
    }

    pub fn center_roles(&self) -> &[Role] {
        &self.center
    }

    pub fn seats_with(&self, role: Role) -> Vec<usize> {
        self.players
            .iter()
            .positions(|&r| r == role)
            .collect()
    }

    pub fn role_counts(&self) -> HashMap<Role, usize> {
        self.players.iter().chain(self.center.iter()).copied().counts()
    }
}
