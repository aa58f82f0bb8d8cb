use std::fmt::Display;

use itertools::Itertools;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    action::NightActionRecord,
    assignment::{RoleAssignment, Slot},
    config::GameConfig,
    error::{ConfigurationError, GameError},
    event::{EventSink, GameEvent},
    outcome::GameResult,
    player::{Decision, Player, Strategy},
    voting::{VoteTally, VotingRound},
    PlayerState, PrivateInfo, PublicInfo, Role, Utterance,
};

/// Stages of a game, in the only order they may run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Night,
    Day,
    Voting,
    Ended,
}

impl Phase {
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Setup => Some(Phase::Night),
            Phase::Night => Some(Phase::Day),
            Phase::Day => Some(Phase::Voting),
            Phase::Voting => Some(Phase::Ended),
            Phase::Ended => None,
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "Role Assignment",
            Phase::Night => "Night Phase",
            Phase::Day => "Day Phase",
            Phase::Voting => "Voting Phase",
            Phase::Ended => "Game Over",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug)]
pub struct GameState {
    pub id: Uuid,
    pub config: GameConfig,
    pub table: Vec<Player>,
    pub phase: Phase,
    pub night_log: Vec<NightActionRecord>,
    pub transcript: Vec<Utterance>,
    pub voting_rounds: Vec<VotingRound>,
    pub eliminated: Option<usize>,
    pub(crate) assignment: RoleAssignment,
    pub(crate) rng: StdRng,
}

impl GameState {
    /// Seats the players in the given order and deals the configured role pool.
    pub fn new(
        config: &GameConfig,
        player_inputs: Vec<(String, Box<dyn Strategy>)>,
    ) -> Result<Self, ConfigurationError> {
        let names: Vec<String> = player_inputs.iter().map(|(name, _)| name.clone()).collect();
        let pool = config.validate(&names)?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let assignment = RoleAssignment::deal(names.len(), &pool, &mut rng)?;
        log::info!(
            "Num players: {:?}, center cards: {:?}",
            names.len(),
            assignment.center_roles().len()
        );
        Ok(Self::seat(config, player_inputs, assignment, rng))
    }

    /// Like [`GameState::new`] but with a deal that has already been made.
    pub fn with_assignment(
        config: &GameConfig,
        player_inputs: Vec<(String, Box<dyn Strategy>)>,
        assignment: RoleAssignment,
    ) -> Result<Self, ConfigurationError> {
        let names: Vec<String> = player_inputs.iter().map(|(name, _)| name.clone()).collect();
        let pool = config.validate(&names)?;
        if assignment.num_players() != names.len() {
            return Err(ConfigurationError::PoolSize {
                pool: assignment.num_players() + assignment.center_roles().len(),
                players: names.len(),
                expected: names.len() + assignment.center_roles().len(),
            });
        }
        if assignment.role_counts() != pool.iter().copied().counts() {
            let dealt = assignment
                .player_roles()
                .iter()
                .chain(assignment.center_roles())
                .copied()
                .sorted()
                .collect();
            return Err(ConfigurationError::DealMismatch {
                configured: pool.into_iter().sorted().collect(),
                dealt,
            });
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::seat(config, player_inputs, assignment, rng))
    }

    fn seat(
        config: &GameConfig,
        player_inputs: Vec<(String, Box<dyn Strategy>)>,
        assignment: RoleAssignment,
        rng: StdRng,
    ) -> Self {
        let table = player_inputs
            .into_iter()
            .zip(assignment.player_roles().iter())
            .enumerate()
            .map(|(seat, ((name, strategy), &role))| Player {
                state: PlayerState::new(name, seat, role),
                strategy,
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            config: config.clone(),
            table,
            phase: Phase::Setup,
            night_log: Vec::new(),
            transcript: Vec::new(),
            voting_rounds: Vec::new(),
            eliminated: None,
            assignment,
            rng,
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.table.iter().map(|p| p.state.name.clone()).collect()
    }

    pub fn seat_of(&self, name: &str) -> Option<usize> {
        self.table.iter().position(|p| p.state.name == name)
    }

    pub fn assignment(&self) -> &RoleAssignment {
        &self.assignment
    }

    pub fn current_role(&self, seat: usize) -> Result<Role, GameError> {
        self.assignment.get(Slot::Player(seat))
    }

    pub fn living_seats(&self) -> Vec<usize> {
        self.table
            .iter()
            .filter(|p| p.state.alive)
            .map(|p| p.state.seat)
            .collect()
    }

    pub fn public_info(&self) -> PublicInfo {
        let mut role_pool: Vec<Role> = self
            .assignment
            .player_roles()
            .iter()
            .chain(self.assignment.center_roles())
            .copied()
            .collect();
        role_pool.sort();
        PublicInfo {
            phase: self.phase,
            players: self.names(),
            conversation_rounds: self.config.conversation_rounds,
            role_pool,
            transcript: self.transcript.clone(),
        }
    }

    /// What the player at `seat` knows: their dealt card and their own night
    /// records, nobody else's.
    pub fn private_info(&self, seat: usize) -> Result<PrivateInfo, GameError> {
        let state = &self
            .table
            .get(seat)
            .ok_or(GameError::Invariant {
                slot: Slot::Player(seat),
            })?
            .state;
        Ok(PrivateInfo {
            name: state.name.clone(),
            seat,
            original_role: state.original_role,
            night_knowledge: self
                .night_log
                .iter()
                .filter(|record| record.seat == seat)
                .cloned()
                .collect(),
        })
    }

    /// Moves to `requested`, which must be the phase directly after the current one.
    pub(crate) fn enter(&mut self, requested: Phase) -> Result<(), GameError> {
        if self.phase.next() != Some(requested) {
            return Err(GameError::PhaseOrder {
                current: self.phase,
                requested,
            });
        }
        log::debug!("{requested}");
        self.phase = requested;
        Ok(())
    }

    pub(crate) fn ask(&mut self, seat: usize, decision: &Decision) -> Result<String, GameError> {
        let private_info = self.private_info(seat)?;
        let public_info = self.public_info();
        let player = &mut self.table[seat];
        log::debug!("Asking {} for {decision:?}", player.state.name);
        player
            .strategy
            .generate(&private_info, &public_info, decision)
            .map_err(|source| GameError::Strategy {
                player: player.state.name.clone(),
                source,
            })
    }

    /// Evaluates the winner from the cards players hold after the night.
    pub fn finish(&mut self, sink: &mut dyn EventSink) -> Result<GameResult, GameError> {
        self.enter(Phase::Ended)?;
        sink.emit(&GameEvent::PhaseStarted(Phase::Ended));

        let original_roles: Vec<Role> = self.table.iter().map(|p| p.state.original_role).collect();
        let tally = self
            .voting_rounds
            .last()
            .map(|round| round.tally.clone())
            .unwrap_or_else(VoteTally::default);
        let result = GameResult::new(
            &self.names(),
            &original_roles,
            self.assignment.player_roles(),
            self.assignment.center_roles(),
            self.eliminated,
            tally,
        );
        log::debug!("Game over: {:?}", result.winner);
        sink.emit(&GameEvent::GameOver(result.clone()));
        Ok(result)
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let players_str = self
            .table
            .iter()
            .map(|player| {
                format!(
                    "{}: dealt {}, holds {}",
                    player.state.name,
                    player.state.original_role,
                    self.assignment.player_roles()[player.state.seat]
                )
            })
            .join("\n");
        let center_str = self.assignment.center_roles().iter().join(", ");
        write!(
            f,
            "\nPhase: {}\nTable:\n{}\nCenter: {}",
            self.phase, players_str, center_str
        )
    }
}
