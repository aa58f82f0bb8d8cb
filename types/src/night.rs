use itertools::Itertools;

use crate::{
    action::{NightAction, NightActionRecord, Observation},
    assignment::Slot,
    error::GameError,
    event::{EventSink, GameEvent},
    game_state::{GameState, Phase},
    Role,
};

impl GameState {
    pub fn begin_night(&mut self) -> Result<(), GameError> {
        self.enter(Phase::Night)
    }

    /// Wakes every role in [`Role::NIGHT_ORDER`]. Each player dealt the role acts
    /// once, in seat order; roles nobody was dealt are skipped.
    pub fn run_night_phase(&mut self, sink: &mut dyn EventSink) -> Result<(), GameError> {
        self.begin_night()?;
        sink.emit(&GameEvent::PhaseStarted(Phase::Night));

        for role in Role::NIGHT_ORDER {
            let seats = self.seats_dealt(role);
            if seats.is_empty() {
                log::debug!("No player was dealt {role}, skipping");
                continue;
            }
            for seat in seats {
                let available_actions = self.permitted_night_actions(seat);
                let private_info = self.private_info(seat)?;
                let public_info = self.public_info();
                let player = &mut self.table[seat];
                let action = player.strategy.select_night_action(
                    &private_info,
                    &public_info,
                    &available_actions,
                );
                let record = self.perform_night_action(seat, action)?;
                sink.emit(&GameEvent::NightAction(record));
            }
        }
        Ok(())
    }

    fn seats_dealt(&self, role: Role) -> Vec<usize> {
        self.table
            .iter()
            .filter(|p| p.state.original_role == role)
            .map(|p| p.state.seat)
            .collect()
    }

    /// Choices open to the player at `seat`, decided by the card they were dealt.
    pub fn permitted_night_actions(&self, seat: usize) -> Vec<NightAction> {
        let Some(player) = self.table.get(seat) else {
            return vec![];
        };
        let others: Vec<usize> = (0..self.table.len()).filter(|&s| s != seat).collect();
        let center = self.assignment.center_roles().len();

        let actions = match player.state.original_role {
            Role::Werewolf => {
                if self.seats_dealt(Role::Werewolf).len() > 1 {
                    vec![NightAction::RecognizePack]
                } else {
                    (0..center)
                        .map(|index| NightAction::ViewCenter { index })
                        .collect()
                }
            }
            Role::Seer => others
                .iter()
                .map(|&target| NightAction::ViewPlayer { target })
                .chain(
                    (0..center)
                        .tuple_combinations()
                        .map(|(first, second)| NightAction::ViewCenterPair { first, second }),
                )
                .collect(),
            Role::Robber => others
                .iter()
                .map(|&target| NightAction::Rob { target })
                .chain(std::iter::once(NightAction::Pass))
                .collect(),
            Role::Troublemaker => others
                .iter()
                .tuple_combinations()
                .map(|(&first, &second)| NightAction::SwapPlayers { first, second })
                .chain(std::iter::once(NightAction::Pass))
                .collect(),
            Role::Villager => vec![NightAction::Pass],
        };
        log::debug!(
            "Available night actions for {}: {actions:?}",
            player.state.name
        );
        actions
    }

    /// Resolves one action against the current assignment and appends its record.
    pub fn perform_night_action(
        &mut self,
        seat: usize,
        action: NightAction,
    ) -> Result<NightActionRecord, GameError> {
        if self.phase != Phase::Night {
            return Err(GameError::PhaseOrder {
                current: self.phase,
                requested: Phase::Night,
            });
        }
        let state = &self
            .table
            .get(seat)
            .ok_or(GameError::Invariant {
                slot: Slot::Player(seat),
            })?
            .state;
        let actor = state.name.clone();
        let role = state.original_role;
        if !self.permitted_night_actions(seat).contains(&action) {
            return Err(GameError::IllegalAction { actor, action });
        }

        let names = self.names();
        let observation = match action {
            NightAction::RecognizePack => Observation::Werewolves(
                self.seats_dealt(Role::Werewolf)
                    .into_iter()
                    .filter(|&s| s != seat)
                    .map(|s| names[s].clone())
                    .collect(),
            ),
            NightAction::ViewCenter { index } => {
                let slot = Slot::Center(index);
                Observation::Saw(vec![(slot, self.assignment.get(slot)?)])
            }
            NightAction::ViewPlayer { target } => {
                let slot = Slot::Player(target);
                Observation::Saw(vec![(slot, self.assignment.get(slot)?)])
            }
            NightAction::ViewCenterPair { first, second } => Observation::Saw(vec![
                (Slot::Center(first), self.assignment.get(Slot::Center(first))?),
                (Slot::Center(second), self.assignment.get(Slot::Center(second))?),
            ]),
            NightAction::Rob { target } => {
                self.assignment
                    .swap(Slot::Player(seat), Slot::Player(target))?;
                Observation::Became(self.assignment.get(Slot::Player(seat))?)
            }
            NightAction::SwapPlayers { first, second } => {
                self.assignment
                    .swap(Slot::Player(first), Slot::Player(second))?;
                Observation::Swapped {
                    first: names[first].clone(),
                    second: names[second].clone(),
                }
            }
            NightAction::Pass => Observation::Nothing,
        };

        let record = NightActionRecord::new(&actor, seat, role, action, observation, &names);
        log::debug!("{actor} ({role}) did: {action}");
        log::debug!("{record}");
        self.night_log.push(record.clone());
        Ok(record)
    }
}
