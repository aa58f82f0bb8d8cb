mod common;

use common::{default_strategies, game_with, Scripted};
use itertools::Itertools;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use types::{
    ConfigurationError, GameConfig, GameError, GameState, NightAction, NoopSink, Observation,
    Phase, PrivateInfo, PublicInfo, Role, RoleAssignment, Slot, Strategy,
};

use types::Role::*;

#[test]
fn test_robber_steals_post_swap_role() {
    // seats: 0 Robber, 1 Troublemaker, 2 Werewolf (A), 3 Villager (B), 4 Seer
    let mut game = game_with(
        vec![Robber, Troublemaker, Werewolf, Villager, Seer],
        vec![Villager, Werewolf, Villager],
        default_strategies(5),
    );
    game.begin_night().unwrap();

    game.perform_night_action(1, NightAction::SwapPlayers { first: 2, second: 3 })
        .unwrap();
    let record = game
        .perform_night_action(0, NightAction::Rob { target: 2 })
        .unwrap();

    assert_eq!(record.observation, Observation::Became(Villager));
    assert_eq!(game.current_role(0).unwrap(), Villager);
    assert_eq!(game.current_role(2).unwrap(), Robber);
    assert_eq!(game.current_role(3).unwrap(), Werewolf);
}

#[test]
fn test_werewolf_pack_sees_each_other_only() {
    let mut game = game_with(
        vec![Werewolf, Seer, Werewolf, Villager, Villager],
        vec![Robber, Troublemaker, Villager],
        default_strategies(5),
    );
    game.run_night_phase(&mut NoopSink).unwrap();

    let first = game.private_info(0).unwrap().night_knowledge;
    let second = game.private_info(2).unwrap().night_knowledge;
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(first[0].action, NightAction::RecognizePack);
    assert_eq!(
        first[0].observation,
        Observation::Werewolves(vec!["AI_P3".to_string()])
    );
    assert_eq!(
        second[0].observation,
        Observation::Werewolves(vec!["AI_P1".to_string()])
    );
    // nobody in the pack looks at the center
    assert!(game.night_log.iter().all(|record| !matches!(
        record.action,
        NightAction::ViewCenter { .. }
    )));
}

#[test]
fn test_lone_werewolf_center_view_stays_private() {
    let mut strategies = default_strategies(5);
    strategies[3] = Scripted::night(NightAction::ViewCenter { index: 2 });
    let mut game = game_with(
        vec![Seer, Villager, Robber, Werewolf, Troublemaker],
        vec![Villager, Villager, Werewolf],
        strategies,
    );
    assert_eq!(
        game.permitted_night_actions(3),
        vec![
            NightAction::ViewCenter { index: 0 },
            NightAction::ViewCenter { index: 1 },
            NightAction::ViewCenter { index: 2 },
        ]
    );
    game.run_night_phase(&mut NoopSink).unwrap();

    let wolf = game.private_info(3).unwrap().night_knowledge;
    assert_eq!(
        wolf[0].observation,
        Observation::Saw(vec![(Slot::Center(2), Werewolf)])
    );
    for seat in [0, 1, 2, 4] {
        let knowledge = game.private_info(seat).unwrap().night_knowledge;
        assert!(knowledge.iter().all(|record| record.seat == seat));
        assert!(knowledge
            .iter()
            .all(|record| !matches!(record.action, NightAction::ViewCenter { .. })));
    }
}

#[test]
fn test_roles_resolve_in_night_order_and_absent_roles_are_skipped() {
    // no Seer among the players
    let mut game = game_with(
        vec![Villager, Troublemaker, Robber, Werewolf, Villager],
        vec![Seer, Werewolf, Villager],
        default_strategies(5),
    );
    game.run_night_phase(&mut NoopSink).unwrap();

    let roles: Vec<Role> = game.night_log.iter().map(|r| r.role).collect();
    assert_eq!(
        roles,
        vec![Werewolf, Robber, Troublemaker, Villager, Villager]
    );
    // one record per acting player, villagers in seat order
    let villager_seats: Vec<usize> = game
        .night_log
        .iter()
        .filter(|r| r.role == Villager)
        .map(|r| r.seat)
        .collect();
    assert_eq!(villager_seats, vec![0, 4]);
    assert_eq!(game.phase, Phase::Night);
}

#[test]
fn test_no_werewolves_among_players_produces_no_werewolf_record() {
    let mut game = game_with(
        vec![Villager, Seer, Robber, Troublemaker, Villager],
        vec![Werewolf, Werewolf, Villager],
        default_strategies(5),
    );
    game.run_night_phase(&mut NoopSink).unwrap();
    assert_eq!(game.night_log.len(), 5);
    assert!(game.night_log.iter().all(|r| r.role != Werewolf));
}

#[test]
fn test_illegal_and_out_of_phase_actions_are_rejected() {
    let mut game = game_with(
        vec![Robber, Troublemaker, Werewolf, Villager, Seer],
        vec![Villager, Werewolf, Villager],
        default_strategies(5),
    );
    assert!(matches!(
        game.perform_night_action(0, NightAction::Rob { target: 2 }),
        Err(GameError::PhaseOrder { .. })
    ));

    game.begin_night().unwrap();
    assert!(matches!(
        game.perform_night_action(0, NightAction::Rob { target: 0 }),
        Err(GameError::IllegalAction { .. })
    ));
    assert!(matches!(
        game.perform_night_action(1, NightAction::SwapPlayers { first: 1, second: 2 }),
        Err(GameError::IllegalAction { .. })
    ));
    assert!(matches!(
        game.perform_night_action(0, NightAction::Rob { target: 9 }),
        Err(GameError::IllegalAction { .. })
    ));
    assert!(game.night_log.is_empty());
    assert!(matches!(
        game.begin_night(),
        Err(GameError::PhaseOrder { .. })
    ));
}

#[test]
fn test_private_info_for_unknown_seat_is_an_error() {
    let game = game_with(
        vec![Robber, Troublemaker, Werewolf, Villager, Seer],
        vec![Villager, Werewolf, Villager],
        default_strategies(5),
    );
    assert_eq!(game.private_info(4).unwrap().original_role, Seer);
    assert!(matches!(
        game.private_info(5),
        Err(GameError::Invariant {
            slot: Slot::Player(5)
        })
    ));
}

#[test]
fn test_deal_must_match_configured_roles() {
    let config = GameConfig {
        players: common::names(5),
        ..GameConfig::default()
    };
    let inputs = |n: usize| {
        common::names(n)
            .into_iter()
            .map(|name| (name, Box::new(Scripted::default()) as Box<dyn Strategy>))
            .collect::<Vec<_>>()
    };

    // a third werewolf in place of a villager
    let assignment = RoleAssignment::from_parts(
        vec![Werewolf, Werewolf, Werewolf, Seer, Robber],
        vec![Troublemaker, Villager, Villager],
    )
    .unwrap();
    match GameState::with_assignment(&config, inputs(5), assignment) {
        Err(ConfigurationError::DealMismatch { configured, dealt }) => {
            assert_eq!(configured, Role::default_pool().into_iter().sorted().collect::<Vec<_>>());
            assert_eq!(dealt.iter().filter(|r| r.is_werewolf()).count(), 3);
        }
        other => panic!("Expected a deal mismatch, got {:?}", other.map(|_| ())),
    }

    let assignment = RoleAssignment::from_parts(
        vec![Villager, Werewolf, Seer, Villager, Werewolf],
        vec![Troublemaker, Villager, Robber],
    )
    .unwrap();
    assert!(GameState::with_assignment(&config, inputs(5), assignment).is_ok());
}

#[derive(Debug)]
struct RandomNight(StdRng);

impl Strategy for RandomNight {
    fn select_night_action(
        &mut self,
        _private_info: &PrivateInfo,
        _public_info: &PublicInfo,
        available_actions: &[NightAction],
    ) -> NightAction {
        *available_actions.choose(&mut self.0).unwrap()
    }

    fn generate(
        &mut self,
        _private_info: &PrivateInfo,
        _public_info: &PublicInfo,
        _decision: &types::Decision,
    ) -> Result<String, types::StrategyError> {
        Ok(String::new())
    }
}

#[test]
fn test_night_preserves_role_multiset() {
    let config = GameConfig::default();
    let expected = config.role_pool().unwrap().into_iter().counts();
    for seed in 0..100 {
        let config = GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        };
        let inputs = config
            .players
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let strategy = RandomNight(StdRng::seed_from_u64(seed * 10 + i as u64));
                (name.clone(), Box::new(strategy) as Box<dyn Strategy>)
            })
            .collect();
        let mut game = GameState::new(&config, inputs).unwrap();
        assert_eq!(game.assignment().role_counts(), expected);

        game.run_night_phase(&mut NoopSink).unwrap();

        assert_eq!(game.assignment().role_counts(), expected);
        assert_eq!(game.night_log.len(), config.players.len());
    }
}
