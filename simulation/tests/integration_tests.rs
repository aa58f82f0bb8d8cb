use simulation::run_game;
use strategies::{DefaultStrategy, RandomStrategy, ScriptedStrategy};
use transcript::{
    BulkTranscriptWriter, GameTranscript, NoopRecorder, StreamLine, StreamingTranscriptWriter,
    TranscriptRecord,
};
use types::{
    GameConfig, GameError, GameEvent, GameState, NoopSink, Phase, Role, RoleAssignment, Strategy,
    StrategyError, Winner,
};

fn config(seed: u64) -> GameConfig {
    GameConfig {
        conversation_rounds: 2,
        seed: Some(seed),
        ..GameConfig::default()
    }
}

fn random_players(config: &GameConfig) -> Vec<(String, Box<dyn Strategy>)> {
    config
        .players
        .iter()
        .enumerate()
        .map(|(seat, name)| {
            let strategy: Box<dyn Strategy> = Box::new(RandomStrategy::with_seed(seat as u64 + 1));
            (name.clone(), strategy)
        })
        .collect()
}

/// The werewolf sits first and the rest of the table votes for them.
fn scripted_game(config: &GameConfig, fail_seat: Option<usize>) -> GameState {
    let players = config
        .players
        .iter()
        .enumerate()
        .map(|(seat, name)| {
            let strategy = if fail_seat == Some(seat) {
                ScriptedStrategy::failing("connection refused")
            } else {
                let vote = if seat == 0 { "AI_P2" } else { "AI_P1" };
                ScriptedStrategy::new()
                    .with_utterances([format!("{name} here."), format!("{name} again.")])
                    .with_votes([vote])
            };
            (name.clone(), Box::new(strategy) as Box<dyn Strategy>)
        })
        .collect();
    let assignment = RoleAssignment::from_parts(
        vec![
            Role::Werewolf,
            Role::Seer,
            Role::Villager,
            Role::Villager,
            Role::Villager,
        ],
        vec![Role::Robber, Role::Troublemaker, Role::Werewolf],
    )
    .expect("Valid assignment");
    GameState::with_assignment(config, players, assignment).expect("Failed to seat players")
}

#[test]
fn test_run_game_with_default_strategies() {
    let config = config(3);
    let players = config
        .players
        .iter()
        .map(|name| {
            (
                name.clone(),
                Box::new(DefaultStrategy::default()) as Box<dyn Strategy>,
            )
        })
        .collect();
    let mut game_state = GameState::new(&config, players).expect("Failed to create game");

    let result = run_game(&mut game_state, None, &mut NoopSink, &mut NoopRecorder)
        .expect("Game failed");

    assert_eq!(game_state.phase, Phase::Ended);
    assert_eq!(game_state.transcript.len(), 5 * 2);
    assert_eq!(result.players.len(), 5);
    assert_eq!(result.center.len(), 3);
}

#[test]
fn test_same_seed_replays_the_same_game() {
    let play = || {
        let config = config(11);
        let mut game_state =
            GameState::new(&config, random_players(&config)).expect("Failed to create game");
        let result = run_game(&mut game_state, None, &mut NoopSink, &mut NoopRecorder)
            .expect("Game failed");
        (
            game_state.night_log.clone(),
            game_state.transcript.clone(),
            result,
        )
    };

    let (night_a, transcript_a, result_a) = play();
    let (night_b, transcript_b, result_b) = play();
    assert_eq!(night_a, night_b);
    assert_eq!(transcript_a, transcript_b);
    assert_eq!(result_a, result_b);
}

#[test]
fn test_scripted_votes_decide_the_game() {
    let config = config(5);
    let mut game_state = scripted_game(&config, None);
    let mut events: Vec<GameEvent> = Vec::new();

    let result =
        run_game(&mut game_state, None, &mut events, &mut NoopRecorder).expect("Game failed");

    assert_eq!(result.eliminated.as_deref(), Some("AI_P1"));
    assert_eq!(result.winner, Winner::Village);
    assert_eq!(game_state.transcript[0].text, "AI_P1 here.");
    assert_eq!(game_state.transcript[5].text, "AI_P1 again.");
    assert!(matches!(events.last(), Some(GameEvent::GameOver(r)) if *r == result));
    assert!(events
        .iter()
        .any(|event| matches!(event, GameEvent::Eliminated(Some(name)) if name == "AI_P1")));
}

#[test]
fn test_bulk_transcript_matches_the_game() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut writer = BulkTranscriptWriter::new(dir.path());
    let config = config(8);
    let mut game_state = scripted_game(&config, None);

    let result =
        run_game(&mut game_state, None, &mut NoopSink, &mut writer).expect("Game failed");

    let transcript =
        GameTranscript::load(&writer.path_for(game_state.id)).expect("Failed to load transcript");
    assert_eq!(transcript.metadata.game_id, game_state.id);
    assert_eq!(transcript.metadata.player_order, config.players);
    assert_eq!(transcript.utterances().count(), game_state.transcript.len());
    assert_eq!(transcript.night_actions().count(), game_state.night_log.len());
    assert_eq!(transcript.result, Some(result));
    assert!(transcript.entries.iter().any(|entry| matches!(
        entry.record,
        TranscriptRecord::PhaseStarted {
            phase: Phase::Voting
        }
    )));
}

#[test]
fn test_streaming_transcript_survives_a_failed_game() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut writer = StreamingTranscriptWriter::new(dir.path());
    let config = config(8);
    let mut game_state = scripted_game(&config, Some(2));

    let err = run_game(&mut game_state, None, &mut NoopSink, &mut writer)
        .expect_err("A failing strategy should end the game");
    match err {
        GameError::Strategy { player, source } => {
            assert_eq!(player, "AI_P3");
            assert!(matches!(source, StrategyError::Provider(_)));
        }
        other => panic!("Unexpected error: {other:?}"),
    }

    let lines =
        StreamLine::read_all(&writer.path_for(game_state.id)).expect("Failed to read stream");
    assert!(matches!(lines.first(), Some(StreamLine::Started(_))));
    assert!(!lines
        .iter()
        .any(|line| matches!(line, StreamLine::Finished { .. })));
    assert!(matches!(
        lines.last(),
        Some(StreamLine::Aborted { reason, .. }) if reason.contains("AI_P3")
    ));
    let spoken = lines
        .iter()
        .filter(|line| {
            matches!(
                line,
                StreamLine::Entry(entry) if matches!(entry.record, TranscriptRecord::Utterance(_))
            )
        })
        .count();
    assert_eq!(spoken, 2);
}

#[test]
fn test_bulk_transcript_keeps_a_failed_game() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut writer = BulkTranscriptWriter::new(dir.path());
    let config = config(8);
    let mut game_state = scripted_game(&config, Some(2));

    assert!(run_game(&mut game_state, None, &mut NoopSink, &mut writer).is_err());

    let transcript =
        GameTranscript::load(&writer.path_for(game_state.id)).expect("Failed to load transcript");
    assert_eq!(transcript.utterances().count(), 2);
    assert_eq!(transcript.result, None);
    assert!(transcript
        .aborted
        .as_deref()
        .is_some_and(|reason| reason.contains("AI_P3")));
}
