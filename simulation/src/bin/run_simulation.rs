use std::{error::Error, path::PathBuf, sync::Arc};

use clap::{Parser, ValueEnum};

use simulation::{run_game, LogSink, SimulationConfig, SimulationError};
use strategies::{
    DefaultStrategy, InputStrategy, LlmClient, LlmConfig, LlmStrategy, PromptManager,
    RandomStrategy,
};
use transcript::{NoopRecorder, TranscriptConfig, TranscriptWriter};
use types::{GameConfig, GameState, Strategy};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyKind {
    Llm,
    Random,
    Default,
}

#[derive(Parser, Debug)]
struct Params {
    /// YAML file with `game`, `llm` and `transcript` sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Player names in seating order; repeat once per player
    #[arg(short, long)]
    player: Vec<String>,

    #[arg(short, long)]
    rounds: Option<usize>,

    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = StrategyKind::Llm)]
    strategy: StrategyKind,

    /// Name of a player to be played from stdin
    #[arg(long)]
    human: Option<String>,

    #[arg(long)]
    model: Option<String>,

    #[arg(long)]
    transcript_dir: Option<String>,

    /// Append to a .jsonl file as the game goes instead of writing once at the end
    #[arg(long)]
    streaming: bool,

    #[arg(long)]
    no_transcript: bool,

    #[arg(long)]
    colored: bool,

    #[arg(long)]
    delay_ms: Option<u64>,

    #[arg(short, long, default_value_t = 1)]
    games: usize,
}

fn game_config(args: &Params, file: &SimulationConfig) -> GameConfig {
    let mut config = file.game.clone();
    if !args.player.is_empty() {
        config.players = args.player.clone();
    }
    if let Some(rounds) = args.rounds {
        config.conversation_rounds = rounds;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config
}

fn llm_config(args: &Params, file: &SimulationConfig) -> LlmConfig {
    let mut config = file.llm.clone();
    if let Some(model) = args
        .model
        .clone()
        .or_else(|| std::env::var("DEFAULT_MODEL").ok())
    {
        config.model = model;
    }
    config
}

/// Everything the language-model seats share.
struct LlmParts {
    client: LlmClient,
    prompts: Arc<PromptManager>,
}

fn llm_parts(config: &LlmConfig) -> Result<LlmParts, SimulationError> {
    let client = LlmClient::from_config(config)?;
    let prompts = match &config.prompt_dir {
        Some(dir) => PromptManager::load(dir)?,
        None => PromptManager::default(),
    };
    log::info!("Using model {}", client.model());
    Ok(LlmParts {
        client,
        prompts: Arc::new(prompts),
    })
}

fn seat_seed(seed: Option<u64>, seat: usize) -> Option<u64> {
    seed.map(|seed| seed.wrapping_mul(31).wrapping_add(seat as u64 + 1))
}

fn make_players(
    args: &Params,
    config: &GameConfig,
    llm: Option<&LlmParts>,
) -> Vec<(String, Box<dyn Strategy>)> {
    config
        .players
        .iter()
        .enumerate()
        .map(|(seat, name)| {
            let strategy: Box<dyn Strategy> = if args.human.as_deref() == Some(name.as_str()) {
                Box::new(<InputStrategy>::default())
            } else {
                match (args.strategy, llm) {
                    (StrategyKind::Llm, Some(parts)) => Box::new(LlmStrategy::new(
                        parts.client.clone(),
                        parts.prompts.clone(),
                        config.temperatures,
                        seat_seed(config.seed, seat),
                    )),
                    (StrategyKind::Random, _) | (StrategyKind::Llm, None) => {
                        match seat_seed(config.seed, seat) {
                            Some(seed) => Box::new(RandomStrategy::with_seed(seed)),
                            None => Box::new(RandomStrategy::default()),
                        }
                    }
                    (StrategyKind::Default, _) => Box::new(DefaultStrategy::default()),
                }
            };
            (name.clone(), strategy)
        })
        .collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Params::parse();
    log::info!("args: {args:?}");

    let file = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let base_config = game_config(&args, &file);
    let llm = match args.strategy {
        StrategyKind::Llm => Some(llm_parts(&llm_config(&args, &file))?),
        _ => None,
    };

    let transcript_config = TranscriptConfig::from_cli_or_env_or_yaml(
        args.transcript_dir.clone(),
        file.transcript.dir.clone(),
        args.streaming || file.transcript.streaming,
    );
    let mut recorder: Box<dyn TranscriptWriter> = if args.no_transcript {
        Box::new(NoopRecorder)
    } else {
        transcript_config.create_writer()
    };

    for game in 0..args.games {
        let config = GameConfig {
            seed: base_config.seed.map(|seed| seed.wrapping_add(game as u64)),
            ..base_config.clone()
        };
        let players = make_players(&args, &config, llm.as_ref());
        let mut game_state = GameState::new(&config, players)?;
        let mut sink = if args.colored {
            LogSink::colored(&config.players)
        } else {
            LogSink::new(&config.players)
        };
        let result = run_game(&mut game_state, args.delay_ms, &mut sink, recorder.as_mut())?;
        log::info!(
            "Game {} of {} ({}): {}",
            game + 1,
            args.games,
            game_state.id,
            result.winner
        );
    }
    Ok(())
}
