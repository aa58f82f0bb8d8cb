pub mod config;
pub mod error;
pub mod log_sink;

use std::{thread::sleep, time::Duration};

use transcript::{GameHandle, GameMetadata, TranscriptRecord, TranscriptWriter};
use types::{EventSink, GameError, GameEvent, GameResult, GameState};

pub use config::SimulationConfig;
pub use error::SimulationError;
pub use log_sink::LogSink;

/// Forwards every event to the chat surface and the transcript. Transcript
/// failures are logged and otherwise ignored.
struct RecordingSink<'a> {
    inner: &'a mut dyn EventSink,
    recorder: &'a mut dyn TranscriptWriter,
    handle: Option<GameHandle>,
    delay: Option<Duration>,
}

impl EventSink for RecordingSink<'_> {
    fn emit(&mut self, event: &GameEvent) {
        self.inner.emit(event);

        if let Some(handle) = self.handle {
            let written = match event {
                GameEvent::GameOver(result) => self.recorder.finish_game(handle, result),
                event => match TranscriptRecord::from_event(event) {
                    Some(record) => self.recorder.record(handle, &record),
                    None => Ok(()),
                },
            };
            if let Err(err) = written {
                log::warn!("Failed to write transcript: {err}");
            }
        }

        if let (GameEvent::Utterance(_), Some(delay)) = (event, self.delay) {
            sleep(delay);
        }
    }
}

/// Plays one game from the deal to the verdict. The game must not have
/// started yet. A game that fails part way still has its transcript closed.
pub fn run_game(
    game_state: &mut GameState,
    delay_ms: Option<u64>,
    sink: &mut dyn EventSink,
    recorder: &mut dyn TranscriptWriter,
) -> Result<GameResult, GameError> {
    log::debug!("{game_state}");
    let handle = match recorder.start_game(GameMetadata::from_game(game_state)) {
        Ok(handle) => Some(handle),
        Err(err) => {
            log::warn!("Failed to start transcript, continuing without one: {err}");
            None
        }
    };
    let mut sink = RecordingSink {
        inner: sink,
        recorder,
        handle,
        delay: delay_ms.map(Duration::from_millis),
    };

    let outcome = play(game_state, &mut sink);
    if let (Err(err), Some(handle)) = (&outcome, sink.handle) {
        if let Err(write_err) = sink.recorder.abort_game(handle, &err.to_string()) {
            log::warn!("Failed to close transcript: {write_err}");
        }
    }
    log::debug!("{game_state}");
    outcome
}

fn play(game_state: &mut GameState, sink: &mut dyn EventSink) -> Result<GameResult, GameError> {
    game_state.run_night_phase(sink)?;
    game_state.run_day_phase(sink)?;
    game_state.run_voting_phase(sink)?;
    game_state.finish(sink)
}
