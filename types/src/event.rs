use crate::{
    action::NightActionRecord, game_state::Phase, outcome::GameResult, voting::VotingRound,
    Utterance,
};

/// Something the chat surface may want to show. Rendering is the receiver's
/// business; the game never waits on it or looks at the result.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    PhaseStarted(Phase),
    NightAction(NightActionRecord),
    DiscussionRound { round: usize, total_rounds: usize },
    Utterance(Utterance),
    InvalidVote { voter: String, raw: String },
    VotingRound(VotingRound),
    Tie { candidates: Vec<String> },
    Eliminated(Option<String>),
    GameOver(GameResult),
}

pub trait EventSink {
    fn emit(&mut self, event: &GameEvent);
}

#[derive(Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&mut self, _event: &GameEvent) {}
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}
