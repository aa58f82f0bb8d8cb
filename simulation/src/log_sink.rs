use regex::Regex;
use types::{EventSink, GameEvent};

const PLAYER_COLORS: [u8; 6] = [31, 32, 33, 34, 35, 36];

/// Renders the game as a chat log through the `log` facade. Night actions are
/// announced without their contents; the details only go to debug.
#[derive(Debug)]
pub struct LogSink {
    players: Vec<String>,
    mentions: Option<Regex>,
}

impl LogSink {
    pub fn new(players: &[String]) -> Self {
        Self {
            players: players.to_vec(),
            mentions: None,
        }
    }

    /// Player names get a fixed ANSI colour each, wherever they appear.
    pub fn colored(players: &[String]) -> Self {
        let pattern = players
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let mentions = Regex::new(&format!(r"\b(?:{pattern})\b")).ok();
        Self {
            players: players.to_vec(),
            mentions,
        }
    }

    fn paint(&self, text: &str) -> String {
        let Some(mentions) = &self.mentions else {
            return text.to_string();
        };
        mentions
            .replace_all(text, |caps: &regex::Captures| {
                let name = &caps[0];
                let color = self
                    .players
                    .iter()
                    .position(|p| p == name)
                    .map_or(37, |seat| PLAYER_COLORS[seat % PLAYER_COLORS.len()]);
                format!("\u{1b}[1m\u{1b}[{color}m{name}\u{1b}[0m")
            })
            .into_owned()
    }

    pub fn render(&self, event: &GameEvent) -> (log::Level, String) {
        match event {
            GameEvent::PhaseStarted(phase) => (log::Level::Info, format!("=== {phase} ===")),
            GameEvent::NightAction(record) => {
                log::debug!("{record}");
                (
                    log::Level::Info,
                    self.paint(&format!("{} has finished their night action.", record.actor)),
                )
            }
            GameEvent::DiscussionRound {
                round,
                total_rounds,
            } => (
                log::Level::Info,
                format!("--- Discussion Round {round}/{total_rounds} ---"),
            ),
            GameEvent::Utterance(utterance) => (log::Level::Info, self.paint(&utterance.to_string())),
            GameEvent::InvalidVote { voter, raw } => (
                log::Level::Warn,
                self.paint(&format!("{voter} cast an invalid vote ({raw:?}) and abstains.")),
            ),
            GameEvent::VotingRound(round) => {
                for ballot in &round.ballots {
                    if let Some(target) = &ballot.target {
                        log::debug!("{} voted for {target}", ballot.voter);
                    }
                }
                let label = if round.revote { "Revote count" } else { "Vote count" };
                (log::Level::Info, self.paint(&format!("{label}: {}", round.tally)))
            }
            GameEvent::Tie { candidates } => (
                log::Level::Info,
                self.paint(&format!(
                    "It's a tie between {}, additional voting round required.",
                    candidates.join(", ")
                )),
            ),
            GameEvent::Eliminated(Some(name)) => (
                log::Level::Info,
                self.paint(&format!("{name} has been eliminated.")),
            ),
            GameEvent::Eliminated(None) => (log::Level::Info, "Nobody is eliminated.".to_string()),
            GameEvent::GameOver(result) => (log::Level::Info, self.paint(&result.recap())),
        }
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &GameEvent) {
        let (level, line) = self.render(event);
        log::log!(level, "{line}");
    }
}
