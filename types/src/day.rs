use rand::seq::SliceRandom;

use crate::{
    error::GameError,
    event::{EventSink, GameEvent},
    game_state::{GameState, Phase},
    player::Decision,
    voting::{resolve_vote, Ballot, VoteOutcome, VoteTally, VotingRound},
    Utterance,
};

impl GameState {
    /// Runs every discussion round. Each living player speaks once per round and
    /// sees everything said before them.
    pub fn run_day_phase(&mut self, sink: &mut dyn EventSink) -> Result<(), GameError> {
        self.enter(Phase::Day)?;
        sink.emit(&GameEvent::PhaseStarted(Phase::Day));

        let total_rounds = self.config.conversation_rounds;
        for round in 1..=total_rounds {
            log::debug!("Discussion Round {round}/{total_rounds}");
            sink.emit(&GameEvent::DiscussionRound {
                round,
                total_rounds,
            });
            for (idx, seat) in self.speaking_order().into_iter().enumerate() {
                let decision = Decision::Discuss {
                    round,
                    total_rounds,
                    position: idx + 1,
                };
                let raw = self.ask(seat, &decision)?;
                let speaker = self.table[seat].state.name.clone();
                let utterance = Utterance {
                    round,
                    text: clean_utterance(&raw, &speaker, &self.names()),
                    speaker,
                };
                log::debug!("{utterance}");
                self.transcript.push(utterance.clone());
                sink.emit(&GameEvent::Utterance(utterance));
            }
        }
        Ok(())
    }

    fn speaking_order(&mut self) -> Vec<usize> {
        let mut order = self.living_seats();
        if self.config.shuffle_speaking_order {
            order.shuffle(&mut self.rng);
        }
        order
    }

    /// Collects one ballot per living player. A tie gets exactly one revote among
    /// the tied players; a second tie eliminates nobody.
    pub fn run_voting_phase(&mut self, sink: &mut dyn EventSink) -> Result<Option<String>, GameError> {
        self.enter(Phase::Voting)?;
        sink.emit(&GameEvent::PhaseStarted(Phase::Voting));

        let living: Vec<String> = self
            .living_seats()
            .into_iter()
            .map(|seat| self.table[seat].state.name.clone())
            .collect();

        let first = self.collect_votes(&living, None, sink)?;
        let outcome = match first.tally.outcome() {
            VoteOutcome::Tie(tied) => {
                log::debug!("It's a tie between {tied:?}, additional voting round required");
                sink.emit(&GameEvent::Tie {
                    candidates: tied.clone(),
                });
                let second = self.collect_votes(&tied, Some(&first.tally), sink)?;
                second.tally.outcome()
            }
            outcome => outcome,
        };

        let eliminated = match outcome {
            VoteOutcome::Eliminated(name) => Some(name),
            VoteOutcome::Tie(tied) => {
                log::info!("Still tied between {tied:?}, nobody is eliminated");
                None
            }
            VoteOutcome::NoVotes => {
                log::warn!("No valid votes were cast, nobody is eliminated");
                None
            }
        };
        self.eliminated = eliminated.as_deref().and_then(|name| self.seat_of(name));
        if let Some(seat) = self.eliminated {
            self.table[seat].state.alive = false;
        }
        sink.emit(&GameEvent::Eliminated(eliminated.clone()));
        Ok(eliminated)
    }

    fn collect_votes(
        &mut self,
        candidates: &[String],
        previous: Option<&VoteTally>,
        sink: &mut dyn EventSink,
    ) -> Result<VotingRound, GameError> {
        for player in self.table.iter_mut() {
            player.state.vote = None;
        }

        let mut ballots = Vec::with_capacity(self.table.len());
        for seat in self.living_seats() {
            let voter = self.table[seat].state.name.clone();
            let eligible: Vec<String> = candidates
                .iter()
                .filter(|&candidate| *candidate != voter)
                .cloned()
                .collect();
            if eligible.is_empty() {
                continue;
            }
            let decision = match previous {
                None => Decision::Vote {
                    candidates: eligible.clone(),
                },
                Some(tally) => Decision::Revote {
                    candidates: eligible.clone(),
                    tied: candidates.to_vec(),
                    previous: tally.clone(),
                },
            };
            let raw = self.ask(seat, &decision)?;
            let target = resolve_vote(&raw, &eligible);
            match &target {
                Some(target) => log::debug!("{voter} voted for {target}"),
                None => {
                    log::warn!("Invalid vote from {voter}: {raw:?}");
                    sink.emit(&GameEvent::InvalidVote {
                        voter: voter.clone(),
                        raw: raw.clone(),
                    });
                }
            }
            self.table[seat].state.vote = target.clone();
            ballots.push(Ballot { voter, target, raw });
        }

        let round = VotingRound {
            revote: previous.is_some(),
            candidates: candidates.to_vec(),
            tally: VoteTally::from_ballots(candidates, &ballots),
            ballots,
        };
        log::debug!("Vote count: {}", round.tally);
        self.voting_rounds.push(round.clone());
        sink.emit(&GameEvent::VotingRound(round.clone()));
        Ok(round)
    }
}

/// Drops a leading "Name: " echo the agent may have copied from the transcript
/// format, including a doubled one.
pub fn clean_utterance(raw: &str, speaker: &str, names: &[String]) -> String {
    let mut text = raw.trim();
    let own_prefix = format!("{speaker}:");
    if let Some(rest) = text.strip_prefix(own_prefix.as_str()) {
        text = rest.trim_start();
        for name in names {
            if let Some(rest) = text.strip_prefix(format!("{name}:").as_str()) {
                text = rest.trim_start();
                break;
            }
        }
    }
    text.trim().to_string()
}
