use std::collections::VecDeque;

use types::{Decision, NightAction, PrivateInfo, PublicInfo, Strategy, StrategyError};

/// Deterministic stand-in for an agent: answers from queues set up front.
/// Running out of answers is an error rather than a guess.
#[derive(Debug, Default, Clone)]
pub struct ScriptedStrategy {
    night_action: Option<NightAction>,
    utterances: VecDeque<String>,
    votes: VecDeque<String>,
    failure: Option<String>,
}

impl ScriptedStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Played when permitted, otherwise the first permitted action is used.
    pub fn with_night_action(mut self, action: NightAction) -> Self {
        self.night_action = Some(action);
        self
    }

    pub fn with_utterances<I, S>(mut self, utterances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.utterances.extend(utterances.into_iter().map(Into::into));
        self
    }

    pub fn with_votes<I, S>(mut self, votes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.votes.extend(votes.into_iter().map(Into::into));
        self
    }

    /// Every `generate` call fails with a provider error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }
}

impl Strategy for ScriptedStrategy {
    fn select_night_action(
        &mut self,
        _private_info: &PrivateInfo,
        _public_info: &PublicInfo,
        available_actions: &[NightAction],
    ) -> NightAction {
        match self.night_action {
            Some(action) if available_actions.contains(&action) => action,
            _ => available_actions
                .first()
                .copied()
                .unwrap_or(NightAction::Pass),
        }
    }

    fn generate(
        &mut self,
        private_info: &PrivateInfo,
        _public_info: &PublicInfo,
        decision: &Decision,
    ) -> Result<String, StrategyError> {
        if let Some(message) = &self.failure {
            return Err(StrategyError::Provider(message.clone()));
        }
        let (queue, what) = if decision.is_vote() {
            (&mut self.votes, "a vote")
        } else {
            (&mut self.utterances, "an utterance")
        };
        queue
            .pop_front()
            .ok_or_else(|| StrategyError::Exhausted(format!("{what} from {}", private_info.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Phase, Role};

    fn infos() -> (PrivateInfo, PublicInfo) {
        (
            PrivateInfo {
                name: "AI_P1".to_string(),
                seat: 0,
                original_role: Role::Robber,
                night_knowledge: vec![],
            },
            PublicInfo {
                phase: Phase::Day,
                players: vec!["AI_P1".to_string(), "AI_P2".to_string()],
                conversation_rounds: 1,
                role_pool: vec![],
                transcript: vec![],
            },
        )
    }

    #[test]
    fn test_queues_are_consumed_in_order() {
        let (private, public) = infos();
        let mut strategy = ScriptedStrategy::new()
            .with_utterances(["first", "second"])
            .with_votes(["AI_P2"]);
        let discuss = Decision::Discuss {
            round: 1,
            total_rounds: 1,
            position: 1,
        };
        let vote = Decision::Vote {
            candidates: vec!["AI_P2".to_string()],
        };
        assert_eq!(strategy.generate(&private, &public, &discuss).unwrap(), "first");
        assert_eq!(strategy.generate(&private, &public, &vote).unwrap(), "AI_P2");
        assert_eq!(strategy.generate(&private, &public, &discuss).unwrap(), "second");
        assert!(matches!(
            strategy.generate(&private, &public, &vote),
            Err(StrategyError::Exhausted(_))
        ));
    }

    #[test]
    fn test_unpermitted_night_action_falls_back() {
        let (private, public) = infos();
        let mut strategy =
            ScriptedStrategy::new().with_night_action(NightAction::SwapPlayers { first: 0, second: 1 });
        let actions = [NightAction::Rob { target: 1 }, NightAction::Pass];
        assert_eq!(
            strategy.select_night_action(&private, &public, &actions),
            NightAction::Rob { target: 1 }
        );
    }

    #[test]
    fn test_failing_strategy() {
        let (private, public) = infos();
        let mut strategy = ScriptedStrategy::failing("timeout");
        let err = strategy
            .generate(
                &private,
                &public,
                &Decision::Vote {
                    candidates: vec!["AI_P2".to_string()],
                },
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Completion provider failed: timeout");
    }
}
