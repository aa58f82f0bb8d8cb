use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use itertools::Itertools;
use regex::Regex;
use types::{
    voting::resolve_vote, Decision, NightAction, PrivateInfo, PublicInfo, Strategy, StrategyError,
};

/// A human seat. Night actions are picked by number, utterances and votes
/// are typed on a line of their own.
pub struct InputStrategy<R = BufReader<Stdin>, W = Stdout> {
    input: R,
    output: W,
}

impl<R, W> std::fmt::Debug for InputStrategy<R, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputStrategy").finish_non_exhaustive()
    }
}

impl Default for InputStrategy {
    fn default() -> Self {
        Self {
            input: BufReader::new(io::stdin()),
            output: io::stdout(),
        }
    }
}

impl<R: BufRead, W: Write> InputStrategy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, text: &str) -> io::Result<String> {
        write!(self.output, "{text} >> ")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Input closed before an answer was given",
            ));
        }
        Ok(buf.trim().to_string())
    }

    fn print_table(&mut self, private_info: &PrivateInfo, public_info: &PublicInfo) -> io::Result<()> {
        writeln!(
            self.output,
            "You are {} and were dealt the {} card.",
            private_info.name, private_info.original_role
        )?;
        for record in &private_info.night_knowledge {
            writeln!(self.output, "Your night action: {}", record.description)?;
        }
        for utterance in &public_info.transcript {
            writeln!(self.output, "{utterance}")?;
        }
        Ok(())
    }

    fn read_night_action(&mut self, available_actions: &[NightAction]) -> io::Result<NightAction> {
        for (idx, action) in available_actions.iter().enumerate() {
            writeln!(self.output, "  {}) {action}", idx + 1)?;
        }
        loop {
            let line = self.prompt("Your night action?")?;
            match select_action_from_str(&line, available_actions) {
                Ok(action) => return Ok(action),
                Err(err) => {
                    log::error!("Error parsing night action from stdin: {err}");
                    writeln!(self.output, "{err}")?;
                }
            }
        }
    }

    fn read_vote(&mut self, candidates: &[String]) -> io::Result<String> {
        writeln!(self.output, "Candidates: {}", candidates.iter().join(", "))?;
        loop {
            let line = self.prompt("Who do you vote for?")?;
            match resolve_vote(&line, candidates) {
                Some(name) => return Ok(name),
                None => writeln!(self.output, "{line:?} is not one of the candidates")?,
            }
        }
    }

    fn read_utterance(&mut self, round: usize, total_rounds: usize) -> io::Result<String> {
        loop {
            let line = self.prompt(&format!("Round {round}/{total_rounds}, your turn to speak"))?;
            if !line.is_empty() {
                return Ok(line);
            }
        }
    }
}

impl<R: BufRead, W: Write> Strategy for InputStrategy<R, W> {
    fn select_night_action(
        &mut self,
        private_info: &PrivateInfo,
        public_info: &PublicInfo,
        available_actions: &[NightAction],
    ) -> NightAction {
        // if only one available action, do it
        if let [action] = available_actions {
            log::info!("Only have one action available: {action}");
            return *action;
        }
        let chosen = self
            .print_table(private_info, public_info)
            .and_then(|_| self.read_night_action(available_actions));
        match chosen {
            Ok(action) => action,
            Err(err) => {
                log::error!("Error reading night action, passing instead: {err}");
                available_actions
                    .iter()
                    .copied()
                    .find(|a| *a == NightAction::Pass)
                    .or_else(|| available_actions.first().copied())
                    .unwrap_or(NightAction::Pass)
            }
        }
    }

    fn generate(
        &mut self,
        private_info: &PrivateInfo,
        public_info: &PublicInfo,
        decision: &Decision,
    ) -> Result<String, StrategyError> {
        self.print_table(private_info, public_info)?;
        let answer = match decision {
            Decision::Discuss {
                round,
                total_rounds,
                ..
            } => self.read_utterance(*round, *total_rounds)?,
            Decision::Vote { candidates } => self.read_vote(candidates)?,
            Decision::Revote {
                candidates,
                tied,
                previous,
            } => {
                writeln!(self.output, "Last round: {previous}")?;
                writeln!(self.output, "Tied: {}", tied.iter().join(", "))?;
                self.read_vote(candidates)?
            }
        };
        Ok(answer)
    }
}

fn select_action_from_str(input: &str, actions: &[NightAction]) -> Result<NightAction, String> {
    let input = input.to_lowercase();

    let pass_re = Regex::new(r"^\s*pass\s*$").expect("Valid pass regex");
    if pass_re.is_match(&input) {
        return actions
            .iter()
            .copied()
            .find(|a| *a == NightAction::Pass)
            .ok_or_else(|| "Passing is not a permitted action right now".to_string());
    }

    let number_re = Regex::new(r"^\s*(?<choice>\d+)\s*\)?\s*$").expect("Valid choice regex");
    let Some(caps) = number_re.captures(&input) else {
        return Err(format!("Unable to parse an action number from: {input:?}"));
    };
    let choice: usize = caps["choice"]
        .parse()
        .map_err(|err| format!("Invalid action number: {err}"))?;
    choice
        .checked_sub(1)
        .and_then(|idx| actions.get(idx))
        .copied()
        .ok_or_else(|| format!("Choose a number between 1 and {}", actions.len()))
}
