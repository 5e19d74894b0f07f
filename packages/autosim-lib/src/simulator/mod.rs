use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    automaton::{Automaton, EPSILON, StateId, error::AutomatonError, state_name},
    config::SimulatorConfig,
    logger::Logger,
};

pub mod dfa;
pub mod nfa;

/// The outcome of a simulation run. The engine always terminates with an
/// answer; conditions like a missing DFA transition or the absence of any
/// accepting NFA path are verdicts, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

impl From<bool> for Verdict {
    fn from(accepted: bool) -> Self {
        if accepted {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Accepted => write!(f, "Accepted"),
            Verdict::Rejected => write!(f, "Rejected"),
        }
    }
}

/// One recorded simulation step.
///
/// `to` is `None` only for the DFA no-transition diagnostic, which rejects
/// the input without consuming further symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub from: StateId,
    pub symbol: String,
    pub to: Option<StateId>,
}

impl Display for TraceStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to {
            Some(to) => write!(
                f,
                "read '{}': {} -> {}",
                self.symbol,
                state_name(self.from),
                state_name(to)
            ),
            None => write!(
                f,
                "no transition for ({}, '{}')",
                state_name(self.from),
                self.symbol
            ),
        }
    }
}

/// One accepting run through the automaton, recorded as the sequence of
/// visited states from the start state to a final state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePath {
    pub states: Vec<StateId>,
}

impl StatePath {
    pub fn new(start: StateId) -> Self {
        StatePath {
            states: vec![start],
        }
    }

    pub fn push(&mut self, state: StateId) {
        self.states.push(state);
    }

    pub fn start(&self) -> StateId {
        self.states[0]
    }

    pub fn end(&self) -> StateId {
        *self.states.last().unwrap()
    }
}

impl Display for StatePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.states.iter().map(|&s| state_name(s)).join(" -> ")
        )
    }
}

/// The full outcome of one simulation run, owned by that run alone.
///
/// A DFA run leaves `paths` empty; its trace is the single execution path.
/// An NFA run records every explored edge in `trace` and one [`StatePath`]
/// per accepting path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub verdict: Verdict,
    pub trace: Vec<TraceStep>,
    pub paths: Vec<StatePath>,
}

impl SimulationResult {
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Tokenizes a raw input string, one symbol per character.
///
/// For nondeterministic runs with `whitespace_as_epsilon` set, space
/// characters are rewritten to `ε` before validation: typing a space is the
/// inline way of consuming an explicit epsilon transition. Note that this
/// also means multi-character alphabet symbols can never be matched in an
/// input string; the input is always read character-wise.
pub fn tokenize_input(raw: &str, deterministic: bool, whitespace_as_epsilon: bool) -> Vec<String> {
    let rewrite = !deterministic && whitespace_as_epsilon;

    raw.trim()
        .chars()
        .map(|c| {
            if rewrite && c == ' ' {
                EPSILON.to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

/// Checks every input token against the declared alphabet. Runs before any
/// simulation step, so an invalid symbol can never abort a run midway. The
/// `ε` token is permitted for nondeterministic automata only.
pub fn validate_input(tokens: &[String], automaton: &Automaton) -> Result<(), AutomatonError> {
    for token in tokens {
        let epsilon = !automaton.is_deterministic() && token == EPSILON;
        if !epsilon && !automaton.alphabet().iter().any(|symbol| symbol == token) {
            return Err(AutomatonError::InvalidSymbol {
                symbol: token.clone(),
            });
        }
    }

    Ok(())
}

/// Runs simulations against a single automaton.
///
/// Holds only borrows: the automaton must not be rebuilt while a run is in
/// flight (single-threaded by design, so this is a documented precondition
/// rather than something enforced with locks).
#[derive(Debug, Clone, Copy)]
pub struct Simulator<'a> {
    automaton: &'a Automaton,
    config: &'a SimulatorConfig,
    logger: Option<&'a Logger>,
}

impl<'a> Simulator<'a> {
    pub fn new(
        automaton: &'a Automaton,
        config: &'a SimulatorConfig,
        logger: Option<&'a Logger>,
    ) -> Self {
        Simulator {
            automaton,
            config,
            logger,
        }
    }

    /// Tokenizes and validates the raw input, then dispatches on the
    /// automaton's determinism flag.
    pub fn simulate(&self, raw_input: &str) -> Result<SimulationResult, AutomatonError> {
        let tokens = tokenize_input(
            raw_input,
            self.automaton.is_deterministic(),
            self.config.whitespace_as_epsilon,
        );
        validate_input(&tokens, self.automaton)?;

        let result = if self.automaton.is_deterministic() {
            dfa::DfaRun::new(self.automaton, tokens).run(self.logger)
        } else {
            nfa::NfaRun::new(self.automaton, tokens).run(self.logger)
        };

        Ok(result)
    }
}
