use std::{error::Error, fmt::Display};

use crate::automaton::{StateId, state_name};

/// The errors that can occur while building an automaton definition or
/// while checking an input string against its alphabet.
///
/// A missing DFA transition is deliberately not an error: it is an ordinary
/// `Rejected` verdict with a no-transition trace entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    /// A state token does not match the `q<digits>` pattern.
    Format { token: String },
    /// A referenced state lies outside the declared `[0, state_count)`.
    Range { state: StateId, state_count: u32 },
    /// An input symbol is not part of the declared alphabet (and not `ε`
    /// for a nondeterministic automaton).
    InvalidSymbol { symbol: String },
}

impl Display for AutomatonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutomatonError::Format { token } => {
                write!(f, "invalid state format: '{token}' (expected format: q0, q1, ...)")
            }
            AutomatonError::Range { state, state_count } => {
                write!(
                    f,
                    "state {} is out of bounds, the definition declares {state_count} state(s)",
                    state_name(*state)
                )
            }
            AutomatonError::InvalidSymbol { symbol } => {
                write!(f, "invalid symbol in input: '{symbol}'")
            }
        }
    }
}

impl Error for AutomatonError {}
