/// In this file, we parse the textual pieces of an automaton definition:
/// state tokens (`q0`), comma-separated state lists and alphabets, and
/// single transition entries.
///
/// A transition entry describes one `(state, symbol)` key of the transition
/// table:
/// /// ```
/// /// q0, a -> q1
/// /// q0, ε -> q1, q2
/// /// ```
///
/// Range checking against the declared state count is not done here; the
/// [`AutomatonBuilder`](crate::automaton::AutomatonBuilder) applies it when
/// the entries are recorded.
use hashbrown::HashSet;
use nom::error::ParseError;
use nom::{Parser, bytes::complete::tag};

use crate::automaton::{EPSILON, StateId, TransitionLabel, error::AutomatonError};

fn state<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, StateId, E> {
    let (input, _) = tag("q")(input)?;
    let (input, digits) = nom::character::complete::digit1(input)?;
    let num = digits.parse::<StateId>().map_err(|_| {
        nom::Err::Error(E::from_error_kind(input, nom::error::ErrorKind::Digit))
    })?;
    Ok((input, num))
}

fn opt_whitespace<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, &'a str, E> {
    nom::character::complete::multispace0(input)
}

fn separator<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, (), E> {
    let (input, _) = opt_whitespace(input)?;
    let (input, _) = tag(",")(input)?;
    let (input, _) = opt_whitespace(input)?;
    Ok((input, ()))
}

/// Parses a single state token: `q` followed by one or more digits, nothing
/// else.
pub fn parse_state(text: &str) -> Result<StateId, AutomatonError> {
    let text = text.trim();
    match state::<nom::error::Error<&str>>(text) {
        Ok(("", id)) => Ok(id),
        _ => Err(AutomatonError::Format {
            token: text.to_string(),
        }),
    }
}

#[test]
fn test_parse_state_1() {
    assert_eq!(parse_state("q0").unwrap(), 0);
    assert_eq!(parse_state(" q12 ").unwrap(), 12);
    assert_eq!(parse_state("q007").unwrap(), 7);
}

#[test]
fn test_parse_state_2() {
    assert!(parse_state("p0").is_err());
    assert!(parse_state("q").is_err());
    assert!(parse_state("q1x").is_err());
    assert!(parse_state("q-1").is_err());
    assert!(parse_state("").is_err());
}

/// Parses a comma-separated state list, e.g. `q1, q2`. Empty items are
/// dropped, so a fully empty string is a valid empty list.
pub fn parse_state_list(text: &str) -> Result<Vec<StateId>, AutomatonError> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_state)
        .collect()
}

#[test]
fn test_parse_state_list_1() {
    assert_eq!(parse_state_list("q1,q2").unwrap(), vec![1, 2]);
    assert_eq!(parse_state_list(" q1 , , q2 ").unwrap(), vec![1, 2]);
    assert_eq!(parse_state_list("").unwrap(), Vec::<StateId>::new());
}

#[test]
fn test_parse_state_list_2() {
    assert!(parse_state_list("q1,x2").is_err());
}

/// Splits a comma-separated alphabet declaration. Symbols are free-form
/// tokens; duplicates and empty items are dropped. The reserved `ε` cannot
/// be declared, it is implicit for nondeterministic automata.
pub fn parse_alphabet(text: &str) -> Result<Vec<String>, AutomatonError> {
    let mut seen = HashSet::new();
    let mut alphabet = Vec::new();

    for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if token == EPSILON {
            return Err(AutomatonError::Format {
                token: token.to_string(),
            });
        }
        if seen.insert(token) {
            alphabet.push(token.to_string());
        }
    }

    Ok(alphabet)
}

#[test]
fn test_parse_alphabet_1() {
    assert_eq!(parse_alphabet("a,b").unwrap(), vec!["a", "b"]);
    assert_eq!(parse_alphabet(" a , b , a ,").unwrap(), vec!["a", "b"]);
    assert_eq!(parse_alphabet("").unwrap(), Vec::<String>::new());
}

#[test]
fn test_parse_alphabet_2() {
    assert!(parse_alphabet("a,ε").is_err());
}

/// One parsed transition entry: the `(state, symbol)` key and its targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEntry {
    pub from: StateId,
    pub label: TransitionLabel,
    pub targets: Vec<StateId>,
}

fn transition_entry<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, (StateId, &'a str, Vec<StateId>), E> {
    let (input, from) = state(input)?;
    let (input, _) = separator(input)?;
    let (input, symbol) = nom::bytes::complete::take_until("->").parse(input)?;
    let (input, _) = tag("->")(input)?;
    let (input, _) = opt_whitespace(input)?;
    let (input, targets) = nom::multi::separated_list0(separator, state).parse(input)?;

    Ok((input, (from, symbol.trim(), targets)))
}

/// Parses one transition entry, e.g. `q0, a -> q1` or `q0, ε -> q1, q2`.
/// An empty target list (`q0, a ->`) is permitted; it is a no-op for
/// nondeterministic automata.
pub fn parse_transition(text: &str) -> Result<TransitionEntry, AutomatonError> {
    let text = text.trim();
    match transition_entry::<nom::error::Error<&str>>(text) {
        Ok((rest, (from, symbol, targets))) if rest.trim().is_empty() && !symbol.is_empty() => {
            Ok(TransitionEntry {
                from,
                label: TransitionLabel::from_symbol(symbol),
                targets,
            })
        }
        _ => Err(AutomatonError::Format {
            token: text.to_string(),
        }),
    }
}

#[test]
fn test_parse_transition_1() {
    let entry = parse_transition("q0, a -> q1").unwrap();
    assert_eq!(entry.from, 0);
    assert_eq!(entry.label, TransitionLabel::Symbol("a".into()));
    assert_eq!(entry.targets, vec![1]);
}

#[test]
fn test_parse_transition_2() {
    let entry = parse_transition("q0,ε->q1,q2").unwrap();
    assert_eq!(entry.from, 0);
    assert_eq!(entry.label, TransitionLabel::Epsilon);
    assert_eq!(entry.targets, vec![1, 2]);
}

#[test]
fn test_parse_transition_3() {
    let entry = parse_transition("q3, ab ->").unwrap();
    assert_eq!(entry.from, 3);
    assert_eq!(entry.label, TransitionLabel::Symbol("ab".into()));
    assert!(entry.targets.is_empty());
}

#[test]
fn test_parse_transition_4() {
    assert!(parse_transition("q0, -> q1").is_err());
    assert!(parse_transition("q0 a -> q1").is_err());
    assert!(parse_transition("x0, a -> q1").is_err());
    assert!(parse_transition("q0, a -> q1 q2").is_err());
    assert!(parse_transition("q0, a").is_err());
}
