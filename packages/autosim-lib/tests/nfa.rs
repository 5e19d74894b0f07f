use autosim_lib::{
    automaton::{AutomatonBuilder, TransitionLabel, error::AutomatonError},
    config::SimulatorConfig,
    simulator::{Simulator, StatePath, TraceStep, Verdict, nfa::NfaRun},
};

fn symbol(s: &str) -> TransitionLabel {
    TransitionLabel::from_symbol(s)
}

fn tokens(input: &str) -> Vec<String> {
    input.chars().map(|c| c.to_string()).collect()
}

fn path(states: &[u32]) -> StatePath {
    StatePath {
        states: states.to_vec(),
    }
}

#[test]
fn test_closure_pulls_epsilon_states_into_the_start_configuration() {
    // q0 -ε-> q1 -a-> q2, with q2 final
    let mut builder = AutomatonBuilder::new(3, vec!["a".into()], 0, &[2], false).unwrap();
    builder
        .add_transition(0, TransitionLabel::Epsilon, &[1])
        .unwrap();
    builder.add_transition(1, symbol("a"), &[2]).unwrap();
    let automaton = builder.build();

    let result = NfaRun::new(&automaton, tokens("a")).run(None);

    assert_eq!(result.verdict, Verdict::Accepted);
    // the epsilon hop shows up in the path because q1 read the symbol
    assert_eq!(result.paths, vec![path(&[0, 1, 2])]);
    assert_eq!(
        result.trace,
        vec![TraceStep {
            from: 1,
            symbol: "a".into(),
            to: Some(2)
        }]
    );
}

#[test]
fn test_dead_branches_are_explored_but_produce_no_path() {
    // q0 -a-> q1, q0 -a-> q2, q1 -a-> q2, with q2 final; on "aa" the
    // branch through q0 -a-> q2 dies with no second 'a' to read
    let mut builder = AutomatonBuilder::new(3, vec!["a".into()], 0, &[2], false).unwrap();
    builder.add_transition(0, symbol("a"), &[1, 2]).unwrap();
    builder.add_transition(1, symbol("a"), &[2]).unwrap();
    let automaton = builder.build();

    let result = NfaRun::new(&automaton, tokens("aa")).run(None);

    assert_eq!(result.verdict, Verdict::Accepted);
    assert_eq!(result.paths, vec![path(&[0, 1, 2])]);
    assert_eq!(
        result.trace,
        vec![
            TraceStep {
                from: 0,
                symbol: "a".into(),
                to: Some(1)
            },
            TraceStep {
                from: 1,
                symbol: "a".into(),
                to: Some(2)
            },
            TraceStep {
                from: 0,
                symbol: "a".into(),
                to: Some(2)
            },
        ]
    );
}

#[test]
fn test_every_accepting_path_is_reported() {
    let mut builder = AutomatonBuilder::new(3, vec!["a".into()], 0, &[1, 2], false).unwrap();
    builder.add_transition(0, symbol("a"), &[1, 2]).unwrap();
    let automaton = builder.build();

    let result = NfaRun::new(&automaton, tokens("a")).run(None);

    assert_eq!(result.verdict, Verdict::Accepted);
    assert_eq!(result.paths, vec![path(&[0, 1]), path(&[0, 2])]);
}

#[test]
fn test_epsilon_cycle_terminates() {
    // q0 -ε-> q1 -ε-> q0, with q1 final
    let mut builder = AutomatonBuilder::new(2, vec!["a".into()], 0, &[1], false).unwrap();
    builder
        .add_transition(0, TransitionLabel::Epsilon, &[1])
        .unwrap();
    builder
        .add_transition(1, TransitionLabel::Epsilon, &[0])
        .unwrap();
    let automaton = builder.build();

    let result = NfaRun::new(&automaton, vec![]).run(None);

    // the closure of the start configuration already contains q1
    assert_eq!(result.verdict, Verdict::Accepted);
    assert_eq!(result.paths, vec![path(&[0])]);
    assert!(result.trace.is_empty());
}

#[test]
fn test_no_surviving_branch_rejects() {
    let mut builder =
        AutomatonBuilder::new(2, vec!["a".into(), "b".into()], 0, &[1], false).unwrap();
    builder.add_transition(0, symbol("a"), &[1]).unwrap();
    let automaton = builder.build();

    let result = NfaRun::new(&automaton, tokens("b")).run(None);

    assert_eq!(result.verdict, Verdict::Rejected);
    assert!(result.paths.is_empty());
    assert!(result.trace.is_empty());
}

#[test]
fn test_whitespace_consumes_an_explicit_epsilon_transition() {
    // q0 -a-> q1 -ε-> q2 -a-> q3, with q3 final
    let mut builder = AutomatonBuilder::new(4, vec!["a".into()], 0, &[3], false).unwrap();
    builder.add_transition(0, symbol("a"), &[1]).unwrap();
    builder
        .add_transition(1, TransitionLabel::Epsilon, &[2])
        .unwrap();
    builder.add_transition(2, symbol("a"), &[3]).unwrap();
    let automaton = builder.build();

    let config = SimulatorConfig::default();
    let result = Simulator::new(&automaton, &config, None)
        .simulate("a a")
        .unwrap();

    assert_eq!(result.verdict, Verdict::Accepted);
    assert_eq!(result.paths, vec![path(&[0, 1, 2, 3])]);
}

#[test]
fn test_whitespace_rewriting_can_be_disabled() {
    let mut builder = AutomatonBuilder::new(2, vec!["a".into()], 0, &[1], false).unwrap();
    builder.add_transition(0, symbol("a"), &[1]).unwrap();
    let automaton = builder.build();

    let config = SimulatorConfig {
        whitespace_as_epsilon: false,
        ..SimulatorConfig::default()
    };

    let result = Simulator::new(&automaton, &config, None).simulate("a a");

    assert_eq!(
        result.unwrap_err(),
        AutomatonError::InvalidSymbol { symbol: " ".into() }
    );
}

#[test]
fn test_explicit_epsilon_token_in_the_input() {
    // q0 -ε-> q1, with q1 final; the typed ε token reads the epsilon edge
    let mut builder = AutomatonBuilder::new(2, vec!["a".into()], 0, &[1], false).unwrap();
    builder
        .add_transition(0, TransitionLabel::Epsilon, &[1])
        .unwrap();
    let automaton = builder.build();

    let config = SimulatorConfig::default();
    let result = Simulator::new(&automaton, &config, None)
        .simulate("ε")
        .unwrap();

    assert_eq!(result.verdict, Verdict::Accepted);
    assert_eq!(result.paths, vec![path(&[0, 1])]);
    assert_eq!(
        result.trace,
        vec![TraceStep {
            from: 0,
            symbol: "ε".into(),
            to: Some(1)
        }]
    );
}

#[test]
fn test_epsilon_token_is_invalid_for_deterministic_automata() {
    let mut builder = AutomatonBuilder::new(2, vec!["a".into()], 0, &[1], true).unwrap();
    builder.add_transition(0, symbol("a"), &[1]).unwrap();
    let automaton = builder.build();

    let config = SimulatorConfig::default();
    let result = Simulator::new(&automaton, &config, None).simulate("ε");

    assert_eq!(
        result.unwrap_err(),
        AutomatonError::InvalidSymbol { symbol: "ε".into() }
    );
}
