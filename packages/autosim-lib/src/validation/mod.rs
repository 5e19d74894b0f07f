use itertools::{Itertools, repeat_n};

use crate::{
    automaton::Automaton,
    simulator::{dfa::DfaRun, nfa::NfaRun},
};

/// Checks that the two execution modes agree on one tokenized input: on a
/// deterministic automaton the single-path stepper and the exhaustive path
/// enumeration must return the same verdict.
pub fn same_verdict(automaton: &Automaton, tokens: &[String]) -> bool {
    let dfa = DfaRun::new(automaton, tokens.to_vec()).run(None);
    let nfa = NfaRun::new(automaton, tokens.to_vec()).run(None);

    dfa.verdict == nfa.verdict
}

/// Asserts [`same_verdict`] for every word over the automaton's alphabet up
/// to the given length, empty word included.
pub fn assert_same_verdict(automaton: &Automaton, max_word_length: usize) {
    assert!(
        automaton.is_deterministic(),
        "cross-checking the two modes needs a deterministic automaton"
    );

    assert!(
        same_verdict(automaton, &[]),
        "modes disagree on the empty word"
    );

    for i in 1..=max_word_length {
        let combinations = repeat_n(automaton.alphabet(), i).multi_cartesian_product();

        for word in combinations {
            let tokens = word.into_iter().cloned().collect_vec();
            assert!(
                same_verdict(automaton, &tokens),
                "modes disagree on the word {:?}",
                tokens
            );
        }
    }
}
