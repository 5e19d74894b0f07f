use std::collections::VecDeque;

use crate::{
    automaton::{Automaton, StateId, TransitionLabel},
    logger::Logger,
    simulator::{SimulationResult, StatePath, TraceStep, Verdict},
};

/// One event of a nondeterministic run, in exploration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NfaEvent {
    /// One explored transition edge.
    Step(TraceStep),
    /// A branch consumed the whole input inside an accepting closure.
    Accepted(StatePath),
}

/// One pending branch of the exploration: an epsilon-open state set, the
/// position in the input, the states recorded so far, and the edge that
/// spawned the branch (absent for the root).
#[derive(Debug, Clone)]
struct Frame {
    states: Vec<StateId>,
    index: usize,
    path: StatePath,
    via: Option<TraceStep>,
}

/// Exhaustive all-paths nondeterministic execution.
///
/// Every branch of the epsilon-closed configuration tree is explored
/// independently; branches never share or merge state, so the same
/// accepting state can be reached and reported through multiple distinct
/// paths. This is brute-force path enumeration, not a subset construction:
/// the worst case is exponential in input length and branching factor,
/// which is acceptable for an educational tool running short strings.
///
/// The exploration is an iterator over [`NfaEvent`]s so a presentation
/// layer can pull and render branches at its own pace; [`NfaRun::run`]
/// drains it in one go. Frames live on an explicit stack, popped
/// depth-first in branch order, so deep branching cannot overflow the call
/// stack.
#[derive(Debug, Clone)]
pub struct NfaRun<'a> {
    automaton: &'a Automaton,
    input: Vec<String>,
    stack: Vec<Frame>,
    pending: VecDeque<NfaEvent>,
}

impl<'a> NfaRun<'a> {
    /// The input must already be validated against the alphabet. An `ε`
    /// token in the input consumes one explicit epsilon transition when its
    /// position is reached.
    pub fn new(automaton: &'a Automaton, input: Vec<String>) -> Self {
        let start = automaton.start();

        NfaRun {
            automaton,
            input,
            stack: vec![Frame {
                states: vec![start],
                index: 0,
                path: StatePath::new(start),
                via: None,
            }],
            pending: VecDeque::new(),
        }
    }

    /// Drains the exploration and folds the events into a result.
    pub fn run(mut self, logger: Option<&Logger>) -> SimulationResult {
        let mut trace = Vec::new();
        let mut paths = Vec::new();

        while let Some(event) = self.next() {
            match event {
                NfaEvent::Step(step) => {
                    if let Some(logger) = logger {
                        logger.info(&step.to_string());
                    }
                    trace.push(step);
                }
                NfaEvent::Accepted(path) => {
                    if let Some(logger) = logger {
                        logger.info(&format!("accepting path: {path}"));
                    }
                    paths.push(path);
                }
            }
        }

        let verdict = Verdict::from(!paths.is_empty());
        if let Some(logger) = logger {
            match verdict {
                Verdict::Accepted => {
                    logger.info(&format!("{} ({} path(s))", verdict, paths.len()))
                }
                Verdict::Rejected => logger.info(&verdict.to_string()),
            }
        }

        SimulationResult {
            verdict,
            trace,
            paths,
        }
    }

    /// Expands one frame: report the edge that spawned it, close the state
    /// set under epsilon, then either record an accepting path (input
    /// exhausted) or push one follow-up frame per `(state, target)` branch.
    fn process(&mut self, mut frame: Frame) {
        if let Some(step) = frame.via.take() {
            self.pending.push_back(NfaEvent::Step(step));
        }

        self.automaton.extend_to_epsilon_closure(&mut frame.states);

        if frame.index == self.input.len() {
            if self.automaton.is_accepting_set(&frame.states) {
                tracing::debug!("accepting path: {}", frame.path);
                self.pending.push_back(NfaEvent::Accepted(frame.path));
            }
            return;
        }

        let symbol = &self.input[frame.index];
        let label = TransitionLabel::from_symbol(symbol);

        let mut branches = Vec::new();
        for &state in &frame.states {
            for target in self.automaton.lookup(state, &label) {
                branches.push((state, target));
            }
        }

        tracing::debug!(
            "branching on '{}' at index {}: {} branch(es)",
            symbol,
            frame.index,
            branches.len()
        );

        // Reversed push so the stack pops branches in discovery order.
        for (state, target) in branches.into_iter().rev() {
            let mut path = frame.path.clone();
            // The branch may fire from a state the closure pulled in; record
            // that hop so the path shows where the symbol was read.
            if path.end() != state {
                path.push(state);
            }
            path.push(target);

            self.stack.push(Frame {
                states: vec![target],
                index: frame.index + 1,
                path,
                via: Some(TraceStep {
                    from: state,
                    symbol: symbol.clone(),
                    to: Some(target),
                }),
            });
        }
    }
}

impl Iterator for NfaRun<'_> {
    type Item = NfaEvent;

    fn next(&mut self) -> Option<NfaEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            let frame = self.stack.pop()?;
            self.process(frame);
        }
    }
}
