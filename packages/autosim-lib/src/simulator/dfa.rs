use crate::{
    automaton::{Automaton, StateId, TransitionLabel, state_name},
    logger::Logger,
    simulator::{SimulationResult, TraceStep, Verdict},
};

/// Single-path deterministic execution.
///
/// The run is an iterator producing one [`TraceStep`] per consumed symbol,
/// so a presentation layer can pull steps at whatever pace it renders them;
/// [`DfaRun::run`] drains the whole sequence in one go. The run itself does
/// no sleeping and no rendering; replaying from the beginning means
/// constructing a fresh run.
///
/// A symbol without a matching transition produces a final step with
/// `to == None` and ends the run: the verdict is `Rejected` without
/// backtracking.
#[derive(Debug, Clone)]
pub struct DfaRun<'a> {
    automaton: &'a Automaton,
    input: Vec<String>,
    index: usize,
    current: StateId,
    stuck: bool,
}

impl<'a> DfaRun<'a> {
    /// The input must already be validated against the alphabet.
    pub fn new(automaton: &'a Automaton, input: Vec<String>) -> Self {
        debug_assert!(automaton.is_deterministic());

        DfaRun {
            automaton,
            input,
            index: 0,
            current: automaton.start(),
            stuck: false,
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Drains the stepper and folds the steps into a result.
    pub fn run(mut self, logger: Option<&Logger>) -> SimulationResult {
        if let Some(logger) = logger {
            logger.info(&format!("start at state {}", state_name(self.current)));
        }

        let mut trace = Vec::with_capacity(self.input.len());
        for step in &mut self {
            if let Some(logger) = logger {
                logger.info(&step.to_string());
            }
            trace.push(step);
        }

        let accepted = !self.stuck && self.automaton.is_accepting(self.current);
        let verdict = Verdict::from(accepted);
        if let Some(logger) = logger {
            logger.info(&verdict.to_string());
        }

        SimulationResult {
            verdict,
            trace,
            paths: vec![],
        }
    }
}

impl Iterator for DfaRun<'_> {
    type Item = TraceStep;

    fn next(&mut self) -> Option<TraceStep> {
        if self.stuck || self.index >= self.input.len() {
            return None;
        }

        let symbol = self.input[self.index].clone();
        let label = TransitionLabel::from_symbol(&symbol);
        let from = self.current;

        let step = match self.automaton.lookup(from, &label).first() {
            Some(&target) => {
                self.current = target;
                self.index += 1;
                TraceStep {
                    from,
                    symbol,
                    to: Some(target),
                }
            }
            None => {
                self.stuck = true;
                TraceStep {
                    from,
                    symbol,
                    to: None,
                }
            }
        };

        tracing::debug!("dfa step: {}", step);

        Some(step)
    }
}
