use std::fmt::Display;

use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

pub mod error;

use crate::automaton::error::AutomatonError;

/// State identifiers are dense: a definition with `state_count` states uses
/// exactly the ids `0..state_count`, written `q0`, `q1`, ... in the
/// definition syntax.
pub type StateId = u32;

/// The reserved epsilon symbol. It is never a member of a declared alphabet;
/// nondeterministic automata may use it as a transition label and consume it
/// as an explicit input token.
pub const EPSILON: &str = "ε";

/// Formats a state id the way the definition syntax spells it.
pub fn state_name(state: StateId) -> String {
    format!("q{state}")
}

/// An edge weight in the transition graph: either an alphabet symbol or a
/// spontaneous epsilon transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransitionLabel {
    Symbol(String),
    Epsilon,
}

impl TransitionLabel {
    pub fn from_symbol(symbol: &str) -> Self {
        if symbol == EPSILON {
            TransitionLabel::Epsilon
        } else {
            TransitionLabel::Symbol(symbol.to_string())
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, TransitionLabel::Epsilon)
    }

    /// Checks whether this label matches a given alphabet symbol. Epsilon
    /// matches no symbol.
    pub fn matches(&self, symbol: &str) -> bool {
        match self {
            TransitionLabel::Symbol(s) => s == symbol,
            TransitionLabel::Epsilon => false,
        }
    }
}

impl Display for TransitionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionLabel::Symbol(s) => write!(f, "{s}"),
            TransitionLabel::Epsilon => write!(f, "{EPSILON}"),
        }
    }
}

/// A state in the transition graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateNode {
    pub id: StateId,
    pub accepting: bool,
}

/// The mutable construction phase of an automaton.
///
/// The builder is created from the validated definition header and is fed
/// one transition entry at a time. Any error aborts the whole definition:
/// the caller discards the builder instead of keeping a half-populated
/// table, so an inconsistent automaton can never reach the simulator.
#[derive(Debug, Clone)]
pub struct AutomatonBuilder {
    graph: DiGraph<StateNode, TransitionLabel>,
    alphabet: Vec<String>,
    start: StateId,
    deterministic: bool,
}

impl AutomatonBuilder {
    /// Validates the definition header and sets up the state set. The start
    /// state and every final state must lie in `[0, state_count)`. Alphabet
    /// symbols are taken as-is, deduplicated, with empty tokens dropped.
    pub fn new(
        state_count: u32,
        alphabet: Vec<String>,
        start: StateId,
        finals: &[StateId],
        deterministic: bool,
    ) -> Result<Self, AutomatonError> {
        if start >= state_count {
            return Err(AutomatonError::Range { state: start, state_count });
        }
        if let Some(&state) = finals.iter().find(|&&s| s >= state_count) {
            return Err(AutomatonError::Range { state, state_count });
        }

        let mut symbols: Vec<String> = Vec::with_capacity(alphabet.len());
        for symbol in alphabet {
            debug_assert!(symbol != EPSILON, "the epsilon symbol cannot be declared");
            if !symbol.is_empty() && !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }

        let mut graph = DiGraph::new();
        for id in 0..state_count {
            graph.add_node(StateNode {
                id,
                accepting: finals.contains(&id),
            });
        }

        Ok(AutomatonBuilder {
            graph,
            alphabet: symbols,
            start,
            deterministic,
        })
    }

    /// Records one transition entry.
    ///
    /// Deterministic automata take exactly one non-epsilon target per entry
    /// and a repeated `(state, symbol)` key replaces the previous target.
    /// Nondeterministic automata merge repeated keys (set union), accept
    /// epsilon labels, and treat an empty target list as a no-op.
    pub fn add_transition(
        &mut self,
        state: StateId,
        label: TransitionLabel,
        targets: &[StateId],
    ) -> Result<(), AutomatonError> {
        self.check_state(state)?;
        for &target in targets {
            self.check_state(target)?;
        }

        let source = NodeIndex::new(state as usize);

        if self.deterministic {
            assert!(
                !label.is_epsilon(),
                "a deterministic automaton cannot take epsilon transitions"
            );
            assert_eq!(
                targets.len(),
                1,
                "a deterministic automaton takes exactly one target per transition"
            );

            let previous = self
                .graph
                .edges_directed(source, Direction::Outgoing)
                .find(|edge| edge.weight() == &label)
                .map(|edge| edge.id());
            if let Some(edge) = previous {
                self.graph.remove_edge(edge);
            }

            self.graph
                .add_edge(source, NodeIndex::new(targets[0] as usize), label);
        } else {
            for &target in targets {
                let target = NodeIndex::new(target as usize);
                let present = self
                    .graph
                    .edges_directed(source, Direction::Outgoing)
                    .any(|edge| edge.weight() == &label && edge.target() == target);
                if !present {
                    self.graph.add_edge(source, target, label.clone());
                }
            }
        }

        Ok(())
    }

    /// Freezes the definition. The resulting automaton is read-only.
    pub fn build(self) -> Automaton {
        Automaton {
            graph: self.graph,
            alphabet: self.alphabet,
            start: self.start,
            deterministic: self.deterministic,
        }
    }

    fn check_state(&self, state: StateId) -> Result<(), AutomatonError> {
        if (state as usize) < self.graph.node_count() {
            Ok(())
        } else {
            Err(AutomatonError::Range {
                state,
                state_count: self.graph.node_count() as u32,
            })
        }
    }
}

/// A finite automaton, immutable once built.
///
/// Transitions are stored as a directed graph with alphabet symbols (or
/// epsilon) along the edges. Rebuilding a definition replaces the automaton
/// wholesale; it must not happen concurrently with an in-flight simulation.
#[derive(Debug, Clone)]
pub struct Automaton {
    graph: DiGraph<StateNode, TransitionLabel>,
    alphabet: Vec<String>,
    start: StateId,
    deterministic: bool,
}

impl Automaton {
    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn alphabet(&self) -> &[String] {
        self.alphabet.as_slice()
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.graph[NodeIndex::new(state as usize)].accepting
    }

    /// Checks if a set of states contains an accepting state.
    pub fn is_accepting_set(&self, states: &[StateId]) -> bool {
        states.iter().any(|&s| self.is_accepting(s))
    }

    /// Returns the targets reachable from `state` over edges carrying
    /// `label`, sorted and duplicate free. A missing entry is the empty set,
    /// never an error.
    pub fn lookup(&self, state: StateId, label: &TransitionLabel) -> Vec<StateId> {
        let mut targets = self
            .graph
            .edges_directed(NodeIndex::new(state as usize), Direction::Outgoing)
            .filter(|edge| edge.weight() == label)
            .map(|edge| edge.target().index() as StateId)
            .collect_vec();

        targets.sort_unstable();
        targets.dedup();
        targets
    }

    /// Extends a set of states to its epsilon closure.
    /// This set is duplicate free. Membership testing keeps the worklist
    /// finite even when epsilon transitions form a cycle. A deterministic
    /// automaton has no epsilon edges, so the set is left unchanged.
    pub fn extend_to_epsilon_closure(&self, states: &mut Vec<StateId>) {
        let mut stack = states.clone();

        while let Some(state) = stack.pop() {
            for target in self.lookup(state, &TransitionLabel::Epsilon) {
                if !states.contains(&target) {
                    states.push(target);
                    stack.push(target);
                }
            }
        }
    }

    /// Copying variant of [`Automaton::extend_to_epsilon_closure`].
    pub fn epsilon_closure(&self, states: &[StateId]) -> Vec<StateId> {
        let mut closure = states.to_vec();
        self.extend_to_epsilon_closure(&mut closure);
        closure
    }
}
