use std::{fmt::Display, str::FromStr};

use autosim_lib::{
    automaton::{Automaton, AutomatonBuilder},
    config::SimulatorConfig,
    definition::{parse_alphabet, parse_state, parse_state_list, parse_transition},
    logger::Logger,
    simulator::Simulator,
};
use clap::Parser;

/// The kind of automaton to define and simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Dfa,
    Nfa,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dfa" => Ok(Mode::Dfa),
            "nfa" => Ok(Mode::Nfa),
            _ => Err(format!("Invalid mode: {}", s)),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Dfa => write!(f, "DFA"),
            Mode::Nfa => write!(f, "NFA"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "Automaton Simulator")]
#[command(version = "0.1")]
#[command(about = "Define a finite automaton and simulate it on an input string", long_about = None)]
struct Args {
    /// The input string to run through the automaton.
    input: String,

    #[arg(short, long, default_value_t = Mode::Dfa)]
    mode: Mode,

    /// Number of states; states are named q0 through q<n-1>.
    #[arg(short, long)]
    states: u32,

    /// Comma-separated alphabet symbols, e.g. "a,b".
    #[arg(short, long)]
    alphabet: String,

    /// Start state.
    #[arg(long, default_value = "q0")]
    start: String,

    /// Comma-separated final states, e.g. "q1,q2".
    #[arg(short, long)]
    finals: String,

    /// One transition entry per flag, e.g. "q0, a -> q1" or, in NFA mode,
    /// "q0, ε -> q1, q2".
    #[arg(short, long)]
    transition: Vec<String>,

    /// Path to an optional toml configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug tracing.
    #[arg(short, long)]
    verbose: bool,
}

/// Builds the automaton from the textual definition fields. The definition
/// is all-or-nothing: the first error aborts the whole attempt and nothing
/// partially built ever reaches the simulator.
fn build_automaton(args: &Args) -> anyhow::Result<Automaton> {
    let alphabet = parse_alphabet(&args.alphabet)?;
    let start = parse_state(&args.start)?;
    let finals = parse_state_list(&args.finals)?;

    let mut builder = AutomatonBuilder::new(
        args.states,
        alphabet,
        start,
        &finals,
        args.mode == Mode::Dfa,
    )?;

    for text in &args.transition {
        let entry = parse_transition(text)?;

        if args.mode == Mode::Dfa && (entry.label.is_epsilon() || entry.targets.len() != 1) {
            anyhow::bail!(
                "a DFA transition takes exactly one non-epsilon target: '{}'",
                text
            );
        }

        builder.add_transition(entry.from, entry.label, &entry.targets)?;
    }

    Ok(builder.build())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = SimulatorConfig::from_optional_file(args.config.as_deref())?;
    let automaton = build_automaton(&args)?;
    let logger = Logger::from_config(&config.logger, "Simulator".into());

    let result = Simulator::new(&automaton, &config, logger.as_ref()).simulate(&args.input)?;

    println!("{}", result.to_json()?);

    Ok(())
}
