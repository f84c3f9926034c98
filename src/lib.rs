//! Finite automata over integer symbols for constraint propagation
//!
//! This library provides:
//! - A symbol codec between solver symbols and transition codepoints
//! - An interval-labelled automaton graph with its algebra and minimization
//! - An index-addressed automaton view for propagators
//! - Compilation of symbol patterns into automata
//! - DOT and JSON projections for tooling

pub mod automaton;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod fsa;
pub mod pattern;

pub use automaton::{Automaton, StateIndex, Transition};
pub use codec::Symbol;
pub use config::Config;
pub use error::{Error, Result};
pub use pattern::{PatternCompiler, RegexCompiler};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
