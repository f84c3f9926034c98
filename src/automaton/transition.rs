//! Transition representation

use crate::automaton::StateIndex;
use crate::codec::Symbol;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single-symbol transition between two indexed states, as handed out
/// by [`crate::Automaton::transitions`]. Stored intervals are expanded into
/// one `Transition` per symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Transition {
    pub source: StateIndex,
    pub destination: StateIndex,
    pub symbol: Symbol,
}

impl Transition {
    pub fn new(source: StateIndex, destination: StateIndex, symbol: Symbol) -> Self {
        Self {
            source,
            destination,
            symbol,
        }
    }

    /// `(source, destination, symbol)`
    pub fn as_triple(&self) -> (StateIndex, StateIndex, Symbol) {
        (self.source, self.destination, self.symbol)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -{}-> {}", self.source, self.symbol, self.destination)
    }
}

impl From<(StateIndex, StateIndex, Symbol)> for Transition {
    fn from((source, destination, symbol): (StateIndex, StateIndex, Symbol)) -> Self {
        Self::new(source, destination, symbol)
    }
}
