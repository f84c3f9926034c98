//! DOT projection for Graphviz

use crate::automaton::{Automaton, StateClass, StateIndex};
use crate::codec::Symbol;
use crate::error::Result;
use std::collections::BTreeMap;
use std::path::Path;

impl Automaton {
    /// Export to DOT format, laid out left to right
    pub fn to_dot(&self) -> String {
        self.to_dot_with("LR")
    }

    /// Export to DOT format with the given `rankdir`.
    ///
    /// Accepting states are drawn as double circles. Parallel transitions
    /// are merged into one edge labelled with their symbols, consecutive
    /// symbols written as ranges.
    pub fn to_dot_with(&self, rankdir: &str) -> String {
        let initial = self.initial_state();
        let mut dot = "digraph Automaton {\n".to_string();
        dot.push_str(&format!("  rankdir = {};\n", rankdir));
        dot.push_str("  node [style=filled];\n");

        if let Some(init) = initial {
            dot.push_str("  initial [shape=plaintext, label=\"\", style=\"\"];\n");
            dot.push_str(&format!("  initial -> {};\n", init));
        }
        dot.push('\n');

        for state in 0..self.nb_states() {
            let class = StateClass::of(initial == Some(state), self.is_final(state));
            dot.push_str(&format!(
                "  {} [shape={}, fillcolor=\"{}\"];\n",
                state,
                class.shape(),
                class.color()
            ));
        }
        dot.push('\n');

        let mut edges: BTreeMap<(StateIndex, StateIndex), Vec<Symbol>> = BTreeMap::new();
        for t in self.transitions() {
            edges.entry((t.source, t.destination)).or_default().push(t.symbol);
        }
        for ((source, destination), symbols) in edges {
            dot.push_str(&format!(
                "  {} -> {} [label=\"{}\"];\n",
                source,
                destination,
                symbol_label(&symbols)
            ));
        }

        dot.push_str("}\n");
        dot
    }

    /// Write the DOT export to `path`
    pub fn write_dot(&self, path: impl AsRef<Path>, rankdir: &str) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_dot_with(rankdir))?;
        tracing::info!("Automaton exported to {}", path.as_ref().display());
        Ok(())
    }
}

/// `{1,2,5..9}` for the sorted symbols 1, 2, 5, 6, 7, 8, 9
fn symbol_label(symbols: &[Symbol]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut iter = symbols.iter().copied().peekable();
    while let Some(first) = iter.next() {
        let mut last = first;
        while iter.peek() == Some(&(last + 1)) {
            last += 1;
            iter.next();
        }
        parts.push(match last - first {
            0 => first.to_string(),
            1 => format!("{},{}", first, last),
            _ => format!("{}..{}", first, last),
        });
    }
    format!("{{{}}}", parts.join(","))
}
