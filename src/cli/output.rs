//! Output formatting module
//!
//! This module handles formatting automata for the different output formats.

use crate::{Automaton, Result};
use serde_json::json;

/// Output an automaton as JSON
pub fn output_json(w: &mut impl std::io::Write, pattern: &str, automaton: &Automaton) -> Result<()> {
    let output = json!({
        "pattern": pattern,
        "summary": {
            "states": automaton.nb_states(),
            "symbols": automaton.nb_symbols(),
            "deterministic": automaton.is_deterministic(),
        },
        "initial": automaton.initial_state(),
        "final": automaton.final_states(),
        "alphabet": automaton.alphabet(),
        "transitions": automaton.transitions(),
    });

    serde_json::to_writer_pretty(&mut *w, &output)?;
    writeln!(w)?;
    Ok(())
}

/// Output an automaton as text table
pub fn output_table(
    w: &mut impl std::io::Write,
    pattern: &str,
    automaton: &Automaton,
) -> Result<()> {
    writeln!(w, "Automaton for {:?}", pattern)?;
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w)?;

    writeln!(w, "Summary:")?;
    writeln!(w, "  States:        {}", automaton.nb_states())?;
    writeln!(w, "  Symbols:       {}", automaton.nb_symbols())?;
    writeln!(w, "  Deterministic: {}", automaton.is_deterministic())?;
    writeln!(w)?;

    let transitions = automaton.transitions();
    if !transitions.is_empty() {
        writeln!(w, "Transitions:")?;
        writeln!(w, "{:-<60}", "")?;
        writeln!(w, "{:<6} {:>8} {:>10} {:>8}", "", "From", "Symbol", "To")?;
        writeln!(w, "{:-<60}", "")?;

        let initial = automaton.initial_state();
        for t in &transitions {
            let marker = match (initial == Some(t.source), automaton.is_final(t.source)) {
                (true, true) => "->*",
                (true, false) => "->",
                (false, true) => "*",
                (false, false) => "",
            };
            writeln!(
                w,
                "{:<6} {:>8} {:>10} {:>8}",
                marker, t.source, t.symbol, t.destination
            )?;
        }
        writeln!(w)?;
    }

    let finals: Vec<String> = automaton
        .final_states()
        .iter()
        .map(ToString::to_string)
        .collect();
    writeln!(w, "Final states: {}", finals.join(", "))?;
    Ok(())
}

/// Output an automaton as DOT
pub fn output_dot(w: &mut impl std::io::Write, automaton: &Automaton, rankdir: &str) -> Result<()> {
    write!(w, "{}", automaton.to_dot_with(rankdir))?;
    Ok(())
}
