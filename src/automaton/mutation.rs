//! In-place edits of transitions and symbols.
//!
//! None of these operations renumber states. Invalid state indices are
//! logged and skipped, unknown symbols are returned as errors.

use crate::automaton::{Automaton, StateIndex};
use crate::codec::{self, Codepoint, Symbol};
use crate::error::Result;
use crate::fsa::Interval;
use std::collections::BTreeSet;

impl Automaton {
    /// Add a transition from `source` to `dest` on each of `symbols`.
    ///
    /// Symbols already covered by a transition between the same two states
    /// are left alone.
    pub fn add_transition(
        &mut self,
        source: StateIndex,
        dest: StateIndex,
        symbols: &[Symbol],
    ) -> Result<()> {
        let (Some(from), Some(to)) = (
            self.node_or_warn(source, "add transition"),
            self.node_or_warn(dest, "add transition"),
        ) else {
            return Ok(());
        };

        for &symbol in symbols {
            let c = codec::to_internal(symbol)?;
            self.alphabet.insert(symbol);
            let covered = self
                .fsa
                .edges_from(from)
                .iter()
                .any(|&(_, interval, target)| target == to && interval.contains(c));
            if !covered {
                self.fsa.add_transition(from, to, Interval::single(c));
            }
        }
        Ok(())
    }

    /// Remove `symbol` from every transition between `source` and `dest`.
    ///
    /// A transition whose interval contains the symbol is replaced by what
    /// is left of the interval on either side, keeping its destination:
    /// deleting `c` from `[min, max]` leaves `[min, c-1]` and `[c+1, max]`.
    pub fn delete_transition(
        &mut self,
        source: StateIndex,
        dest: StateIndex,
        symbol: Symbol,
    ) -> Result<()> {
        let c = codec::to_internal(symbol)?;
        let (Some(from), Some(to)) = (
            self.node_or_warn(source, "delete transition"),
            self.node_or_warn(dest, "delete transition"),
        ) else {
            return Ok(());
        };

        for (edge, interval, target) in self.fsa.edges_from(from) {
            if target != to || !interval.contains(c) {
                continue;
            }
            self.fsa.remove_transition(edge);
            let (left, right) = interval.split_around(c);
            for rest in [left, right].into_iter().flatten() {
                self.fsa.add_transition(from, to, rest);
            }
        }

        if !self.carries(c) {
            self.alphabet.remove(&symbol);
        }
        Ok(())
    }

    /// Remove every transition on `symbol` and drop it from the alphabet.
    ///
    /// States left unreachable stay until the next reduction.
    pub fn remove_symbol(&mut self, symbol: Symbol) -> Result<()> {
        let c = codec::to_internal(symbol)?;
        for source in 0..self.states.len() {
            let from = self.states[source];
            let dests: BTreeSet<StateIndex> = self
                .fsa
                .edges_from(from)
                .into_iter()
                .filter(|(_, interval, _)| interval.contains(c))
                .filter_map(|(_, _, target)| self.state_index.get(&target).copied())
                .collect();
            for dest in dests {
                self.delete_transition(source, dest, symbol)?;
            }
        }
        self.alphabet.remove(&symbol);
        tracing::debug!("Removed symbol {} from automaton", symbol);
        Ok(())
    }

    /// Let `source` behave as if it could move to `dest` without reading a
    /// symbol: it takes over the transitions of `dest` and its accept flag.
    ///
    /// The automaton is declared non-deterministic afterwards.
    pub fn add_epsilon(&mut self, source: StateIndex, dest: StateIndex) {
        let (Some(from), Some(to)) = (
            self.node_or_warn(source, "add epsilon transition"),
            self.node_or_warn(dest, "add epsilon transition"),
        ) else {
            return;
        };
        self.fsa.add_epsilons(&[(from, to)]);
    }

    /// Whether any transition still carries codepoint `c`
    fn carries(&self, c: Codepoint) -> bool {
        self.fsa
            .all_transitions()
            .iter()
            .any(|(_, interval, _)| interval.contains(c))
    }
}
