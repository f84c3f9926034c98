//! Read-only queries used by propagation and export

use crate::automaton::{Automaton, StateIndex, Transition};
use crate::codec::{self, Codepoint, Symbol};
use crate::error::{Error, Result};
use crate::fsa::Interval;
use std::collections::BTreeSet;

impl Automaton {
    /// Index of the initial state, if one is designated
    pub fn initial_state(&self) -> Option<StateIndex> {
        self.fsa
            .initial()
            .and_then(|node| self.state_index.get(&node).copied())
    }

    /// Whether `state` accepts. An invalid index is reported and answers
    /// `false`.
    pub fn is_final(&self, state: StateIndex) -> bool {
        self.node_or_warn(state, "check final state")
            .is_some_and(|node| self.fsa.is_accept(node))
    }

    /// Whether `state` rejects. An invalid index is reported and answers
    /// `false`.
    pub fn is_not_final(&self, state: StateIndex) -> bool {
        self.node_or_warn(state, "check non final state")
            .is_some_and(|node| !self.fsa.is_accept(node))
    }

    pub fn final_states(&self) -> BTreeSet<StateIndex> {
        self.states
            .iter()
            .enumerate()
            .filter(|&(_, &node)| self.fsa.is_accept(node))
            .map(|(i, _)| i)
            .collect()
    }

    /// The destination of `source` on `symbol`, or `None` when there is no
    /// such transition.
    ///
    /// Only defined on automata declared deterministic; the declaration is
    /// trusted and the graph is not checked. Fails with
    /// [`Error::NonDeterministicOperation`] otherwise.
    pub fn delta(&self, source: StateIndex, symbol: Symbol) -> Result<Option<StateIndex>> {
        if !self.is_deterministic() {
            return Err(Error::NonDeterministicOperation);
        }
        let c = codec::to_internal(symbol)?;
        let Some(node) = self.node_or_warn(source, "compute delta") else {
            return Ok(None);
        };
        Ok(self
            .fsa
            .step(node, c)
            .and_then(|target| self.state_index.get(&target).copied()))
    }

    /// Add every destination of `source` on `symbol` to `into`.
    ///
    /// Valid whatever the determinism flag says.
    pub fn delta_into(
        &self,
        source: StateIndex,
        symbol: Symbol,
        into: &mut impl Extend<StateIndex>,
    ) -> Result<()> {
        let c = codec::to_internal(symbol)?;
        let Some(node) = self.node_or_warn(source, "compute delta") else {
            return Ok(());
        };
        into.extend(
            self.fsa
                .targets(node, c)
                .filter_map(|target| self.state_index.get(&target).copied()),
        );
        Ok(())
    }

    /// Every transition as a `(source, destination, symbol)` triple, one per
    /// symbol inside the clamp, ordered by source.
    pub fn transitions(&self) -> Vec<Transition> {
        (0..self.states.len())
            .flat_map(|state| self.transitions_from(state))
            .collect()
    }

    /// The transitions leaving `state`, ordered by symbol then destination.
    /// An invalid index is reported and yields nothing.
    pub fn transitions_from(&self, state: StateIndex) -> Vec<Transition> {
        let codec = codec::codec();
        let mut out = Vec::new();
        for (interval, destination) in self.intervals(state) {
            let Some(clamped) = interval.clip(self.min, self.max) else {
                continue;
            };
            if let Some((lo, hi)) = codec.external_span(clamped.min, clamped.max) {
                out.extend((lo..=hi).map(|symbol| Transition::new(state, destination, symbol)));
            }
        }
        out.sort_by_key(|t| (t.symbol, t.destination));
        out
    }

    /// Raw codepoint intervals leaving `state`, unclamped
    pub fn intervals(&self, state: StateIndex) -> Vec<(Interval, StateIndex)> {
        let Some(node) = self.node_or_warn(state, "list transitions") else {
            return Vec::new();
        };
        self.fsa
            .transitions(node)
            .into_iter()
            .filter_map(|(interval, target)| {
                self.state_index.get(&target).map(|&index| (interval, index))
            })
            .collect()
    }

    /// Whether the automaton accepts `word`.
    ///
    /// Walks single transitions when the automaton is declared
    /// deterministic, otherwise tracks the whole set of current states.
    pub fn run(&self, word: &[Symbol]) -> Result<bool> {
        let word: Vec<Codepoint> = word
            .iter()
            .map(|&symbol| codec::to_internal(symbol))
            .collect::<Result<_>>()?;

        if !self.is_deterministic() {
            return Ok(self.fsa.run(&word));
        }
        let Some(mut node) = self.fsa.initial() else {
            return Ok(false);
        };
        for &c in &word {
            match self.fsa.step(node, c) {
                Some(next) => node = next,
                None => return Ok(false),
            }
        }
        Ok(self.fsa.is_accept(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 0 -1-> 1, 0 -1-> 2(F), 1 -2-> 2
    fn branching() -> Automaton {
        let mut a = Automaton::new();
        let s: Vec<StateIndex> = (0..3).map(|_| a.add_state()).collect();
        a.set_initial_state(s[0]);
        a.set_final(s[2]);
        a.add_transition(s[0], s[1], &[1]).unwrap();
        a.add_transition(s[0], s[2], &[1]).unwrap();
        a.add_transition(s[1], s[2], &[2]).unwrap();
        a.set_deterministic(false);
        a
    }

    #[test]
    fn test_delta_requires_determinism() {
        let a = branching();
        for source in 0..3 {
            for symbol in [1, 2, 3] {
                assert!(matches!(
                    a.delta(source, symbol),
                    Err(Error::NonDeterministicOperation)
                ));
            }
        }
    }

    #[test]
    fn test_delta_into_collects_every_destination() {
        let a = branching();
        let mut dests = BTreeSet::new();
        a.delta_into(0, 1, &mut dests).unwrap();
        assert_eq!(dests, BTreeSet::from([1, 2]));

        let mut none: Vec<StateIndex> = Vec::new();
        a.delta_into(2, 1, &mut none).unwrap();
        a.delta_into(7, 1, &mut none).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_delta_into_accumulates() {
        let a = branching();
        let mut frontier = BTreeSet::from([0]);
        a.delta_into(0, 1, &mut frontier).unwrap();
        a.delta_into(1, 2, &mut frontier).unwrap();
        assert_eq!(frontier, BTreeSet::from([0, 1, 2]));

        let mut listed = vec![9];
        a.delta_into(1, 2, &mut listed).unwrap();
        assert_eq!(listed, vec![9, 2]);
    }

    #[test]
    fn test_delta() {
        let mut a = Automaton::new();
        let s = a.add_state();
        let t = a.add_state();
        a.add_transition(s, t, &[40]).unwrap();

        assert_eq!(a.delta(s, 40).unwrap(), Some(t));
        assert_eq!(a.delta(s, 41).unwrap(), None);
        assert_eq!(a.delta(t, 40).unwrap(), None);
        assert_eq!(a.delta(99, 40).unwrap(), None);
        assert!(matches!(a.delta(s, -1), Err(Error::UnknownSymbol(-1))));
    }

    #[test]
    fn test_run_non_deterministic() {
        let a = branching();
        assert!(a.run(&[1]).unwrap());
        assert!(a.run(&[1, 2]).unwrap());
        assert!(!a.run(&[2]).unwrap());
        assert!(!a.run(&[]).unwrap());
    }

    #[test]
    fn test_run_without_initial_state() {
        let mut a = Automaton::new();
        let s = a.add_state();
        a.set_final(s);
        assert!(!a.run(&[]).unwrap());
    }

    #[test]
    fn test_is_final_degrades_on_bad_index() {
        let a = branching();
        assert!(a.is_final(2));
        assert!(a.is_not_final(0));
        assert!(!a.is_final(3));
        assert!(!a.is_not_final(3));
    }

    #[test]
    fn test_transitions_are_expanded_per_symbol() {
        let mut a = Automaton::new();
        let s = a.add_state();
        let t = a.add_state();
        a.add_transition(s, t, &[3, 1, 2]).unwrap();
        a.reduce();

        let triples: Vec<_> = a.transitions().iter().map(Transition::as_triple).collect();
        assert_eq!(triples, vec![(0, 1, 1), (0, 1, 2), (0, 1, 3)]);
        assert!(a.transitions_from(1).is_empty());
        assert!(a.transitions_from(5).is_empty());
    }

    #[test]
    fn test_transitions_respect_clamp() {
        let mut a = Automaton::with_clamp(2, 3);
        let s = a.add_state();
        let t = a.add_state();
        a.add_transition(s, t, &[1, 2, 3, 4]).unwrap();

        let symbols: Vec<Symbol> = a.transitions().iter().map(|t| t.symbol).collect();
        assert_eq!(symbols, vec![2, 3]);
        assert_eq!(a.intervals(s).len(), 4);
    }
}
