//! Language algebra and in-place reductions.
//!
//! Algebra operations build the result on the [`Fsa`] level and import it
//! into a new `Automaton` restricted to the result alphabet. Indices of the
//! operands mean nothing for the result. Reductions rewrite the graph in
//! place and resynchronize, starting a new index epoch.

use crate::automaton::Automaton;
use crate::codec::{Codepoint, Symbol};
use crate::fsa::Fsa;
use std::collections::BTreeSet;

impl Automaton {
    /// Words accepted by `self` or by `other`
    pub fn union(&self, other: &Automaton) -> Automaton {
        let alphabet = self.alphabet.union(&other.alphabet).copied().collect();
        let clamp = (self.min.min(other.min), self.max.max(other.max));
        let result = self.fsa.union(&other.fsa);
        Self::build(&result, &alphabet, clamp, "union")
    }

    /// Words accepted by both `self` and `other`.
    ///
    /// The result alphabet only keeps the symbols both operands use.
    pub fn intersection(&self, other: &Automaton) -> Automaton {
        let alphabet = self
            .alphabet
            .intersection(&other.alphabet)
            .copied()
            .collect();
        let clamp = (self.min.max(other.min), self.max.min(other.max));
        let result = self.fsa.intersection(&other.fsa);
        Self::build(&result, &alphabet, clamp, "intersection")
    }

    /// Words over the alphabet of `self` that `self` rejects
    pub fn complement(&self) -> Automaton {
        self.complement_over(&self.alphabet)
    }

    /// Words over `alphabet` that `self` rejects
    pub fn complement_over(&self, alphabet: &BTreeSet<Symbol>) -> Automaton {
        let result = self.fsa.complement();
        Self::build(&result, alphabet, self.clamp(), "complement")
    }

    /// Words `uv` with `u` accepted by `self` and `v` by `other`
    pub fn concatenate(&self, other: &Automaton) -> Automaton {
        let alphabet = self.alphabet.union(&other.alphabet).copied().collect();
        let clamp = (self.min.min(other.min), self.max.max(other.max));
        let result = self.fsa.concatenate(&other.fsa);
        Self::build(&result, &alphabet, clamp, "concatenation")
    }

    /// Zero or more repetitions of the language of `self`
    pub fn repeat(&self) -> Automaton {
        Self::build(&self.fsa.repeat(), &self.alphabet, self.clamp(), "repeat")
    }

    /// `min` or more repetitions
    pub fn repeat_min(&self, min: u32) -> Automaton {
        let result = self.fsa.repeat_min(min);
        Self::build(&result, &self.alphabet, self.clamp(), "repeat")
    }

    /// Between `min` and `max` repetitions, both inclusive. `min > max`
    /// gives the empty language.
    pub fn repeat_range(&self, min: u32, max: u32) -> Automaton {
        let result = self.fsa.repeat_range(min, max);
        Self::build(&result, &self.alphabet, self.clamp(), "repeat")
    }

    /// Replace the automaton by its minimal deterministic equivalent.
    ///
    /// Starts a new index epoch.
    pub fn minimize(&mut self) {
        self.fsa = self.fsa.minimize();
        self.sync_states();
    }

    /// Merge adjacent transition intervals. Starts a new index epoch.
    pub fn reduce(&mut self) {
        self.fsa.reduce();
        self.sync_states();
    }

    /// Remove transitions that cannot lead to an accepting state.
    ///
    /// Starts a new index epoch.
    pub fn remove_dead_transitions(&mut self) {
        self.fsa.remove_dead_transitions();
        self.sync_states();
    }

    fn build(
        result: &Fsa,
        alphabet: &BTreeSet<Symbol>,
        (min, max): (Codepoint, Codepoint),
        operation: &str,
    ) -> Automaton {
        let mut automaton = Automaton::with_clamp(min, max);
        automaton.fill(result, alphabet);
        tracing::debug!(
            "Built {} result: {} states, {} symbols",
            operation,
            automaton.nb_states(),
            automaton.nb_symbols()
        );
        automaton
    }
}
