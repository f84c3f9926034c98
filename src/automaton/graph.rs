use crate::automaton::StateIndex;
use crate::codec::{self, Codepoint, MAX_CODEPOINT, MIN_CODEPOINT, Symbol};
use crate::config::AutomatonConfig;
use crate::error::{Error, Result};
use crate::fsa::{Fsa, Interval};
use crate::pattern::PatternCompiler;
use petgraph::stable_graph::NodeIndex;
use std::collections::{BTreeSet, HashMap};

/// A finite automaton over integer symbols with dense, index-addressed
/// states.
///
/// The `Automaton` keeps two coupled views of the same machine:
/// - the underlying [`Fsa`] graph, where states are petgraph nodes and
///   transitions are codepoint intervals;
/// - a dense index view (`0..nb_states()`) that the propagation side
///   addresses states with.
///
/// Mutations keep both views in step incrementally. Operations that
/// rebuild the graph (minimization, reduction, dead-transition removal)
/// resynchronize the index view from scratch and start a new epoch: every
/// index obtained before is invalid afterwards. Algebra operations never
/// touch their operands and return a new `Automaton` with its own indices.
#[derive(Debug, Clone)]
pub struct Automaton {
    /// The underlying graph.
    pub(crate) fsa: Fsa,

    /// Index view: `states[i]` is the node of state `i`.
    pub(crate) states: Vec<NodeIndex>,

    /// Reverse lookup from graph nodes to their dense index.
    ///
    /// Only valid within an epoch, rebuilt whole on resynchronization.
    pub(crate) state_index: HashMap<NodeIndex, StateIndex>,

    /// Symbols labelling at least one transition (cached).
    pub(crate) alphabet: BTreeSet<Symbol>,

    /// Codepoint clamp applied when expanding intervals into symbols.
    pub(crate) min: Codepoint,
    pub(crate) max: Codepoint,

    /// Index-validity generation.
    pub(crate) epoch: u64,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    /// An automaton with no states over the full codepoint range.
    ///
    /// It is declared deterministic until told otherwise.
    pub fn new() -> Self {
        Self::with_clamp(MIN_CODEPOINT, MAX_CODEPOINT)
    }

    /// An empty automaton whose symbol expansion is limited to `[min, max]`
    /// (codepoints, clipped to the codec range)
    pub fn with_clamp(min: Codepoint, max: Codepoint) -> Self {
        Self {
            fsa: Fsa::new(),
            states: Vec::new(),
            state_index: HashMap::new(),
            alphabet: BTreeSet::new(),
            min: min.max(MIN_CODEPOINT),
            max: max.min(MAX_CODEPOINT),
            epoch: 0,
        }
    }

    pub fn from_config(config: &AutomatonConfig) -> Self {
        Self::with_clamp(config.min, config.max)
    }

    /// Build the automaton of `pattern` with an external compiler.
    ///
    /// The compiled graph is imported through [`Automaton::fill`] with every
    /// symbol its transitions carry inside the clamp.
    pub fn compile(
        compiler: &impl PatternCompiler,
        pattern: &str,
        min: Codepoint,
        max: Codepoint,
    ) -> Result<Self> {
        let mut automaton = Self::with_clamp(min, max);
        let raw = compiler.compile(pattern, automaton.min, automaton.max)?;
        let symbols = automaton.clamped_symbols(&raw);
        automaton.fill(&raw, &symbols);
        tracing::debug!(
            "Compiled {:?} into {} states over {} symbols",
            pattern,
            automaton.nb_states(),
            automaton.nb_symbols()
        );
        Ok(automaton)
    }

    /// Build an automaton from a raw graph, keeping only `symbols`
    pub fn from_fsa(fsa: &Fsa, symbols: &BTreeSet<Symbol>) -> Self {
        let mut automaton = Self::new();
        automaton.fill(fsa, symbols);
        automaton
    }

    /// Import `source` into this automaton.
    ///
    /// One new state is created per state of `source` reachable from its
    /// initial state, keeping accept flags and the initial designation.
    /// Every source transition is then replayed for the symbols of
    /// `symbols` it carries inside the clamp. Runs of consecutive symbols
    /// are stored as a single interval. The determinism flag is taken over
    /// from `source`.
    pub fn fill(&mut self, source: &Fsa, symbols: &BTreeSet<Symbol>) {
        let codec = codec::codec();
        self.fsa.set_deterministic(source.is_deterministic());

        let order = source.reachable_states();
        let mut local: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(order.len());
        for &node in &order {
            let index = self.add_state();
            local.insert(node, self.states[index]);
        }

        for &node in &order {
            let from = local[&node];
            self.fsa.set_accept(from, source.is_accept(node));
            if source.initial() == Some(node) {
                self.fsa.set_initial(from);
            }
            for (interval, target) in source.transitions(node) {
                let Some(&to) = local.get(&target) else {
                    continue;
                };
                let Some(clamped) = interval.clip(self.min, self.max) else {
                    continue;
                };
                let Some((lo, hi)) = codec.external_span(clamped.min, clamped.max) else {
                    continue;
                };

                let mut run: Option<(Symbol, Symbol)> = None;
                for &symbol in symbols.range(lo..=hi) {
                    self.alphabet.insert(symbol);
                    run = match run {
                        Some((first, last)) if last + 1 == symbol => Some((first, symbol)),
                        Some(done) => {
                            self.add_symbol_run(from, to, done);
                            Some((symbol, symbol))
                        }
                        None => Some((symbol, symbol)),
                    };
                }
                if let Some(done) = run {
                    self.add_symbol_run(from, to, done);
                }
            }
        }
    }

    fn add_symbol_run(&mut self, from: NodeIndex, to: NodeIndex, (first, last): (Symbol, Symbol)) {
        if let (Ok(lo), Ok(hi)) = (codec::to_internal(first), codec::to_internal(last)) {
            self.fsa.add_transition(from, to, Interval::new(lo, hi));
        }
    }

    /// Rebuild the index view and the alphabet from the underlying graph.
    ///
    /// Unreachable states are dropped, the survivors are numbered in
    /// [`Fsa::reachable_states`] order and the alphabet is rescanned inside
    /// the clamp. Running it twice without a mutation in between yields the
    /// same numbering; every call starts a new epoch.
    pub(crate) fn sync_states(&mut self) {
        self.fsa.prune_unreachable();
        let states = self.fsa.reachable_states();
        let state_index = states.iter().enumerate().map(|(i, &node)| (node, i)).collect();
        let alphabet = self.clamped_symbols(&self.fsa);

        self.states = states;
        self.state_index = state_index;
        self.alphabet = alphabet;
        self.epoch += 1;

        tracing::debug!(
            "Resynchronized automaton: epoch {}, {} states, {} symbols",
            self.epoch,
            self.states.len(),
            self.alphabet.len()
        );
    }

    /// Every symbol carried by a transition of `fsa` inside the clamp
    fn clamped_symbols(&self, fsa: &Fsa) -> BTreeSet<Symbol> {
        let codec = codec::codec();
        let mut symbols = BTreeSet::new();
        for (_, interval, _) in fsa.all_transitions() {
            if let Some(clamped) = interval.clip(self.min, self.max)
                && let Some((lo, hi)) = codec.external_span(clamped.min, clamped.max)
            {
                symbols.extend(lo..=hi);
            }
        }
        symbols
    }

    // State store

    /// Append a non-accepting state and return its index
    pub fn add_state(&mut self) -> StateIndex {
        let index = self.states.len();
        let node = self.fsa.add_state(false);
        self.states.push(node);
        self.state_index.insert(node, index);
        index
    }

    pub fn nb_states(&self) -> usize {
        self.states.len()
    }

    pub fn set_initial_state(&mut self, state: StateIndex) {
        if let Some(node) = self.node_or_warn(state, "set initial state") {
            self.fsa.set_initial(node);
        }
    }

    pub fn set_final(&mut self, state: StateIndex) {
        if let Some(node) = self.node_or_warn(state, "set final state") {
            self.fsa.set_accept(node, true);
        }
    }

    pub fn set_final_all(&mut self, states: &[StateIndex]) {
        for &state in states {
            self.set_final(state);
        }
    }

    pub fn set_non_final(&mut self, state: StateIndex) {
        if let Some(node) = self.node_or_warn(state, "set non final state") {
            self.fsa.set_accept(node, false);
        }
    }

    pub fn set_non_final_all(&mut self, states: &[StateIndex]) {
        for &state in states {
            self.set_non_final(state);
        }
    }

    pub fn is_deterministic(&self) -> bool {
        self.fsa.is_deterministic()
    }

    /// Declare whether the automaton is deterministic. The flag is trusted
    /// by [`Automaton::delta`] and [`Automaton::run`].
    pub fn set_deterministic(&mut self, deterministic: bool) {
        self.fsa.set_deterministic(deterministic);
    }

    // Alphabet

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    pub fn nb_symbols(&self) -> usize {
        self.alphabet.len()
    }

    pub fn add_to_alphabet(&mut self, symbol: Symbol) {
        self.alphabet.insert(symbol);
    }

    pub fn remove_from_alphabet(&mut self, symbol: Symbol) {
        self.alphabet.remove(&symbol);
    }

    // Accessors

    /// The underlying graph
    pub fn fsa(&self) -> &Fsa {
        &self.fsa
    }

    /// The codepoint clamp `(min, max)`
    pub fn clamp(&self) -> (Codepoint, Codepoint) {
        (self.min, self.max)
    }

    /// Index-validity generation, bumped by every resynchronization
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn check_state(&self, states: &[StateIndex]) -> Result<()> {
        let count = self.states.len();
        match states.iter().find(|&&s| s >= count) {
            Some(&index) => Err(Error::InvalidStateIndex { index, count }),
            None => Ok(()),
        }
    }

    pub(crate) fn node(&self, state: StateIndex) -> Result<NodeIndex> {
        self.check_state(&[state])?;
        Ok(self.states[state])
    }

    /// Resolve `state`, logging and swallowing an invalid index
    pub(crate) fn node_or_warn(&self, state: StateIndex, action: &str) -> Option<NodeIndex> {
        match self.node(state) {
            Ok(node) => Some(node),
            Err(e) => {
                tracing::warn!("Unable to {}: {}", action, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 2* 3, built by hand
    fn one_twos_three() -> Automaton {
        let mut a = Automaton::new();
        let s0 = a.add_state();
        let s1 = a.add_state();
        let s2 = a.add_state();
        a.set_initial_state(s0);
        a.set_final(s2);
        a.add_transition(s0, s1, &[1]).unwrap();
        a.add_transition(s1, s1, &[2]).unwrap();
        a.add_transition(s1, s2, &[3]).unwrap();
        a
    }

    #[test]
    fn test_empty_automaton() {
        let a = Automaton::new();
        assert_eq!(a.nb_states(), 0);
        assert_eq!(a.nb_symbols(), 0);
        assert!(a.is_deterministic());
        assert_eq!(a.epoch(), 0);
        assert_eq!(a.clamp(), (MIN_CODEPOINT, MAX_CODEPOINT));
    }

    #[test]
    fn test_add_state_is_dense() {
        let mut a = Automaton::new();
        assert_eq!(a.add_state(), 0);
        assert_eq!(a.add_state(), 1);
        assert_eq!(a.add_state(), 2);
        assert_eq!(a.nb_states(), 3);
    }

    #[test]
    fn test_check_state() {
        let a = one_twos_three();
        assert!(a.check_state(&[0, 1, 2]).is_ok());
        assert!(matches!(
            a.check_state(&[0, 3]),
            Err(Error::InvalidStateIndex { index: 3, count: 3 })
        ));
    }

    #[test]
    fn test_final_flags_are_idempotent() {
        let mut a = one_twos_three();
        a.set_final(1);
        a.set_final(1);
        assert!(a.is_final(1));
        a.set_non_final(1);
        a.set_non_final(1);
        assert!(!a.is_final(1));

        a.set_final_all(&[0, 1]);
        assert_eq!(a.final_states(), BTreeSet::from([0, 1, 2]));
        a.set_non_final_all(&[0, 1, 2]);
        assert!(a.final_states().is_empty());
    }

    #[test]
    fn test_invalid_index_is_a_no_op() {
        let mut a = one_twos_three();
        a.set_final(42);
        a.set_initial_state(42);
        assert_eq!(a.initial_state(), Some(0));
        assert_eq!(a.final_states(), BTreeSet::from([2]));
    }

    #[test]
    fn test_fill_keeps_only_requested_symbols() {
        let source = one_twos_three();
        let symbols = BTreeSet::from([1, 3]);
        let a = Automaton::from_fsa(source.fsa(), &symbols);

        assert_eq!(a.nb_states(), 3);
        assert_eq!(a.alphabet(), &symbols);
        assert!(a.run(&[1, 3]).unwrap());
        assert!(!a.run(&[1, 2, 3]).unwrap());
        assert!(a.is_final(2));
        assert_eq!(a.initial_state(), Some(0));
    }

    #[test]
    fn test_fill_stores_symbol_runs_as_intervals() {
        let mut source = Fsa::new();
        let s = source.add_state(false);
        let t = source.add_state(true);
        source.set_initial(s);
        source.add_transition(s, t, Interval::new(0, 100));

        let symbols: BTreeSet<Symbol> = [1, 2, 3, 4, 10, 11].into_iter().collect();
        let a = Automaton::from_fsa(&source, &symbols);

        assert_eq!(
            a.intervals(0),
            vec![(Interval::new(1, 4), 1), (Interval::new(10, 11), 1)]
        );
        assert_eq!(a.transitions().len(), 6);
    }

    #[test]
    fn test_fill_respects_clamp() {
        let mut source = Fsa::new();
        let s = source.add_state(false);
        let t = source.add_state(true);
        source.set_initial(s);
        source.add_transition(s, t, Interval::new(0, 20));

        let mut a = Automaton::with_clamp(5, 7);
        let all: BTreeSet<Symbol> = (0..=20).collect();
        a.fill(&source, &all);
        assert_eq!(a.alphabet(), &BTreeSet::from([5, 6, 7]));
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut a = one_twos_three();
        a.sync_states();
        let first: Vec<_> = a.transitions();
        let epoch = a.epoch();

        a.sync_states();
        assert_eq!(a.transitions(), first);
        assert_eq!(a.epoch(), epoch + 1);
    }

    #[test]
    fn test_sync_drops_unreachable_states() {
        let mut a = one_twos_three();
        let orphan = a.add_state();
        a.set_final(orphan);
        assert_eq!(a.nb_states(), 4);

        a.sync_states();
        assert_eq!(a.nb_states(), 3);
        assert_eq!(a.alphabet(), &BTreeSet::from([1, 2, 3]));
    }
}
