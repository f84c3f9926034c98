//! Finite state automata over codepoint intervals
//!
//! `Fsa` is the graph-level representation behind [`crate::Automaton`].
//! States are petgraph nodes addressed by `NodeIndex`, transitions are edges
//! labelled with a closed [`Interval`]. The algebra in [`ops`] and the
//! reductions in [`minimize`] all work on this type and know nothing about
//! external symbols.

use crate::codec::{Codepoint, MAX_CODEPOINT, MIN_CODEPOINT};
use petgraph::Direction;
use petgraph::prelude::EdgeRef;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

pub mod interval;
pub mod minimize;
pub mod ops;

pub use interval::Interval;

/// Node weight: a state only carries its accept flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsaState {
    pub accept: bool,
}

/// An automaton graph with interval-labelled transitions.
///
/// The `deterministic` flag is declared, not measured: constructors and the
/// algebra set it, callers may override it.
#[derive(Debug, Clone)]
pub struct Fsa {
    graph: StableGraph<FsaState, Interval>,
    initial: Option<NodeIndex>,
    deterministic: bool,
}

impl Default for Fsa {
    fn default() -> Self {
        Self::new()
    }
}

impl Fsa {
    /// A graph with no states and no initial state
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            initial: None,
            deterministic: true,
        }
    }

    /// The automaton accepting nothing: one rejecting initial state
    pub fn empty_language() -> Self {
        let mut fsa = Self::new();
        let s = fsa.add_state(false);
        fsa.initial = Some(s);
        fsa
    }

    /// The automaton accepting only the empty word
    pub fn empty_string() -> Self {
        let mut fsa = Self::new();
        let s = fsa.add_state(true);
        fsa.initial = Some(s);
        fsa
    }

    /// The automaton accepting any single codepoint of `interval`
    pub fn interval(interval: Interval) -> Self {
        let mut fsa = Self::new();
        let s = fsa.add_state(false);
        let t = fsa.add_state(true);
        fsa.add_transition(s, t, interval);
        fsa.initial = Some(s);
        fsa
    }

    pub fn add_state(&mut self, accept: bool) -> NodeIndex {
        self.graph.add_node(FsaState { accept })
    }

    /// Add a transition unless an identical one already exists
    pub fn add_transition(&mut self, from: NodeIndex, to: NodeIndex, interval: Interval) {
        if !self.has_transition(from, to, &interval) {
            self.graph.add_edge(from, to, interval);
        }
    }

    pub fn has_transition(&self, from: NodeIndex, to: NodeIndex, interval: &Interval) -> bool {
        self.graph
            .edges_directed(from, Direction::Outgoing)
            .any(|e| e.target() == to && e.weight() == interval)
    }

    pub fn remove_transition(&mut self, edge: EdgeIndex) -> Option<Interval> {
        self.graph.remove_edge(edge)
    }

    pub fn contains_state(&self, node: NodeIndex) -> bool {
        self.graph.contains_node(node)
    }

    pub fn initial(&self) -> Option<NodeIndex> {
        self.initial
    }

    pub fn set_initial(&mut self, node: NodeIndex) {
        self.initial = Some(node);
    }

    pub fn is_accept(&self, node: NodeIndex) -> bool {
        self.graph.node_weight(node).is_some_and(|s| s.accept)
    }

    pub fn set_accept(&mut self, node: NodeIndex, accept: bool) {
        if let Some(state) = self.graph.node_weight_mut(node) {
            state.accept = accept;
        }
    }

    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    pub fn set_deterministic(&mut self, deterministic: bool) {
        self.deterministic = deterministic;
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn transition_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn accept_states(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices().filter(|&n| self.is_accept(n))
    }

    /// Outgoing transitions of `node`, ordered by interval then destination
    pub fn transitions(&self, node: NodeIndex) -> Vec<(Interval, NodeIndex)> {
        let mut out: Vec<(Interval, NodeIndex)> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect();
        out.sort();
        out
    }

    /// Outgoing edges of `node` with their ids, unordered
    pub fn edges_from(&self, node: NodeIndex) -> Vec<(EdgeIndex, Interval, NodeIndex)> {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| (e.id(), *e.weight(), e.target()))
            .collect()
    }

    /// Every edge of the graph as `(source, interval, destination)`
    pub fn all_transitions(&self) -> Vec<(NodeIndex, Interval, NodeIndex)> {
        self.graph
            .edge_indices()
            .filter_map(|e| {
                let (from, to) = self.graph.edge_endpoints(e)?;
                let interval = self.graph.edge_weight(e)?;
                Some((from, *interval, to))
            })
            .collect()
    }

    /// The destination of the first transition of `node` on `c`
    pub fn step(&self, node: NodeIndex, c: Codepoint) -> Option<NodeIndex> {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .find(|e| e.weight().contains(c))
            .map(|e| e.target())
    }

    /// Destinations of `node` on `c`, one per matching transition
    pub fn targets(
        &self,
        node: NodeIndex,
        c: Codepoint,
    ) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .filter(move |e| e.weight().contains(c))
            .map(|e| e.target())
    }

    /// Collect every destination of `node` on `c` into `into`
    pub fn step_all(&self, node: NodeIndex, c: Codepoint, into: &mut HashSet<NodeIndex>) {
        into.extend(self.targets(node, c));
    }

    /// Acceptance test by subset simulation
    pub fn run(&self, word: &[Codepoint]) -> bool {
        let Some(initial) = self.initial else {
            return false;
        };
        let mut current = HashSet::from([initial]);
        for &c in word {
            let mut next = HashSet::new();
            for &node in &current {
                self.step_all(node, c, &mut next);
            }
            if next.is_empty() {
                return false;
            }
            current = next;
        }
        current.iter().any(|&n| self.is_accept(n))
    }

    /// States in canonical order: breadth-first from the initial state,
    /// following transitions in [`Fsa::transitions`] order. Without an
    /// initial state every node is listed in graph order.
    pub fn reachable_states(&self) -> Vec<NodeIndex> {
        let Some(initial) = self.initial.filter(|&n| self.contains_state(n)) else {
            return self.graph.node_indices().collect();
        };
        let mut seen = HashSet::from([initial]);
        let mut order = vec![initial];
        let mut queue = VecDeque::from([initial]);
        while let Some(node) = queue.pop_front() {
            for (_, to) in self.transitions(node) {
                if seen.insert(to) {
                    order.push(to);
                    queue.push_back(to);
                }
            }
        }
        order
    }

    /// Drop every node not reachable from the initial state
    pub fn prune_unreachable(&mut self) {
        if self.initial.is_none() {
            return;
        }
        let reachable: HashSet<NodeIndex> = self.reachable_states().into_iter().collect();
        let dead: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|n| !reachable.contains(n))
            .collect();
        for node in dead {
            self.graph.remove_node(node);
        }
    }

    /// States from which some accept state can be reached
    pub fn live_states(&self) -> HashSet<NodeIndex> {
        let mut live: HashSet<NodeIndex> = self.accept_states().collect();
        let mut queue: VecDeque<NodeIndex> = live.iter().copied().collect();
        while let Some(node) = queue.pop_front() {
            for pred in self.graph.neighbors_directed(node, Direction::Incoming) {
                if live.insert(pred) {
                    queue.push_back(pred);
                }
            }
        }
        live
    }

    /// Whether no state has two overlapping transitions to different
    /// destinations
    pub fn is_deterministic_graph(&self) -> bool {
        self.graph.node_indices().all(|node| {
            let mut reach: Option<(Codepoint, NodeIndex)> = None;
            for (interval, to) in self.transitions(node) {
                if let Some((max, dest)) = reach {
                    if interval.min <= max && dest != to {
                        return false;
                    }
                    if interval.max > max {
                        reach = Some((interval.max, to));
                    }
                } else {
                    reach = Some((interval.max, to));
                }
            }
            true
        })
    }

    /// Sorted interval start points: every transition boundary plus the
    /// lowest codepoint. Consecutive points delimit the character classes
    /// no transition distinguishes between.
    pub fn start_points(&self) -> Vec<Codepoint> {
        let mut points = BTreeSet::from([MIN_CODEPOINT]);
        for (_, interval, _) in self.all_transitions() {
            points.insert(interval.min);
            if interval.max < MAX_CODEPOINT {
                points.insert(interval.max + 1);
            }
        }
        points.into_iter().collect()
    }

    /// Copy every state and transition of `other` into this graph.
    ///
    /// Returns the node map from `other` into `self`. Initial state and
    /// determinism flag are left untouched.
    pub fn import(&mut self, other: &Fsa) -> HashMap<NodeIndex, NodeIndex> {
        let map: HashMap<NodeIndex, NodeIndex> = other
            .graph
            .node_indices()
            .map(|n| (n, self.graph.add_node(other.graph[n])))
            .collect();
        for (from, interval, to) in other.all_transitions() {
            if let (Some(&f), Some(&t)) = (map.get(&from), map.get(&to)) {
                self.graph.add_edge(f, t, interval);
            }
        }
        map
    }

    /// Splice epsilon transitions into the graph.
    ///
    /// For every pair `(p, q)`, `p` gains the outgoing transitions of every
    /// state epsilon-reachable from it and becomes accepting if any of them
    /// accepts. Chains of pairs are closed transitively.
    pub fn add_epsilons(&mut self, pairs: &[(NodeIndex, NodeIndex)]) {
        let mut forward: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
        for &(p, q) in pairs {
            forward.entry(p).or_default().push(q);
        }

        let mut additions = Vec::new();
        let mut accepting = Vec::new();
        for &source in forward.keys() {
            let mut reached = HashSet::new();
            let mut queue = VecDeque::from([source]);
            while let Some(node) = queue.pop_front() {
                for &next in forward.get(&node).into_iter().flatten() {
                    if next != source && reached.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
            for target in reached {
                if self.is_accept(target) {
                    accepting.push(source);
                }
                for (interval, to) in self.transitions(target) {
                    additions.push((source, interval, to));
                }
            }
        }

        for node in accepting {
            self.set_accept(node, true);
        }
        for (from, interval, to) in additions {
            self.add_transition(from, to, interval);
        }
        self.deterministic = false;
    }
}
