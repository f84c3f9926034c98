//! Automata algebra
//!
//! Every operation returns a fresh `Fsa` and leaves its operands alone.
//! Constructions that splice graphs together (union, concatenation,
//! repetition) go through [`Fsa::add_epsilons`] and produce
//! non-deterministic results; the product construction keeps determinism
//! when both operands have it.

use super::{Fsa, Interval};
use crate::codec::{Codepoint, MAX_CODEPOINT, MIN_CODEPOINT};
use petgraph::stable_graph::NodeIndex;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

impl Fsa {
    /// Words accepted by `self` or by `other`
    pub fn union(&self, other: &Fsa) -> Fsa {
        let mut out = Fsa::new();
        let start = out.add_state(false);
        out.set_initial(start);

        let mut pairs = Vec::new();
        for operand in [self, other] {
            let map = out.import(operand);
            if let Some(&init) = operand.initial().and_then(|i| map.get(&i)) {
                pairs.push((start, init));
            }
        }
        out.add_epsilons(&pairs);
        out.prune_unreachable();
        out
    }

    /// Words `uv` with `u` accepted by `self` and `v` by `other`
    pub fn concatenate(&self, other: &Fsa) -> Fsa {
        let (Some(left_init), Some(right_init)) = (self.initial(), other.initial()) else {
            return Fsa::empty_language();
        };
        let mut out = Fsa::new();
        let left = out.import(self);
        let right = out.import(other);
        let (Some(&start), Some(&join)) = (left.get(&left_init), right.get(&right_init)) else {
            return Fsa::empty_language();
        };
        out.set_initial(start);

        let mut pairs = Vec::new();
        for accept in self.accept_states() {
            if let Some(&node) = left.get(&accept) {
                out.set_accept(node, false);
                pairs.push((node, join));
            }
        }
        out.add_epsilons(&pairs);
        out.prune_unreachable();
        out
    }

    /// Kleene star: zero or more repetitions
    pub fn repeat(&self) -> Fsa {
        let mut out = Fsa::new();
        let start = out.add_state(true);
        out.set_initial(start);
        let map = out.import(self);

        let mut pairs = Vec::new();
        if let Some(&init) = self.initial().and_then(|i| map.get(&i)) {
            pairs.push((start, init));
        }
        for accept in self.accept_states() {
            if let Some(&node) = map.get(&accept) {
                pairs.push((node, start));
            }
        }
        out.add_epsilons(&pairs);
        out.prune_unreachable();
        out
    }

    /// `min` or more repetitions
    pub fn repeat_min(&self, min: u32) -> Fsa {
        let mut out = self.repeat();
        for _ in 0..min {
            out = self.concatenate(&out);
        }
        out
    }

    /// Between `min` and `max` repetitions, both inclusive.
    ///
    /// An empty range (`min > max`) yields the empty language.
    pub fn repeat_range(&self, min: u32, max: u32) -> Fsa {
        if min > max {
            return Fsa::empty_language();
        }
        let optional = self.optional();
        let mut out = Fsa::empty_string();
        for _ in 0..min {
            out = out.concatenate(self);
        }
        for _ in min..max {
            out = out.concatenate(&optional);
        }
        out
    }

    /// Zero or one occurrence
    pub fn optional(&self) -> Fsa {
        self.union(&Fsa::empty_string())
    }

    /// Words accepted by both `self` and `other` (product construction)
    pub fn intersection(&self, other: &Fsa) -> Fsa {
        let (Some(a0), Some(b0)) = (self.initial(), other.initial()) else {
            return Fsa::empty_language();
        };
        let mut out = Fsa::new();
        let mut pairs: HashMap<(NodeIndex, NodeIndex), NodeIndex> = HashMap::new();
        let mut queue = VecDeque::new();

        let start = out.add_state(self.is_accept(a0) && other.is_accept(b0));
        out.set_initial(start);
        pairs.insert((a0, b0), start);
        queue.push_back((a0, b0));

        while let Some((p, q)) = queue.pop_front() {
            let from = pairs[&(p, q)];
            let right = other.transitions(q);
            for (left_interval, p2) in self.transitions(p) {
                for &(right_interval, q2) in &right {
                    let Some(interval) = left_interval.intersect(&right_interval) else {
                        continue;
                    };
                    let to = *pairs.entry((p2, q2)).or_insert_with(|| {
                        queue.push_back((p2, q2));
                        out.add_state(self.is_accept(p2) && other.is_accept(q2))
                    });
                    out.add_transition(from, to, interval);
                }
            }
        }

        out.set_deterministic(self.is_deterministic() && other.is_deterministic());
        out
    }

    /// Subset construction.
    ///
    /// A graph that is already deterministic is returned as a copy with its
    /// flag set; the check looks at the transitions, not at the declared
    /// flag.
    pub fn determinize(&self) -> Fsa {
        let Some(initial) = self.initial() else {
            return Fsa::empty_language();
        };
        if self.is_deterministic_graph() {
            let mut out = self.clone();
            out.set_deterministic(true);
            return out;
        }

        let points = self.start_points();
        let mut out = Fsa::new();
        let mut subsets: HashMap<Vec<NodeIndex>, NodeIndex> = HashMap::new();
        let mut queue: VecDeque<Vec<NodeIndex>> = VecDeque::new();

        let start_set = vec![initial];
        let start = out.add_state(self.is_accept(initial));
        out.set_initial(start);
        subsets.insert(start_set.clone(), start);
        queue.push_back(start_set);

        while let Some(set) = queue.pop_front() {
            let from = subsets[&set];
            for (i, &point) in points.iter().enumerate() {
                let mut next = HashSet::new();
                for &node in &set {
                    self.step_all(node, point, &mut next);
                }
                if next.is_empty() {
                    continue;
                }
                let key: Vec<NodeIndex> = next.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
                let to = match subsets.get(&key) {
                    Some(&to) => to,
                    None => {
                        let accept = key.iter().any(|&n| self.is_accept(n));
                        let to = out.add_state(accept);
                        subsets.insert(key.clone(), to);
                        queue.push_back(key);
                        to
                    }
                };
                let end = points.get(i + 1).map_or(MAX_CODEPOINT, |&next| next - 1);
                out.add_transition(from, to, Interval::new(point, end));
            }
        }

        out.reduce();
        out.set_deterministic(true);
        tracing::debug!(
            "Determinized {} states into {}",
            self.state_count(),
            out.state_count()
        );
        out
    }

    /// Route every missing codepoint of every state to a rejecting sink
    /// that loops on the full range.
    pub fn totalize(&mut self) {
        let sink = self.add_state(false);
        let states: Vec<NodeIndex> = self.node_indices().filter(|&n| n != sink).collect();
        self.add_transition(sink, sink, Interval::new(MIN_CODEPOINT, MAX_CODEPOINT));

        for node in states {
            let mut next: Codepoint = MIN_CODEPOINT;
            let mut gaps = Vec::new();
            for (interval, _) in self.transitions(node) {
                if interval.min > next {
                    gaps.push(Interval::new(next, interval.min - 1));
                }
                next = next.max(interval.max + 1);
            }
            if next <= MAX_CODEPOINT {
                gaps.push(Interval::new(next, MAX_CODEPOINT));
            }
            for gap in gaps {
                self.add_transition(node, sink, gap);
            }
        }
    }

    /// Words over the full codepoint range not accepted by `self`
    pub fn complement(&self) -> Fsa {
        let mut out = if self.initial().is_some() {
            self.determinize()
        } else {
            Fsa::empty_language()
        };
        out.totalize();
        let states: Vec<NodeIndex> = out.node_indices().collect();
        for node in states {
            let accept = out.is_accept(node);
            out.set_accept(node, !accept);
        }
        out.remove_dead_transitions();
        out.prune_unreachable();
        out.set_deterministic(true);
        out
    }
}
