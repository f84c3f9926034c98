//! Structural reductions: interval merging, dead-transition removal and
//! DFA minimization.

use super::{Fsa, Interval};
use crate::codec::{Codepoint, MAX_CODEPOINT};
use petgraph::stable_graph::NodeIndex;
use std::collections::{BTreeMap, HashMap, HashSet};

impl Fsa {
    /// Merge overlapping or adjacent intervals that share a source and a
    /// destination. The set of accepted words is unchanged.
    pub fn reduce(&mut self) {
        let states: Vec<NodeIndex> = self.node_indices().collect();
        for node in states {
            let edges = self.edges_from(node);
            let mut by_dest: BTreeMap<NodeIndex, Vec<Interval>> = BTreeMap::new();
            for &(_, interval, to) in &edges {
                by_dest.entry(to).or_default().push(interval);
            }

            let mut merged = Vec::with_capacity(edges.len());
            for (to, mut intervals) in by_dest {
                intervals.sort();
                let mut current = intervals[0];
                for interval in intervals.into_iter().skip(1) {
                    if current.touches(&interval) {
                        current.max = current.max.max(interval.max);
                    } else {
                        merged.push((current, to));
                        current = interval;
                    }
                }
                merged.push((current, to));
            }

            if merged.len() == edges.len() {
                continue;
            }
            for (edge, _, _) in edges {
                self.remove_transition(edge);
            }
            for (interval, to) in merged {
                self.add_transition(node, to, interval);
            }
        }
    }

    /// Drop transitions into states from which no accept state is
    /// reachable, then merge what is left.
    pub fn remove_dead_transitions(&mut self) {
        let live = self.live_states();
        let states: Vec<NodeIndex> = self.node_indices().collect();
        for node in states {
            for (edge, _, to) in self.edges_from(node) {
                if !live.contains(&to) {
                    self.remove_transition(edge);
                }
            }
        }
        self.reduce();
    }

    /// The minimal deterministic automaton for the same language.
    ///
    /// Determinizes, completes the transition function with a sink, runs
    /// Hopcroft's partition refinement over the character classes given by
    /// [`Fsa::start_points`], then strips the sink again. The result is
    /// unique up to state numbering, so minimizing twice yields the same
    /// state count.
    pub fn minimize(&self) -> Fsa {
        let mut dfa = self.determinize();
        dfa.totalize();
        dfa.prune_unreachable();

        let order = dfa.reachable_states();
        let n = order.len();
        if n == 0 {
            return Fsa::empty_language();
        }
        let position: HashMap<NodeIndex, usize> =
            order.iter().enumerate().map(|(i, &node)| (node, i)).collect();
        let points = dfa.start_points();
        let k = points.len();

        // delta[i * k + j] = successor of state i on class j
        let mut delta: Vec<Option<usize>> = Vec::with_capacity(n * k);
        for &node in &order {
            for &point in &points {
                delta.push(dfa.step(node, point).and_then(|t| position.get(&t).copied()));
            }
        }
        let accepting: Vec<bool> = order.iter().map(|&node| dfa.is_accept(node)).collect();

        let class = hopcroft_refine(n, k, &delta, &accepting);
        let blocks = class.iter().max().map_or(0, |&m| m + 1);

        let mut out = Fsa::new();
        let nodes: Vec<NodeIndex> = (0..blocks).map(|_| out.add_state(false)).collect();
        let mut done = vec![false; blocks];
        for i in 0..n {
            let block = class[i];
            if done[block] {
                continue;
            }
            done[block] = true;
            out.set_accept(nodes[block], accepting[i]);
            for (j, &point) in points.iter().enumerate() {
                if let Some(target) = delta[i * k + j] {
                    let end: Codepoint = points.get(j + 1).map_or(MAX_CODEPOINT, |&next| next - 1);
                    out.add_transition(nodes[block], nodes[class[target]], Interval::new(point, end));
                }
            }
        }
        out.set_initial(nodes[class[0]]);
        out.remove_dead_transitions();
        out.prune_unreachable();
        out.set_deterministic(true);

        tracing::debug!(
            "Minimized {} states into {}",
            self.state_count(),
            out.state_count()
        );
        out
    }
}

/// Hopcroft's partition refinement, O(kn log n).
///
/// `delta` is the flattened transition table of a DFA with `n` states over
/// `k` character classes; `None` entries behave like transitions to an
/// implicit rejecting state. Returns the block of each state, numbered in
/// order of first appearance so that state `0` lands in block `0`.
fn hopcroft_refine(n: usize, k: usize, delta: &[Option<usize>], accepting: &[bool]) -> Vec<usize> {
    // inv[j * k + c] = states i with delta(i, c) = j
    let mut inv: Vec<Vec<usize>> = vec![Vec::new(); n * k];
    for i in 0..n {
        for c in 0..k {
            if let Some(j) = delta[i * k + c] {
                inv[j * k + c].push(i);
            }
        }
    }

    let (finals, others): (Vec<usize>, Vec<usize>) = (0..n).partition(|&i| accepting[i]);
    let mut blocks: Vec<Vec<usize>> = Vec::new();
    let mut find = vec![0usize; n];
    let mut in_worklist: Vec<bool> = Vec::new();
    let mut worklist: Vec<usize> = Vec::new();
    for block in [finals, others] {
        if block.is_empty() {
            continue;
        }
        let id = blocks.len();
        for &s in &block {
            find[s] = id;
        }
        blocks.push(block);
        in_worklist.push(true);
        worklist.push(id);
    }

    let mut members: HashMap<usize, HashSet<usize>> = HashMap::new();
    while let Some(splitter) = worklist.pop() {
        in_worklist[splitter] = false;
        let splitter_states = blocks[splitter].clone();

        for c in 0..k {
            // group the pre-images of the splitter by their current block
            members.clear();
            for &j in &splitter_states {
                for &i in &inv[j * k + c] {
                    members.entry(find[i]).or_default().insert(i);
                }
            }

            for (&block, hits) in &members {
                let size = blocks[block].len();
                if hits.len() == size {
                    continue;
                }
                let (kept, moved): (Vec<usize>, Vec<usize>) =
                    blocks[block].iter().copied().partition(|s| hits.contains(s));

                let new_id = blocks.len();
                for &s in &moved {
                    find[s] = new_id;
                }
                let kept_len = kept.len();
                let moved_len = moved.len();
                blocks[block] = kept;
                blocks.push(moved);
                in_worklist.push(false);

                if in_worklist[block] || moved_len <= kept_len {
                    in_worklist[new_id] = true;
                    worklist.push(new_id);
                } else {
                    in_worklist[block] = true;
                    worklist.push(block);
                }
            }
        }
    }

    let mut renumber: Vec<Option<usize>> = vec![None; blocks.len()];
    let mut next = 0;
    find.iter()
        .map(|&b| {
            *renumber[b].get_or_insert_with(|| {
                next += 1;
                next - 1
            })
        })
        .collect()
}
