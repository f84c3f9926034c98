//! Property-based tests over randomly generated small automata
//!
//! Tests:
//! - Union and intersection against their operands
//! - Complement against the original
//! - Minimization keeps the language and is idempotent

use cp_automaton::{Automaton, StateIndex, Symbol};
use proptest::prelude::*;
use std::collections::BTreeSet;

const SYMBOLS: [Symbol; 3] = [1, 2, 3];

/// State count, accepting flags and `(source, destination, symbol)` edges
type Shape = (usize, Vec<bool>, Vec<(StateIndex, StateIndex, Symbol)>);

fn shape() -> impl Strategy<Value = Shape> {
    (1usize..=4).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec(any::<bool>(), n),
            prop::collection::vec((0..n, 0..n, SYMBOLS[0]..=SYMBOLS[2]), 0..10),
        )
    })
}

/// Build the automaton described by `shape`, initial state 0
fn build((n, finals, edges): &Shape) -> Automaton {
    let mut a = Automaton::new();
    let states: Vec<StateIndex> = (0..*n).map(|_| a.add_state()).collect();
    a.set_initial_state(states[0]);
    for (&state, &accept) in states.iter().zip(finals) {
        if accept {
            a.set_final(state);
        }
    }
    for &(source, dest, symbol) in edges {
        a.add_transition(states[source], states[dest], &[symbol]).unwrap();
    }
    a.set_deterministic(false);
    a
}

/// Every word over `SYMBOLS` of length at most 4
fn words() -> Vec<Vec<Symbol>> {
    let mut all = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..4 {
        let next: Vec<Vec<Symbol>> = frontier
            .iter()
            .flat_map(|word: &Vec<Symbol>| {
                SYMBOLS.iter().map(move |&symbol| {
                    let mut longer = word.clone();
                    longer.push(symbol);
                    longer
                })
            })
            .collect();
        all.extend(next.iter().cloned());
        frontier = next;
    }
    all
}

fn accepts(a: &Automaton, word: &[Symbol]) -> bool {
    a.run(word).unwrap()
}

proptest! {
    /// Union accepts what either operand accepts, intersection what both do
    #[test]
    fn union_and_intersection(left in shape(), right in shape()) {
        let (a, b) = (build(&left), build(&right));
        let union = a.union(&b);
        let both = a.intersection(&b);

        for word in words() {
            let (in_a, in_b) = (accepts(&a, &word), accepts(&b, &word));
            prop_assert_eq!(accepts(&union, &word), in_a || in_b, "{:?}", word);
            prop_assert_eq!(accepts(&both, &word), in_a && in_b, "{:?}", word);
        }
    }

    /// Complement over the three symbols flips every verdict
    #[test]
    fn complement_flips(input in shape()) {
        let a = build(&input);
        let c = a.complement_over(&BTreeSet::from(SYMBOLS));
        let nothing = a.intersection(&c);

        for word in words() {
            prop_assert_eq!(accepts(&c, &word), !accepts(&a, &word), "{:?}", word);
            prop_assert!(!accepts(&nothing, &word), "{:?}", word);
        }
    }

    /// Minimization keeps the language, and a second pass changes nothing
    #[test]
    fn minimize_preserves_language(input in shape()) {
        let original = build(&input);
        let mut a = original.clone();

        a.minimize();
        prop_assert!(a.is_deterministic());
        let states = a.nb_states();
        let transitions = a.transitions();
        for word in words() {
            prop_assert_eq!(accepts(&a, &word), accepts(&original, &word), "{:?}", word);
        }

        a.minimize();
        prop_assert_eq!(a.nb_states(), states);
        prop_assert_eq!(a.transitions(), transitions);
    }
}
