//! Language-level properties of the automaton algebra, checked against
//! every word up to a small length.

use cp_automaton::codec::{self, MAX_SYMBOL};
use cp_automaton::fsa::Interval;
use cp_automaton::{Automaton, Error, RegexCompiler, StateIndex, Symbol};
use std::collections::BTreeSet;

/// Every word over `alphabet` of length at most `max_len`
fn words(alphabet: &[Symbol], max_len: usize) -> Vec<Vec<Symbol>> {
    let mut all = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for word in &frontier {
            for &symbol in alphabet {
                let mut longer = word.clone();
                longer.push(symbol);
                next.push(longer);
            }
        }
        all.extend(next.iter().cloned());
        frontier = next;
    }
    all
}

fn compile(pattern: &str) -> Automaton {
    Automaton::compile(&RegexCompiler::new(), pattern, 0, 0xFFFF).unwrap()
}

fn compile_raw(pattern: &str) -> Automaton {
    let compiler = RegexCompiler::new().with_minimize(false);
    Automaton::compile(&compiler, pattern, 0, 0xFFFF).unwrap()
}

fn accepts(a: &Automaton, word: &[Symbol]) -> bool {
    a.run(word).unwrap()
}

/// 1 2* 3, built state by state
fn one_twos_three() -> Automaton {
    let mut a = Automaton::new();
    let s: Vec<StateIndex> = (0..3).map(|_| a.add_state()).collect();
    a.set_initial_state(s[0]);
    a.set_final(s[2]);
    a.add_transition(s[0], s[1], &[1]).unwrap();
    a.add_transition(s[1], s[1], &[2]).unwrap();
    a.add_transition(s[1], s[2], &[3]).unwrap();
    a
}

#[test]
fn codec_round_trip() {
    let codec = codec::codec();
    assert_eq!(codec.len(), MAX_SYMBOL as usize + 1);
    for symbol in 0..=MAX_SYMBOL {
        let c = codec::to_internal(symbol).unwrap();
        assert!(!codec::is_reserved(c));
        assert_eq!(codec::to_external(c).unwrap(), symbol);
    }
    assert!(matches!(
        codec::to_internal(MAX_SYMBOL + 1),
        Err(Error::UnknownSymbol(_))
    ));
}

#[test]
fn minimize_is_idempotent() {
    for pattern in ["12*3", "(1|2)*3", "1{2,4}|21", "(12|1)(2|21)", "[1-3]*2[1-3]"] {
        let mut a = compile_raw(pattern);
        let before = a.clone();

        a.minimize();
        let once = a.nb_states();
        let transitions = a.transitions().len();
        a.minimize();
        assert_eq!(a.nb_states(), once, "{pattern}");
        assert_eq!(a.transitions().len(), transitions, "{pattern}");

        for word in words(&[1, 2, 3], 5) {
            assert_eq!(accepts(&a, &word), accepts(&before, &word), "{pattern} {word:?}");
        }
    }
}

#[test]
fn union_and_intersection_follow_their_operands() {
    let pairs = [("12*3", "1(2|3)"), ("(1|2)*", "2*1"), ("1{2,3}", "11*")];
    for (left, right) in pairs {
        let a = compile(left);
        let b = compile(right);
        let union = a.union(&b);
        let both = a.intersection(&b);

        for word in words(&[1, 2, 3], 5) {
            let (in_a, in_b) = (accepts(&a, &word), accepts(&b, &word));
            assert_eq!(accepts(&union, &word), in_a || in_b, "{left} | {right} {word:?}");
            assert_eq!(accepts(&both, &word), in_a && in_b, "{left} & {right} {word:?}");
        }
    }
}

#[test]
fn complement_flips_acceptance() {
    for pattern in ["12*3", "(1|2)*", "", "3{2}"] {
        let a = compile(pattern);
        let c = a.complement_over(&BTreeSet::from([1, 2, 3]));
        for word in words(&[1, 2, 3], 5) {
            assert_eq!(accepts(&c, &word), !accepts(&a, &word), "{pattern:?} {word:?}");
        }
    }
}

#[test]
fn delete_splits_transition_interval() {
    let mut a = Automaton::new();
    let s = a.add_state();
    let t = a.add_state();
    a.set_initial_state(s);
    a.set_final(t);
    a.add_transition(s, t, &(10..=20).collect::<Vec<_>>()).unwrap();
    a.reduce();

    a.delete_transition(s, t, 15).unwrap();

    assert_eq!(
        a.intervals(s),
        vec![(Interval::new(10, 14), t), (Interval::new(16, 20), t)]
    );
    assert!(a.transitions().iter().all(|tr| tr.symbol != 15));
    assert!(!accepts(&a, &[15]));
    assert!(accepts(&a, &[14]) && accepts(&a, &[16]));
}

#[test]
fn delta_refuses_non_deterministic_automata() {
    let mut a = one_twos_three();
    a.set_deterministic(false);
    for source in 0..a.nb_states() {
        for symbol in 0..5 {
            assert!(matches!(
                a.delta(source, symbol),
                Err(Error::NonDeterministicOperation)
            ));
        }
    }
}

#[test]
fn one_twos_three_before_and_after_minimize() {
    let cases: [(&[Symbol], bool); 4] = [
        (&[1, 3], true),
        (&[1, 2, 2, 3], true),
        (&[1, 2], false),
        (&[3], false),
    ];

    for mut a in [one_twos_three(), compile_raw("12*3")] {
        for (word, expected) in cases {
            assert_eq!(accepts(&a, word), expected, "{word:?}");
        }
        a.minimize();
        for (word, expected) in cases {
            assert_eq!(accepts(&a, word), expected, "{word:?}");
        }
        assert_eq!(a.nb_states(), 3);
        assert_eq!(a.alphabet(), &BTreeSet::from([1, 2, 3]));
    }
}

#[test]
fn union_of_single_symbols() {
    let single = |symbol: Symbol| {
        let mut a = Automaton::new();
        let s = a.add_state();
        let t = a.add_state();
        a.set_initial_state(s);
        a.set_final(t);
        a.add_transition(s, t, &[symbol]).unwrap();
        a
    };

    let a = single(1).union(&single(2));
    assert!(accepts(&a, &[1]));
    assert!(accepts(&a, &[2]));
    assert!(!accepts(&a, &[1, 2]));
    assert!(!accepts(&a, &[]));
}

#[test]
fn stale_indices_degrade() {
    let mut a = one_twos_three();
    a.minimize();
    let count = a.nb_states();

    assert!(!a.is_final(count));
    assert!(a.transitions_from(count).is_empty());
    assert_eq!(a.delta(count, 1).unwrap(), None);
    a.set_final(count);
    assert_eq!(a.final_states().len(), 1);
}
