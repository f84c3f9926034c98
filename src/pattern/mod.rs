//! Pattern compilation
//!
//! The automaton core only needs a graph out of a pattern; how the pattern
//! is parsed is up to a [`PatternCompiler`]. [`RegexCompiler`] reads the
//! symbol syntax of [`syntax`] and builds the graph with the [`Fsa`]
//! algebra.

use crate::codec::Codepoint;
use crate::error::{Error, Result};
use crate::fsa::{Fsa, Interval};
use regex_syntax::ParserBuilder;
use regex_syntax::hir::{Class, Hir, HirKind, Repetition};

pub mod syntax;

pub use syntax::translate;

/// Turns a pattern into a raw graph over codepoints in `[min, max]`
pub trait PatternCompiler {
    fn compile(&self, pattern: &str, min: Codepoint, max: Codepoint) -> Result<Fsa>;
}

/// Regular-expression compiler for symbol patterns
#[derive(Debug, Clone, Copy)]
pub struct RegexCompiler {
    minimize: bool,
}

impl Default for RegexCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl RegexCompiler {
    /// A compiler that minimizes its output
    pub fn new() -> Self {
        Self { minimize: true }
    }

    pub fn with_minimize(mut self, minimize: bool) -> Self {
        self.minimize = minimize;
        self
    }
}

impl PatternCompiler for RegexCompiler {
    fn compile(&self, pattern: &str, min: Codepoint, max: Codepoint) -> Result<Fsa> {
        let expression = syntax::translate(pattern)?;
        let hir = ParserBuilder::new()
            .dot_matches_new_line(true)
            .build()
            .parse(&expression)?;

        let fsa = Builder { min, max }.build(&hir)?;
        tracing::debug!(
            "Compiled pattern {:?}: {} states, {} transitions",
            pattern,
            fsa.state_count(),
            fsa.transition_count()
        );

        Ok(if self.minimize { fsa.minimize() } else { fsa })
    }
}

/// HIR to `Fsa` translation, keeping character classes inside the clamp
struct Builder {
    min: Codepoint,
    max: Codepoint,
}

impl Builder {
    fn build(&self, hir: &Hir) -> Result<Fsa> {
        match hir.kind() {
            HirKind::Empty => Ok(Fsa::empty_string()),
            HirKind::Literal(literal) => {
                let text = std::str::from_utf8(&literal.0)
                    .map_err(|e| Error::pattern(format!("non UTF-8 literal: {}", e)))?;
                Ok(text
                    .chars()
                    .map(|c| self.class([(c as Codepoint, c as Codepoint)]))
                    .fold(Fsa::empty_string(), |acc, next| acc.concatenate(&next)))
            }
            HirKind::Class(Class::Unicode(class)) => Ok(self.class(
                class
                    .iter()
                    .map(|r| (r.start() as Codepoint, r.end() as Codepoint)),
            )),
            HirKind::Class(Class::Bytes(class)) => Ok(self.class(
                class
                    .iter()
                    .map(|r| (Codepoint::from(r.start()), Codepoint::from(r.end()))),
            )),
            HirKind::Look(look) => Err(Error::pattern(format!(
                "unsupported assertion {:?}",
                look
            ))),
            HirKind::Repetition(Repetition { min, max, sub, .. }) => {
                let sub = self.build(sub)?;
                Ok(match max {
                    Some(max) => sub.repeat_range(*min, *max),
                    None => sub.repeat_min(*min),
                })
            }
            HirKind::Capture(capture) => self.build(&capture.sub),
            HirKind::Concat(parts) => {
                parts
                    .iter()
                    .try_fold(Fsa::empty_string(), |acc, part| -> Result<Fsa> {
                        Ok(acc.concatenate(&self.build(part)?))
                    })
            }
            HirKind::Alternation(branches) => {
                let mut branches = branches.iter();
                let Some(first) = branches.next() else {
                    return Ok(Fsa::empty_language());
                };
                branches.try_fold(self.build(first)?, |acc, branch| -> Result<Fsa> {
                    Ok(acc.union(&self.build(branch)?))
                })
            }
        }
    }

    /// One step over any of `ranges`, clipped to the clamp
    fn class(&self, ranges: impl IntoIterator<Item = (Codepoint, Codepoint)>) -> Fsa {
        let mut fsa = Fsa::empty_language();
        let Some(start) = fsa.initial() else {
            return fsa;
        };
        let end = fsa.add_state(true);
        for (lo, hi) in ranges {
            if let Some(interval) = Interval::new(lo, hi).clip(self.min, self.max) {
                fsa.add_transition(start, end, interval);
            }
        }
        fsa
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{MAX_CODEPOINT, to_internal};

    fn compile(pattern: &str) -> Fsa {
        RegexCompiler::new().compile(pattern, 0, MAX_CODEPOINT).unwrap()
    }

    fn accepts(fsa: &Fsa, word: &[i32]) -> bool {
        let word: Vec<Codepoint> = word.iter().map(|&s| to_internal(s).unwrap()).collect();
        fsa.run(&word)
    }

    #[test]
    fn test_compile_star() {
        let fsa = compile("12*3");
        assert!(fsa.is_deterministic());
        assert_eq!(fsa.state_count(), 3);
        assert!(accepts(&fsa, &[1, 3]));
        assert!(accepts(&fsa, &[1, 2, 2, 3]));
        assert!(!accepts(&fsa, &[1, 2]));
        assert!(!accepts(&fsa, &[3]));
    }

    #[test]
    fn test_compile_bounded_repetition() {
        let fsa = compile("<40>{2,3}");
        assert!(!accepts(&fsa, &[40]));
        assert!(accepts(&fsa, &[40, 40]));
        assert!(accepts(&fsa, &[40, 40, 40]));
        assert!(!accepts(&fsa, &[40, 40, 40, 40]));
    }

    #[test]
    fn test_compile_classes_and_alternation() {
        let fsa = compile("[1-4](5|<12>)+");
        assert!(accepts(&fsa, &[3, 5]));
        assert!(accepts(&fsa, &[1, 12, 5, 12]));
        assert!(!accepts(&fsa, &[0, 5]));
        assert!(!accepts(&fsa, &[4]));
    }

    #[test]
    fn test_dot_is_clipped_to_clamp() {
        let fsa = RegexCompiler::new().compile(".", 10, 20).unwrap();
        assert!(fsa.run(&[10]));
        assert!(fsa.run(&[20]));
        assert!(!fsa.run(&[9]));
        assert!(!fsa.run(&[21]));
    }

    #[test]
    fn test_without_minimize() {
        let raw = RegexCompiler::new()
            .with_minimize(false)
            .compile("12|34", 0, MAX_CODEPOINT)
            .unwrap();
        assert!(!raw.is_deterministic());
        assert!(accepts(&raw, &[3, 4]));
        assert!(!accepts(&raw, &[1, 4]));
    }

    #[test]
    fn test_rejected_patterns() {
        let compiler = RegexCompiler::new();
        assert!(matches!(
            compiler.compile("^1", 0, MAX_CODEPOINT),
            Err(Error::Pattern(_))
        ));
        assert!(matches!(
            compiler.compile("(1", 0, MAX_CODEPOINT),
            Err(Error::Pattern(_))
        ));
    }
}
