//! Symbol codec
//!
//! Bijection between the solver's integer symbols and the codepoints used
//! on automaton transitions. Codepoints that the pattern syntax uses as
//! structural markers are skipped, so external symbols stay dense:
//! symbol `0` is codepoint `0`, and every reserved codepoint shifts the
//! symbols above it by one.

use crate::error::{Error, Result};
use std::sync::LazyLock;

/// External integer symbol, as seen by the solver
pub type Symbol = i32;

/// Internal transition label
pub type Codepoint = u32;

pub const MIN_CODEPOINT: Codepoint = 0;
pub const MAX_CODEPOINT: Codepoint = 0xFFFF;

/// Codepoints never assigned to a symbol
pub const RESERVED: [char; 9] = ['"', '(', ')', '<', '>', '[', ']', '{', '}'];

/// Largest valid external symbol
pub const MAX_SYMBOL: Symbol =
    (MAX_CODEPOINT - MIN_CODEPOINT + 1) as Symbol - RESERVED.len() as Symbol - 1;

static CODEC: LazyLock<SymbolCodec> = LazyLock::new(SymbolCodec::build);

/// The process-wide codec table
pub fn codec() -> &'static SymbolCodec {
    &CODEC
}

/// Force the table to be built now rather than on first use
pub fn init() {
    LazyLock::force(&CODEC);
}

/// Shorthand for `codec().to_internal(symbol)`
pub fn to_internal(symbol: Symbol) -> Result<Codepoint> {
    codec().to_internal(symbol)
}

/// Shorthand for `codec().to_external(codepoint)`
pub fn to_external(codepoint: Codepoint) -> Result<Symbol> {
    codec().to_external(codepoint)
}

#[derive(Debug)]
pub struct SymbolCodec {
    /// indexed by symbol
    internal: Vec<Codepoint>,
    /// indexed by codepoint, `None` for reserved codepoints
    external: Vec<Option<Symbol>>,
}

impl SymbolCodec {
    fn build() -> Self {
        let mut internal = Vec::with_capacity((MAX_SYMBOL + 1) as usize);
        let mut external = Vec::with_capacity((MAX_CODEPOINT - MIN_CODEPOINT + 1) as usize);

        for codepoint in MIN_CODEPOINT..=MAX_CODEPOINT {
            if is_reserved(codepoint) {
                external.push(None);
            } else {
                external.push(Some(internal.len() as Symbol));
                internal.push(codepoint);
            }
        }

        tracing::debug!(
            "Symbol codec built: {} symbols over {} codepoints",
            internal.len(),
            external.len()
        );

        Self { internal, external }
    }

    pub fn to_internal(&self, symbol: Symbol) -> Result<Codepoint> {
        usize::try_from(symbol)
            .ok()
            .and_then(|i| self.internal.get(i).copied())
            .ok_or(Error::UnknownSymbol(symbol as i64))
    }

    pub fn to_external(&self, codepoint: Codepoint) -> Result<Symbol> {
        codepoint
            .checked_sub(MIN_CODEPOINT)
            .and_then(|i| self.external.get(i as usize).copied().flatten())
            .ok_or(Error::UnknownSymbol(codepoint as i64))
    }

    /// Symbols whose codepoints fall in `[lo, hi]`, as an inclusive range.
    ///
    /// The mapping is monotonic, so the image of a codepoint interval is a
    /// symbol interval. Returns `None` when the interval holds no mapped
    /// codepoint.
    pub fn external_span(&self, lo: Codepoint, hi: Codepoint) -> Option<(Symbol, Symbol)> {
        let lo = lo.max(MIN_CODEPOINT);
        let hi = hi.min(MAX_CODEPOINT);
        if lo > hi {
            return None;
        }
        let first = (lo..=hi).find_map(|c| self.to_external(c).ok())?;
        let last = (lo..=hi).rev().find_map(|c| self.to_external(c).ok())?;
        Some((first, last))
    }

    /// Number of valid external symbols
    pub fn len(&self) -> usize {
        self.internal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.internal.is_empty()
    }
}

pub fn is_reserved(codepoint: Codepoint) -> bool {
    char::from_u32(codepoint).is_some_and(|c| RESERVED.contains(&c))
}
