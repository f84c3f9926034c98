//! Symbol pattern syntax
//!
//! Patterns are regular expressions over integer symbols: a digit stands
//! for the symbol of that value, `<n>` for the (possibly multi-digit)
//! symbol `n`. Everything else keeps its regular-expression meaning.
//! [`translate`] rewrites a pattern into an ordinary expression over
//! codepoints, writing each symbol as a `\x{...}` escape.

use crate::codec::{self, Codepoint, Symbol};
use crate::error::{Error, Result};
use std::iter::Peekable;
use std::str::Chars;

/// Rewrite a symbol pattern into a codepoint expression.
///
/// Quantifier bounds (`{m,n}`) and backslash escapes are copied as they
/// are.
pub fn translate(pattern: &str) -> Result<String> {
    let mut out = String::with_capacity(pattern.len() * 4);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '0'..='9' => push_symbol(&mut out, Symbol::from(c as u8 - b'0'))?,
            '<' => {
                let symbol = read_symbol(&mut chars, pattern)?;
                push_symbol(&mut out, symbol)?;
            }
            '{' => {
                out.push(c);
                copy_until(&mut chars, '}', &mut out, pattern)?;
            }
            '\\' => {
                out.push(c);
                let escaped = chars
                    .next()
                    .ok_or_else(|| Error::pattern(format!("dangling escape in {:?}", pattern)))?;
                out.push(escaped);
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}

/// Read the digits of a `<n>` symbol, the opening `<` already consumed
fn read_symbol(chars: &mut Peekable<Chars<'_>>, pattern: &str) -> Result<Symbol> {
    let mut digits = String::new();
    loop {
        match chars.next() {
            Some('>') => break,
            Some(c) if c.is_ascii_digit() || (c == '-' && digits.is_empty()) => digits.push(c),
            Some(c) => {
                return Err(Error::pattern(format!(
                    "unexpected {:?} in symbol of {:?}",
                    c, pattern
                )));
            }
            None => return Err(Error::pattern(format!("unclosed '<' in {:?}", pattern))),
        }
    }
    digits
        .parse::<Symbol>()
        .map_err(|e| Error::pattern(format!("invalid symbol <{}>: {}", digits, e)))
}

fn copy_until(
    chars: &mut Peekable<Chars<'_>>,
    end: char,
    out: &mut String,
    pattern: &str,
) -> Result<()> {
    for c in chars.by_ref() {
        out.push(c);
        if c == end {
            return Ok(());
        }
    }
    Err(Error::pattern(format!("missing {:?} in {:?}", end, pattern)))
}

fn push_symbol(out: &mut String, symbol: Symbol) -> Result<()> {
    let c: Codepoint = codec::to_internal(symbol)?;
    if char::from_u32(c).is_none() {
        return Err(Error::pattern(format!(
            "symbol {} maps to the surrogate codepoint {:#06x}",
            symbol, c
        )));
    }
    out.push_str(&format!("\\x{{{:04X}}}", c));
    Ok(())
}
