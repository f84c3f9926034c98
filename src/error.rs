//! This module defines all error types used throughout the crate.

use std::io;
use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A state index at or above the current state count
    #[error("State {index} is not in the automaton ({count} states)")]
    InvalidStateIndex { index: usize, count: usize },

    /// Single-target lookup on an automaton declared non-deterministic
    #[error("Deterministic transition lookup on a non-deterministic automaton")]
    NonDeterministicOperation,

    /// Symbol or codepoint outside the codec table
    #[error(
        "Unknown symbol {0}. Only symbols in [0,{max}] are allowed by the automaton",
        max = crate::codec::MAX_SYMBOL
    )]
    UnknownSymbol(i64),

    /// Pattern translation or compilation errors
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Parser errors (command-line words, symbol lists)
    #[error("Parser error: {0}")]
    Parser(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),

    /// Wrapped anyhow errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a custom error with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create a pattern error
    pub fn pattern(msg: impl Into<String>) -> Self {
        Self::Pattern(msg.into())
    }

    /// Create a parser error
    pub fn parser(msg: impl Into<String>) -> Self {
        Self::Parser(msg.into())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Custom(format!("JSON error: {}", err))
    }
}

impl From<regex_syntax::Error> for Error {
    fn from(err: regex_syntax::Error) -> Self {
        Error::Pattern(err.to_string())
    }
}

// Helper macros for creating errors

/// Create a custom error with formatting
#[macro_export]
macro_rules! custom_error {
    ($($arg:tt)*) => {
        $crate::error::Error::custom(format!($($arg)*))
    };
}

/// Bail with a custom error message
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::custom_error!($($arg)*))
    };
}

/// Ensure a condition is true or return error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::custom("test error");
        assert_eq!(err.to_string(), "test error");

        let err = Error::InvalidStateIndex { index: 4, count: 2 };
        assert_eq!(err.to_string(), "State 4 is not in the automaton (2 states)");
    }

    #[test]
    fn test_ensure_macro() {
        fn check(n: i32) -> Result<()> {
            crate::ensure!(n > 0, "expected a positive value, got {}", n);
            Ok(())
        }

        assert!(check(3).is_ok());
        assert_eq!(
            check(-2).unwrap_err().to_string(),
            "expected a positive value, got -2"
        );
    }
}
