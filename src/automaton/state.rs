//! State representation

use serde::{Deserialize, Serialize};

/// Dense state index, valid until the next resynchronization
pub type StateIndex = usize;

/// State classification, used by exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StateClass {
    Initial,
    Accepting,
    InitialAccepting,
    #[default]
    Plain,
}

impl StateClass {
    pub fn of(initial: bool, accepting: bool) -> Self {
        match (initial, accepting) {
            (true, true) => StateClass::InitialAccepting,
            (true, false) => StateClass::Initial,
            (false, true) => StateClass::Accepting,
            (false, false) => StateClass::Plain,
        }
    }

    pub fn is_accepting(&self) -> bool {
        matches!(self, StateClass::Accepting | StateClass::InitialAccepting)
    }

    pub fn shape(&self) -> &'static str {
        if self.is_accepting() {
            "doublecircle"
        } else {
            "circle"
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StateClass::Initial => "lightblue",
            StateClass::Accepting => "lightgreen",
            StateClass::InitialAccepting => "green",
            StateClass::Plain => "white",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(StateClass::of(true, false), StateClass::Initial);
        assert_eq!(StateClass::of(false, true).shape(), "doublecircle");
        assert_eq!(StateClass::of(true, true).shape(), "doublecircle");
        assert_eq!(StateClass::of(false, false).shape(), "circle");
        assert_eq!(StateClass::default(), StateClass::Plain);
    }
}
