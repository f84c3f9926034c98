//! Index-addressed finite automata over integer symbols
//!
//! [`Automaton`] wraps an [`crate::fsa::Fsa`] and exposes its states as
//! dense indices, its transitions as external symbols. This is the view the
//! propagation side works with.

pub mod algebra;
pub mod dot;
pub mod graph;
pub mod mutation;
pub mod query;
pub mod state;
pub mod transition;

pub use graph::Automaton;
pub use state::{StateClass, StateIndex};
pub use transition::Transition;
