//! registration_state - State machine for the registration conversation
//!
//! Tracks one participant through language selection, name entry and
//! phone entry. The machine is pure: persisting the finished record is
//! left to the caller.

pub mod language;
pub mod machine;

// Re-export commonly used types
pub use language::Language;
pub use machine::{
    RegistrationState, SessionEvent, SessionMachine, StateTransition, TransitionError,
    TransitionOutcome,
};
