//! State machine module
//!
//! Contains the FSM implementation for the registration conversation.

mod events;
mod states;
mod transitions;

pub use events::SessionEvent;
pub use states::RegistrationState;
pub use transitions::{SessionMachine, StateTransition, TransitionError, TransitionOutcome};
