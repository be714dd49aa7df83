//! Promo server - wires the registration flow and operator commands
//! behind an HTTP endpoint that a chat adapter posts inbound events to.

pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod logging;
pub mod server;
pub mod state;

pub use config::{Cli, Settings};
pub use dispatch::{Command, Dispatcher, EventKind, InboundEvent, OutboundResponse};
pub use state::AppState;
