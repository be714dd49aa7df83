//! # Session Manager
//!
//! Keeps one registration conversation per user in memory and finishes
//! completed conversations by generating a code and appending a
//! participant record. Conversations do not survive a restart.

pub mod error;
pub mod manager;
pub mod messages;

// Re-exports
pub use error::SessionError;
pub use manager::RegistrationManager;
