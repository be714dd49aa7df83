//! # Promo Admin
//!
//! Operator commands over the participant store. Everything except the
//! public participant count is gated on a single operator identity.

pub mod error;
pub mod operator;
pub mod render;
pub mod replies;
pub mod service;

// Re-exports
pub use error::{AdminError, Result};
pub use operator::OperatorGate;
pub use service::{
    AdminService, CountOutcome, ListOutcome, ListingExport, RemoveOutcome, RemoveTarget,
    WinnerOutcome,
};
