//! Session manager error types

use promo_core::{StoreError, UserId};
use registration_state::TransitionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No active session for user {0}")]
    NotFound(UserId),

    #[error("Storage error: {0}")]
    StorageError(#[from] StoreError),

    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
