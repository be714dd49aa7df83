//! Admin command error types

use promo_core::{StoreError, UserId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("User {0} is not the operator")]
    PermissionDenied(UserId),

    #[error("Storage error: {0}")]
    StorageError(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, AdminError>;
