//! # Promo Core
//!
//! Participant records, redemption code generation and the shared
//! append-only participant store used by both the registration flow
//! and the operator commands.

pub mod code;
pub mod error;
pub mod phone;
pub mod record;
pub mod reply;
pub mod store;

// Re-exports
pub use code::{CodeGenerator, CODE_SUFFIX_LEN, DEFAULT_CODE_PREFIX};
pub use error::{Result, StoreError};
pub use phone::is_valid_phone;
pub use record::{ParticipantRecord, UserId, FIELD_DELIMITER, TIMESTAMP_FORMAT};
pub use reply::{KeyButton, Keyboard, Reply};
pub use store::{FileParticipantStore, ParticipantStore, RecordPredicate};
