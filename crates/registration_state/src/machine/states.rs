//! Registration states - where a participant is in the conversation

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Defines the possible states of a registration conversation.
///
/// Data collected so far travels inside the state, so a state can never
/// be reached without the fields it depends on.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum RegistrationState {
    /// Waiting for the participant to pick a language.
    #[default]
    AwaitingLanguage,

    /// Waiting for the participant's full name.
    AwaitingName { language: Language },

    /// Waiting for a phone number, typed or shared as a contact.
    AwaitingPhone { language: Language, name: String },

    /// All data collected; the record is ready to be stored.
    Complete {
        language: Language,
        name: String,
        phone: String,
    },

    /// The participant abandoned the conversation.
    Cancelled,
}

impl RegistrationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::Cancelled)
    }

    /// The language chosen so far, if any.
    pub fn language(&self) -> Option<Language> {
        match self {
            Self::AwaitingName { language }
            | Self::AwaitingPhone { language, .. }
            | Self::Complete { language, .. } => Some(*language),
            Self::AwaitingLanguage | Self::Cancelled => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AwaitingLanguage => "awaiting_language",
            Self::AwaitingName { .. } => "awaiting_name",
            Self::AwaitingPhone { .. } => "awaiting_phone",
            Self::Complete { .. } => "complete",
            Self::Cancelled => "cancelled",
        }
    }
}
