//! Session events - inputs that drive the registration conversation

use serde::{Deserialize, Serialize};

/// Defines the events that can trigger state transitions in the FSM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum SessionEvent {
    /// Free text typed by the participant (or a keyboard button press).
    Text { text: String },

    /// A contact card shared through the client's contact button.
    Contact { phone_number: String },

    /// Participant asked to abandon the conversation.
    Cancel,
}

impl SessionEvent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn contact(phone_number: impl Into<String>) -> Self {
        Self::Contact {
            phone_number: phone_number.into(),
        }
    }
}
