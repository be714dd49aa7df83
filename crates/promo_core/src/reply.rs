//! Outbound replies handed to the chat transport

use serde::{Deserialize, Serialize};

/// A single keyboard button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyButton {
    pub text: String,
    /// Ask the client to share the user's contact when pressed.
    #[serde(default)]
    pub request_contact: bool,
}

impl KeyButton {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            request_contact: false,
        }
    }

    pub fn contact(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            request_contact: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Keyboard {
    /// Show a one-time reply keyboard.
    Buttons { rows: Vec<Vec<KeyButton>> },
    /// Hide any keyboard left over from an earlier prompt.
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        keyboard: Option<Keyboard>,
        /// Text uses Markdown emphasis.
        #[serde(default)]
        markdown: bool,
    },
    Document {
        filename: String,
        caption: String,
        content: String,
    },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: None,
            markdown: false,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: None,
            markdown: true,
        }
    }

    pub fn document(
        filename: impl Into<String>,
        caption: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Reply::Document {
            filename: filename.into(),
            caption: caption.into(),
            content: content.into(),
        }
    }

    /// Attach a keyboard; documents are returned unchanged.
    pub fn with_keyboard(self, keyboard: Keyboard) -> Self {
        match self {
            Reply::Text { text, markdown, .. } => Reply::Text {
                text,
                keyboard: Some(keyboard),
                markdown,
            },
            other => other,
        }
    }

    /// Text body or document caption.
    pub fn body(&self) -> &str {
        match self {
            Reply::Text { text, .. } => text,
            Reply::Document { caption, .. } => caption,
        }
    }
}
