//! Conversation languages

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Uz,
    Ru,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Uz, Language::Ru];

    pub fn tag(self) -> &'static str {
        match self {
            Language::Uz => "uz",
            Language::Ru => "ru",
        }
    }

    /// Label of the keyboard button that selects this language.
    pub fn button_label(self) -> &'static str {
        match self {
            Language::Uz => "🇺🇿 O'zbekcha",
            Language::Ru => "🇷🇺 Русский",
        }
    }

    /// Recognize a language choice from a button press or a typed tag.
    pub fn recognize(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.contains("🇺🇿") || input.contains("O'zbek") {
            return Some(Language::Uz);
        }
        if input.contains("🇷🇺") {
            return Some(Language::Ru);
        }
        Self::ALL
            .into_iter()
            .find(|lang| input.eq_ignore_ascii_case(lang.tag()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognizes_button_labels() {
        for lang in Language::ALL {
            assert_eq!(Language::recognize(lang.button_label()), Some(lang));
        }
    }

    #[test]
    fn test_recognizes_tags_case_insensitively() {
        assert_eq!(Language::recognize("UZ"), Some(Language::Uz));
        assert_eq!(Language::recognize(" ru "), Some(Language::Ru));
    }

    #[test]
    fn test_rejects_unknown_input() {
        assert_eq!(Language::recognize("English"), None);
        assert_eq!(Language::recognize(""), None);
    }
}
