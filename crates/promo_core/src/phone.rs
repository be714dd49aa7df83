//! Structural phone number check

use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{7,15}$").expect("phone pattern must compile"));

/// Digits only, optional leading `+`, 7 to 15 digits.
pub fn is_valid_phone(input: &str) -> bool {
    PHONE_PATTERN.is_match(input)
}
