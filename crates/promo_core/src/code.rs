//! Redemption code generation
//!
//! Codes are a fixed prefix plus a short slice of a random v4 UUID so they
//! can be read out loud at the counter. Truncation leaves a small chance of
//! collision which is accepted; codes are not re-checked against the store.

use uuid::Uuid;

pub const DEFAULT_CODE_PREFIX: &str = "USMON";
pub const CODE_SUFFIX_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct CodeGenerator {
    prefix: String,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_PREFIX)
    }
}

impl CodeGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn generate(&self) -> String {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(CODE_SUFFIX_LEN)
            .collect();
        format!("{}{}", self.prefix, suffix.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use std::collections::HashSet;

    #[test]
    fn test_code_shape() {
        let pattern = Regex::new(r"^USMON[A-Z0-9]{8}$").unwrap();
        let generator = CodeGenerator::default();
        for _ in 0..100 {
            let code = generator.generate();
            assert!(pattern.is_match(&code), "unexpected code {code}");
        }
    }

    #[test]
    fn test_custom_prefix() {
        let code = CodeGenerator::new("PROMO").generate();
        assert!(code.starts_with("PROMO"));
        assert_eq!(code.len(), "PROMO".len() + CODE_SUFFIX_LEN);
    }

    #[test]
    fn test_no_collisions_in_ten_thousand_codes() {
        let generator = CodeGenerator::default();
        let codes: HashSet<String> = (0..10_000).map(|_| generator.generate()).collect();
        assert_eq!(codes.len(), 10_000);
    }
}
