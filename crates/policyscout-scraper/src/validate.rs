//! Decides whether extracted text actually reads like a privacy policy.
//!
//! Requires both a strong semantic anchor (one of the required indicators)
//! and corroborating signals (two of the optional ones) so a generic "About
//! Us" page that mentions "privacy" once does not pass.

/// Minimum text length; anything shorter cannot be a real policy.
const MIN_POLICY_LEN: usize = 500;

/// At least one of these must appear.
const REQUIRED_INDICATORS: &[&str] = &["personal information", "data collection", "privacy"];

/// At least [`MIN_OPTIONAL_MATCHES`] of these must appear.
const OPTIONAL_INDICATORS: &[&str] = &[
    "cookie",
    "third party",
    "third-party",
    "we collect",
    "information we collect",
    "gdpr",
    "ccpa",
    "consent",
    "data protection",
    "personal data",
    "opt out",
    "opt-out",
    "your rights",
    "data retention",
];

const MIN_OPTIONAL_MATCHES: usize = 2;

/// Keyword-density check: length, one required indicator, two optional ones.
/// All matching is case-insensitive substring search.
#[must_use]
pub fn looks_like_policy(text: &str) -> bool {
    if text.len() <= MIN_POLICY_LEN {
        return false;
    }
    let lower = text.to_lowercase();
    if !REQUIRED_INDICATORS.iter().any(|kw| lower.contains(kw)) {
        return false;
    }
    let optional_matches = OPTIONAL_INDICATORS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .count();
    optional_matches >= MIN_OPTIONAL_MATCHES
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
