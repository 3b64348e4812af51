//! Answer normalization.
//!
//! Answers are compared after lowercasing, trimming, and stripping
//! diacritics: the string is decomposed (NFD) and combining marks are
//! dropped, so "México", "mexico" and "MEXICO " all compare equal.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical form of `s` for answer comparison. Total; `""` maps to `""`.
pub fn normalize(s: &str) -> String {
    // Lowercase before decomposing: some lowercase mappings emit combining
    // marks of their own (e.g. 'İ' -> "i\u{307}").
    let folded: String = s
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    folded.trim().to_string()
}

/// True if both strings normalize to the same value.
pub fn answers_match(given: &str, expected: &str) -> bool {
    normalize(given) == normalize(expected)
}
