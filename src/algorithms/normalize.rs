//! String normalization utilities
//!
//! Provides the cleansing step the quick and weighted ratios run before
//! scoring, plus selectable normalization modes for use as a processor.

use serde::{Deserialize, Serialize};

/// Normalization mode for string preprocessing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// Leave the string untouched
    Identity,
    /// Trim, lowercase, replace non-alphanumeric chars with spaces
    #[default]
    Cleanse,
    /// Like `Cleanse`, dropping non-ASCII chars first
    CleanseAscii,
    /// Drop non-ASCII chars only
    AsciiOnly,
    /// Unicode NFKC, then `Cleanse`
    NfkcCleanse,
}

/// Trim, lowercase and strip everything that is not a letter or a number.
///
/// Each stripped char is replaced by a single space; the result is not
/// trimmed again. With `ascii_only` set, non-ASCII chars are dropped
/// before the replacement step.
///
/// # Examples
/// ```
/// use fuzzyratio::algorithms::normalize::cleanse;
///
/// assert_eq!(cleanse("  New YORK-Mets! ", false), "new york mets ");
/// assert_eq!(cleanse("XYZÜ", true), "xyz");
/// ```
#[must_use]
pub fn cleanse(s: &str, ascii_only: bool) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !ascii_only || c.is_ascii())
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect()
}

/// Drop every char outside the ASCII range.
#[must_use]
pub fn ascii_only(s: &str) -> String {
    s.chars().filter(char::is_ascii).collect()
}

/// Normalize a string according to the specified mode
#[must_use]
pub fn normalize_string(s: &str, mode: NormalizationMode) -> String {
    match mode {
        NormalizationMode::Identity => s.to_string(),
        NormalizationMode::Cleanse => cleanse(s, false),
        NormalizationMode::CleanseAscii => cleanse(s, true),
        NormalizationMode::AsciiOnly => ascii_only(s),
        NormalizationMode::NfkcCleanse => {
            use unicode_normalization::UnicodeNormalization;
            cleanse(&s.nfkc().collect::<String>(), false)
        }
    }
}
