//! Token-based ratios.
//!
//! Strings are split on whitespace, then either sorted (`token_sort_ratio`)
//! or reduced to unique token sets (`token_set_ratio`) before the ratio is
//! taken, which neutralizes word order and repeated words.

use super::fuzz::{partial_ratio, ratio};
use super::normalize::{ascii_only, cleanse};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Preprocessing applied before tokenizing.
///
/// `cleanse` takes precedence; `ascii_only` alone only drops non-ASCII chars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub ascii_only: bool,
    pub cleanse: bool,
}

impl TokenConfig {
    #[must_use]
    pub const fn new(ascii_only: bool, cleanse: bool) -> Self {
        Self { ascii_only, cleanse }
    }

    /// Uses Cow for zero-cost passthrough when no preprocessing is needed.
    fn preprocess<'a>(&self, s: &'a str) -> Cow<'a, str> {
        if self.cleanse {
            Cow::Owned(cleanse(s, self.ascii_only))
        } else if self.ascii_only {
            Cow::Owned(ascii_only(s))
        } else {
            Cow::Borrowed(s)
        }
    }
}

/// Tokenize a string into words, sort them, and rejoin.
fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort(s1: &str, s2: &str, config: TokenConfig, partial: bool) -> u8 {
    let p1 = config.preprocess(s1);
    let p2 = config.preprocess(s2);

    if p1.is_empty() || p2.is_empty() {
        return 0;
    }

    let sorted1 = sorted_tokens(&p1);
    let sorted2 = sorted_tokens(&p2);

    if partial {
        partial_ratio(&sorted1, &sorted2)
    } else {
        ratio(&sorted1, &sorted2)
    }
}

/// Compute the ratio after tokenizing and sorting both strings.
///
/// Useful for comparing strings where word order doesn't matter.
///
/// # Examples
/// ```
/// use fuzzyratio::algorithms::token::{token_sort_ratio, TokenConfig};
///
/// let score = token_sort_ratio(
///     "several tokens arbitrary order",
///     "order arbitrary several tokens",
///     TokenConfig::default(),
/// );
/// assert_eq!(score, 100);
/// ```
#[must_use]
pub fn token_sort_ratio(s1: &str, s2: &str, config: TokenConfig) -> u8 {
    token_sort(s1, s2, config, false)
}

/// Like [`token_sort_ratio`], using the partial ratio on the sorted strings.
#[must_use]
pub fn partial_token_sort_ratio(s1: &str, s2: &str, config: TokenConfig) -> u8 {
    token_sort(s1, s2, config, true)
}

/// `head` followed by the `tail` tokens, single-space separated and trimmed.
fn join_trimmed(head: &str, tail: &[&str]) -> String {
    let joined = format!("{} {}", head, tail.join(" "));
    joined.trim().to_string()
}

fn token_set(s1: &str, s2: &str, config: TokenConfig, partial: bool) -> u8 {
    let p1 = config.preprocess(s1);
    let p2 = config.preprocess(s2);

    if p1.is_empty() || p2.is_empty() {
        return 0;
    }

    let set1: AHashSet<&str> = p1.split_whitespace().collect();
    let set2: AHashSet<&str> = p2.split_whitespace().collect();

    let mut intersection: Vec<&str> = set1.intersection(&set2).copied().collect();
    let mut only1: Vec<&str> = set1.difference(&set2).copied().collect();
    let mut only2: Vec<&str> = set2.difference(&set1).copied().collect();
    intersection.sort_unstable();
    only1.sort_unstable();
    only2.sort_unstable();

    let sorted_intersection = intersection.join(" ");
    let combined1 = join_trimmed(&sorted_intersection, &only1);
    let combined2 = join_trimmed(&sorted_intersection, &only2);

    let scorer: fn(&str, &str) -> u8 = if partial { partial_ratio } else { ratio };

    scorer(&sorted_intersection, &combined1)
        .max(scorer(&sorted_intersection, &combined2))
        .max(scorer(&combined1, &combined2))
}

/// Compute set-based token similarity.
///
/// Builds `<sorted intersection>`, `<sorted intersection> <sorted rest of
/// s1>` and `<sorted intersection> <sorted rest of s2>`, scores them
/// pairwise and returns the maximum. Strings sharing most of their words
/// score high even when either side carries extra words.
///
/// # Examples
/// ```
/// use fuzzyratio::algorithms::token::{token_set_ratio, TokenConfig};
///
/// let score = token_set_ratio(
///     "fuzzy was a bear",
///     "fuzzy fuzzy was a bear",
///     TokenConfig::default(),
/// );
/// assert_eq!(score, 100);
/// ```
#[must_use]
pub fn token_set_ratio(s1: &str, s2: &str, config: TokenConfig) -> u8 {
    token_set(s1, s2, config, false)
}

/// Like [`token_set_ratio`], using the partial ratio on the built strings.
#[must_use]
pub fn partial_token_set_ratio(s1: &str, s2: &str, config: TokenConfig) -> u8 {
    token_set(s1, s2, config, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: TokenConfig = TokenConfig::new(false, false);

    #[test]
    fn test_token_sort_ratio_reordered() {
        let (a, b) = ("several tokens arbitrary order", "order arbitrary several tokens");
        assert_eq!(token_sort_ratio(a, b, PLAIN), 100);
        assert_eq!(ratio(a, b), 50);
    }

    #[test]
    fn test_token_sort_ratio_permutation_invariant() {
        let base = "new york mets vs atlanta braves";
        let shuffles = [
            "braves atlanta vs mets york new",
            "vs new atlanta york braves mets",
            "mets  new\tyork vs braves atlanta",
        ];
        let other = "atlanta braves at new york";
        for shuffled in shuffles {
            assert_eq!(
                token_sort_ratio(base, other, PLAIN),
                token_sort_ratio(shuffled, other, PLAIN)
            );
        }
    }

    #[test]
    fn test_partial_token_sort_ratio() {
        assert_eq!(partial_token_sort_ratio("new york mets", "new york mets", PLAIN), 100);
        assert_eq!(
            partial_token_sort_ratio(
                "new york mets vs atlanta braves",
                "atlanta braves vs new york mets",
                PLAIN
            ),
            100
        );
    }

    #[test]
    fn test_token_set_ratio() {
        assert_eq!(
            token_set_ratio(
                "new york mets vs atlanta braves",
                "atlanta braves vs new york mets",
                PLAIN
            ),
            100
        );
        assert_eq!(token_set_ratio("fuzzy was a bear", "fuzzy fuzzy was a bear", PLAIN), 100);
    }

    #[test]
    fn test_partial_token_set_ratio() {
        assert_eq!(
            partial_token_set_ratio(
                "new york mets vs atlanta braves",
                "new york city mets - atlanta braves",
                PLAIN
            ),
            100
        );
    }

    #[test]
    fn test_token_set_ratio_cleanse() {
        assert!(token_set_ratio("New York", "new york", PLAIN) < 100);
        assert_eq!(token_set_ratio("New York", "new york", TokenConfig::new(false, true)), 100);
    }

    #[test]
    fn test_token_ratios_empty() {
        assert_eq!(token_sort_ratio("", "abc", PLAIN), 0);
        assert_eq!(token_set_ratio("abc", "", PLAIN), 0);
        // Everything is stripped by the ASCII filter
        assert_eq!(token_set_ratio("你好", "abc", TokenConfig::new(true, false)), 0);
        assert_eq!(partial_token_sort_ratio("你好", "abc", TokenConfig::new(true, true)), 0);
    }

    #[test]
    fn test_token_config_serde() {
        let config: TokenConfig = serde_json::from_str(r#"{"cleanse": true}"#).unwrap();
        assert_eq!(config, TokenConfig::new(false, true));
    }
}
