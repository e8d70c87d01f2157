//! Ratio scorers built on the indel distance.
//!
//! This module provides the familiar FuzzyWuzzy-style scores, all as
//! integers in `[0, 100]`:
//! - `ratio`: normalized similarity of the whole strings
//! - `partial_ratio`: best window of the longer string against the shorter
//! - `qratio` / `uqratio`: ratio after cleansing
//! - `wratio` / `uwratio`: weighted blend of ratio, partial and token scores
//!
//! Any input that is empty (after preprocessing, where there is some) scores 0.

use super::alignment::matching_blocks;
use super::levenshtein::{levenshtein_chars, ReplaceCost};
use super::normalize::cleanse;
use super::token::{
    partial_token_set_ratio, partial_token_sort_ratio, token_set_ratio, token_sort_ratio,
    TokenConfig,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A window ratio above this is treated as an exact partial match.
const PARTIAL_EXACT_THRESHOLD: f64 = 0.995;

/// Convert a `[0, 100]` float to a score, rounding half away from zero.
#[inline]
pub(crate) fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Similarity in `[0, 1]` from the indel distance of two sequences.
#[inline]
pub(crate) fn float_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    let dist = levenshtein_chars(a, b, ReplaceCost::Doubled);
    (total - dist) as f64 / total as f64
}

/// Compute the similarity ratio of two strings.
///
/// `round(100 * (len1 + len2 - d) / (len1 + len2))` where `d` is the
/// insert/delete distance and lengths are in chars. Two empty strings
/// score 0.
///
/// # Examples
/// ```
/// use fuzzyratio::algorithms::fuzz::ratio;
///
/// assert_eq!(ratio("new york mets", "new york mets"), 100);
/// assert_eq!(ratio("coolstring", "coooolstring"), 91);
/// assert_eq!(ratio("", ""), 0);
/// ```
#[must_use]
pub fn ratio(s1: &str, s2: &str) -> u8 {
    let a: SmallVec<[char; 64]> = s1.chars().collect();
    let b: SmallVec<[char; 64]> = s2.chars().collect();
    to_score(100.0 * float_ratio(&a, &b))
}

/// Compute the best partial match ratio between two strings.
///
/// The shorter string is aligned against the longer one; every matching
/// block proposes a window of the longer string, of the shorter string's
/// length, starting where the block would place the shorter string's
/// first char. The best window ratio wins, and a near-exact window
/// short-circuits to 100. This avoids scoring all O(n) windows.
///
/// Argument order does not matter.
///
/// # Examples
/// ```
/// use fuzzyratio::algorithms::fuzz::partial_ratio;
///
/// assert_eq!(partial_ratio("needle", "haystackneedelhaystack"), 83);
/// assert_eq!(partial_ratio("test", "this is a test"), 100);
/// ```
#[must_use]
pub fn partial_ratio(s1: &str, s2: &str) -> u8 {
    let a: SmallVec<[char; 64]> = s1.chars().collect();
    let b: SmallVec<[char; 64]> = s2.chars().collect();

    // Equal lengths are ordered by content so swapping arguments cannot
    // change which string is treated as the needle.
    let (shorter, longer) = if a.len() < b.len() || (a.len() == b.len() && a[..] <= b[..]) {
        (&a[..], &b[..])
    } else {
        (&b[..], &a[..])
    };

    let mut best = 0.0f64;
    for block in matching_blocks(shorter, longer) {
        let start = block.dest_pos.saturating_sub(block.src_pos);
        let end = (start + shorter.len()).min(longer.len());

        let r = float_ratio(shorter, &longer[start..end]);
        if r > PARTIAL_EXACT_THRESHOLD {
            return 100;
        }
        best = best.max(r);
    }

    to_score(100.0 * best)
}

/// Ratio after cleansing both strings; 0 if either cleanses to nothing.
#[must_use]
pub fn quick_ratio(s1: &str, s2: &str, ascii_only: bool) -> u8 {
    let c1 = cleanse(s1, ascii_only);
    let c2 = cleanse(s2, ascii_only);

    if c1.is_empty() || c2.is_empty() {
        return 0;
    }
    ratio(&c1, &c2)
}

/// Quick ratio, dropping non-ASCII chars.
///
/// # Examples
/// ```
/// use fuzzyratio::algorithms::fuzz::qratio;
///
/// assert_eq!(qratio("new york mets", "new YORK mets"), 100);
/// assert_eq!(qratio("XYZ", "XYZÜ"), 100);
/// ```
#[must_use]
pub fn qratio(s1: &str, s2: &str) -> u8 {
    quick_ratio(s1, s2, true)
}

/// Quick ratio, keeping non-ASCII chars.
#[must_use]
pub fn uqratio(s1: &str, s2: &str) -> u8 {
    quick_ratio(s1, s2, false)
}

// =============================================================================
// WRatio Weight Constants
// =============================================================================

/// Scale applied to token-based ratios.
pub const DEFAULT_TOKEN_SCALE: f64 = 0.95;

/// Scale applied to partial ratios when lengths diverge.
pub const DEFAULT_PARTIAL_SCALE: f64 = 0.9;

/// Scale applied to partial ratios when one string is over 8x the other.
pub const DEFAULT_LONG_PARTIAL_SCALE: f64 = 0.6;

/// Below this length ratio strings are compared whole, not partially.
const PARTIAL_LENGTH_RATIO: f64 = 1.5;

/// Above this length ratio partial matches use the long scale.
const LONG_LENGTH_RATIO: f64 = 8.0;

/// Weights and preprocessing for [`weighted_ratio_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightedRatioConfig {
    /// Drop non-ASCII chars while cleansing
    pub ascii_only: bool,
    /// Scale for token sort/set ratios (default: 0.95)
    pub token_scale: f64,
    /// Scale for partial ratios when lengths differ by 1.5x to 8x (default: 0.9)
    pub partial_scale: f64,
    /// Scale for partial ratios when lengths differ by more than 8x (default: 0.6)
    pub long_partial_scale: f64,
}

impl Default for WeightedRatioConfig {
    fn default() -> Self {
        Self {
            ascii_only: true,
            token_scale: DEFAULT_TOKEN_SCALE,
            partial_scale: DEFAULT_PARTIAL_SCALE,
            long_partial_scale: DEFAULT_LONG_PARTIAL_SCALE,
        }
    }
}

impl WeightedRatioConfig {
    /// Default weights, keeping non-ASCII chars.
    #[must_use]
    pub fn unicode() -> Self {
        Self {
            ascii_only: false,
            ..Self::default()
        }
    }
}

/// Weighted ratio with the default weights.
///
/// Cleanses both strings, takes `ratio` as the baseline, then looks at the
/// length ratio of the cleansed strings:
/// - under 1.5x, token sort and token set ratios are tried (scaled by 0.95)
/// - otherwise one string is likely a fragment of the other, so the partial
///   ratio and the partial token ratios are tried, scaled by 0.9, or by 0.6
///   past 8x
///
/// The best of the candidates is returned.
#[must_use]
pub fn weighted_ratio(s1: &str, s2: &str, ascii_only: bool) -> u8 {
    let config = WeightedRatioConfig {
        ascii_only,
        ..WeightedRatioConfig::default()
    };
    weighted_ratio_with(s1, s2, &config)
}

/// Weighted ratio with custom weights.
///
/// # Examples
/// ```
/// use fuzzyratio::algorithms::fuzz::{weighted_ratio_with, WeightedRatioConfig};
///
/// let strict = WeightedRatioConfig { token_scale: 0.5, ..Default::default() };
/// let score = weighted_ratio_with(
///     "new york mets vs atlanta braves",
///     "atlanta braves vs new york mets",
///     &strict,
/// );
/// assert!(score < 95);
/// ```
#[must_use]
pub fn weighted_ratio_with(s1: &str, s2: &str, config: &WeightedRatioConfig) -> u8 {
    let c1 = cleanse(s1, config.ascii_only);
    let c2 = cleanse(s2, config.ascii_only);

    if c1.is_empty() || c2.is_empty() {
        return 0;
    }

    let len1 = c1.chars().count();
    let len2 = c2.chars().count();
    let length_ratio = len1.max(len2) as f64 / len1.min(len2) as f64;

    let base = f64::from(ratio(&c1, &c2));
    let tokens = TokenConfig::new(config.ascii_only, false);

    if length_ratio < PARTIAL_LENGTH_RATIO {
        let token_sort = f64::from(token_sort_ratio(&c1, &c2, tokens)) * config.token_scale;
        let token_set = f64::from(token_set_ratio(&c1, &c2, tokens)) * config.token_scale;
        return to_score(base.max(token_sort).max(token_set));
    }

    let partial_scale = if length_ratio > LONG_LENGTH_RATIO {
        config.long_partial_scale
    } else {
        config.partial_scale
    };

    let partial = f64::from(partial_ratio(&c1, &c2)) * partial_scale;
    let token_sort = f64::from(partial_token_sort_ratio(&c1, &c2, tokens))
        * config.token_scale
        * partial_scale;
    let token_set = f64::from(partial_token_set_ratio(&c1, &c2, tokens))
        * config.token_scale
        * partial_scale;

    to_score(base.max(partial).max(token_sort).max(token_set))
}

/// Weighted ratio, dropping non-ASCII chars.
///
/// # Examples
/// ```
/// use fuzzyratio::algorithms::fuzz::wratio;
///
/// assert_eq!(wratio("new york mets", "the wonderful new york mets"), 90);
/// ```
#[must_use]
pub fn wratio(s1: &str, s2: &str) -> u8 {
    weighted_ratio(s1, s2, true)
}

/// Weighted ratio, keeping non-ASCII chars.
#[must_use]
pub fn uwratio(s1: &str, s2: &str) -> u8 {
    weighted_ratio(s1, s2, false)
}
