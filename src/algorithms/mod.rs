//! Core string similarity algorithms
//!
//! Each scorer is implemented as a standalone function for composability,
//! plus a trait-based interface and a serializable [`Scorer`] selection for
//! use by the extraction and deduplication layers.

pub mod alignment;
pub mod fuzz;
pub mod levenshtein;
pub mod normalize;
pub mod token;

pub use alignment::*;
pub use fuzz::*;
pub use levenshtein::*;
pub use normalize::*;
pub use token::*;

use serde::{Deserialize, Serialize};

/// Trait for all similarity scorers.
/// Returns an integer score between 0 (completely different) and 100 (identical).
pub trait Similarity: Send + Sync {
    fn score(&self, a: &str, b: &str) -> u8;

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

/// Trait for edit distance algorithms that return integer distances
pub trait EditDistance: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> usize;

    /// Convert to a `[0, 100]` score relative to the combined char count.
    ///
    /// Two empty strings score 0.
    fn score(&self, a: &str, b: &str) -> u8 {
        let total = a.chars().count() + b.chars().count();
        if total == 0 {
            return 0;
        }
        let dist = self.distance(a, b).min(total);
        fuzz::to_score(100.0 * (total - dist) as f64 / total as f64)
    }

    fn name(&self) -> &'static str;
}

/// Blanket implementation: any EditDistance is also a Similarity
impl<T: EditDistance> Similarity for T {
    fn score(&self, a: &str, b: &str) -> u8 {
        EditDistance::score(self, a, b)
    }

    fn name(&self) -> &'static str {
        EditDistance::name(self)
    }
}

/// Named scorer, selectable from configuration.
///
/// ```
/// use fuzzyratio::algorithms::{Scorer, Similarity};
///
/// let scorer: Scorer = serde_json::from_str(r#"{"kind": "token_set", "cleanse": true}"#).unwrap();
/// assert_eq!(scorer.score("New York", "new york"), 100);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scorer {
    Ratio,
    PartialRatio,
    #[serde(rename = "qratio")]
    QRatio,
    #[serde(rename = "uqratio")]
    UQRatio,
    TokenSort {
        #[serde(default)]
        ascii_only: bool,
        #[serde(default)]
        cleanse: bool,
        #[serde(default)]
        partial: bool,
    },
    TokenSet {
        #[serde(default)]
        ascii_only: bool,
        #[serde(default)]
        cleanse: bool,
        #[serde(default)]
        partial: bool,
    },
    #[default]
    #[serde(rename = "wratio")]
    WRatio,
    #[serde(rename = "uwratio")]
    UWRatio,
    /// Weighted ratio with custom weights
    Weighted(WeightedRatioConfig),
}

impl Similarity for Scorer {
    fn score(&self, a: &str, b: &str) -> u8 {
        match *self {
            Scorer::Ratio => ratio(a, b),
            Scorer::PartialRatio => partial_ratio(a, b),
            Scorer::QRatio => qratio(a, b),
            Scorer::UQRatio => uqratio(a, b),
            Scorer::TokenSort {
                ascii_only,
                cleanse,
                partial,
            } => {
                let config = TokenConfig::new(ascii_only, cleanse);
                if partial {
                    partial_token_sort_ratio(a, b, config)
                } else {
                    token_sort_ratio(a, b, config)
                }
            }
            Scorer::TokenSet {
                ascii_only,
                cleanse,
                partial,
            } => {
                let config = TokenConfig::new(ascii_only, cleanse);
                if partial {
                    partial_token_set_ratio(a, b, config)
                } else {
                    token_set_ratio(a, b, config)
                }
            }
            Scorer::WRatio => wratio(a, b),
            Scorer::UWRatio => uwratio(a, b),
            Scorer::Weighted(ref config) => weighted_ratio_with(a, b, config),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Scorer::Ratio => "ratio",
            Scorer::PartialRatio => "partial_ratio",
            Scorer::QRatio => "qratio",
            Scorer::UQRatio => "uqratio",
            Scorer::TokenSort { partial: false, .. } => "token_sort_ratio",
            Scorer::TokenSort { partial: true, .. } => "partial_token_sort_ratio",
            Scorer::TokenSet { partial: false, .. } => "token_set_ratio",
            Scorer::TokenSet { partial: true, .. } => "partial_token_set_ratio",
            Scorer::WRatio => "wratio",
            Scorer::UWRatio => "uwratio",
            Scorer::Weighted(_) => "weighted_ratio",
        }
    }
}
