//! FuzzyRatio - Levenshtein-based fuzzy string scoring
//!
//! Scores how similar two strings are on an integer scale from 0 to 100,
//! picks the best matches for a query from a list of choices, and collapses
//! fuzzy duplicates.
//!
//! # Features
//! - Edit distance with a configurable replace cost, edit operations,
//!   opcodes and matching blocks
//! - Ratio, partial ratio, token sort/set ratios and the weighted ratio
//! - Configurable extraction with processors, scorers and cutoffs
//! - Deduplication, plus union-find grouping of duplicates
//! - Parallel scoring of large inputs
//! - Unicode support (lengths and positions are in chars)
//!
//! # Example
//!
//! ```rust
//! use fuzzyratio::{extract_one, partial_ratio, ratio, token_sort_ratio, ExtractConfig, TokenConfig};
//!
//! assert_eq!(ratio("new york mets", "new york mets"), 100);
//! assert_eq!(partial_ratio("needle", "haystackneedelhaystack"), 83);
//! assert_eq!(
//!     token_sort_ratio("new york mets vs atlanta braves", "atlanta braves vs new york mets", TokenConfig::default()),
//!     100
//! );
//!
//! let choices = ["new york mets vs chicago cubs", "braves vs mets"];
//! let best = extract_one("new york mets at atlanta braves", &choices, &ExtractConfig::default()).unwrap();
//! assert_eq!(best.text, "braves vs mets");
//! ```

pub mod algorithms;
pub mod dedup;
pub mod process;

// Re-exports for the common entry points
pub use algorithms::alignment::{
    get_matching_blocks, get_opcodes, matching_blocks, opcodes, EditOp, EditTag, MatchingBlock,
    OpCode,
};
pub use algorithms::fuzz::{
    partial_ratio, qratio, quick_ratio, ratio, uqratio, uwratio, weighted_ratio,
    weighted_ratio_with, wratio, WeightedRatioConfig,
};
pub use algorithms::levenshtein::{
    edit_ops, indel_distance, levenshtein, levenshtein_with, Levenshtein, ReplaceCost,
};
pub use algorithms::normalize::{cleanse, normalize_string, NormalizationMode};
pub use algorithms::token::{
    partial_token_set_ratio, partial_token_sort_ratio, token_set_ratio, token_sort_ratio,
    TokenConfig,
};
pub use algorithms::{EditDistance, Scorer, Similarity};
pub use dedup::{
    dedupe, dedupe_default, find_duplicates, DedupMethod, DeduplicationResult,
    DEFAULT_DEDUPE_THRESHOLD,
};
pub use process::{
    extract, extract_one, extract_without_order, ExtractConfig, ExtractConfigBuilder,
    ExtractOptions, MatchPair, ProcessError,
};

/// Minimum input size for parallel processing.
///
/// For inputs smaller than this threshold, sequential processing is faster
/// due to the overhead of thread pool coordination.
pub(crate) const PARALLEL_THRESHOLD: usize = 100;
