//! Selecting the best matches for a query from a list of choices
//!
//! Every choice is scored against the query with a configurable scorer,
//! optionally after running both through a processor. Results can be kept
//! in input order ([`extract_without_order`]), ranked ([`extract`]), or
//! reduced to the single best match ([`extract_one`]).
//!
//! # Processing
//!
//! - no processor and no scorer: the query is cleansed, choices are passed
//!   as-is, and [`wratio`] scores them (it cleanses on its own)
//! - a processor: applied to the query and to every choice
//! - only a scorer: nothing is processed

use crate::algorithms::fuzz::wratio;
use crate::algorithms::normalize::{cleanse, normalize_string, NormalizationMode};
use crate::algorithms::{Scorer, Similarity};
use crate::PARALLEL_THRESHOLD;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while configuring or running a selection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// The same option was set twice, or a value is out of range
    #[error("Invalid extract configuration: {0}")]
    InvalidConfig(String),

    /// No choice produced a pair
    #[error("No matches found between query and provided choices")]
    NoMatches,
}

/// Function preparing a string before scoring.
pub type ProcessorFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Function scoring two strings in `[0, 100]`.
pub type ScorerFn = Arc<dyn Fn(&str, &str) -> u8 + Send + Sync>;

/// A scored choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchPair {
    /// The choice as given, before any processing
    pub text: String,
    pub score: u8,
    /// Position of the choice in the input
    pub index: usize,
}

/// Options for the extraction functions.
///
/// Use [`ExtractConfig::builder`] to construct one with validation.
#[derive(Clone, Default)]
pub struct ExtractConfig {
    processor: Option<ProcessorFn>,
    scorer: Option<ScorerFn>,
    cutoff: u8,
}

impl fmt::Debug for ExtractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractConfig")
            .field("processor", &self.processor.is_some())
            .field("scorer", &self.scorer.is_some())
            .field("cutoff", &self.cutoff)
            .finish()
    }
}

impl ExtractConfig {
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder::new()
    }

    /// Config with only a scorer set; choices are compared as-is.
    pub fn with_scorer<F>(scorer: F) -> Self
    where
        F: Fn(&str, &str) -> u8 + Send + Sync + 'static,
    {
        Self {
            scorer: Some(Arc::new(scorer)),
            ..Self::default()
        }
    }

    /// Minimum score a pair needs to be kept
    pub fn cutoff(&self) -> u8 {
        self.cutoff
    }

    fn score_fn(&self) -> ScorerFn {
        self.scorer.clone().unwrap_or_else(|| Arc::new(wratio) as ScorerFn)
    }

    /// The query as handed to the scorer.
    fn prepare_query(&self, query: &str) -> String {
        match (&self.processor, &self.scorer) {
            (Some(processor), _) => processor(query),
            (None, None) => cleanse(query, false),
            (None, Some(_)) => query.to_string(),
        }
    }
}

/// Builder for [`ExtractConfig`]
///
/// Each option may be set at most once; conflicts are reported by
/// [`build`](Self::build).
///
/// # Example
///
/// ```rust
/// use fuzzyratio::algorithms::fuzz::ratio;
/// use fuzzyratio::process::ExtractConfig;
///
/// let config = ExtractConfig::builder()
///     .processor(|s: &str| s.to_lowercase())
///     .scorer(ratio)
///     .cutoff(50)
///     .build()
///     .unwrap();
/// assert_eq!(config.cutoff(), 50);
/// ```
#[derive(Default)]
pub struct ExtractConfigBuilder {
    processor: Option<ProcessorFn>,
    scorer: Option<ScorerFn>,
    cutoff: Option<u8>,
    conflicts: Vec<&'static str>,
}

impl ExtractConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the processor applied to the query and every choice
    pub fn processor<F>(mut self, processor: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        if self.processor.is_some() {
            self.conflicts.push("processor");
        }
        self.processor = Some(Arc::new(processor));
        self
    }

    /// Set the scoring function
    pub fn scorer<F>(mut self, scorer: F) -> Self
    where
        F: Fn(&str, &str) -> u8 + Send + Sync + 'static,
    {
        if self.scorer.is_some() {
            self.conflicts.push("scorer");
        }
        self.scorer = Some(Arc::new(scorer));
        self
    }

    /// Score with a [`Similarity`] implementation
    pub fn similarity<S>(self, similarity: S) -> Self
    where
        S: Similarity + 'static,
    {
        self.scorer(move |a: &str, b: &str| similarity.score(a, b))
    }

    /// Set the minimum score (0 to 100) a pair needs to be kept
    pub fn cutoff(mut self, cutoff: u8) -> Self {
        if self.cutoff.is_some() {
            self.conflicts.push("cutoff");
        }
        self.cutoff = Some(cutoff);
        self
    }

    /// Build the config
    pub fn build(self) -> Result<ExtractConfig, ProcessError> {
        if let Some(option) = self.conflicts.first() {
            return Err(ProcessError::InvalidConfig(format!(
                "{option} may only be set once"
            )));
        }

        let cutoff = self.cutoff.unwrap_or(0);
        if cutoff > 100 {
            return Err(ProcessError::InvalidConfig(format!(
                "cutoff {cutoff} is above 100"
            )));
        }

        Ok(ExtractConfig {
            processor: self.processor,
            scorer: self.scorer,
            cutoff,
        })
    }
}

/// Serializable description of an [`ExtractConfig`].
///
/// ```
/// use fuzzyratio::process::ExtractOptions;
///
/// let options: ExtractOptions = serde_json::from_str(
///     r#"{"scorer": {"kind": "token_sort"}, "processor": "cleanse", "cutoff": 60}"#,
/// ).unwrap();
/// let config = options.into_config().unwrap();
/// assert_eq!(config.cutoff(), 60);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Scorer to use; `None` keeps the default weighted ratio and its processing
    pub scorer: Option<Scorer>,
    pub processor: Option<NormalizationMode>,
    pub cutoff: u8,
}

impl ExtractOptions {
    pub fn into_config(self) -> Result<ExtractConfig, ProcessError> {
        let mut builder = ExtractConfig::builder().cutoff(self.cutoff);
        if let Some(scorer) = self.scorer {
            builder = builder.similarity(scorer);
        }
        if let Some(mode) = self.processor {
            builder = builder.processor(move |s: &str| normalize_string(s, mode));
        }
        builder.build()
    }
}

/// Score every choice, keeping pairs at or above the cutoff in input order.
///
/// Uses parallel scoring once there are at least 100 choices.
pub fn extract_without_order<S>(query: &str, choices: &[S], config: &ExtractConfig) -> Vec<MatchPair>
where
    S: AsRef<str> + Sync,
{
    let query = config.prepare_query(query);
    let scorer = config.score_fn();
    let processor = config.processor.as_ref();
    let cutoff = config.cutoff;

    let score_choice = |(index, choice): (usize, &S)| {
        let text = choice.as_ref();
        let score = match processor {
            Some(processor) => scorer(&query, &processor(text)),
            None => scorer(&query, text),
        };
        (score >= cutoff).then(|| MatchPair {
            text: text.to_string(),
            score,
            index,
        })
    };

    let pairs: Vec<MatchPair> = if choices.len() >= PARALLEL_THRESHOLD {
        choices
            .par_iter()
            .enumerate()
            .filter_map(score_choice)
            .collect()
    } else {
        choices.iter().enumerate().filter_map(score_choice).collect()
    };

    debug!(
        choices = choices.len(),
        cutoff,
        matches = pairs.len(),
        parallel = choices.len() >= PARALLEL_THRESHOLD,
        "scored choices"
    );
    pairs
}

/// Score every choice and return the best ones, highest score first.
///
/// Equal scores keep their input order. `limit` of `None` returns every
/// pair; a limit above the number of pairs is not an error.
///
/// # Example
///
/// ```rust
/// use fuzzyratio::process::{extract, ExtractConfig};
///
/// let choices = ["new york mets", "new YORK mets", "the wonderful new york mets"];
/// let best = extract("new york mets", &choices, Some(2), &ExtractConfig::default());
/// assert_eq!(best.len(), 2);
/// assert_eq!((best[0].index, best[0].score), (0, 100));
/// assert_eq!((best[1].index, best[1].score), (1, 100));
/// ```
pub fn extract<S>(
    query: &str,
    choices: &[S],
    limit: Option<usize>,
    config: &ExtractConfig,
) -> Vec<MatchPair>
where
    S: AsRef<str> + Sync,
{
    let mut pairs = extract_without_order(query, choices, config);

    // Stable sort: ties stay in input order
    pairs.sort_by(|a, b| b.score.cmp(&a.score));
    if let Some(limit) = limit {
        pairs.truncate(limit);
    }
    pairs
}

/// Return the best match, the earliest one on ties.
///
/// # Errors
///
/// [`ProcessError::NoMatches`] when `choices` is empty or no pair reaches
/// the cutoff.
pub fn extract_one<S>(query: &str, choices: &[S], config: &ExtractConfig) -> Result<MatchPair, ProcessError>
where
    S: AsRef<str> + Sync,
{
    let best = extract_without_order(query, choices, config)
        .into_iter()
        .reduce(|best, pair| if pair.score > best.score { pair } else { best });

    match best {
        Some(pair) => {
            debug!(index = pair.index, score = pair.score, "best match");
            Ok(pair)
        }
        None => Err(ProcessError::NoMatches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::fuzz::ratio;

    const GAMES: [&str; 8] = [
        "new york mets",
        "new york mets",
        "new YORK mets",
        "the wonderful new york mets",
        "new york mets vs atlanta braves",
        "atlanta braves vs new york mets",
        "new york mets - atlanta braves",
        "new york city mets - atlanta braves",
    ];

    const MATCHUPS: [&str; 4] = [
        "new york mets vs chicago cubs",
        "chicago cubs vs chicago white sox",
        "philladelphia phillies vs atlanta braves",
        "braves vs mets",
    ];

    #[test]
    fn test_extract_one_default() {
        let best = extract_one("new york mets at atlanta braves", &MATCHUPS, &ExtractConfig::default()).unwrap();
        assert_eq!(best.text, "braves vs mets");
        assert_eq!(best.score, 86);
        assert_eq!(best.index, 3);
    }

    #[test]
    fn test_extract_without_order_default_scores() {
        let pairs = extract_without_order("new york mets at atlanta braves", &MATCHUPS, &ExtractConfig::default());
        let scores: Vec<u8> = pairs.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![63, 29, 59, 86]);
        let indexes: Vec<usize> = pairs.iter().map(|p| p.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_extract_one_first_of_ties() {
        let best = extract_one("new york mets", &GAMES, &ExtractConfig::default()).unwrap();
        assert_eq!((best.index, best.score), (0, 100));
    }

    #[test]
    fn test_extract_scorer_only_skips_processing() {
        let config = ExtractConfig::with_scorer(ratio);
        let top = extract("new york mets at atlanta braves", &MATCHUPS, Some(2), &config);
        let got: Vec<(usize, u8)> = top.iter().map(|p| (p.index, p.score)).collect();
        assert_eq!(got, vec![(0, 63), (2, 56)]);

        // Case differences count when nothing is processed
        let pair = extract_one("new york mets", &GAMES[2..3], &config).unwrap();
        assert_eq!(pair.score, 69);
    }

    #[test]
    fn test_extract_processor_applies_to_both_sides() {
        let config = ExtractConfig::builder()
            .processor(|s: &str| s.to_lowercase())
            .scorer(ratio)
            .build()
            .unwrap();
        let pair = extract_one("NEW york mets", &GAMES[2..3], &config).unwrap();
        assert_eq!(pair.score, 100);
        // The original text is reported, not the processed one
        assert_eq!(pair.text, "new YORK mets");
    }

    #[test]
    fn test_extract_limits() {
        let config = ExtractConfig::default();
        let all = extract("new york mets", &GAMES, None, &config);
        assert_eq!(all.len(), GAMES.len());
        assert!(all.windows(2).all(|w| w[0].score >= w[1].score));
        let top: Vec<usize> = all.iter().take(3).map(|p| p.index).collect();
        assert_eq!(top, vec![0, 1, 2]);

        assert_eq!(extract("new york mets", &GAMES, Some(100), &config).len(), GAMES.len());
        assert!(extract("new york mets", &GAMES, Some(0), &config).is_empty());
    }

    #[test]
    fn test_extract_cutoff() {
        let config = ExtractConfig::builder().cutoff(95).build().unwrap();
        let pairs = extract_without_order("new york mets", &GAMES, &config);
        let indexes: Vec<usize> = pairs.iter().map(|p| p.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn test_extract_one_no_matches() {
        let empty: [&str; 0] = [];
        assert_eq!(
            extract_one("query", &empty, &ExtractConfig::default()),
            Err(ProcessError::NoMatches)
        );

        let strict = ExtractConfig::builder().cutoff(100).build().unwrap();
        assert_eq!(
            extract_one("new york mets at atlanta braves", &MATCHUPS, &strict),
            Err(ProcessError::NoMatches)
        );
    }

    #[test]
    fn test_builder_rejects_conflicts() {
        let err = ExtractConfig::builder().scorer(ratio).scorer(wratio).build().unwrap_err();
        assert!(matches!(err, ProcessError::InvalidConfig(_)));

        let err = ExtractConfig::builder()
            .processor(|s: &str| s.to_string())
            .processor(|s: &str| s.to_uppercase())
            .build()
            .unwrap_err();
        assert!(matches!(err, ProcessError::InvalidConfig(_)));

        let err = ExtractConfig::builder().cutoff(10).cutoff(20).build().unwrap_err();
        assert!(matches!(err, ProcessError::InvalidConfig(_)));

        let err = ExtractConfig::builder().cutoff(101).build().unwrap_err();
        assert_eq!(err, ProcessError::InvalidConfig("cutoff 101 is above 100".to_string()));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let choices: Vec<String> = (0..250)
            .map(|i| format!("{} {}", GAMES[i % GAMES.len()], i))
            .collect();
        let config = ExtractConfig::builder().cutoff(50).build().unwrap();

        let pairs = extract_without_order("new york mets", &choices, &config);
        let expected: Vec<MatchPair> = choices
            .iter()
            .enumerate()
            .filter_map(|(index, text)| {
                let score = wratio("new york mets", text);
                (score >= 50).then(|| MatchPair {
                    text: text.clone(),
                    score,
                    index,
                })
            })
            .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_extract_options_serde() {
        let options: ExtractOptions =
            serde_json::from_str(r#"{"scorer": {"kind": "ratio"}, "processor": "cleanse"}"#).unwrap();
        assert_eq!(options.scorer, Some(Scorer::Ratio));
        assert_eq!(options.processor, Some(NormalizationMode::Cleanse));
        assert_eq!(options.cutoff, 0);

        let config = options.into_config().unwrap();
        let pair = extract_one("new york mets", &GAMES[2..3], &config).unwrap();
        assert_eq!(pair.score, 100);

        let err = ExtractOptions {
            cutoff: 150,
            ..Default::default()
        }
        .into_config()
        .unwrap_err();
        assert!(matches!(err, ProcessError::InvalidConfig(_)));
    }
}
