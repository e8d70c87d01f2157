//! Deduplication utilities
//!
//! [`dedupe`] collapses a list to one representative per cluster of similar
//! strings. [`find_duplicates`] groups similar strings with union-find,
//! either over all pairs or over a sorted sliding window.

use crate::algorithms::token::{token_set_ratio, TokenConfig};
use crate::algorithms::Similarity;
use crate::process::{extract, ExtractConfig};
use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Score a pair must exceed to count as a duplicate by default.
pub const DEFAULT_DEDUPE_THRESHOLD: u8 = 70;

/// Token set ratio over cleansed, ASCII-only strings.
#[must_use]
pub fn default_dedupe_scorer(a: &str, b: &str) -> u8 {
    token_set_ratio(a, b, TokenConfig::new(true, true))
}

/// Longest first (in chars), then lexicographic.
fn representative_order(a: &str, b: &str) -> Ordering {
    b.chars()
        .count()
        .cmp(&a.chars().count())
        .then_with(|| a.cmp(b))
}

/// Collapse fuzzy duplicates to one representative each.
///
/// Every item is matched against the whole list with `scorer`; matches
/// scoring above `threshold` form its cluster. A lone match is kept as is,
/// otherwise the longest match wins, ties going to the lexicographically
/// smallest. Representatives are returned once each, in the order they
/// were first chosen. When nothing collapses, the input is returned
/// unchanged.
///
/// # Example
///
/// ```rust
/// use fuzzyratio::dedup::dedupe_default;
///
/// let items = ["Frodo Baggins", "Tom Sawyer", "Bilbo Baggin", "Frody Baggins", "Bilbo Baggins"];
/// let deduped = dedupe_default(&items);
/// assert_eq!(deduped, vec!["Frodo Baggins", "Tom Sawyer", "Bilbo Baggins"]);
/// ```
pub fn dedupe<S, F>(items: &[S], threshold: u8, scorer: F) -> Vec<String>
where
    S: AsRef<str> + Sync,
    F: Fn(&str, &str) -> u8 + Send + Sync + 'static,
{
    let config = ExtractConfig::with_scorer(scorer);

    let mut seen: AHashSet<String> = AHashSet::with_capacity(items.len());
    let mut representatives = Vec::new();

    for item in items {
        let matches = extract(item.as_ref(), items, None, &config);
        let chosen = matches
            .iter()
            .filter(|pair| pair.score > threshold)
            .map(|pair| pair.text.as_str())
            .min_by(|a, b| representative_order(a, b));

        if let Some(text) = chosen {
            trace!(item = item.as_ref(), representative = text, "chose representative");
            if seen.insert(text.to_string()) {
                representatives.push(text.to_string());
            }
        }
    }

    debug!(
        items = items.len(),
        representatives = representatives.len(),
        threshold,
        "deduplicated"
    );

    if representatives.len() == items.len() {
        return items.iter().map(|s| s.as_ref().to_string()).collect();
    }
    representatives
}

/// [`dedupe`] with the default threshold and scorer.
pub fn dedupe_default<S>(items: &[S]) -> Vec<String>
where
    S: AsRef<str> + Sync,
{
    dedupe(items, DEFAULT_DEDUPE_THRESHOLD, default_dedupe_scorer)
}

/// Result from deduplication operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeduplicationResult {
    /// Groups of duplicate items (each group contains similar strings)
    pub groups: Vec<Vec<String>>,
    /// Items that are unique (no duplicates found)
    pub unique: Vec<String>,
    /// Total number of duplicate items found
    pub total_duplicates: usize,
}

/// Deduplication methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupMethod {
    /// Compare all pairs (O(N^2)). Accurate but slow for large N.
    BruteForce,
    /// Sorted Neighborhood Method (O(N log N)). Fast, good for large N.
    /// Sorts items and compares within a sliding window.
    SortedNeighborhood { window_size: usize },
}

/// Union-Find data structure for efficient clustering
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]); // Path compression
        }
        self.parent[x]
    }

    fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Union by rank
        match self.rank[root_x].cmp(&self.rank[root_y]) {
            Ordering::Less => self.parent[root_x] = root_y,
            Ordering::Greater => self.parent[root_y] = root_x,
            Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
    }

    /// Clusters in order of their first member, members in input order.
    fn groups<S: AsRef<str>>(&mut self, items: &[S]) -> Vec<Vec<String>> {
        let mut slots: AHashMap<usize, usize> = AHashMap::new();
        let mut groups: Vec<Vec<String>> = Vec::new();

        for (i, item) in items.iter().enumerate() {
            let root = self.find(i);
            let slot = *slots.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(item.as_ref().to_string());
        }

        groups
    }
}

/// Split clusters into duplicate groups (largest first) and unique items.
fn into_result(all_groups: Vec<Vec<String>>) -> DeduplicationResult {
    let mut groups = Vec::new();
    let mut unique = Vec::new();

    for group in all_groups {
        if group.len() > 1 {
            groups.push(group);
        } else {
            unique.extend(group);
        }
    }

    // Stable: equal sizes keep first-member order
    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    let total_duplicates = groups.iter().map(|g| g.len() - 1).sum();

    DeduplicationResult {
        groups,
        unique,
        total_duplicates,
    }
}

/// Find duplicate items in a list using the given scorer.
///
/// Two items are linked when their score is above `threshold`; groups are
/// the connected components of those links.
///
/// # Arguments
/// * `items` - List of strings to deduplicate
/// * `scorer` - Function that scores two strings in `[0, 100]`
/// * `threshold` - Score a pair must exceed to be linked
/// * `method` - Deduplication method to use
///
/// # Returns
/// DeduplicationResult containing groups of duplicates and unique items
pub fn find_duplicates<S, F>(
    items: &[S],
    scorer: F,
    threshold: u8,
    method: DedupMethod,
) -> DeduplicationResult
where
    S: AsRef<str> + Sync,
    F: Fn(&str, &str) -> u8 + Sync + Send,
{
    if items.len() < 2 {
        return DeduplicationResult {
            unique: items.iter().map(|s| s.as_ref().to_string()).collect(),
            ..Default::default()
        };
    }

    let links = match method {
        DedupMethod::BruteForce => brute_force_links(items, &scorer, threshold),
        DedupMethod::SortedNeighborhood { window_size } => {
            sorted_neighborhood_links(items, &scorer, threshold, window_size)
        }
    };

    let mut uf = UnionFind::new(items.len());
    for &(i, j) in &links {
        uf.union(i, j);
    }

    let result = into_result(uf.groups(items));
    debug!(
        items = items.len(),
        links = links.len(),
        groups = result.groups.len(),
        duplicates = result.total_duplicates,
        ?method,
        "found duplicates"
    );
    result
}

/// All pairs `(i, j)` with `i < j` scoring above the threshold.
fn brute_force_links<S, F>(items: &[S], scorer: &F, threshold: u8) -> Vec<(usize, usize)>
where
    S: AsRef<str> + Sync,
    F: Fn(&str, &str) -> u8 + Sync + Send,
{
    let n = items.len();

    // Only the matches are collected, never the full pair list
    (0..n)
        .into_par_iter()
        .flat_map(|i| {
            (i + 1..n).into_par_iter().filter_map(move |j| {
                let score = scorer(items[i].as_ref(), items[j].as_ref());
                (score > threshold).then_some((i, j))
            })
        })
        .collect()
}

/// Pairs within `window_size` of each other once the items are sorted.
fn sorted_neighborhood_links<S, F>(
    items: &[S],
    scorer: &F,
    threshold: u8,
    window_size: usize,
) -> Vec<(usize, usize)>
where
    S: AsRef<str> + Sync,
    F: Fn(&str, &str) -> u8 + Sync + Send,
{
    let n = items.len();

    // (original_index, text), sorted so shared prefixes end up adjacent
    let mut indexed: Vec<(usize, &str)> = items
        .iter()
        .enumerate()
        .map(|(i, s)| (i, s.as_ref()))
        .collect();
    indexed.par_sort_unstable_by(|(_, a), (_, b)| a.cmp(b));

    let window_size = window_size.max(1);
    let indexed = &indexed;

    (0..n)
        .into_par_iter()
        .flat_map(|i| {
            let end = (i + 1 + window_size).min(n);
            let (orig_i, text_i) = indexed[i];

            (i + 1..end).into_par_iter().filter_map(move |j| {
                let (orig_j, text_j) = indexed[j];
                (scorer(text_i, text_j) > threshold).then_some((orig_i, orig_j))
            })
        })
        .collect()
}

/// Find duplicates using a trait-based scorer
pub fn find_duplicates_with_metric<S, M>(
    items: &[S],
    metric: &M,
    threshold: u8,
    method: DedupMethod,
) -> DeduplicationResult
where
    S: AsRef<str> + Sync,
    M: Similarity + ?Sized,
{
    find_duplicates(items, |a, b| metric.score(a, b), threshold, method)
}
