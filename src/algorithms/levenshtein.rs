//! Levenshtein (edit) distance implementation
//!
//! Optimized with:
//! - Common prefix/suffix stripping before any DP work
//! - O(n) membership check when one side shrinks to a single char
//! - Single-row DP when only the distance is needed
//! - Unicode-aware character handling (code points, not bytes)
//!
//! The full cost matrix is only built by [`edit_ops`], which has to
//! backtrack through it to recover the alignment.

use super::alignment::{EditOp, EditTag};
use super::EditDistance;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Cost of a replace operation relative to insert/delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplaceCost {
    /// Replace costs 1, the same as an insert or a delete.
    #[default]
    Uniform,
    /// Replace costs 2, so it is never cheaper than delete + insert.
    /// The resulting distance is the insert/delete (indel) distance.
    Doubled,
}

impl ReplaceCost {
    #[inline]
    const fn cost(self) -> usize {
        match self {
            ReplaceCost::Uniform => 1,
            ReplaceCost::Doubled => 2,
        }
    }
}

/// Split off the common prefix and suffix of two sequences.
///
/// Returns the prefix length and the two remaining middle parts.
#[inline]
fn strip_affixes<'a>(a: &'a [char], b: &'a [char]) -> (usize, &'a [char], &'a [char]) {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let (a, b) = (&a[prefix..], &b[prefix..]);

    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    (prefix, &a[..a.len() - suffix], &b[..b.len() - suffix])
}

/// Single-row DP over char slices.
#[inline]
fn dp_distance(a: &[char], b: &[char], replace_cost: usize) -> usize {
    // Ensure shorter string is on the column axis
    let (target, source) = if a.len() < b.len() { (a, b) } else { (b, a) };
    let n_target = target.len();

    let mut row: SmallVec<[usize; 64]> = (0..=n_target).collect();

    for (i, &sc) in source.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;

        for j in 0..n_target {
            let cost = if sc == target[j] { 0 } else { replace_cost };
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;
            let substitution = prev + cost;

            prev = row[j + 1];
            row[j + 1] = substitution.min(deletion).min(insertion);
        }
    }

    row[n_target]
}

/// Compute the edit distance between two code-point sequences.
///
/// # Example
/// ```
/// use fuzzyratio::algorithms::levenshtein::{levenshtein_chars, ReplaceCost};
///
/// let a: Vec<char> = "cupid".chars().collect();
/// let b: Vec<char> = "pulpit".chars().collect();
/// assert_eq!(levenshtein_chars(&a, &b, ReplaceCost::Uniform), 3);
/// assert_eq!(levenshtein_chars(&a, &b, ReplaceCost::Doubled), 5);
/// ```
#[must_use]
pub fn levenshtein_chars(a: &[char], b: &[char], replace_cost: ReplaceCost) -> usize {
    let (_, a, b) = strip_affixes(a, b);

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if shorter.len() == 1 {
        let n = longer.len();
        return if longer.contains(&shorter[0]) {
            n - 1
        } else {
            match replace_cost {
                ReplaceCost::Uniform => n,
                ReplaceCost::Doubled => n + 1,
            }
        };
    }

    dp_distance(shorter, longer, replace_cost.cost())
}

/// Edit distance between two strings with the given replace cost.
#[inline]
#[must_use]
pub fn levenshtein_with(a: &str, b: &str, replace_cost: ReplaceCost) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();

    levenshtein_chars(&a_chars, &b_chars, replace_cost)
}

/// Convenience function for the classic distance (replace costs 1).
///
/// # Example
/// ```
/// use fuzzyratio::algorithms::levenshtein::levenshtein;
///
/// assert_eq!(levenshtein("four", "tour"), 1);
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// ```
#[inline]
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    levenshtein_with(a, b, ReplaceCost::Uniform)
}

/// Insert/delete distance (replace costs 2).
///
/// This is the distance the ratio scorers are built on.
#[inline]
#[must_use]
pub fn indel_distance(a: &str, b: &str) -> usize {
    levenshtein_with(a, b, ReplaceCost::Doubled)
}

/// Levenshtein distance calculator with a configurable replace cost
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Levenshtein {
    pub replace_cost: ReplaceCost,
}

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self {
            replace_cost: ReplaceCost::Uniform,
        }
    }

    #[must_use]
    pub fn indel() -> Self {
        Self {
            replace_cost: ReplaceCost::Doubled,
        }
    }
}

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        levenshtein_with(a, b, self.replace_cost)
    }

    fn name(&self) -> &'static str {
        match self.replace_cost {
            ReplaceCost::Uniform => "levenshtein",
            ReplaceCost::Doubled => "indel",
        }
    }
}

// ============================================================================
// Alignment (edit operations)
// ============================================================================

/// Direction of the run the backtracking walk is currently extending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    Diagonal,
    Insert,
    Delete,
}

/// Reconstruct the edit operations turning `a` into `b`.
///
/// Builds the full (uniform cost) matrix for the part left after stripping
/// the common prefix and suffix, then walks back from the bottom-right
/// corner. When several moves are minimal the walk keeps extending the
/// current insert/delete run, then prefers a diagonal match, then a
/// replace, and only then starts a new insert or delete run. Longer runs
/// give fewer, larger opcodes and matching blocks.
///
/// Only non-keep operations are returned, ordered by position. Their count
/// equals the uniform distance.
///
/// # Example
/// ```
/// use fuzzyratio::algorithms::alignment::EditTag;
/// use fuzzyratio::algorithms::levenshtein::edit_ops;
///
/// let a: Vec<char> = "four".chars().collect();
/// let b: Vec<char> = "tour".chars().collect();
/// let ops = edit_ops(&a, &b);
/// assert_eq!(ops.len(), 1);
/// assert_eq!(ops[0].tag, EditTag::Replace);
/// ```
#[must_use]
pub fn edit_ops(a: &[char], b: &[char]) -> Vec<EditOp> {
    let (offset, a, b) = strip_affixes(a, b);

    let rows = a.len() + 1;
    let cols = b.len() + 1;

    let mut matrix = vec![0usize; rows * cols];
    for (j, cell) in matrix.iter_mut().take(cols).enumerate() {
        *cell = j;
    }
    for i in 1..rows {
        matrix[i * cols] = i;
    }

    for i in 1..rows {
        let ca = a[i - 1];
        for j in 1..cols {
            let cost = usize::from(ca != b[j - 1]);
            let diagonal = matrix[(i - 1) * cols + j - 1] + cost;
            let left = matrix[i * cols + j - 1] + 1;
            let up = matrix[(i - 1) * cols + j] + 1;
            matrix[i * cols + j] = diagonal.min(left).min(up);
        }
    }

    let at = |i: usize, j: usize| matrix[i * cols + j];

    let mut ops = Vec::with_capacity(at(rows - 1, cols - 1));
    let (mut i, mut j) = (rows - 1, cols - 1);
    let mut run = Run::Diagonal;

    while i > 0 || j > 0 {
        let current = at(i, j);

        if run == Run::Insert && j > 0 && current == at(i, j - 1) + 1 {
            j -= 1;
            ops.push(EditOp::new(EditTag::Insert, i + offset, j + offset));
            continue;
        }

        if run == Run::Delete && i > 0 && current == at(i - 1, j) + 1 {
            i -= 1;
            ops.push(EditOp::new(EditTag::Delete, i + offset, j + offset));
            continue;
        }

        if i > 0 && j > 0 && current == at(i - 1, j - 1) && a[i - 1] == b[j - 1] {
            i -= 1;
            j -= 1;
            run = Run::Diagonal;
            continue;
        }

        if i > 0 && j > 0 && current == at(i - 1, j - 1) + 1 {
            i -= 1;
            j -= 1;
            ops.push(EditOp::new(EditTag::Replace, i + offset, j + offset));
            run = Run::Diagonal;
            continue;
        }

        if run == Run::Diagonal && j > 0 && current == at(i, j - 1) + 1 {
            j -= 1;
            ops.push(EditOp::new(EditTag::Insert, i + offset, j + offset));
            run = Run::Insert;
            continue;
        }

        if run == Run::Diagonal && i > 0 && current == at(i - 1, j) + 1 {
            i -= 1;
            ops.push(EditOp::new(EditTag::Delete, i + offset, j + offset));
            run = Run::Delete;
            continue;
        }

        // A stale run with no valid continuation: drop it and retry.
        run = Run::Diagonal;
    }

    ops.reverse();
    ops
}
