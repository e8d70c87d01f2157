//! Alignment extraction: edit operations, opcodes and matching blocks
//!
//! Turns the edit script produced by [`edit_ops`] into the two views used
//! downstream:
//! - opcodes: maximal runs of a single edit kind, partitioning both
//!   sequences from `(0, 0)` to `(len1, len2)`
//! - matching blocks: the unchanged runs, terminated by a zero-length
//!   sentinel at `(len1, len2)`
//!
//! `partial_ratio` anchors its candidate windows on the matching blocks.

use super::levenshtein::edit_ops;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Kind of an edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditTag {
    Keep,
    Replace,
    Insert,
    Delete,
}

/// Single edit operation at a source/destination position (in chars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditOp {
    pub tag: EditTag,
    pub src_pos: usize,
    pub dest_pos: usize,
}

impl EditOp {
    #[must_use]
    pub const fn new(tag: EditTag, src_pos: usize, dest_pos: usize) -> Self {
        Self {
            tag,
            src_pos,
            dest_pos,
        }
    }
}

/// Maximal run of one edit kind: `src[src_begin..src_end]` becomes
/// `dest[dest_begin..dest_end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpCode {
    pub tag: EditTag,
    pub src_begin: usize,
    pub src_end: usize,
    pub dest_begin: usize,
    pub dest_end: usize,
}

/// Run of `length` equal chars starting at `src_pos` and `dest_pos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchingBlock {
    pub src_pos: usize,
    pub dest_pos: usize,
    pub length: usize,
}

/// Advance positions past one op of the given kind.
#[inline]
fn step(tag: EditTag, spos: &mut usize, dpos: &mut usize) {
    match tag {
        EditTag::Replace => {
            *spos += 1;
            *dpos += 1;
        }
        EditTag::Delete => *spos += 1,
        EditTag::Insert => *dpos += 1,
        EditTag::Keep => {}
    }
}

/// Group edit operations into opcodes.
///
/// Consecutive ops with the same tag whose positions chain form one opcode.
/// Any stretch skipped between groups becomes a `Keep` opcode, and a
/// trailing `Keep` covers whatever is left up to `(len1, len2)`. Explicit
/// `Keep` ops in the input are ignored.
///
/// # Example
/// ```
/// use fuzzyratio::algorithms::alignment::{opcodes, EditTag};
/// use fuzzyratio::algorithms::levenshtein::edit_ops;
///
/// let a: Vec<char> = "four".chars().collect();
/// let b: Vec<char> = "tour".chars().collect();
/// let codes = opcodes(&edit_ops(&a, &b), a.len(), b.len());
/// assert_eq!(codes.len(), 2);
/// assert_eq!(codes[0].tag, EditTag::Replace);
/// assert_eq!(codes[1].tag, EditTag::Keep);
/// assert_eq!((codes[1].src_end, codes[1].dest_end), (4, 4));
/// ```
#[must_use]
pub fn opcodes(ops: &[EditOp], len1: usize, len2: usize) -> Vec<OpCode> {
    let mut codes = Vec::with_capacity(ops.len() * 2 + 1);
    let (mut spos, mut dpos) = (0usize, 0usize);
    let mut idx = 0;

    while idx < ops.len() {
        let op = ops[idx];
        if op.tag == EditTag::Keep {
            idx += 1;
            continue;
        }

        if spos < op.src_pos || dpos < op.dest_pos {
            codes.push(OpCode {
                tag: EditTag::Keep,
                src_begin: spos,
                src_end: op.src_pos,
                dest_begin: dpos,
                dest_end: op.dest_pos,
            });
            spos = op.src_pos;
            dpos = op.dest_pos;
        }

        let (src_begin, dest_begin) = (spos, dpos);
        loop {
            step(op.tag, &mut spos, &mut dpos);
            idx += 1;

            let chained = ops.get(idx).is_some_and(|next| {
                next.tag == op.tag && next.src_pos == spos && next.dest_pos == dpos
            });
            if !chained {
                break;
            }
        }

        codes.push(OpCode {
            tag: op.tag,
            src_begin,
            src_end: spos,
            dest_begin,
            dest_end: dpos,
        });
    }

    if spos < len1 || dpos < len2 {
        codes.push(OpCode {
            tag: EditTag::Keep,
            src_begin: spos,
            src_end: len1,
            dest_begin: dpos,
            dest_end: len2,
        });
    }

    codes
}

/// Reduce opcodes to matching blocks, appending the `(len1, len2, 0)` sentinel.
#[must_use]
pub fn matching_blocks_from_opcodes(codes: &[OpCode], len1: usize, len2: usize) -> Vec<MatchingBlock> {
    let mut blocks: Vec<MatchingBlock> = codes
        .iter()
        .filter(|code| code.tag == EditTag::Keep)
        .map(|code| MatchingBlock {
            src_pos: code.src_begin,
            dest_pos: code.dest_begin,
            length: code.src_end - code.src_begin,
        })
        .collect();

    blocks.push(MatchingBlock {
        src_pos: len1,
        dest_pos: len2,
        length: 0,
    });
    blocks
}

/// Matching blocks between two code-point sequences.
///
/// # Example
/// ```
/// use fuzzyratio::algorithms::alignment::{matching_blocks, MatchingBlock};
///
/// let a: Vec<char> = "abc".chars().collect();
/// let blocks = matching_blocks(&a, &a);
/// assert_eq!(blocks[0], MatchingBlock { src_pos: 0, dest_pos: 0, length: 3 });
/// assert_eq!(blocks[1], MatchingBlock { src_pos: 3, dest_pos: 3, length: 0 });
/// ```
#[must_use]
pub fn matching_blocks(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    let codes = opcodes(&edit_ops(a, b), a.len(), b.len());
    matching_blocks_from_opcodes(&codes, a.len(), b.len())
}

/// Opcodes between two strings.
#[must_use]
pub fn get_opcodes(a: &str, b: &str) -> Vec<OpCode> {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    opcodes(&edit_ops(&a_chars, &b_chars), a_chars.len(), b_chars.len())
}

/// Matching blocks between two strings.
#[must_use]
pub fn get_matching_blocks(a: &str, b: &str) -> Vec<MatchingBlock> {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    matching_blocks(&a_chars, &b_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_partition(codes: &[OpCode], len1: usize, len2: usize) {
        let (mut s, mut d) = (0, 0);
        for code in codes {
            assert_eq!((code.src_begin, code.dest_begin), (s, d), "gap before {code:?}");
            s = code.src_end;
            d = code.dest_end;
        }
        assert_eq!((s, d), (len1, len2));
    }

    #[test]
    fn test_opcodes_cupid_pulpit() {
        let codes = get_opcodes("cupid", "pulpit");
        let shape: Vec<_> = codes
            .iter()
            .map(|c| (c.tag, c.src_begin, c.src_end, c.dest_begin, c.dest_end))
            .collect();
        assert_eq!(
            shape,
            vec![
                (EditTag::Replace, 0, 1, 0, 1),
                (EditTag::Keep, 1, 2, 1, 2),
                (EditTag::Insert, 2, 2, 2, 3),
                (EditTag::Keep, 2, 4, 3, 5),
                (EditTag::Replace, 4, 5, 5, 6),
            ]
        );
    }

    #[test]
    fn test_opcodes_partition_both_sequences() {
        let pairs = [
            ("", ""),
            ("", "abc"),
            ("abc", ""),
            ("abc", "abc"),
            ("needle", "haystackneedelhaystack"),
            ("HSINCHUANG", "LSINJHUANG DISTRIC"),
            ("new york mets", "atlanta braves vs new york mets"),
        ];
        for (a, b) in pairs {
            let codes = get_opcodes(a, b);
            assert_partition(&codes, a.chars().count(), b.chars().count());
        }
    }

    #[test]
    fn test_opcodes_skip_explicit_keep() {
        let ops = [
            EditOp::new(EditTag::Keep, 0, 0),
            EditOp::new(EditTag::Delete, 1, 1),
        ];
        let codes = opcodes(&ops, 3, 2);
        assert_eq!(codes.len(), 3);
        assert_eq!(codes[0].tag, EditTag::Keep);
        assert_eq!(codes[1].tag, EditTag::Delete);
        assert_eq!(codes[2].tag, EditTag::Keep);
        assert_partition(&codes, 3, 2);
    }

    #[test]
    fn test_matching_blocks_needle() {
        let blocks = get_matching_blocks("needle", "haystackneedelhaystack");
        assert_eq!(
            blocks,
            vec![
                MatchingBlock { src_pos: 0, dest_pos: 8, length: 4 },
                MatchingBlock { src_pos: 4, dest_pos: 13, length: 1 },
                MatchingBlock { src_pos: 6, dest_pos: 22, length: 0 },
            ]
        );
    }

    #[test]
    fn test_matching_blocks_empty_source() {
        let blocks = get_matching_blocks("", "abc");
        assert_eq!(blocks, vec![MatchingBlock { src_pos: 0, dest_pos: 3, length: 0 }]);
    }

    #[test]
    fn test_matching_blocks_cover_equal_chars() {
        let pairs = [
            ("the wonderful new york mets", "new york mets"),
            ("栶eeƵ画-ʏĜ橭畏p父«P^艎鹥ʭ攆", "eeǸɁ碳簫S晑=2#父«厄].稍咾靐Ë"),
            ("several tokens arbitrary order", "order arbitrary several tokens"),
        ];
        for (a, b) in pairs {
            let ac: Vec<char> = a.chars().collect();
            let bc: Vec<char> = b.chars().collect();
            let blocks = matching_blocks(&ac, &bc);

            let last = blocks.last().copied();
            assert_eq!(last, Some(MatchingBlock { src_pos: ac.len(), dest_pos: bc.len(), length: 0 }));

            let total: usize = blocks.iter().map(|b| b.length).sum();
            assert!(total <= ac.len().min(bc.len()));

            for block in &blocks {
                assert_eq!(
                    ac[block.src_pos..block.src_pos + block.length],
                    bc[block.dest_pos..block.dest_pos + block.length]
                );
            }
            for pair in blocks.windows(2) {
                assert!(pair[0].src_pos <= pair[1].src_pos);
                assert!(pair[0].dest_pos <= pair[1].dest_pos);
            }
        }
    }
}
