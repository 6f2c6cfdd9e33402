use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::Range;

/// Minimum length of `b` before popular elements are excluded as anchors
const AUTOJUNK_MIN_LEN: usize = 200;

/// Kind of an edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditTag {
    /// `a[i1..i2] == b[j1..j2]`
    Equal,
    /// `b[j1..j2]` is inserted at `a[i1]` (`i1 == i2`)
    Insert,
    /// `a[i1..i2]` is removed (`j1 == j2`)
    Delete,
    /// `a[i1..i2]` is replaced by `b[j1..j2]`
    Replace,
}

/// One step of an edit script with half-open ranges into both sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditOp {
    pub tag: EditTag,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

impl EditOp {
    /// Range covered in the first sequence
    pub fn a_range(&self) -> Range<usize> {
        self.i1..self.i2
    }

    /// Range covered in the second sequence
    pub fn b_range(&self) -> Range<usize> {
        self.j1..self.j2
    }
}

/// A run of `len` equal elements starting at `a[i]` and `b[j]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    pub i: usize,
    pub j: usize,
    pub len: usize,
}

/// Options controlling the longest-match search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignOptions {
    /// Ignore very frequent elements of long `b` sequences when anchoring matches
    pub autojunk: bool,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self { autojunk: true }
    }
}

/// Align two sequences with the default options
///
/// See [`align_with`].
pub fn align<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<EditOp> {
    align_with(a, b, AlignOptions::default())
}

/// Produce an edit script turning `a` into `b`
///
/// The script is built around the longest common contiguous blocks
/// (Ratcliff/Obershelp). Every element of `a` and `b` is covered by exactly
/// one op, ops are contiguous and in order, and the result is deterministic.
///
/// # Example
/// ```
/// use diff_highlight::{align, EditTag};
/// let a: Vec<char> = "cat".chars().collect();
/// let b: Vec<char> = "car".chars().collect();
/// let ops = align(&a, &b);
/// assert_eq!(ops.len(), 2);
/// assert_eq!(ops[0].tag, EditTag::Equal);
/// assert_eq!(ops[1].tag, EditTag::Replace);
/// assert_eq!(ops[1].a_range(), 2..3);
/// ```
pub fn align_with<T: Eq + Hash>(a: &[T], b: &[T], options: AlignOptions) -> Vec<EditOp> {
    let blocks = Matcher::new(a, b, options).matching_blocks();

    let mut ops = Vec::with_capacity(blocks.len() * 2 + 1);
    let (mut i, mut j) = (0, 0);

    // Trailing sentinel so the gap after the last block is emitted too
    let sentinel = MatchingBlock { i: a.len(), j: b.len(), len: 0 };

    for block in blocks.iter().chain(std::iter::once(&sentinel)) {
        let tag = match (i < block.i, j < block.j) {
            (true, true) => Some(EditTag::Replace),
            (true, false) => Some(EditTag::Delete),
            (false, true) => Some(EditTag::Insert),
            (false, false) => None,
        };

        if let Some(tag) = tag {
            ops.push(EditOp { tag, i1: i, i2: block.i, j1: j, j2: block.j });
        }

        if block.len > 0 {
            ops.push(EditOp {
                tag: EditTag::Equal,
                i1: block.i,
                i2: block.i + block.len,
                j1: block.j,
                j2: block.j + block.len,
            });
        }

        i = block.i + block.len;
        j = block.j + block.len;
    }

    ops
}

/// Maximal matching blocks of `a` and `b`, sorted and with adjacent blocks merged
pub fn matching_blocks<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<MatchingBlock> {
    Matcher::new(a, b, AlignOptions::default()).matching_blocks()
}

/// Similarity of the two aligned sequences in `[0.0, 1.0]`
///
/// Computed as `2 * matched / (len(a) + len(b))`; two empty sequences are
/// fully similar.
pub fn similarity(ops: &[EditOp]) -> f64 {
    let mut matched = 0;
    let mut total = 0;

    for op in ops {
        total += op.a_range().len() + op.b_range().len();
        if op.tag == EditTag::Equal {
            matched += op.a_range().len();
        }
    }

    if total == 0 {
        1.0
    } else {
        (2 * matched) as f64 / total as f64
    }
}

struct Matcher<'s, T> {
    a: &'s [T],
    b: &'s [T],
    /// Positions in `b` of each anchorable element
    b2j: HashMap<&'s T, Vec<usize>>,
}

impl<'s, T: Eq + Hash> Matcher<'s, T> {
    fn new(a: &'s [T], b: &'s [T], options: AlignOptions) -> Self {
        let mut b2j: HashMap<&T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }

        if options.autojunk && b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            let popular: HashSet<&T> = b2j
                .iter()
                .filter(|(_, idxs)| idxs.len() > limit)
                .map(|(elt, _)| *elt)
                .collect();
            b2j.retain(|elt, _| !popular.contains(elt));
        }

        Self { a, b, b2j }
    }

    /// Longest matching block within `a[alo..ahi]` and `b[blo..bhi]`
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    /// A zero-length block means there is no match.
    fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchingBlock {
        let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);

        // j2len[j] = length of the match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied().unwrap_or(0) + 1;
                    next.insert(j, k);
                    if k > best_len {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_len = k;
                    }
                }
            }
            j2len = next;
        }

        // Extend across elements that were excluded from anchoring
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_len += 1;
        }
        while best_i + best_len < ahi
            && best_j + best_len < bhi
            && self.a[best_i + best_len] == self.b[best_j + best_len]
        {
            best_len += 1;
        }

        MatchingBlock { i: best_i, j: best_j, len: best_len }
    }

    fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut found = Vec::new();
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let block = self.find_longest_match(alo, ahi, blo, bhi);
            if block.len == 0 {
                continue;
            }
            if alo < block.i && blo < block.j {
                pending.push((alo, block.i, blo, block.j));
            }
            let (i_end, j_end) = (block.i + block.len, block.j + block.len);
            if i_end < ahi && j_end < bhi {
                pending.push((i_end, ahi, j_end, bhi));
            }
            found.push(block);
        }

        found.sort_by_key(|block| (block.i, block.j));

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(found.len());
        for block in found {
            match merged.last_mut() {
                Some(last) if last.i + last.len == block.i && last.j + last.len == block.j => {
                    last.len += block.len;
                }
                _ => merged.push(block),
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn op(tag: EditTag, i1: usize, i2: usize, j1: usize, j2: usize) -> EditOp {
        EditOp { tag, i1, i2, j1, j2 }
    }

    /// Ops must tile both sequences exactly once and in order
    fn assert_covers(ops: &[EditOp], a_len: usize, b_len: usize) {
        let (mut i, mut j) = (0, 0);
        for op in ops {
            assert_eq!(op.i1, i, "gap or overlap in a at {:?}", op);
            assert_eq!(op.j1, j, "gap or overlap in b at {:?}", op);
            assert!(op.i2 >= op.i1 && op.j2 >= op.j1);
            match op.tag {
                EditTag::Equal => assert_eq!(op.i2 - op.i1, op.j2 - op.j1),
                EditTag::Insert => assert!(op.i1 == op.i2 && op.j2 > op.j1),
                EditTag::Delete => assert!(op.j1 == op.j2 && op.i2 > op.i1),
                EditTag::Replace => assert!(op.i2 > op.i1 && op.j2 > op.j1),
            }
            i = op.i2;
            j = op.j2;
        }
        assert_eq!((i, j), (a_len, b_len));
    }

    #[test]
    fn test_both_empty() {
        let ops = align(&chars(""), &chars(""));
        assert!(ops.is_empty());
    }

    #[test]
    fn test_empty_a_is_single_insert() {
        let ops = align(&chars(""), &chars("hello"));
        assert_eq!(ops, vec![op(EditTag::Insert, 0, 0, 0, 5)]);
    }

    #[test]
    fn test_empty_b_is_single_delete() {
        let ops = align(&chars("hello"), &chars(""));
        assert_eq!(ops, vec![op(EditTag::Delete, 0, 5, 0, 0)]);
    }

    #[test]
    fn test_identical_is_single_equal() {
        let s = chars("the same line");
        let ops = align(&s, &s);
        assert_eq!(ops, vec![op(EditTag::Equal, 0, 13, 0, 13)]);
    }

    #[test]
    fn test_replace_at_end() {
        let ops = align(&chars("cat"), &chars("car"));
        assert_eq!(
            ops,
            vec![op(EditTag::Equal, 0, 2, 0, 2), op(EditTag::Replace, 2, 3, 2, 3)]
        );
    }

    #[test]
    fn test_mixed_script() {
        let a = chars("qabxcd");
        let b = chars("abycdf");
        let ops = align(&a, &b);
        assert_eq!(
            ops,
            vec![
                op(EditTag::Delete, 0, 1, 0, 0),
                op(EditTag::Equal, 1, 3, 0, 2),
                op(EditTag::Replace, 3, 4, 2, 3),
                op(EditTag::Equal, 4, 6, 3, 5),
                op(EditTag::Insert, 6, 6, 5, 6),
            ]
        );
        assert_covers(&ops, a.len(), b.len());
    }

    #[test]
    fn test_earliest_longest_match_wins() {
        // "ab" occurs twice in b; the first occurrence anchors
        let blocks = matching_blocks(&chars("ab"), &chars("abab"));
        assert_eq!(blocks, vec![MatchingBlock { i: 0, j: 0, len: 2 }]);
    }

    #[test]
    fn test_insert_and_delete_mirror() {
        let a = chars("hello world");
        let b = chars("hello brave world");
        let forward = align(&a, &b);
        let backward = align(&b, &a);

        assert_covers(&forward, a.len(), b.len());
        assert_covers(&backward, b.len(), a.len());

        let inserted: Vec<String> = forward
            .iter()
            .filter(|o| o.tag == EditTag::Insert)
            .map(|o| b[o.b_range()].iter().collect())
            .collect();
        let deleted: Vec<String> = backward
            .iter()
            .filter(|o| o.tag == EditTag::Delete)
            .map(|o| b[o.a_range()].iter().collect())
            .collect();
        assert_eq!(inserted, deleted);
        assert_eq!(inserted, vec!["brave ".to_string()]);
    }

    #[test]
    fn test_coverage_on_assorted_inputs() {
        let cases = [
            ("", "x"),
            ("abc", "xyz"),
            ("abcabcabc", "cba"),
            ("private Thread currentThread;", "private volatile Thread currentThread;"),
            ("aaaa", "aa"),
            ("日本語テキスト", "日本のテキスト"),
        ];
        for (a, b) in cases {
            let (a, b) = (chars(a), chars(b));
            assert_covers(&align(&a, &b), a.len(), b.len());
            assert_covers(&align(&b, &a), b.len(), a.len());
        }
    }

    #[test]
    fn test_adjacent_blocks_are_merged() {
        let a = chars("abcd");
        let blocks = matching_blocks(&a, &a);
        assert_eq!(blocks, vec![MatchingBlock { i: 0, j: 0, len: 4 }]);
    }

    #[test]
    fn test_autojunk_popular_elements_do_not_anchor() {
        // 'x' fills b, so it is popular and cannot anchor a match on its own
        let a = chars("yx");
        let b: Vec<char> = std::iter::repeat_n('x', 250).collect();

        let with_junk = align_with(&a, &b, AlignOptions { autojunk: true });
        assert_eq!(with_junk, vec![op(EditTag::Replace, 0, 2, 0, 250)]);

        let without_junk = align_with(&a, &b, AlignOptions { autojunk: false });
        assert_eq!(
            without_junk,
            vec![
                op(EditTag::Delete, 0, 1, 0, 0),
                op(EditTag::Equal, 1, 2, 0, 1),
                op(EditTag::Insert, 2, 2, 1, 250),
            ]
        );
    }

    #[test]
    fn test_autojunk_extends_across_popular_neighbours() {
        // "ab" anchors, then the match grows across the popular 'x' run
        let mut a = chars("ab");
        a.extend(std::iter::repeat_n('x', 3));
        let mut b = a.clone();
        b.extend(std::iter::repeat_n('x', 250));

        let blocks = Matcher::new(&a, &b, AlignOptions::default()).matching_blocks();
        assert_eq!(blocks, vec![MatchingBlock { i: 0, j: 0, len: 5 }]);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity(&[]), 1.0);
        let ops = align(&chars("abcd"), &chars("bcde"));
        assert_eq!(similarity(&ops), 0.75);
        let ops = align(&chars("abc"), &chars("xyz"));
        assert_eq!(similarity(&ops), 0.0);
    }

    #[test]
    fn test_long_inputs_do_not_recurse() {
        // Every other element differs, giving one matching block per pair
        let a: Vec<u32> = (0..2_000).collect();
        let b: Vec<u32> = (0..2_000).map(|n| if n % 2 == 0 { n } else { n + 100_000 }).collect();
        let ops = align(&a, &b);
        assert_covers(&ops, a.len(), b.len());
        assert_eq!(ops.iter().filter(|o| o.tag == EditTag::Equal).count(), 1_000);
    }
}
