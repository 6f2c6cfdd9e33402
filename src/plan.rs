use serde::{Deserialize, Serialize};

use crate::align::{AlignOptions, EditTag, align_with};
use crate::position::{Coordinate, Document};

/// Which document of the comparison a range belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Styling class of a highlighted span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightTag {
    /// Present only in the right document
    Addition,
    /// Present only in the left document
    Deletion,
    /// Present on both sides with different content
    Modified,
}

/// A styled span between two coordinates of one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighlightRange {
    pub side: Side,
    pub tag: HighlightTag,
    pub start: Coordinate,
    /// Exclusive end
    pub end: Coordinate,
}

impl HighlightRange {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Highlight ranges for both sides of one comparison pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlights {
    pub left: Vec<HighlightRange>,
    pub right: Vec<HighlightRange>,
}

impl Highlights {
    pub fn for_side(&self, side: Side) -> &[HighlightRange] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    fn push(&mut self, side: Side, tag: HighlightTag, start: Coordinate, end: Coordinate) {
        let range = HighlightRange { side, tag, start, end };
        match side {
            Side::Left => self.left.push(range),
            Side::Right => self.right.push(range),
        }
    }
}

/// Compare two texts and return the highlight ranges for each side
///
/// # Example
/// ```
/// use diff_highlight::{compare, Coordinate, HighlightTag};
/// let highlights = compare("cat", "car");
/// assert_eq!(highlights.left[0].tag, HighlightTag::Modified);
/// assert_eq!(highlights.left[0].start, Coordinate::new(1, 2));
/// assert_eq!(highlights.right[0].end, Coordinate::new(1, 3));
/// ```
pub fn compare(left: &str, right: &str) -> Highlights {
    plan(&Document::parse(left), &Document::parse(right))
}

/// Plan highlights for two documents with the default alignment options
pub fn plan(left: &Document, right: &Document) -> Highlights {
    plan_with(left, right, AlignOptions::default())
}

/// Plan highlights for two documents
///
/// Rows present in both documents are aligned character by character and
/// produce single-row ranges. Extra rows of the longer document are covered
/// by one range running to the end of that document.
pub fn plan_with(left: &Document, right: &Document, options: AlignOptions) -> Highlights {
    let mut highlights = Highlights::default();

    for (index, (left_line, right_line)) in left.lines().zip(right.lines()).enumerate() {
        let ops = align_with(left_line, right_line, options);
        log::trace!("row {}: {} edit op(s)", index + 1, ops.len());

        for op in ops {
            let left_start = left.coordinate(index, op.i1);
            let left_end = left.coordinate(index, op.i2);
            let right_start = right.coordinate(index, op.j1);
            let right_end = right.coordinate(index, op.j2);

            match op.tag {
                EditTag::Equal => {}
                EditTag::Insert => {
                    highlights.push(Side::Right, HighlightTag::Addition, right_start, right_end);
                }
                EditTag::Delete => {
                    highlights.push(Side::Left, HighlightTag::Deletion, left_start, left_end);
                }
                EditTag::Replace => {
                    highlights.push(Side::Left, HighlightTag::Modified, left_start, left_end);
                    highlights.push(Side::Right, HighlightTag::Modified, right_start, right_end);
                }
            }
        }
    }

    let (n1, n2) = (left.line_count(), right.line_count());
    if n1 < n2 {
        highlights.push(Side::Right, HighlightTag::Addition, right.coordinate(n1, 0), right.end());
    } else if n1 > n2 {
        highlights.push(Side::Left, HighlightTag::Deletion, left.coordinate(n2, 0), left.end());
    }

    log::debug!(
        "planned {} left and {} right highlight(s) for {}x{} lines",
        highlights.left.len(),
        highlights.right.len(),
        n1,
        n2
    );

    highlights
}
