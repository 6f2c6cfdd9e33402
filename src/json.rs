use serde::{Deserialize, Serialize};

use crate::file::FileContent;
use crate::plan::{HighlightRange, HighlightTag, Highlights};
use crate::position::Coordinate;

/// Highlight range as written in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeJson {
    pub tag: HighlightTag,
    pub start: Coordinate,
    pub end: Coordinate,
}

impl From<&HighlightRange> for RangeJson {
    fn from(range: &HighlightRange) -> Self {
        Self {
            tag: range.tag,
            start: range.start,
            end: range.end,
        }
    }
}

/// One side of the comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReportJson {
    pub path: String,
    pub checksum: String,
    pub line_count: usize,
    pub ranges: Vec<RangeJson>,
}

impl FileReportJson {
    pub fn new(file: &FileContent, ranges: &[HighlightRange]) -> Self {
        Self {
            path: file.path.clone(),
            checksum: file.checksum.clone(),
            line_count: file.document().line_count(),
            ranges: ranges.iter().map(RangeJson::from).collect(),
        }
    }
}

/// Result of comparing two files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResponse {
    pub execution_id: String,
    pub left: FileReportJson,
    pub right: FileReportJson,
    /// Character similarity of the two texts in `[0.0, 1.0]`
    pub similarity: f64,
    /// True when no range was produced on either side
    pub identical: bool,
}

impl CompareResponse {
    pub fn new(
        execution_id: String,
        left: &FileContent,
        right: &FileContent,
        highlights: &Highlights,
        similarity: f64,
    ) -> Self {
        Self {
            execution_id,
            left: FileReportJson::new(left, &highlights.left),
            right: FileReportJson::new(right, &highlights.right),
            similarity,
            identical: highlights.is_empty(),
        }
    }
}

/// Generate a fresh execution id
pub fn generate_execution_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
