// Sequence alignment module
pub mod align;

// Line/column mapping module
pub mod position;

// Highlight planning module
pub mod plan;

// Highlight application module
pub mod apply;

// Live comparison module
pub mod session;

// Configuration module
pub mod config;

// File operations module
pub mod file;

// JSON output module
pub mod json;

// Re-exports
pub use align::{AlignOptions, EditOp, EditTag, MatchingBlock, align, align_with, matching_blocks, similarity};
pub use position::{Coordinate, Document};
pub use plan::{HighlightRange, HighlightTag, Highlights, Side, compare, plan, plan_with};
pub use apply::{HighlightSink, Span, StyledBuffer, refresh};
pub use session::CompareSession;
pub use config::{Color, Config, ConfigError, Palette};
pub use file::{FileContent, FileError, checksum, read_file};
pub use json::{CompareResponse, FileReportJson, RangeJson, generate_execution_id};
