use owo_colors::{OwoColorize, Rgb};

use crate::config::Palette;
use crate::plan::{HighlightRange, HighlightTag};
use crate::position::{Coordinate, Document};

/// Something that can display highlighted spans of one document
///
/// Implementations must treat coordinates that no longer exist as a no-op
/// or clamp them; a stale highlight is never an error.
pub trait HighlightSink {
    /// Remove every previously applied highlight
    fn clear_highlights(&mut self);

    /// Highlight the characters from `start` up to (excluding) `end`
    fn apply_highlight(&mut self, tag: HighlightTag, start: Coordinate, end: Coordinate);
}

/// Replace the highlights of `sink` with `ranges`
///
/// Zero-width ranges are skipped.
pub fn refresh<S: HighlightSink + ?Sized>(sink: &mut S, ranges: &[HighlightRange]) {
    sink.clear_highlights();
    for range in ranges.iter().filter(|range| !range.is_empty()) {
        sink.apply_highlight(range.tag, range.start, range.end);
    }
}

/// A highlighted span within a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub tag: HighlightTag,
    pub row: usize,
    /// First highlighted column
    pub start: usize,
    /// Column after the last highlighted one
    pub end: usize,
}

/// In-memory document with applied highlights
#[derive(Debug, Clone, Default)]
pub struct StyledBuffer {
    document: Document,
    spans: Vec<Span>,
}

impl StyledBuffer {
    pub fn new(document: Document) -> Self {
        Self { document, spans: Vec::new() }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(Document::parse(text))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Applied spans, one per highlighted row segment
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Replace the text, dropping all highlights
    pub fn set_text(&mut self, text: &str) {
        self.document = Document::parse(text);
        self.spans.clear();
    }

    /// Highlight tag covering a character, latest applied wins
    pub fn tag_at(&self, row: usize, column: usize) -> Option<HighlightTag> {
        self.spans
            .iter()
            .rev()
            .find(|span| span.row == row && span.start <= column && column < span.end)
            .map(|span| span.tag)
    }

    /// Render the document, one line per row
    ///
    /// With `color` set, highlighted characters get the palette's background
    /// color. Without it the plain text is returned.
    pub fn render(&self, palette: &Palette, color: bool) -> String {
        let mut out = String::new();

        for (index, line) in self.document.lines().enumerate() {
            let row = index + 1;
            if !color {
                out.extend(line.iter());
                out.push('\n');
                continue;
            }

            // Group consecutive characters with the same tag into one styled run
            let mut column = 0;
            while column < line.len() {
                let tag = self.tag_at(row, column);
                let run_end = (column + 1..line.len())
                    .find(|&c| self.tag_at(row, c) != tag)
                    .unwrap_or(line.len());
                let text: String = line[column..run_end].iter().collect();

                match tag {
                    Some(tag) => {
                        let bg = palette.color(tag);
                        let styled = text.on_color(Rgb(bg.r, bg.g, bg.b)).color(Rgb(0, 0, 0)).to_string();
                        out.push_str(&styled);
                    }
                    None => out.push_str(&text),
                }
                column = run_end;
            }
            out.push('\n');
        }

        out
    }
}

impl HighlightSink for StyledBuffer {
    fn clear_highlights(&mut self) {
        self.spans.clear();
    }

    fn apply_highlight(&mut self, tag: HighlightTag, start: Coordinate, end: Coordinate) {
        if start.row > self.document.line_count() {
            log::debug!("highlight {}..{} starts past the end of the text, skipped", start, end);
            return;
        }

        // Round-trip through flat offsets so rows past the end clamp to the document end
        let start = self.document.offset_to_coordinate(self.document.coordinate_to_offset(start));
        let end = self.document.offset_to_coordinate(self.document.coordinate_to_offset(end));

        let segments = self.document.row_segments(start, end);
        let before = self.spans.len();

        self.spans.extend(
            segments
                .into_iter()
                .filter(|&(_, from, to)| from < to)
                .map(|(row, from, to)| Span { tag, row, start: from, end: to }),
        );

        if self.spans.len() == before {
            log::debug!("highlight {}..{} clamped to nothing, skipped", start, end);
        }
    }
}
