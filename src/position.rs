use serde::{Deserialize, Serialize};

/// Position in a multi-line document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Row number (1-indexed)
    pub row: usize,
    /// Column number (0-indexed, in characters)
    pub column: usize,
}

impl Coordinate {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.row, self.column)
    }
}

/// Immutable snapshot of a text split into lines of characters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Vec<char>>,
}

impl Document {
    /// Split text into lines
    ///
    /// Lines end at `\n` or `\r\n`. A trailing line terminator does not start
    /// another line, so `""` has no lines and `"a\n"` has one.
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(|line| line.chars().collect()).collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Characters of the line at a 0-based index
    pub fn line(&self, index: usize) -> Option<&[char]> {
        self.lines.get(index).map(Vec::as_slice)
    }

    pub fn lines(&self) -> impl Iterator<Item = &[char]> {
        self.lines.iter().map(Vec::as_slice)
    }

    /// Length in characters of a 1-indexed row, 0 if the row does not exist
    pub fn row_len(&self, row: usize) -> usize {
        row.checked_sub(1)
            .and_then(|index| self.line(index))
            .map_or(0, <[char]>::len)
    }

    /// Convert a 0-based line index and column offset to a coordinate
    ///
    /// The column is clamped to the length of the line.
    pub fn coordinate(&self, line_index: usize, column: usize) -> Coordinate {
        let row = line_index + 1;
        Coordinate {
            row,
            column: column.min(self.row_len(row)),
        }
    }

    /// Coordinate just past the last character of the last line
    ///
    /// An empty document ends at `0.0`.
    pub fn end(&self) -> Coordinate {
        Coordinate {
            row: self.line_count(),
            column: self.row_len(self.line_count()),
        }
    }

    /// Convert a flat character offset into the whole text to a coordinate
    ///
    /// Each line terminator counts as one character. Offsets past the end
    /// map to [`Document::end`].
    pub fn offset_to_coordinate(&self, offset: usize) -> Coordinate {
        let mut line_start = 0;

        for (index, line) in self.lines.iter().enumerate() {
            let line_chars = line.len() + 1; // +1 for newline

            if line_start + line_chars > offset {
                return Coordinate {
                    row: index + 1,
                    column: offset - line_start,
                };
            }

            line_start += line_chars;
        }

        self.end()
    }

    /// Convert a coordinate back to a flat character offset
    ///
    /// Rows past the end clamp to the end of the document, columns clamp to
    /// the length of their row.
    pub fn coordinate_to_offset(&self, coordinate: Coordinate) -> usize {
        if coordinate.row == 0 {
            return 0;
        }
        if coordinate.row > self.line_count() {
            let end = self.end();
            return self.coordinate_to_offset(end);
        }

        let preceding: usize = self.lines[..coordinate.row - 1]
            .iter()
            .map(|line| line.len() + 1)
            .sum();
        preceding + coordinate.column.min(self.row_len(coordinate.row))
    }

    /// Split `start..end` into `(row, start_column, end_column)` spans, one per row
    ///
    /// Intermediate rows span their whole line, columns are clamped to their
    /// row and rows missing from the document are skipped.
    pub fn row_segments(&self, start: Coordinate, end: Coordinate) -> Vec<(usize, usize, usize)> {
        let last_row = end.row.min(self.line_count());
        let mut segments = Vec::new();

        for row in start.row.max(1)..=last_row {
            let len = self.row_len(row);
            let from = if row == start.row { start.column.min(len) } else { 0 };
            let to = if row == end.row { end.column.min(len) } else { len };
            if from <= to {
                segments.push((row, from, to));
            }
        }

        segments
    }
}
