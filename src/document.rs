//! Text documents and positions
//!
//! Positions are (line, character) pairs where `character` counts Unicode
//! scalar values from the start of the line. Linear offsets are UTF-8 byte
//! offsets into the full text.

use std::path::Path;

/// A (line, character) position in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }

    /// Shift this position along its line
    pub fn translate(self, characters: usize) -> Self {
        Self::new(self.line, self.character + characters)
    }
}

/// A half-open range [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Check if this range contains a position
    pub fn contains(&self, pos: Position) -> bool {
        pos >= self.start && pos < self.end
    }
}

/// A single edit reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChange {
    /// Range that was replaced, in pre-edit coordinates
    pub range: Range,
    /// Replacement text
    pub text: String,
}

/// Read access to a document's text
pub trait TextSource {
    /// Full document text
    fn text(&self) -> &str;

    /// Number of lines (at least one, even for empty text)
    fn line_count(&self) -> usize;

    /// Text of a line without its line ending; empty past the last line
    fn line_text(&self, line: usize) -> &str;

    /// Byte offset of a position, clamped to the document
    fn offset_at(&self, pos: Position) -> usize;

    /// Position of a byte offset, clamped to the document
    fn position_at(&self, offset: usize) -> Position;
}

/// An in-memory document with a line index
#[derive(Debug, Clone)]
pub struct TextDocument {
    /// Full text content
    text: String,
    /// Byte offset where each line starts
    line_starts: Vec<usize>,
    /// Language identifier (e.g. "rust", "python")
    language_id: String,
}

impl TextDocument {
    /// Create a document from text
    pub fn new(text: impl Into<String>, language_id: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = index_lines(&text);
        Self {
            text,
            line_starts,
            language_id: language_id.into(),
        }
    }

    /// Create a document from file contents
    pub fn from_file(path: &Path, language_id: impl Into<String>) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(content, language_id))
    }

    /// Get the language identifier
    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    /// Replace a range with new text, returning the change record
    pub fn replace(&mut self, range: Range, new_text: &str) -> ContentChange {
        let start = self.offset_at(range.start);
        let end = self.offset_at(range.end).max(start);
        self.text.replace_range(start..end, new_text);
        self.line_starts = index_lines(&self.text);
        ContentChange {
            range,
            text: new_text.to_string(),
        }
    }

    /// Insert text at a position
    pub fn insert(&mut self, pos: Position, new_text: &str) -> ContentChange {
        self.replace(Range::new(pos, pos), new_text)
    }

    /// Replace the whole text, reporting a change from the first differing line
    pub fn set_text(&mut self, new_text: impl Into<String>) -> Option<ContentChange> {
        let new_text = new_text.into();
        let first_diff = self
            .text
            .lines()
            .zip(new_text.lines())
            .position(|(old, new)| old != new)
            .unwrap_or_else(|| self.text.lines().count().min(new_text.lines().count()));
        if self.text == new_text {
            return None;
        }
        let end = self.position_at(self.text.len());
        self.text = new_text;
        self.line_starts = index_lines(&self.text);
        Some(ContentChange {
            range: Range::new(Position::new(first_diff, 0), end),
            text: self.text.clone(),
        })
    }

    /// Byte range of a line, excluding its line ending
    fn line_bounds(&self, line: usize) -> Option<(usize, usize)> {
        let start = *self.line_starts.get(line)?;
        let mut end = self
            .line_starts
            .get(line + 1)
            .map_or(self.text.len(), |next| next - 1);
        if end > start && self.text.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        Some((start, end))
    }
}

impl TextSource for TextDocument {
    fn text(&self) -> &str {
        &self.text
    }

    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_text(&self, line: usize) -> &str {
        match self.line_bounds(line) {
            Some((start, end)) => &self.text[start..end],
            None => "",
        }
    }

    fn offset_at(&self, pos: Position) -> usize {
        let Some((start, end)) = self.line_bounds(pos.line) else {
            return self.text.len();
        };
        self.text[start..end]
            .char_indices()
            .nth(pos.character)
            .map_or(end, |(idx, _)| start + idx)
    }

    fn position_at(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let character = self.text[self.line_starts[line]..offset].chars().count();
        Position::new(line, character)
    }
}

fn index_lines(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index() {
        let doc = TextDocument::new("one\ntwo\r\nthree", "plaintext");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_text(0), "one");
        assert_eq!(doc.line_text(1), "two");
        assert_eq!(doc.line_text(2), "three");
        assert_eq!(doc.line_text(3), "");
    }

    #[test]
    fn test_empty_document() {
        let doc = TextDocument::new("", "plaintext");
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line_text(0), "");
        assert_eq!(doc.position_at(0), Position::new(0, 0));
    }

    #[test]
    fn test_trailing_newline() {
        let doc = TextDocument::new("a\n", "plaintext");
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line_text(1), "");
        assert_eq!(doc.position_at(2), Position::new(1, 0));
    }

    #[test]
    fn test_offset_position_conversion() {
        let doc = TextDocument::new("ab\ncafé (x)", "plaintext");
        assert_eq!(doc.offset_at(Position::new(1, 0)), 3);
        // 'é' is two bytes
        assert_eq!(doc.offset_at(Position::new(1, 5)), 9);
        assert_eq!(doc.position_at(9), Position::new(1, 5));
        assert_eq!(doc.position_at(3), Position::new(1, 0));
        // Past the end of a line clamps to the line end
        assert_eq!(doc.offset_at(Position::new(0, 10)), 2);
        // Past the last line clamps to the document end
        assert_eq!(doc.offset_at(Position::new(9, 0)), doc.text().len());
    }

    #[test]
    fn test_replace() {
        let mut doc = TextDocument::new("fn main() {\n}\n", "rust");
        let change = doc.replace(
            Range::new(Position::new(0, 3), Position::new(0, 7)),
            "run",
        );
        assert_eq!(doc.line_text(0), "fn run() {");
        assert_eq!(change.range.start, Position::new(0, 3));

        doc.insert(Position::new(1, 0), "    x();\n");
        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.line_text(1), "    x();");
        assert_eq!(doc.line_text(2), "}");
    }

    #[test]
    fn test_set_text_reports_first_changed_line() {
        let mut doc = TextDocument::new("a\nb\nc", "plaintext");
        let change = doc.set_text("a\nB\nc").unwrap();
        assert_eq!(change.range.start.line, 1);
        assert!(doc.set_text("a\nB\nc").is_none());

        let change = doc.set_text("a\nB\nc\nd").unwrap();
        assert_eq!(change.range.start.line, 3);
    }

    #[test]
    fn test_range_contains() {
        let range = Range::new(Position::new(0, 2), Position::new(0, 3));
        assert!(range.contains(Position::new(0, 2)));
        assert!(!range.contains(Position::new(0, 3)));
    }
}
