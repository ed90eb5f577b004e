//! Per-line bracket analysis
//!
//! A `LineRecord` receives the brackets found on its line in left-to-right
//! order. Before coloring each one it walks the text between the previous
//! bracket and this one, updating comment and string state, so brackets
//! inside comments and strings are dropped.

use std::collections::HashMap;

use crate::document::Range;

use super::modifier::TokenModifier;
use super::settings::{BracketSide, Settings};
use super::state::LineScanState;

/// Analysis result for one document line
#[derive(Debug, Clone)]
pub struct LineRecord {
    /// Line number in the document
    index: usize,
    /// Line text split into characters, indexed by column
    chars: Vec<char>,
    /// Colored bracket ranges on this line
    color_ranges: HashMap<String, Vec<Range>>,
    /// State inherited from the previous line, updated as we scan
    state: LineScanState,
    /// Set once a line comment starts; never carried to the next line
    line_commented: bool,
    /// Column up to which comment/string tokens have been checked
    checked: usize,
}

impl LineRecord {
    /// Start a line from the previous line's finalized state
    pub fn new(index: usize, text: &str, state: LineScanState) -> Self {
        Self {
            index,
            chars: text.chars().collect(),
            color_ranges: HashMap::new(),
            state,
            line_commented: false,
            checked: 0,
        }
    }

    /// Line number in the document
    pub fn index(&self) -> usize {
        self.index
    }

    /// Colored bracket ranges on this line
    pub fn color_ranges(&self) -> &HashMap<String, Vec<Range>> {
        &self.color_ranges
    }

    /// Check if the scan cursor is inside a comment or string
    pub fn is_suppressed(&self) -> bool {
        self.line_commented || self.state.is_commented() || self.state.is_quoted()
    }

    /// Color one bracket found at `range`
    ///
    /// Brackets must arrive in column order. Characters that are not part
    /// of any configured pair are ignored.
    pub fn add_bracket(&mut self, bracket: char, range: Range, settings: &Settings) {
        if settings.contextual_parsing {
            self.check_modifiers(range.start.character, range.end.character, settings);
            if self.is_suppressed() {
                tracing::trace!(line = self.index, column = range.start.character, %bracket, "bracket suppressed");
                return;
            }
        }

        let Some((pair, side)) = settings.pair_for(bracket) else {
            return;
        };
        let color = match side {
            BracketSide::Open => self.state.open_bracket_color(pair, settings),
            BracketSide::Close => self.state.close_bracket_color(pair),
        };
        self.color_ranges.entry(color).or_default().push(range);
    }

    /// Finish the line and hand a copy of its state to the next line
    ///
    /// Scans the rest of the line first so a comment or string left open
    /// at the end is carried forward. Calling this again is harmless.
    pub fn clone_state(&mut self, settings: &Settings) -> LineScanState {
        if settings.contextual_parsing {
            let end = self.chars.len();
            self.check_modifiers(end, end, settings);
        }
        self.state.clone()
    }

    /// Walk the unchecked text up to column `stop`, then move the cursor to
    /// `resume` (the end of the bracket being processed)
    fn check_modifiers(&mut self, stop: usize, resume: usize, settings: &Settings) {
        let mut col = self.checked;
        while col < stop {
            // A line comment swallows the rest of the line
            if self.line_commented {
                break;
            }

            let consumed = if self.state.is_commented() {
                close_active(&self.chars, col, self.state.block_comments_mut())
            } else if self.state.is_quoted() {
                close_active(&self.chars, col, self.state.quotes_mut())
            } else if let Some(len) = open_pair(&self.chars, col, self.state.quotes_mut()) {
                Some(len)
            } else if let Some(len) = open_pair(&self.chars, col, self.state.block_comments_mut()) {
                Some(len)
            } else if let Some(len) = line_comment_at(&self.chars, col, &settings.line_comments) {
                self.line_commented = true;
                Some(len)
            } else {
                None
            };
            col += consumed.unwrap_or(1);
        }
        self.checked = resume.max(col).max(self.checked);
    }
}

/// Length of `token` if it starts at `col` and is not escaped
fn token_at(chars: &[char], col: usize, token: &str) -> Option<usize> {
    let mut len = 0;
    for ch in token.chars() {
        if chars.get(col + len) != Some(&ch) {
            return None;
        }
        len += 1;
    }
    if len == 0 || (len == 1 && is_escaped(chars, col)) {
        return None;
    }
    Some(len)
}

/// An odd run of backslashes before `col` escapes it
fn is_escaped(chars: &[char], col: usize) -> bool {
    chars[..col].iter().rev().take_while(|&&ch| ch == '\\').count() % 2 == 1
}

fn open_pair(chars: &[char], col: usize, modifiers: &mut [TokenModifier]) -> Option<usize> {
    for modifier in modifiers.iter_mut() {
        if let Some(len) = token_at(chars, col, modifier.open_token()) {
            modifier.open();
            return Some(len);
        }
    }
    None
}

/// Only spans we are inside can be closed
fn close_active(chars: &[char], col: usize, modifiers: &mut [TokenModifier]) -> Option<usize> {
    for modifier in modifiers.iter_mut().filter(|m| m.is_active()) {
        if let Some(len) = token_at(chars, col, modifier.close_token()) {
            modifier.close();
            return Some(len);
        }
    }
    None
}

fn line_comment_at(chars: &[char], col: usize, tokens: &[String]) -> Option<usize> {
    tokens.iter().find_map(|token| token_at(chars, col, token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorizer::settings::test_settings;
    use crate::document::Position;

    /// Feed every bracket of `text` to a record, like a scan pass would
    fn analyze(text: &str, state: LineScanState, settings: &Settings) -> LineRecord {
        let mut record = LineRecord::new(0, text, state);
        for (col, ch) in text.chars().enumerate() {
            if settings.pair_for(ch).is_some() {
                let range = Range::new(Position::new(0, col), Position::new(0, col + 1));
                record.add_bracket(ch, range, settings);
            }
        }
        record
    }

    /// (color, column) for every colored bracket, sorted by column
    fn colored(record: &LineRecord) -> Vec<(String, usize)> {
        let mut out: Vec<(String, usize)> = record
            .color_ranges()
            .iter()
            .flat_map(|(color, ranges)| ranges.iter().map(move |r| (color.clone(), r.start.character)))
            .collect();
        out.sort_by_key(|(_, col)| *col);
        out
    }

    fn fresh(text: &str, language: &str) -> LineRecord {
        let settings = test_settings(language, |_| {});
        analyze(text, LineScanState::new(&settings), &settings)
    }

    #[test]
    fn test_plain_brackets() {
        let record = fresh("f(a[0])", "c");
        assert_eq!(
            colored(&record),
            [
                ("Gold".to_string(), 1),
                ("Orchid".to_string(), 3),
                ("Orchid".to_string(), 5),
                ("Gold".to_string(), 6),
            ]
        );
    }

    #[test]
    fn test_bracket_in_string_is_skipped() {
        let record = fresh(r#""(" )"#, "c");
        // The quoted opener does not pair with the closer outside
        assert_eq!(colored(&record), [("Red".to_string(), 4)]);
    }

    #[test]
    fn test_escaped_quote_does_not_open_string() {
        let record = fresh(r#"\"("#, "c");
        assert_eq!(colored(&record), [("Gold".to_string(), 2)]);
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let record = fresh(r#""a\"(" ()"#, "c");
        assert_eq!(colored(&record), [("Gold".to_string(), 7), ("Gold".to_string(), 8)]);
    }

    #[test]
    fn test_double_backslash_is_not_escape() {
        let record = fresh(r#""\\" ()"#, "c");
        assert_eq!(colored(&record).len(), 2);
    }

    #[test]
    fn test_line_comment() {
        let record = fresh("() // ()", "c");
        assert_eq!(colored(&record).len(), 2);

        let record = fresh("() # (", "python");
        assert_eq!(colored(&record).len(), 2);
    }

    #[test]
    fn test_block_comment_on_one_line() {
        let record = fresh("/* ( */ ()", "c");
        assert_eq!(colored(&record), [("Gold".to_string(), 8), ("Gold".to_string(), 9)]);
    }

    #[test]
    fn test_other_quote_kind_inside_string() {
        // A double quote inside a single-quoted string neither closes nor opens
        let record = fresh(r#"'"' ()"#, "c");
        assert_eq!(colored(&record).len(), 2);
        assert!(!record.is_suppressed());
    }

    #[test]
    fn test_comment_token_inside_string() {
        let record = fresh(r#""//" ()"#, "c");
        assert_eq!(colored(&record).len(), 2);
    }

    #[test]
    fn test_unsupported_language_colors_everything() {
        let record = fresh(r#""(" )"#, "plaintext");
        assert_eq!(colored(&record), [("Gold".to_string(), 1), ("Gold".to_string(), 4)]);
    }

    #[test]
    fn test_clone_state_carries_open_string() {
        let settings = test_settings("c", |_| {});
        let mut first = analyze("x = \"abc", LineScanState::new(&settings), &settings);
        let state = first.clone_state(&settings);
        assert!(state.is_quoted());

        let second = analyze("def\" ()", state, &settings);
        assert_eq!(colored(&second).len(), 2);
    }

    #[test]
    fn test_clone_state_drops_line_comment() {
        let settings = test_settings("c", |_| {});
        let mut first = analyze("( // open", LineScanState::new(&settings), &settings);
        let state = first.clone_state(&settings);
        assert!(!state.is_commented());

        let second = analyze(")", state, &settings);
        assert_eq!(colored(&second), [("Gold".to_string(), 0)]);
    }

    #[test]
    fn test_clone_state_is_idempotent() {
        let settings = test_settings("c", |_| {});
        let mut record = analyze("( /* x", LineScanState::new(&settings), &settings);
        let once = record.clone_state(&settings);
        let twice = record.clone_state(&settings);
        assert_eq!(once, twice);
        assert!(once.is_commented());
    }

    #[test]
    fn test_multi_char_block_tokens() {
        let settings = test_settings("ruby", |_| {});
        let mut first = analyze("=begin (", LineScanState::new(&settings), &settings);
        assert!(colored(&first).is_empty());
        let state = first.clone_state(&settings);

        let second = analyze("=end ()", state, &settings);
        assert_eq!(colored(&second).len(), 2);
    }
}
