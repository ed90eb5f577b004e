//! Per-document line cache
//!
//! Lines are analyzed strictly in order: line K starts from line K-1's
//! finalized state. The cache only grows as far as the last line a scan
//! needed; an edit truncates it from the first changed line.

use crate::document::TextSource;

use super::line::LineRecord;
use super::settings::Settings;
use super::state::LineScanState;

#[derive(Debug, Clone, Default)]
pub struct DocumentCache {
    lines: Vec<LineRecord>,
}

impl DocumentCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cached lines in document order
    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }

    /// Get a cached line, analyzing any missing lines before it first
    pub fn get_or_extend(
        &mut self,
        index: usize,
        source: &dyn TextSource,
        settings: &Settings,
    ) -> &mut LineRecord {
        if index < self.lines.len() {
            return &mut self.lines[index];
        }

        if self.lines.is_empty() {
            self.lines
                .push(LineRecord::new(0, source.line_text(0), LineScanState::new(settings)));
        }
        while self.lines.len() <= index {
            let next = self.lines.len();
            let state = self.lines[next - 1].clone_state(settings);
            self.lines
                .push(LineRecord::new(next, source.line_text(next), state));
        }
        &mut self.lines[index]
    }

    /// Drop every cached line at or after `index`
    pub fn truncate_from(&mut self, index: usize) {
        if index < self.lines.len() {
            tracing::trace!(from = index, dropped = self.lines.len() - index, "truncating line cache");
            self.lines.truncate(index);
        }
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
