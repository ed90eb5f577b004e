//! Per-document colorizer session
//!
//! Owns the line cache for one open document and drives the
//! Idle -> PendingRescan -> Scanning -> Idle cycle. Edits only record the
//! lowest changed line; the rescan itself happens when the debounce timer
//! fires (or immediately when the timeout is zero) and covers that line
//! to the end of the document.

use crate::document::{ContentChange, Position, Range, TextSource};
use crate::scheduler::{Scheduler, TaskHandle};

use super::cache::DocumentCache;
use super::dispatch::{self, RenderTarget};
use super::settings::Settings;

/// Where a session is in its scan cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// Nothing pending
    Idle,
    /// An edit arrived and the debounce timer is running
    PendingRescan,
    /// A scan pass is in progress
    Scanning,
}

#[derive(Debug)]
pub struct DocumentSession {
    settings: Settings,
    cache: DocumentCache,
    /// Lowest line needing a rescan; `None` when nothing is pending
    dirty_line: Option<usize>,
    phase: ScanPhase,
    /// The one outstanding debounce timer
    pending: Option<TaskHandle>,
}

impl DocumentSession {
    /// Start a session; the first pass scans the whole document
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            cache: DocumentCache::new(),
            dirty_line: Some(0),
            phase: ScanPhase::Idle,
            pending: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Lowest line waiting to be rescanned
    pub fn dirty_line(&self) -> Option<usize> {
        self.dirty_line
    }

    /// Record that `line` and everything after it must be rescanned
    pub fn mark_dirty(&mut self, line: usize) {
        self.dirty_line = Some(self.dirty_line.map_or(line, |dirty| dirty.min(line)));
    }

    /// Handle an edit notification from the host
    pub fn on_did_change(
        &mut self,
        changes: &[ContentChange],
        scheduler: &mut dyn Scheduler,
        source: &dyn TextSource,
        target: &mut dyn RenderTarget,
    ) {
        for change in changes {
            self.mark_dirty(change.range.start.line);
        }
        self.trigger_update(scheduler, source, target);
    }

    /// Rescan now if there is no debounce delay, otherwise (re)start the timer
    pub fn trigger_update(
        &mut self,
        scheduler: &mut dyn Scheduler,
        source: &dyn TextSource,
        target: &mut dyn RenderTarget,
    ) {
        if let Some(handle) = self.pending.take() {
            tracing::trace!(?handle, "restarting debounce timer");
            scheduler.cancel(handle);
        }

        if self.settings.timeout.is_zero() {
            self.update_decorations(source, target);
            return;
        }

        self.pending = Some(scheduler.schedule(self.settings.timeout));
        self.phase = ScanPhase::PendingRescan;
    }

    /// Run the pending rescan if `handle` is the current timer
    ///
    /// Returns false for stale or foreign handles.
    pub fn on_timer(
        &mut self,
        handle: TaskHandle,
        source: &dyn TextSource,
        target: &mut dyn RenderTarget,
    ) -> bool {
        if self.pending != Some(handle) {
            return false;
        }
        self.pending = None;
        self.update_decorations(source, target);
        true
    }

    /// Cancel any pending rescan, e.g. when the document closes
    pub fn cancel(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }
        self.phase = ScanPhase::Idle;
    }

    /// Rescan from the dirty line and dispatch every color
    pub fn update_decorations(&mut self, source: &dyn TextSource, target: &mut dyn RenderTarget) {
        self.phase = ScanPhase::Scanning;
        if let Some(line) = self.dirty_line.take() {
            self.rescan_from(line, source);
        }
        dispatch::dispatch(&self.cache, &self.settings, target);
        self.phase = ScanPhase::Idle;
    }

    fn rescan_from(&mut self, line: usize, source: &dyn TextSource) {
        self.cache.truncate_from(line);

        let text = source.text();
        let start = source.offset_at(Position::new(line, 0));
        let mut cursor = MatchCursor::default();
        let mut matches = 0usize;
        for found in self.settings.pattern().find_iter(&text[start..]) {
            let Some(bracket) = found.as_str().chars().next() else {
                continue;
            };
            let begin = cursor.position(source, start + found.start());
            let end = begin.translate(found.as_str().chars().count());
            cursor.moved_to(start + found.end(), end);
            self.cache
                .get_or_extend(begin.line, source, &self.settings)
                .add_bracket(bracket, Range::new(begin, end), &self.settings);
            matches += 1;
        }

        tracing::debug!(from_line = line, matches, cached_lines = self.cache.len(), "scan pass complete");
    }
}

/// Converts increasing byte offsets to positions without recounting a
/// line from its start for every match
#[derive(Debug, Default)]
struct MatchCursor {
    /// Byte offset and position of the end of the previous match
    last: Option<(usize, Position)>,
}

impl MatchCursor {
    fn position(&self, source: &dyn TextSource, offset: usize) -> Position {
        if let Some((last_offset, last_pos)) = self.last {
            if let Some(gap) = source.text().get(last_offset..offset) {
                if !gap.contains('\n') {
                    return last_pos.translate(gap.chars().count());
                }
            }
        }
        source.position_at(offset)
    }

    fn moved_to(&mut self, offset: usize, pos: Position) {
        self.last = Some((offset, pos));
    }
}
