//! Decoration dispatch
//!
//! Flattens every cached line's color ranges into one bucket per color
//! and hands each configured color to the render target exactly once.
//! Colors with nothing to show get an empty list so highlights from the
//! previous pass are cleared.

use std::collections::HashMap;

use crate::document::Range;

use super::cache::DocumentCache;
use super::settings::Settings;

/// Something that can style ranges of a document
pub trait RenderTarget {
    /// Replace every range currently styled with `color`
    fn set_ranges(&mut self, color: &str, ranges: Vec<Range>);
}

/// Merge all cached lines into color buckets, in document order
pub fn collect_color_ranges(cache: &DocumentCache) -> HashMap<String, Vec<Range>> {
    let mut color_map: HashMap<String, Vec<Range>> = HashMap::new();
    for line in cache.lines() {
        for (color, ranges) in line.color_ranges() {
            color_map
                .entry(color.clone())
                .or_default()
                .extend_from_slice(ranges);
        }
    }
    color_map
}

/// Send one `set_ranges` call per configured color
pub fn dispatch(cache: &DocumentCache, settings: &Settings, target: &mut dyn RenderTarget) {
    let mut color_map = collect_color_ranges(cache);
    for color in settings.colors() {
        let ranges = color_map.remove(color).unwrap_or_default();
        target.set_ranges(color, ranges);
    }
    if !color_map.is_empty() {
        tracing::warn!(colors = ?color_map.keys().collect::<Vec<_>>(), "dropping ranges for unconfigured colors");
    }
}
