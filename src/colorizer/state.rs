//! Scan state carried from line to line
//!
//! A `LineScanState` is everything one line hands to the next: the
//! comment/string counters and the color indexes of brackets still open.
//! Each line works on its own deep copy, so finishing line N never
//! changes what line N-1 recorded.

use super::bracket::BracketPair;
use super::indexes::ColorIndexes;
use super::modifier::TokenModifier;
use super::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineScanState {
    block_comments: Vec<TokenModifier>,
    quotes: Vec<TokenModifier>,
    indexes: ColorIndexes,
    /// Last color handed to any bracket, open or close
    previous_color: Option<String>,
}

impl LineScanState {
    /// Fresh state for the first line of a document
    pub fn new(settings: &Settings) -> Self {
        Self {
            block_comments: settings.block_comments.clone(),
            quotes: settings.quotes.clone(),
            indexes: ColorIndexes::new(settings.color_mode, &settings.bracket_pairs),
            previous_color: None,
        }
    }

    /// Check if we are inside a block comment
    pub fn is_commented(&self) -> bool {
        self.block_comments.iter().any(TokenModifier::is_active)
    }

    /// Check if we are inside a quoted string
    pub fn is_quoted(&self) -> bool {
        self.quotes.iter().any(TokenModifier::is_active)
    }

    pub(crate) fn block_comments_mut(&mut self) -> &mut [TokenModifier] {
        &mut self.block_comments
    }

    pub(crate) fn quotes_mut(&mut self) -> &mut [TokenModifier] {
        &mut self.quotes
    }

    /// Color indexes of brackets still open
    pub fn indexes(&self) -> &ColorIndexes {
        &self.indexes
    }

    /// Pick the color for an opening bracket and remember it for its closer
    pub fn open_bracket_color(&mut self, pair: &BracketPair, settings: &Settings) -> String {
        let count = pair.colors.len();
        if count == 0 {
            return pair.orphan_color.clone();
        }

        let mut index = if settings.force_iteration_color_cycle {
            self.indexes.previous(pair).map_or(0, |prev| prev + 1) % count
        } else {
            self.indexes.depth(pair) % count
        };
        if settings.force_unique_opening_color
            && self.previous_color.as_deref() == Some(pair.colors[index].as_str())
        {
            index = (index + 1) % count;
        }

        let color = pair.colors[index].clone();
        self.indexes.push(pair, index);
        self.previous_color = Some(color.clone());
        color
    }

    /// Color of the innermost open bracket, or the orphan color
    pub fn close_bracket_color(&mut self, pair: &BracketPair) -> String {
        let color = self
            .indexes
            .pop(pair)
            .and_then(|index| pair.colors.get(index))
            .unwrap_or(&pair.orphan_color)
            .clone();
        self.previous_color = Some(color.clone());
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorizer::settings::test_settings;
    use crate::config::ColorMode;

    fn colors_for(input: &str, settings: &Settings) -> Vec<String> {
        let mut state = LineScanState::new(settings);
        input
            .chars()
            .filter_map(|ch| {
                let pair = settings.bracket_pairs.iter().find(|p| p.open == ch || p.close == ch)?;
                Some(if pair.open == ch {
                    state.open_bracket_color(pair, settings)
                } else {
                    state.close_bracket_color(pair)
                })
            })
            .collect()
    }

    fn abc(config: &mut crate::config::Config) {
        for pair in &mut config.bracket_pairs {
            pair.colors = vec!["A".into(), "B".into(), "C".into()];
            pair.orphan_color = "X".into();
        }
    }

    #[test]
    fn test_depth_colors() {
        let settings = test_settings("c", abc);
        assert_eq!(colors_for("(()())", &settings), ["A", "B", "B", "B", "B", "A"]);
    }

    #[test]
    fn test_depth_wraps_around() {
        let settings = test_settings("c", abc);
        assert_eq!(colors_for("(((())))", &settings), ["A", "B", "C", "A", "A", "C", "B", "A"]);
    }

    #[test]
    fn test_iteration_cycle() {
        let settings = test_settings("c", |config| {
            abc(config);
            config.force_iteration_color_cycle = true;
        });
        assert_eq!(colors_for("(()())", &settings), ["A", "B", "B", "C", "C", "A"]);
    }

    #[test]
    fn test_unique_opening_color() {
        let settings = test_settings("c", |config| {
            abc(config);
            config.force_unique_opening_color = true;
        });
        // The second sibling would repeat B right after the B closer
        assert_eq!(colors_for("(()())", &settings), ["A", "B", "B", "C", "C", "A"]);
    }

    #[test]
    fn test_orphan_closer() {
        let settings = test_settings("c", abc);
        assert_eq!(colors_for(")", &settings), ["X"]);
        assert_eq!(colors_for("())", &settings), ["A", "A", "X"]);
    }

    #[test]
    fn test_shared_mode_mixes_kinds() {
        let settings = test_settings("c", abc);
        assert_eq!(colors_for("([{}])", &settings), ["A", "B", "C", "C", "B", "A"]);
    }

    #[test]
    fn test_independent_mode_per_kind() {
        let settings = test_settings("c", |config| {
            abc(config);
            config.color_mode = ColorMode::Independent;
        });
        assert_eq!(colors_for("([{}])", &settings), ["A", "A", "A", "A", "A", "A"]);
        assert_eq!(colors_for("(])", &settings), ["A", "X", "A"]);
    }

    #[test]
    fn test_clone_does_not_alias() {
        let settings = test_settings("c", abc);
        let mut state = LineScanState::new(&settings);
        let pair = &settings.bracket_pairs[0];
        state.open_bracket_color(pair, &settings);
        state.quotes_mut()[0].open();

        let mut next = state.clone();
        next.close_bracket_color(pair);
        next.quotes_mut()[0].close();

        assert!(state.is_quoted());
        assert!(!next.is_quoted());
        assert_eq!(state.indexes().depth(pair), 1);
        assert_eq!(next.indexes().depth(pair), 0);
    }
}
