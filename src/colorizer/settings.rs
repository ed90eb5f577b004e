//! Per-document colorizer settings
//!
//! Combines the user configuration with the token table of the
//! document's language. Built once when a document is opened and never
//! changed during a scan.

use std::time::Duration;

use regex::Regex;

use crate::config::{ColorMode, Config};
use crate::error::ConfigError;

use super::bracket::BracketPair;
use super::language::LanguageDefinition;
use super::modifier::TokenModifier;

/// Which side of a pair a bracket character is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketSide {
    Open,
    Close,
}

/// Resolved settings for one document
#[derive(Debug, Clone)]
pub struct Settings {
    /// Configured bracket pairs, in priority order
    pub bracket_pairs: Vec<BracketPair>,
    /// Color sharing mode
    pub color_mode: ColorMode,
    pub force_unique_opening_color: bool,
    pub force_iteration_color_cycle: bool,
    /// False when the user turned it off or the language is unknown
    pub contextual_parsing: bool,
    /// Debounce delay (zero = synchronous)
    pub timeout: Duration,
    /// Line comment tokens
    pub line_comments: Vec<String>,
    /// Block comment modifiers in their initial (closed) state
    pub block_comments: Vec<TokenModifier>,
    /// Quote modifiers in their initial (closed) state
    pub quotes: Vec<TokenModifier>,
    /// Matches any configured bracket character
    pattern: Regex,
    /// Distinct colors in first-seen order, orphan colors included
    colors: Vec<String>,
}

impl Settings {
    /// Build settings from a configuration and an optional language table
    ///
    /// Without a language table brackets are still colored, but comments
    /// and strings are not recognized.
    pub fn new(config: &Config, language: Option<&LanguageDefinition>) -> Result<Self, ConfigError> {
        if config.bracket_pairs.is_empty() {
            return Err(ConfigError::NoBracketPairs);
        }
        for pair in &config.bracket_pairs {
            if pair.colors.is_empty() {
                return Err(ConfigError::NoColors(format!(
                    "bracket pair {}{}",
                    pair.open, pair.close
                )));
            }
        }

        let pattern = Regex::new(&bracket_pattern(&config.bracket_pairs))?;

        let mut colors: Vec<String> = Vec::new();
        for pair in &config.bracket_pairs {
            for color in pair.colors.iter().chain(std::iter::once(&pair.orphan_color)) {
                if !colors.contains(color) {
                    colors.push(color.clone());
                }
            }
        }

        let (line_comments, block_comments, quotes) = match language {
            Some(lang) => (
                lang.line_comments.clone(),
                modifiers(&lang.block_comments),
                modifiers(&lang.quotes),
            ),
            None => (Vec::new(), Vec::new(), Vec::new()),
        };

        Ok(Self {
            bracket_pairs: config.bracket_pairs.clone(),
            color_mode: config.color_mode,
            force_unique_opening_color: config.force_unique_opening_color,
            force_iteration_color_cycle: config.force_iteration_color_cycle,
            contextual_parsing: config.contextual_parsing && language.is_some(),
            timeout: config.timeout,
            line_comments,
            block_comments,
            quotes,
            pattern,
            colors,
        })
    }

    /// Regex matching every configured bracket character
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Every color that can appear in a dispatch
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Find the pair a bracket character belongs to
    ///
    /// The first configured pair wins if a character is listed twice.
    pub fn pair_for(&self, bracket: char) -> Option<(&BracketPair, BracketSide)> {
        self.bracket_pairs.iter().find_map(|pair| {
            if pair.open == bracket {
                Some((pair, BracketSide::Open))
            } else if pair.close == bracket {
                Some((pair, BracketSide::Close))
            } else {
                None
            }
        })
    }
}

/// `[\(\)\[\]]` style character class over every bracket
fn bracket_pattern(pairs: &[BracketPair]) -> String {
    let mut pattern = String::from("[");
    for pair in pairs {
        pattern.push_str(&regex::escape(&pair.open.to_string()));
        pattern.push_str(&regex::escape(&pair.close.to_string()));
    }
    pattern.push(']');
    pattern
}

fn modifiers(pairs: &[(String, String)]) -> Vec<TokenModifier> {
    pairs
        .iter()
        .map(|(open, close)| TokenModifier::new(open, close))
        .collect()
}

/// Settings for a built-in language with config tweaks applied
#[cfg(test)]
pub(crate) fn test_settings(language_id: &str, tweak: impl FnOnce(&mut Config)) -> Settings {
    let mut config = Config::default();
    config.timeout = Duration::ZERO;
    tweak(&mut config);
    let language = super::builtin::find(language_id);
    Settings::new(&config, language.as_ref()).unwrap()
}
