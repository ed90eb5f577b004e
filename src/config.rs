//! Configuration file support
//!
//! Loads colorizer settings from ~/.bracket-colorizer.toml (or
//! %USERPROFILE%\.bracket-colorizer.toml on Windows), or from a path given
//! on the command line.
//!
//! Example:
//! ```toml
//! timeout = 200
//! force-unique-opening-color = false
//! force-iteration-color-cycle = false
//! contextual-parsing = true
//! color-mode = "consecutive"
//! consecutive-pair-colors = ["()", "[]", "{}", ["Gold", "Orchid", "LightSkyBlue"], "Red"]
//! independent-pair-colors = [
//!     ["()", ["Gold", "Orchid", "LightSkyBlue"], "Red"],
//!     ["[]", ["Gold", "Orchid", "LightSkyBlue"], "Red"],
//!     ["{}", ["Gold", "Orchid", "LightSkyBlue"], "Red"],
//! ]
//! ```
//!
//! Only the pair list matching `color-mode` is read.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use toml::Value;

use crate::colorizer::BracketPair;
use crate::error::{ConfigError, Result};

const CONSECUTIVE_FIELD: &str = "consecutive-pair-colors";
const INDEPENDENT_FIELD: &str = "independent-pair-colors";

const DEFAULT_TIMEOUT_MS: u64 = 200;
const DEFAULT_BRACKETS: [&str; 3] = ["()", "[]", "{}"];
const DEFAULT_COLORS: [&str; 3] = ["Gold", "Orchid", "LightSkyBlue"];
const DEFAULT_ORPHAN_COLOR: &str = "Red";

/// How color slots are shared between bracket kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// One color sequence shared by every bracket kind
    #[default]
    #[serde(alias = "shared")]
    Consecutive,
    /// Each bracket kind cycles through its own colors
    Independent,
}

/// Validated configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Debounce delay before a rescan (zero = rescan synchronously)
    pub timeout: Duration,
    /// Never give two consecutive opening brackets the same color
    pub force_unique_opening_color: bool,
    /// Advance through the colors on every opening bracket instead of by depth
    pub force_iteration_color_cycle: bool,
    /// Ignore brackets inside comments and strings
    pub contextual_parsing: bool,
    /// Color sharing mode
    pub color_mode: ColorMode,
    /// Configured bracket pairs, in priority order
    pub bracket_pairs: Vec<BracketPair>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            force_unique_opening_color: false,
            force_iteration_color_cycle: false,
            contextual_parsing: true,
            color_mode: ColorMode::default(),
            bracket_pairs: default_bracket_pairs(),
        }
    }
}

/// Settings exactly as written in the file, before validation
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    timeout: Option<u64>,
    force_unique_opening_color: Option<bool>,
    force_iteration_color_cycle: Option<bool>,
    contextual_parsing: Option<bool>,
    color_mode: Option<ColorMode>,
    consecutive_pair_colors: Option<Value>,
    independent_pair_colors: Option<Value>,
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".bracket-colorizer.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".bracket-colorizer.toml"))
        }
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!(?path, mode = ?config.color_mode, pairs = config.bracket_pairs.len(), "loaded config");
        Ok(config)
    }

    /// Load from the default location, falling back to defaults if absent
    pub fn load_or_default() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse and validate TOML contents
    pub fn from_toml(contents: &str) -> std::result::Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(contents)?;
        raw.validate()
    }
}

impl RawConfig {
    fn validate(self) -> std::result::Result<Config, ConfigError> {
        let defaults = Config::default();
        let color_mode = self.color_mode.unwrap_or(defaults.color_mode);

        let bracket_pairs = match color_mode {
            ColorMode::Consecutive => match &self.consecutive_pair_colors {
                Some(value) => parse_consecutive(value)?,
                None => defaults.bracket_pairs,
            },
            ColorMode::Independent => match &self.independent_pair_colors {
                Some(value) => parse_independent(value)?,
                None => defaults.bracket_pairs,
            },
        };
        if bracket_pairs.is_empty() {
            return Err(ConfigError::NoBracketPairs);
        }

        Ok(Config {
            timeout: self.timeout.map_or(defaults.timeout, Duration::from_millis),
            force_unique_opening_color: self
                .force_unique_opening_color
                .unwrap_or(defaults.force_unique_opening_color),
            force_iteration_color_cycle: self
                .force_iteration_color_cycle
                .unwrap_or(defaults.force_iteration_color_cycle),
            contextual_parsing: self.contextual_parsing.unwrap_or(defaults.contextual_parsing),
            color_mode,
            bracket_pairs,
        })
    }
}

fn default_bracket_pairs() -> Vec<BracketPair> {
    let colors: Vec<String> = DEFAULT_COLORS.iter().map(|c| c.to_string()).collect();
    DEFAULT_BRACKETS
        .iter()
        .filter_map(|brackets| {
            let mut chars = brackets.chars();
            Some(BracketPair::new(
                chars.next()?,
                chars.next()?,
                colors.clone(),
                DEFAULT_ORPHAN_COLOR,
            ))
        })
        .collect()
}

/// `[brackets..., [colors], orphan]`: every pair shares one color list
fn parse_consecutive(value: &Value) -> std::result::Result<Vec<BracketPair>, ConfigError> {
    let entries = value
        .as_array()
        .ok_or_else(|| ConfigError::NotArray(CONSECUTIVE_FIELD.to_string()))?;
    if entries.len() < 3 {
        return Err(ConfigError::TooFewEntries {
            field: CONSECUTIVE_FIELD.to_string(),
            expected: 3,
            actual: entries.len(),
        });
    }

    let orphan_idx = entries.len() - 1;
    let colors_idx = entries.len() - 2;
    let orphan_color = string_at(entries, orphan_idx, CONSECUTIVE_FIELD)?;
    let colors = color_list(&entries[colors_idx], &format!("{CONSECUTIVE_FIELD}[{colors_idx}]"))?;

    entries[..colors_idx]
        .iter()
        .enumerate()
        .map(|(idx, _)| {
            let brackets = string_at(entries, idx, CONSECUTIVE_FIELD)?;
            let (open, close) = bracket_chars(brackets, &format!("{CONSECUTIVE_FIELD}[{idx}]"))?;
            Ok(BracketPair::new(open, close, colors.clone(), orphan_color))
        })
        .collect()
}

/// `[[brackets, [colors], orphan], ...]`: one color list per pair
fn parse_independent(value: &Value) -> std::result::Result<Vec<BracketPair>, ConfigError> {
    let entries = value
        .as_array()
        .ok_or_else(|| ConfigError::NotArray(INDEPENDENT_FIELD.to_string()))?;

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let field = format!("{INDEPENDENT_FIELD}[{idx}]");
            let inner = entry
                .as_array()
                .ok_or_else(|| ConfigError::NotArray(field.clone()))?;
            let brackets = string_at(inner, 0, &field)?;
            let (open, close) = bracket_chars(brackets, &format!("{field}[0]"))?;
            let colors = match inner.get(1) {
                Some(value) => color_list(value, &format!("{field}[1]"))?,
                None => return Err(ConfigError::NotArray(format!("{field}[1]"))),
            };
            let orphan_color = string_at(inner, 2, &field)?;
            Ok(BracketPair::new(open, close, colors, orphan_color))
        })
        .collect()
}

fn string_at<'a>(values: &'a [Value], idx: usize, field: &str) -> std::result::Result<&'a str, ConfigError> {
    values
        .get(idx)
        .and_then(Value::as_str)
        .ok_or_else(|| ConfigError::NotString(format!("{field}[{idx}]")))
}

fn color_list(value: &Value, field: &str) -> std::result::Result<Vec<String>, ConfigError> {
    let values = value
        .as_array()
        .ok_or_else(|| ConfigError::NotArray(field.to_string()))?;
    if values.is_empty() {
        return Err(ConfigError::NoColors(field.to_string()));
    }
    (0..values.len())
        .map(|idx| string_at(values, idx, field).map(str::to_string))
        .collect()
}

fn bracket_chars(brackets: &str, field: &str) -> std::result::Result<(char, char), ConfigError> {
    let mut chars = brackets.chars();
    match (chars.next(), chars.next()) {
        (Some(open), Some(close)) => Ok((open, close)),
        _ => Err(ConfigError::BracketsTooShort(field.to_string())),
    }
}
