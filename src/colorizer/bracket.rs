//! Bracket pair definitions

/// One configured bracket kind with its color cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketPair {
    /// Opening character, also the key for independent color mode
    pub open: char,
    /// Closing character
    pub close: char,
    /// Colors cycled through by nesting or iteration
    pub colors: Vec<String>,
    /// Color for closing brackets with nothing to match
    pub orphan_color: String,
}

impl BracketPair {
    /// Create a new bracket pair
    pub fn new(open: char, close: char, colors: Vec<String>, orphan_color: &str) -> Self {
        Self {
            open,
            close,
            colors,
            orphan_color: orphan_color.to_string(),
        }
    }
}
