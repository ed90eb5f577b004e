//! Language token tables
//!
//! A language definition lists the tokens that start line comments and
//! the open/close tokens of block comments and quoted strings. These are
//! all the colorizer needs to tell live brackets from ones inside
//! comments and strings.

/// Comment and string tokens for a set of language ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageDefinition {
    /// Language ids sharing this table (e.g. "c", "cpp")
    pub ids: Vec<String>,
    /// File extensions (e.g. ["c", "h"])
    pub extensions: Vec<String>,
    /// Tokens that comment out the rest of the line
    pub line_comments: Vec<String>,
    /// Block comment open/close tokens
    pub block_comments: Vec<(String, String)>,
    /// Quote open/close tokens
    pub quotes: Vec<(String, String)>,
}

impl LanguageDefinition {
    /// Create an empty definition for one or more language ids
    pub fn new(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    /// Add a line comment token
    pub fn add_line_comment(&mut self, token: &str) {
        self.line_comments.push(token.to_string());
    }

    /// Add a block comment pair
    pub fn add_block_comment(&mut self, open: &str, close: &str) {
        self.block_comments.push((open.to_string(), close.to_string()));
    }

    /// Add a quote pair; quotes are tried in the order they were added
    pub fn add_quote(&mut self, open: &str, close: &str) {
        self.quotes.push((open.to_string(), close.to_string()));
    }

    /// Add a quote that opens and closes with the same token
    pub fn add_symmetric_quote(&mut self, token: &str) {
        self.add_quote(token, token);
    }

    /// Check if this definition serves a language id
    pub fn handles(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }
}
