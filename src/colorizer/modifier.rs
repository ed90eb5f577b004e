//! Comment and string span tracking
//!
//! A `TokenModifier` is an open/close token pair (`/*` `*/`, `"` `"`)
//! with a counter of how deeply we are inside it. The counter carries from
//! one line to the next, which is what makes block comments and strings
//! span lines.

use std::sync::Arc;

/// An open/close token pair with a nesting counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenModifier {
    open: Arc<str>,
    close: Arc<str>,
    counter: usize,
}

impl TokenModifier {
    /// Create a modifier outside of its span
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: Arc::from(open),
            close: Arc::from(close),
            counter: 0,
        }
    }

    /// Token that starts the span
    pub fn open_token(&self) -> &str {
        &self.open
    }

    /// Token that ends the span
    pub fn close_token(&self) -> &str {
        &self.close
    }

    /// Current nesting depth
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Check if we are inside this span
    pub fn is_active(&self) -> bool {
        self.counter > 0
    }

    /// Enter the span
    pub fn open(&mut self) {
        self.counter += 1;
    }

    /// Leave the span; a close with nothing open stays at zero
    pub fn close(&mut self) {
        self.counter = self.counter.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close() {
        let mut modifier = TokenModifier::new("/*", "*/");
        assert!(!modifier.is_active());
        modifier.open();
        modifier.open();
        assert_eq!(modifier.counter(), 2);
        modifier.close();
        assert!(modifier.is_active());
        modifier.close();
        assert!(!modifier.is_active());
    }

    #[test]
    fn test_close_clamps_at_zero() {
        let mut modifier = TokenModifier::new("\"", "\"");
        modifier.close();
        assert_eq!(modifier.counter(), 0);
        modifier.open();
        assert!(modifier.is_active());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut modifier = TokenModifier::new("/*", "*/");
        modifier.open();
        let mut copy = modifier.clone();
        copy.close();
        assert_eq!(modifier.counter(), 1);
        assert_eq!(copy.counter(), 0);
        assert_eq!(copy.open_token(), "/*");
        assert_eq!(copy.close_token(), "*/");
    }
}
