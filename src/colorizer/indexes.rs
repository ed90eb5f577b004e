//! Color slot allocation for open brackets
//!
//! Every open bracket pushes the index of the color it was given; its
//! closing bracket pops that index back off so both get the same color.
//! Indexes still on the stack at the end of the document belong to
//! brackets that were never closed.

use std::collections::HashMap;

use crate::config::ColorMode;

use super::bracket::BracketPair;

/// Stack of in-flight color indexes for one sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStack {
    open: Vec<usize>,
    previous: Option<usize>,
}

impl IndexStack {
    fn push(&mut self, index: usize) {
        self.open.push(index);
        self.previous = Some(index);
    }
}

/// Color index bookkeeping, shared or per bracket kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorIndexes {
    /// One sequence for every bracket kind
    Shared(IndexStack),
    /// One sequence per opening character
    Independent(HashMap<char, IndexStack>),
}

impl ColorIndexes {
    /// Create empty bookkeeping for a color mode
    pub fn new(mode: ColorMode, pairs: &[BracketPair]) -> Self {
        match mode {
            ColorMode::Consecutive => Self::Shared(IndexStack::default()),
            ColorMode::Independent => Self::Independent(
                pairs
                    .iter()
                    .map(|pair| (pair.open, IndexStack::default()))
                    .collect(),
            ),
        }
    }

    fn stack(&self, pair: &BracketPair) -> Option<&IndexStack> {
        match self {
            Self::Shared(stack) => Some(stack),
            Self::Independent(stacks) => stacks.get(&pair.open),
        }
    }

    fn stack_mut(&mut self, pair: &BracketPair) -> &mut IndexStack {
        match self {
            Self::Shared(stack) => stack,
            Self::Independent(stacks) => stacks.entry(pair.open).or_default(),
        }
    }

    /// Index most recently given to an open bracket of this kind
    pub fn previous(&self, pair: &BracketPair) -> Option<usize> {
        self.stack(pair).and_then(|stack| stack.previous)
    }

    /// Number of open brackets of this kind not yet closed
    pub fn depth(&self, pair: &BracketPair) -> usize {
        self.stack(pair).map_or(0, |stack| stack.open.len())
    }

    /// Record an open bracket colored with `index`
    pub fn push(&mut self, pair: &BracketPair, index: usize) {
        self.stack_mut(pair).push(index);
    }

    /// Take the index of the innermost open bracket, if any
    pub fn pop(&mut self, pair: &BracketPair) -> Option<usize> {
        self.stack_mut(pair).open.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs() -> Vec<BracketPair> {
        let colors = vec!["a".to_string(), "b".to_string()];
        vec![
            BracketPair::new('(', ')', colors.clone(), "x"),
            BracketPair::new('[', ']', colors, "x"),
        ]
    }

    #[test]
    fn test_shared_sequence() {
        let pairs = pairs();
        let mut indexes = ColorIndexes::new(ColorMode::Consecutive, &pairs);
        assert_eq!(indexes.previous(&pairs[0]), None);

        indexes.push(&pairs[0], 0);
        indexes.push(&pairs[1], 1);
        // Both kinds see the same stack
        assert_eq!(indexes.depth(&pairs[0]), 2);
        assert_eq!(indexes.previous(&pairs[0]), Some(1));
        assert_eq!(indexes.pop(&pairs[0]), Some(1));
        assert_eq!(indexes.pop(&pairs[1]), Some(0));
        assert_eq!(indexes.pop(&pairs[1]), None);
        // Previous survives the pops
        assert_eq!(indexes.previous(&pairs[1]), Some(1));
    }

    #[test]
    fn test_independent_sequences() {
        let pairs = pairs();
        let mut indexes = ColorIndexes::new(ColorMode::Independent, &pairs);

        indexes.push(&pairs[0], 0);
        indexes.push(&pairs[0], 1);
        assert_eq!(indexes.depth(&pairs[0]), 2);
        assert_eq!(indexes.depth(&pairs[1]), 0);
        assert_eq!(indexes.previous(&pairs[1]), None);
        assert_eq!(indexes.pop(&pairs[1]), None);
        assert_eq!(indexes.pop(&pairs[0]), Some(1));
    }

    #[test]
    fn test_clone_is_deep() {
        let pairs = pairs();
        let mut indexes = ColorIndexes::new(ColorMode::Independent, &pairs);
        indexes.push(&pairs[0], 0);

        let mut copy = indexes.clone();
        assert_eq!(copy.pop(&pairs[0]), Some(0));
        assert_eq!(indexes.depth(&pairs[0]), 1);
        assert_ne!(copy, indexes);
    }
}
