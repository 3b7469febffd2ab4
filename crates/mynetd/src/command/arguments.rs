//! Ordered argument list handed to modules.

use std::slice;

use super::tokenizer::unquote;

/// Tokens following the command, in the order the client sent them.
///
/// Tokens are kept exactly as written, quotes included; use
/// [`Arguments::unquoted`] for the plain value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    tokens: Vec<String>,
}

impl Arguments {
    /// Wraps already lexed tokens.
    #[must_use]
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the command had no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Raw token at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Token at `index` with quoting and escapes removed.
    #[must_use]
    pub fn unquoted(&self, index: usize) -> Option<String> {
        self.get(index).map(unquote)
    }

    /// Iterates over raw tokens.
    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.tokens.iter()
    }

    /// Raw tokens as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Consumes the list, returning the raw tokens.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq<[&str]> for Arguments {
    fn eq(&self, other: &[&str]) -> bool {
        self.tokens.len() == other.len()
            && self.tokens.iter().zip(other).all(|(left, right)| left == right)
    }
}
