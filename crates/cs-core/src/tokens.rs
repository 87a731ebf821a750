//! Whitespace tokenization for the line-oriented input language.
//!
//! Input directives are whitespace-separated tokens consumed front to
//! back; keywords and identifiers compare case-insensitively.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// FIFO queue of tokens from one input line.
#[derive(Debug, Clone)]
pub struct Tokens {
    items: VecDeque<String>,
}

impl Tokens {
    /// Tokenize a line. Everything from the first `#` on is a comment.
    pub fn from_line(line: &str) -> Self {
        let code = line.split('#').next().unwrap_or("");
        Self { items: code.split_whitespace().map(str::to_owned).collect() }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Pop the next token, if any.
    pub fn next(&mut self) -> Option<String> {
        self.items.pop_front()
    }

    /// Pop the next token or fail, naming what was expected.
    pub fn expect(&mut self, what: &str) -> Result<String> {
        self.next().ok_or_else(|| Error::Parse(format!("expected {what}")))
    }

    /// Pop the next token lowercased (for case-insensitive keywords).
    pub fn expect_lower(&mut self, what: &str) -> Result<String> {
        Ok(self.expect(what)?.to_lowercase())
    }

    /// Pop and parse the next token, reporting the offending token on
    /// failure.
    pub fn next_parse<T>(&mut self, what: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let tok = self.expect(what)?;
        tok.parse().map_err(|e| Error::Parse(format!("invalid {what} \"{tok}\": {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_and_pop() {
        let mut t = Tokens::from_line("  distribution epsilon  normal 0.0 1.0 ");
        assert_eq!(t.len(), 5);
        assert_eq!(t.next().as_deref(), Some("distribution"));
        assert_eq!(t.expect_lower("name").unwrap(), "epsilon");
    }

    #[test]
    fn test_comments_stripped() {
        let t = Tokens::from_line("trials 100 # one hundred");
        assert_eq!(t.len(), 2);
        assert!(Tokens::from_line("# full comment line").is_empty());
    }

    #[test]
    fn test_next_parse_names_bad_token() {
        let mut t = Tokens::from_line("trials lots");
        t.next();
        let err = t.next_parse::<u64>("trial count").unwrap_err();
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn test_expect_missing() {
        let mut t = Tokens::from_line("");
        assert!(t.expect("model name").is_err());
    }
}
