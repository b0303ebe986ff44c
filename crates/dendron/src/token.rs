//! Token classification and the parser's read cursor.
//!
//! Tokens arrive already split on whitespace. The cursor walks them strictly
//! left to right and never looks past the current head, leaving the caller's
//! buffer untouched.

use log::trace;

pub const ASSIGN: &str = ":=";
pub const PRINT: &str = "#";
pub const NEGATE: &str = "_";
pub const SQUARE_ROOT: &str = "%";
pub const ADD: &str = "+";
pub const SUBTRACT: &str = "-";
pub const MULTIPLY: &str = "*";
pub const DIVIDE: &str = "/";

/// An optional leading `-` followed by one or more ASCII digits.
pub fn is_numeral(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Starts with an ASCII letter; anything may follow.
pub fn is_identifier(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic())
}

pub struct TokenCursor<'a, S> {
    tokens: &'a [S],
    position: usize,
}

impl<'a, S: AsRef<str>> TokenCursor<'a, S> {
    pub fn new(tokens: &'a [S]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Consumes and returns the head token.
    pub fn next_token(&mut self) -> Option<&'a str> {
        let token = self.tokens.get(self.position)?.as_ref();
        trace!("token {}: {token}", self.position);
        self.position = self.position.saturating_add(1);
        Some(token)
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Number of tokens consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.position)
    }
}
