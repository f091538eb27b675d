use thiserror::Error;

use crate::token::Token;

/// First structural mismatch found by the parser. `line` and `column` are
/// zero-based and point at the offending token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} at line {}, column {}", .line + 1, .column + 1)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: token.line(),
            column: token.column(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
