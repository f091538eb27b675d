use thiserror::Error;

/// First failure recorded by the lexer. Positions are zero-based; `Display`
/// renders them one-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Illegal character '{character}' at line {}, column {}", .line + 1, .column + 1)]
    IllegalCharacter {
        character: char,
        line: usize,
        column: usize,
    },
    #[error("Unterminated string literal at line {}, column {}", .line + 1, .column + 1)]
    UnterminatedString { line: usize, column: usize },
}

impl LexError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::IllegalCharacter { .. } => "Illegal character",
            Self::UnterminatedString { .. } => "Unterminated string literal",
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Self::IllegalCharacter { line, .. } | Self::UnterminatedString { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            Self::IllegalCharacter { column, .. } | Self::UnterminatedString { column, .. } => {
                *column
            }
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
