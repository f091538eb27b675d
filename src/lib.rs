//! Kori to JavaScript compiler.
//!
//! Source text flows through three stages, each stopping at its first error:
//! [`lexer`] produces tokens, [`parser`] builds one [`ast::Function`] per
//! top-level `func`, and [`transpiler`] emits JavaScript ending in a call to
//! `main`.

use thiserror::Error;

pub mod ast;
pub mod builtins;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod transpiler;

pub use lexer::{LexError, tokenize};
pub use parser::{ParseError, parse_tokens};
pub use transpiler::{CodegenError, generate};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

/// Run the whole pipeline over one source buffer.
pub fn compile(source: &str) -> Result<String, CompileError> {
    let tokens = tokenize(source)?;
    let program = parse_tokens(tokens)?;
    Ok(generate(&program)?)
}
