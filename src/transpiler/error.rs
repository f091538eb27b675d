use thiserror::Error;

/// Whole-program and internal failures of the JavaScript transpiler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error("Duplicate function '{name}'")]
    DuplicateFunction { name: String },
    #[error("No main function found")]
    MissingEntryPoint,
    /// A tree the parser never produces reached the transpiler.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CodegenError {
    /// Program-level errors have no source position.
    pub const NO_POSITION: i64 = -1;

    pub fn line(&self) -> i64 {
        Self::NO_POSITION
    }

    pub fn column(&self) -> i64 {
        Self::NO_POSITION
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

pub type CodegenResult<T> = Result<T, CodegenError>;
