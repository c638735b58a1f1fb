//! Compilation diagnostics.

use thiserror::Error;

/// Which half of the pipeline rejected the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Stripping, line classification and expression parsing.
    Preprocess,
    /// Evaluating the parsed program.
    Runtime,
}

/// An error tied to a line of the original script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line {line}: {message}")]
pub struct CompileError {
    pub stage: Stage,
    pub line: usize,
    pub message: String,
}

impl CompileError {
    pub fn preprocess(line: usize, message: impl Into<String>) -> Self {
        Self {
            stage: Stage::Preprocess,
            line,
            message: message.into(),
        }
    }

    pub fn runtime(line: usize, message: impl Into<String>) -> Self {
        Self {
            stage: Stage::Runtime,
            line,
            message: message.into(),
        }
    }
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;
