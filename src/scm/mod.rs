//! Git command execution layer
//!
//! This module handles executing git commands and parsing their output.

pub mod constants;
mod executor;
/// Parser module (public for integration testing)
pub mod parser;
mod reader;

pub use executor::GitExecutor;
pub use reader::StringReader;

use std::io;
use thiserror::Error;

/// Errors that can occur when executing or parsing git commands
#[derive(Error, Debug)]
pub enum ScmError {
    #[error("git command failed (exit code {exit_code}): {stderr}")]
    CommandFailed { stderr: String, exit_code: i32 },

    #[error("unsupported porcelain status code: {0}")]
    UnsupportedStatus(String),

    #[error("failed to parse git output: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("git is not installed or not in PATH")]
    GitNotFound,
}
