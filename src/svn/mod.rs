//! svn command execution layer
//!
//! This module handles executing svn commands and parsing their output.

pub mod constants;
mod executor;
/// Parser module (public for integration testing)
pub mod parser;

pub use executor::{CommandOutput, SvnExecutor};

use std::io;
use thiserror::Error;

/// Errors that can occur when executing svn commands
///
/// Parsers never produce these; a failed parse is an empty or defaulted value.
#[derive(Error, Debug)]
pub enum SvnError {
    #[error("Not an svn working copy")]
    NotAWorkingCopy,

    #[error("svn command failed (exit code {exit_code}): {stderr}")]
    CommandFailed { stderr: String, exit_code: i32 },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("svn is not installed or not in PATH")]
    SvnNotFound,
}
