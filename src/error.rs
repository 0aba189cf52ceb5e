//! Application error types.
//!
//! Conversion failures come from [`crate::bundler::Error`]; this module wraps
//! them together with argument and output errors raised by the CLI.

use thiserror::Error;

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type for all application operations
#[derive(Error, Debug)]
pub enum AppError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Manifest template errors
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Conversion errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl AppError {
    /// Exit code reported by the external tool behind this error, if any.
    pub fn tool_exit_code(&self) -> Option<i32> {
        match self {
            AppError::Bundler(e) => e.tool_exit_code(),
            _ => None,
        }
    }
}
