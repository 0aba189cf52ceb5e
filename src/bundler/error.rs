//! Error types for framework conversion.
//!
//! Every failure in the pipeline aborts the whole conversion; nothing here is
//! retried. Variants carrying `exit_code` and `message` originate from an
//! external tool and keep its captured diagnostic output.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while slicing and assembling framework bundles.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input or output path argument.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// Offending path
        path: PathBuf,
        /// Why the path was rejected
        reason: String,
    },

    /// A required external tool is not installed or not executable.
    #[error("required tool `{tool}` is not available. Install the Xcode command line tools or pass its location explicitly")]
    ToolNotAvailable {
        /// Tool name or configured location
        tool: String,
    },

    /// The target is not a binary the inspection tool accepts.
    #[error("{} is not a valid multi-architecture binary", path.display())]
    InvalidBinary {
        /// Binary path
        path: PathBuf,
    },

    /// Listing architectures returned a non-zero exit status.
    #[error("`{command}` failed while listing architectures ({}): {message}", describe_exit(*exit_code))]
    InspectionFailed {
        /// Command line that failed
        command: String,
        /// Exit code, `None` when terminated by a signal
        exit_code: Option<i32>,
        /// Captured diagnostic output
        message: String,
    },

    /// Extracting architectures returned a non-zero exit status.
    #[error("`{command}` failed while extracting architectures ({}): {message}", describe_exit(*exit_code))]
    ExtractionFailed {
        /// Command line that failed
        command: String,
        /// Exit code, `None` when terminated by a signal
        exit_code: Option<i32>,
        /// Captured diagnostic output
        message: String,
    },

    /// Combining platform slices returned a non-zero exit status.
    #[error("`{command}` failed while creating the xcframework ({}): {message}", describe_exit(*exit_code))]
    AssemblyFailed {
        /// Command line that failed
        command: String,
        /// Exit code, `None` when terminated by a signal
        exit_code: Option<i32>,
        /// Captured diagnostic output
        message: String,
    },

    /// The binary embeds no recognized architecture.
    #[error("no supported architectures found in {}", binary.display())]
    NoArchitecturesFound {
        /// Binary path
        binary: PathBuf,
    },

    /// Nested frameworks exceed the configured depth.
    #[error("nested framework {} exceeds the maximum nesting depth of {limit}", path.display())]
    NestingTooDeep {
        /// Framework that would exceed the limit
        path: PathBuf,
        /// Configured maximum depth
        limit: usize,
    },

    /// Two frameworks in one conversion produce bundles with the same name.
    #[error("{} is produced by more than one framework in this conversion", path.display())]
    DuplicateBundle {
        /// Bundle that was already produced
        path: PathBuf,
    },

    /// Filesystem failure annotated with the action and path involved.
    #[error("{context} {}: {source}", path.display())]
    Fs {
        /// Action being performed
        context: String,
        /// Path involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Unannotated I/O errors.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Internal invariant violations.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Exit code reported by the external tool, if this error came from one.
    pub fn tool_exit_code(&self) -> Option<i32> {
        match self {
            Error::InspectionFailed { exit_code, .. }
            | Error::ExtractionFailed { exit_code, .. }
            | Error::AssemblyFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

fn describe_exit(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Attaches path context to I/O results.
pub trait ErrorExt<T> {
    /// Converts an I/O error into [`Error::Fs`] naming the action and path.
    fn fs_context(self, context: &str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context: context.to_string(),
            path: path.into(),
            source,
        })
    }
}

/// Returns early with [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
