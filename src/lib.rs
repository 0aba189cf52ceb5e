//! Fat framework to xcframework conversion library
//!
//! This library provides the functionality behind the `xcframework-builder`
//! binary:
//! - Slicing multi-architecture `.framework` bundles per Apple platform
//! - Assembling the slices into `.xcframework` bundles, nested frameworks included
//! - Generating a `Package.swift` exposing the results as binary targets
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod manifest;

// Re-export commonly used types
pub use error::{AppError, CliError, Result};
