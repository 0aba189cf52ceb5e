//! Configuration structures for conversion runs.
//!
//! This module holds the architecture catalog and the [`Settings`] value that
//! is threaded through every (nested) conversion, together with its builder.

mod arch;
mod builder;
mod core;

// Re-export all public types
pub use arch::{Architecture, Platform, UnknownArchitecture, platform_of};
pub use builder::SettingsBuilder;
pub use self::core::{DEFAULT_MAX_NESTING_DEPTH, Settings};
