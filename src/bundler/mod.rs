//! Fat framework to xcframework conversion.
//!
//! This module splits a multi-architecture `.framework` into one copy per
//! Apple platform and combines the copies into a `.xcframework`, converting
//! frameworks embedded under `Frameworks/` the same way.
//!
//! # Platform Mapping
//!
//! | Architecture | Platform | Slice directory |
//! |--------------|----------|-----------------|
//! | arm64 | iOS device | `iOS` |
//! | arm64e | macOS | `mac` |
//! | i386, x86_64 | iOS simulator | `simulator` |
//!
//! # Integration
//!
//! ```no_run
//! use xcframework_builder::bundler::{SettingsBuilder, XcframeworkBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = SettingsBuilder::new()
//!     .delete_input_on_success(true)
//!     .build()?;
//!
//! let report = XcframeworkBuilder::new(settings)
//!     .convert("Build/Foo.framework".as_ref(), "Build/xcframeworks".as_ref())
//!     .await?;
//! println!("{} bundle(s) created", report.artifacts.len());
//! # Ok(())
//! # }
//! ```
//!
//! # External Tools
//!
//! Conversion shells out to `lipo` and `xcodebuild` from the Xcode command
//! line tools. Both go through [`CommandRunner`], so alternative runners can
//! stand in for them.

#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod framework;
pub mod platform;
pub mod settings;
pub mod utils;

// Public re-exports
pub use builder::{ConversionReport, ConversionState, ConvertedArtifact, XcframeworkBuilder};
pub use error::{Error, ErrorExt, Result};
pub use framework::Framework;
pub use settings::{
    // Architecture model
    Architecture,
    DEFAULT_MAX_NESTING_DEPTH,
    Platform,
    // Main configuration types
    Settings,
    SettingsBuilder,
    UnknownArchitecture,
    platform_of,
};
pub use utils::{CommandOutput, CommandRunner, SystemRunner};
