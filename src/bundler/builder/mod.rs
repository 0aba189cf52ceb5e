//! Conversion orchestration and coordination.
//!
//! This module provides the main [`XcframeworkBuilder`] orchestrator that
//! coordinates the external tools to turn a fat framework into xcframeworks.
//!
//! # Overview
//!
//! The builder:
//! 1. Validates the input and output paths
//! 2. Resolves `lipo` and `xcodebuild`
//! 3. Stages the input in a scratch workspace and converts nested frameworks
//! 4. Slices the binary once per platform and assembles the slices
//! 5. Moves results to the output directory and returns a [`ConversionReport`]
//!
//! # Example
//!
//! ```no_run
//! use xcframework_builder::bundler::{SettingsBuilder, XcframeworkBuilder};
//!
//! # async fn example() -> xcframework_builder::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .ignore_nested_frameworks(true)
//!     .build()?;
//!
//! let report = XcframeworkBuilder::new(settings)
//!     .convert("Carthage/Build/iOS/Foo.framework".as_ref(), "xcframeworks".as_ref())
//!     .await?;
//!
//! for artifact in report.artifacts {
//!     println!("Created: {}", artifact.path.display());
//!     println!("SHA256: {}", artifact.checksum);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for bundles
//! - [`grouping`] - Architecture to platform grouping
//! - [`orchestrator`] - Main [`XcframeworkBuilder`] and the conversion pipeline
//! - [`slicer`] - Per-platform bundle copies
//! - [`tool_detection`] - External tool availability checking
//! - [`workspace`] - Scratch directory lifecycle

pub mod checksum;
pub mod grouping;
pub mod orchestrator;
pub mod slicer;
pub mod tool_detection;
pub mod workspace;

pub use checksum::calculate_sha256;
pub use grouping::group_by_platform;
pub use orchestrator::{ConversionReport, ConversionState, ConvertedArtifact, XcframeworkBuilder};
pub use slicer::slice_framework;
pub use tool_detection::Toolchain;
pub use workspace::{ScratchWorkspace, WORKSPACE_PREFIX};
