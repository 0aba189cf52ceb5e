//! Wrappers for the Apple command line tools the conversion relies on.
//!
//! - `lipo` - architecture listing and extraction
//! - `xcodebuild` - xcframework assembly

mod lipo;
mod xcodebuild;

pub use lipo::{LIPO, Lipo, parse_architectures};
pub use xcodebuild::{XCODEBUILD, Xcodebuild};
