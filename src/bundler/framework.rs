//! Framework bundle layout.
//!
//! A framework bundle is a directory `<Name>.framework` whose primary binary
//! is `<Name>.framework/<Name>`. Embedded frameworks live in its `Frameworks`
//! subdirectory.

use crate::bundler::{Error, Result};
use std::path::{Path, PathBuf};

/// Extension of framework bundles.
pub const FRAMEWORK_EXTENSION: &str = "framework";

/// Extension of combined multi-platform bundles.
pub const XCFRAMEWORK_EXTENSION: &str = "xcframework";

/// Subdirectory holding embedded frameworks.
pub const NESTED_FRAMEWORKS_DIR: &str = "Frameworks";

/// Path model of one framework bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framework {
    path: PathBuf,
    name: String,
}

impl Framework {
    /// Wraps a bundle path, checking only its shape (no filesystem access).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPath`] if the path lacks the `framework` extension or
    /// its name is not valid UTF-8.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if path.extension().is_none_or(|ext| ext != FRAMEWORK_EXTENSION) {
            return Err(Error::InvalidPath {
                path,
                reason: format!("expected a .{FRAMEWORK_EXTENSION} bundle"),
            });
        }

        let name = match path.file_stem().and_then(|stem| stem.to_str()) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(Error::InvalidPath {
                    path,
                    reason: "bundle name must be non-empty UTF-8".into(),
                });
            }
        };

        Ok(Self { path, name })
    }

    /// Bundle directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bundle name without extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<Name>.framework`
    pub fn file_name(&self) -> String {
        format!("{}.{FRAMEWORK_EXTENSION}", self.name)
    }

    /// `<Name>.xcframework`
    pub fn xcframework_file_name(&self) -> String {
        format!("{}.{XCFRAMEWORK_EXTENSION}", self.name)
    }

    /// Primary multi-architecture binary.
    pub fn binary_path(&self) -> PathBuf {
        self.path.join(&self.name)
    }

    /// Directory of embedded frameworks (may not exist).
    pub fn nested_frameworks_dir(&self) -> PathBuf {
        self.path.join(NESTED_FRAMEWORKS_DIR)
    }

    /// The same bundle placed directly inside `dir`.
    pub fn relocated_to(&self, dir: &Path) -> Framework {
        Framework {
            path: dir.join(self.file_name()),
            name: self.name.clone(),
        }
    }
}
