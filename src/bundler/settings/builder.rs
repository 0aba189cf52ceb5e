//! Builder for constructing Settings.

use super::{Settings, core::DEFAULT_MAX_NESTING_DEPTH};
use crate::bundler::{Error, Result};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Every field has a default, so `SettingsBuilder::new().build()` yields a
/// configuration that cleans up after itself, follows nested frameworks and
/// keeps the input bundle.
///
/// # Examples
///
/// ```
/// use xcframework_builder::bundler::SettingsBuilder;
///
/// # fn example() -> xcframework_builder::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .scratch_root(std::env::temp_dir())
///     .max_nesting_depth(2)
///     .delete_input_on_success(true)
///     .build()?;
/// assert_eq!(settings.max_nesting_depth(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    keep_workspace: bool,
    ignore_nested_frameworks: bool,
    delete_input_on_success: bool,
    max_nesting_depth: Option<usize>,
    scratch_root: Option<PathBuf>,
    lipo: Option<PathBuf>,
    xcodebuild: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Preserves the scratch workspace for inspection after the run.
    ///
    /// Default: false
    pub fn keep_workspace(mut self, keep: bool) -> Self {
        self.keep_workspace = keep;
        self
    }

    /// Skips embedded frameworks; they stay inside the combined bundle.
    ///
    /// Default: false
    pub fn ignore_nested_frameworks(mut self, ignore: bool) -> Self {
        self.ignore_nested_frameworks = ignore;
        self
    }

    /// Removes the input bundle once the whole run has succeeded.
    ///
    /// Default: false
    pub fn delete_input_on_success(mut self, delete: bool) -> Self {
        self.delete_input_on_success = delete;
        self
    }

    /// Sets the deepest nesting level that is still processed.
    ///
    /// Default: [`DEFAULT_MAX_NESTING_DEPTH`]
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = Some(depth);
        self
    }

    /// Sets the directory scratch workspaces are created in.
    ///
    /// Default: the system temporary directory
    pub fn scratch_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.scratch_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Uses an explicit `lipo` executable.
    pub fn lipo<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.lipo = Some(path.as_ref().to_path_buf());
        self
    }

    /// Uses an explicit `xcodebuild` executable.
    pub fn xcodebuild<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.xcodebuild = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the scratch root exists but is not a
    /// directory.
    pub fn build(self) -> Result<Settings> {
        let scratch_root = self.scratch_root.unwrap_or_else(std::env::temp_dir);

        if scratch_root.exists() && !scratch_root.is_dir() {
            return Err(Error::InvalidPath {
                path: scratch_root,
                reason: "scratch root must be a directory".into(),
            });
        }

        Ok(Settings::new(
            self.keep_workspace,
            self.ignore_nested_frameworks,
            self.delete_input_on_success,
            self.max_nesting_depth.unwrap_or(DEFAULT_MAX_NESTING_DEPTH),
            scratch_root,
            self.lipo,
            self.xcodebuild,
        ))
    }
}
