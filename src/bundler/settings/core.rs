//! Core Settings struct and implementations.

use std::path::{Path, PathBuf};

/// Default limit on how deeply embedded frameworks are followed.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 8;

/// Configuration for one conversion run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). The same value
/// is handed to every nested-framework invocation, so nested processing
/// follows the top-level logging and cleanup behavior exactly.
///
/// # Examples
///
/// ```
/// use xcframework_builder::bundler::SettingsBuilder;
///
/// # fn example() -> xcframework_builder::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .keep_workspace(true)
///     .ignore_nested_frameworks(false)
///     .build()?;
/// assert!(settings.keep_workspace());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Preserve the scratch workspace after the run (debug mode).
    keep_workspace: bool,

    /// Leave embedded frameworks untouched.
    ignore_nested_frameworks: bool,

    /// Remove the input bundle after a fully successful run.
    delete_input_on_success: bool,

    /// Deepest nesting level followed before failing.
    max_nesting_depth: usize,

    /// Directory under which scratch workspaces are allocated.
    scratch_root: PathBuf,

    /// Explicit `lipo` location, looked up on `PATH` when unset.
    lipo: Option<PathBuf>,

    /// Explicit `xcodebuild` location, looked up on `PATH` when unset.
    xcodebuild: Option<PathBuf>,
}

impl Settings {
    /// Whether the scratch workspace survives the run.
    pub fn keep_workspace(&self) -> bool {
        self.keep_workspace
    }

    /// Whether embedded frameworks are skipped.
    pub fn ignore_nested_frameworks(&self) -> bool {
        self.ignore_nested_frameworks
    }

    /// Whether the input bundle is removed after success.
    pub fn delete_input_on_success(&self) -> bool {
        self.delete_input_on_success
    }

    /// Maximum nesting depth; the top-level framework is depth 0.
    pub fn max_nesting_depth(&self) -> usize {
        self.max_nesting_depth
    }

    /// Root directory for scratch workspaces.
    pub fn scratch_root(&self) -> &Path {
        &self.scratch_root
    }

    /// Configured `lipo` override.
    pub fn lipo(&self) -> Option<&Path> {
        self.lipo.as_deref()
    }

    /// Configured `xcodebuild` override.
    pub fn xcodebuild(&self) -> Option<&Path> {
        self.xcodebuild.as_deref()
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        keep_workspace: bool,
        ignore_nested_frameworks: bool,
        delete_input_on_success: bool,
        max_nesting_depth: usize,
        scratch_root: PathBuf,
        lipo: Option<PathBuf>,
        xcodebuild: Option<PathBuf>,
    ) -> Self {
        Self {
            keep_workspace,
            ignore_nested_frameworks,
            delete_input_on_success,
            max_nesting_depth,
            scratch_root,
            lipo,
            xcodebuild,
        }
    }
}
