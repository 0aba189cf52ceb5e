//! Main conversion orchestration.
//!
//! This module provides the [`XcframeworkBuilder`] that drives one conversion
//! from a fat `.framework` to one or more `.xcframework` bundles, following
//! embedded frameworks recursively.

use super::{
    checksum::calculate_sha256, grouping::group_by_platform, slicer::slice_framework,
    tool_detection::Toolchain, workspace::ScratchWorkspace,
};
use crate::bundler::{
    Error, Framework, Platform, Result, Settings,
    framework::{FRAMEWORK_EXTENSION, XCFRAMEWORK_EXTENSION},
    platform::macos::{Lipo, Xcodebuild},
    utils::{
        fs,
        process::{CommandRunner, SystemRunner},
    },
};
use serde::Serialize;
use std::{
    fmt,
    future::Future,
    path::{Path, PathBuf},
    pin::Pin,
};

/// Steps of one (possibly nested) conversion.
///
/// A conversion moves through these states in order; any failure aborts it
/// in whatever state it was entering. `Display` names the work performed to
/// reach each state, which is what failure logs report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionState {
    /// Arguments received
    Init,
    /// `lipo` and `xcodebuild` resolved
    ToolsVerified,
    /// Scratch workspace allocated
    WorkspaceReady,
    /// Input copied into the workspace
    InputStaged,
    /// Embedded frameworks converted and removed from the staged copy
    NestedProcessed,
    /// One slice per platform written
    Sliced,
    /// Slices combined into an xcframework
    Assembled,
    /// Combined bundles moved to the output directory
    Relocated,
    /// Workspace torn down
    CleanedUp,
}

impl fmt::Display for ConversionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConversionState::Init => "validating arguments",
            ConversionState::ToolsVerified => "verifying required tools",
            ConversionState::WorkspaceReady => "creating the working directory",
            ConversionState::InputStaged => "staging the input framework",
            ConversionState::NestedProcessed => "processing nested frameworks",
            ConversionState::Sliced => "slicing the binary by platform",
            ConversionState::Assembled => "creating the xcframework",
            ConversionState::Relocated => "moving results to the output directory",
            ConversionState::CleanedUp => "cleaning up",
        })
    }
}

/// One combined bundle placed in the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedArtifact {
    /// `<Name>.xcframework`
    pub name: String,
    /// Final location
    pub path: PathBuf,
    /// Platforms contained, in layout order
    pub platforms: Vec<Platform>,
    /// SHA-256 over the bundle tree
    pub checksum: String,
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// Bundles produced, nested frameworks before their parents.
    pub artifacts: Vec<ConvertedArtifact>,
}

/// Bundle assembled by one conversion level, before checksumming.
#[derive(Debug)]
struct AssembledBundle {
    name: String,
    platforms: Vec<Platform>,
}

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Converts fat framework bundles into xcframeworks.
///
/// # Examples
///
/// ```no_run
/// use xcframework_builder::bundler::{SettingsBuilder, XcframeworkBuilder};
///
/// # async fn example() -> xcframework_builder::bundler::Result<()> {
/// let settings = SettingsBuilder::new().build()?;
/// let report = XcframeworkBuilder::new(settings)
///     .convert("Build/Foo.framework".as_ref(), "Build/xcframeworks".as_ref())
///     .await?;
///
/// for artifact in report.artifacts {
///     println!("Created {} ({:?})", artifact.path.display(), artifact.platforms);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct XcframeworkBuilder<R = SystemRunner> {
    settings: Settings,
    runner: R,
}

impl XcframeworkBuilder<SystemRunner> {
    /// Creates a builder running the real system tools.
    pub fn new(settings: Settings) -> Self {
        Self::with_runner(settings, SystemRunner)
    }
}

impl<R: CommandRunner> XcframeworkBuilder<R> {
    /// Creates a builder running tools through `runner`.
    pub fn with_runner(settings: Settings, runner: R) -> Self {
        Self { settings, runner }
    }

    /// Returns a reference to the builder settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the runner executing external tools.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Converts `input` (a `.framework`) into xcframeworks inside `output_dir`.
    ///
    /// Arguments are validated and tools resolved before anything is written.
    /// Embedded frameworks produce their own xcframework next to the outer
    /// one unless nested processing is disabled. Every failure aborts the
    /// whole conversion and leaves no output behind in the workspace.
    pub async fn convert(&self, input: &Path, output_dir: &Path) -> Result<ConversionReport> {
        let framework = validate_paths(input, output_dir).inspect_err(|e| {
            log::error!("Conversion failed while {}: {}", ConversionState::Init, e);
        })?;

        let toolchain = Toolchain::detect(&self.runner, &self.settings).inspect_err(|e| {
            log::error!(
                "Conversion failed while {}: {}",
                ConversionState::ToolsVerified,
                e
            );
        })?;
        log::debug!("{} -> {:?}", framework.name(), ConversionState::ToolsVerified);

        let assembled = self
            .convert_at_depth(&toolchain, framework.clone(), output_dir.to_path_buf(), 0)
            .await?;

        let mut report = ConversionReport::default();
        for bundle in assembled {
            let path = output_dir.join(&bundle.name);
            let checksum = calculate_sha256(&path).await?;
            report.artifacts.push(ConvertedArtifact {
                name: bundle.name,
                path,
                platforms: bundle.platforms,
                checksum,
            });
        }

        if self.settings.delete_input_on_success() {
            log::info!("Removing input framework {}", framework.path().display());
            fs::remove_dir_all(framework.path()).await?;
        }

        Ok(report)
    }

    /// Runs the whole pipeline for one framework at nesting level `depth`.
    fn convert_at_depth<'a>(
        &'a self,
        toolchain: &'a Toolchain,
        framework: Framework,
        output_dir: PathBuf,
        depth: usize,
    ) -> BoxFuture<'a, Result<Vec<AssembledBundle>>> {
        Box::pin(async move {
            let mut state = ConversionState::ToolsVerified;
            let result = self
                .run_pipeline(toolchain, &framework, &output_dir, depth, &mut state)
                .await;

            if let Err(e) = &result {
                log::error!(
                    "Converting {} failed while {}: {}",
                    framework.file_name(),
                    state,
                    e
                );
            }
            result
        })
    }

    async fn run_pipeline(
        &self,
        toolchain: &Toolchain,
        framework: &Framework,
        output_dir: &Path,
        depth: usize,
        state: &mut ConversionState,
    ) -> Result<Vec<AssembledBundle>> {
        let limit = self.settings.max_nesting_depth();
        if depth > limit {
            return Err(Error::NestingTooDeep {
                path: framework.path().to_path_buf(),
                limit,
            });
        }

        // Nested conversions allocate their workspace inside the parent's.
        let scratch_parent = if depth == 0 {
            self.settings.scratch_root()
        } else {
            output_dir
        };
        advance(framework, state, ConversionState::WorkspaceReady);
        let workspace =
            ScratchWorkspace::create(scratch_parent, self.settings.keep_workspace()).await?;

        advance(framework, state, ConversionState::InputStaged);
        let staged = framework.relocated_to(workspace.path());
        fs::copy_dir(framework.path(), staged.path()).await?;

        advance(framework, state, ConversionState::NestedProcessed);
        let mut assembled = self
            .process_nested_frameworks(toolchain, &staged, workspace.path(), depth)
            .await?;

        advance(framework, state, ConversionState::Sliced);
        let lipo = Lipo::new(&self.runner, toolchain.lipo());
        let binary = staged.binary_path();
        let architectures = lipo.architectures(&binary).await?;
        if architectures.is_empty() {
            return Err(Error::NoArchitecturesFound { binary });
        }

        let mut slices = Vec::new();
        let mut platforms = Vec::new();
        for (platform, archs) in group_by_platform(&architectures) {
            log::info!("Processing {} binary of {}", platform, framework.name());
            let slice =
                slice_framework(&lipo, &staged, platform, &archs, workspace.path()).await?;
            slices.push(slice);
            platforms.push(platform);
        }

        advance(framework, state, ConversionState::Assembled);
        let xcframework = workspace.path().join(framework.xcframework_file_name());
        if tokio::fs::symlink_metadata(&xcframework).await.is_ok() {
            return Err(Error::DuplicateBundle { path: xcframework });
        }
        Xcodebuild::new(&self.runner, toolchain.xcodebuild())
            .create_xcframework(&slices, &xcframework)
            .await?;
        assembled.push(AssembledBundle {
            name: framework.xcframework_file_name(),
            platforms,
        });

        advance(framework, state, ConversionState::Relocated);
        relocate_bundles(workspace.path(), output_dir, depth == 0).await?;

        advance(framework, state, ConversionState::CleanedUp);
        workspace.close().await?;

        Ok(assembled)
    }

    /// Converts every framework in the staged copy's `Frameworks` directory,
    /// directing results into `workspace`, then drops that directory.
    async fn process_nested_frameworks(
        &self,
        toolchain: &Toolchain,
        staged: &Framework,
        workspace: &Path,
        depth: usize,
    ) -> Result<Vec<AssembledBundle>> {
        let nested_dir = staged.nested_frameworks_dir();
        if !nested_dir.is_dir() {
            return Ok(Vec::new());
        }
        if self.settings.ignore_nested_frameworks() {
            log::debug!(
                "Leaving nested frameworks of {} untouched",
                staged.file_name()
            );
            return Ok(Vec::new());
        }

        log::info!("Processing nested frameworks of {}", staged.file_name());

        let mut assembled = Vec::new();
        for path in fs::list_with_extension(&nested_dir, FRAMEWORK_EXTENSION).await? {
            if !path.is_dir() {
                continue;
            }
            let nested = Framework::from_path(path)?;
            log::info!("Processing {}", nested.file_name());
            let bundles = self
                .convert_at_depth(toolchain, nested, workspace.to_path_buf(), depth + 1)
                .await?;
            assembled.extend(bundles);
        }

        fs::remove_dir_all(&nested_dir).await?;
        Ok(assembled)
    }
}

fn advance(framework: &Framework, state: &mut ConversionState, next: ConversionState) {
    log::debug!("{}: {:?} -> {:?}", framework.file_name(), state, next);
    *state = next;
}

/// Checks argument shapes without touching the filesystem.
fn validate_paths(input: &Path, output_dir: &Path) -> Result<Framework> {
    let framework = Framework::from_path(input)?;

    if output_dir.extension().is_some() {
        return Err(Error::InvalidPath {
            path: output_dir.to_path_buf(),
            reason: "output path must be a directory without an extension".into(),
        });
    }
    if output_dir.is_file() {
        return Err(Error::InvalidPath {
            path: output_dir.to_path_buf(),
            reason: "output path is an existing file".into(),
        });
    }
    if !input.is_dir() {
        return Err(Error::InvalidPath {
            path: input.to_path_buf(),
            reason: "input framework does not exist".into(),
        });
    }

    Ok(framework)
}

/// Moves every xcframework at the top level of `workspace` into `output_dir`.
///
/// With `replace_existing` an existing bundle with the same name in
/// `output_dir` is replaced; otherwise the collision is an error, since the
/// destination was produced earlier in the same conversion.
async fn relocate_bundles(
    workspace: &Path,
    output_dir: &Path,
    replace_existing: bool,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir, false).await?;

    log::debug!("Moving results to {}", output_dir.display());

    let mut moved = Vec::new();
    for bundle in fs::list_with_extension(workspace, XCFRAMEWORK_EXTENSION).await? {
        let Some(name) = bundle.file_name() else {
            continue;
        };
        let destination = output_dir.join(name);

        if tokio::fs::symlink_metadata(&destination).await.is_ok() {
            if !replace_existing {
                return Err(Error::DuplicateBundle { path: destination });
            }
            log::warn!("Replacing existing {}", destination.display());
            if destination.is_dir() {
                fs::remove_dir_all(&destination).await?;
            } else {
                fs::remove_file(&destination).await?;
            }
        }

        fs::move_dir(&bundle, &destination).await?;
        moved.push(destination);
    }

    Ok(moved)
}
