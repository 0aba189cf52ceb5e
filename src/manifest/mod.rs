//! Swift Package manifest generation.
//!
//! Generates a `Package.swift` exposing converted xcframeworks as binary
//! targets of a single library product, rendered with Handlebars.

use crate::{
    bundler::{framework::XCFRAMEWORK_EXTENSION, utils::fs},
    error::{CliError, Result},
};
use handlebars::Handlebars;
use std::path::{Path, PathBuf};

/// Default `swift-tools-version` written to the manifest.
pub const DEFAULT_SWIFT_VERSION: &str = "5.5";

/// Name of the generated manifest file.
pub const MANIFEST_FILE_NAME: &str = "Package.swift";

const PACKAGE_TEMPLATE: &str = r#"// swift-tools-version:{{swift_version}}
// The swift-tools-version declares the minimum version of Swift required to build this package.

import PackageDescription

let package = Package(
    name: "{{name}}",
    products: [
        .library(
            name: "{{name}}",
            targets: [
{{#each targets}}
                "{{this}}",
{{/each}}
            ])
    ],
    targets: [
{{#each targets}}
        .binaryTarget(name: "{{this}}", path: "{{this}}.xcframework"),
{{/each}}
    ]
)
"#;

/// Collects binary target names from `framework_path`.
///
/// A path without an extension is read as a directory and every
/// `*.xcframework` at its top level becomes a target, in name order.
/// Otherwise the path itself must be an xcframework.
pub async fn collect_binary_targets(framework_path: &Path) -> Result<Vec<String>> {
    let frameworks = match framework_path.extension() {
        None => fs::list_with_extension(framework_path, XCFRAMEWORK_EXTENSION).await?,
        Some(ext) if ext == XCFRAMEWORK_EXTENSION => vec![framework_path.to_path_buf()],
        Some(_) => {
            return Err(CliError::InvalidArguments {
                reason: format!(
                    "{} is neither a directory nor an .xcframework",
                    framework_path.display()
                ),
            }
            .into());
        }
    };

    let targets: Vec<String> = frameworks
        .iter()
        .filter_map(|path| path.file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .collect();

    if targets.is_empty() {
        return Err(CliError::InvalidArguments {
            reason: format!("no xcframeworks found at {}", framework_path.display()),
        }
        .into());
    }

    Ok(targets)
}

/// Renders the manifest text for `name` with one binary target per entry.
pub fn render_package_manifest(
    name: &str,
    swift_version: &str,
    targets: &[String],
) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    let data = serde_json::json!({
        "name": name,
        "swift_version": swift_version,
        "targets": targets,
    });

    Ok(handlebars.render_template(PACKAGE_TEMPLATE, &data)?)
}

/// Writes `<output_dir>/Package.swift` for the xcframeworks at `framework_path`.
///
/// # Returns
/// Path to the generated manifest
pub async fn generate_package_manifest(
    name: &str,
    swift_version: &str,
    framework_path: &Path,
    output_dir: &Path,
) -> Result<PathBuf> {
    let targets = collect_binary_targets(framework_path).await?;
    let manifest = render_package_manifest(name, swift_version, &targets)?;

    fs::create_dir_all(output_dir, false).await?;
    let manifest_path = output_dir.join(MANIFEST_FILE_NAME);
    tokio::fs::write(&manifest_path, manifest).await?;

    log::info!(
        "Wrote {} with {} binary target(s)",
        manifest_path.display(),
        targets.len()
    );

    Ok(manifest_path)
}
