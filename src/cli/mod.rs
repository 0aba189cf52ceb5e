//! Command line interface for xcframework builder.
//!
//! This module provides the CLI for conversion and manifest generation,
//! with argument parsing, command execution, and user feedback.

mod args;

pub use args::{Args, BuilderArgs, Command, RuntimeConfig, SpmArgs};

use crate::bundler::{ErrorExt, XcframeworkBuilder};
use crate::error::{CliError, Result};
use crate::manifest;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Main CLI entry point
pub async fn run(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);

    match &args.command {
        Command::Builder(builder) => run_builder(builder, &config).await,
        Command::Spm(spm) => run_spm(spm, &config).await,
    }
}

async fn run_builder(args: &BuilderArgs, config: &RuntimeConfig) -> Result<i32> {
    let settings = args.settings()?;
    let input = absolute(&args.framework_input_path)?;
    let output = absolute(&args.output_path)?;

    let report = XcframeworkBuilder::new(settings)
        .convert(&input, &output)
        .await?;

    if config.json() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for artifact in &report.artifacts {
            config.success_println(&format!("Created {}", artifact.path.display()));
        }
    }

    Ok(0)
}

async fn run_spm(args: &SpmArgs, config: &RuntimeConfig) -> Result<i32> {
    let framework_path = absolute(&args.framework_path)?;
    let output = absolute(&args.output_path)?;

    let manifest = manifest::generate_package_manifest(
        &args.framework_name,
        &args.swift_version,
        &framework_path,
        &output,
    )
    .await?;

    config.success_println(&format!("Created {}", manifest.display()));
    Ok(0)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("failed to resolve path", path)?
        .into_owned())
}
