//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with proper
//! validation and conversion into bundler [`Settings`].

use crate::bundler::{DEFAULT_MAX_NESTING_DEPTH, Result, Settings, SettingsBuilder};
use crate::manifest::DEFAULT_SWIFT_VERSION;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Converts fat frameworks into xcframeworks
#[derive(Parser, Debug)]
#[command(
    name = "xcframework-builder",
    version,
    about = "Converts fat frameworks into xcframeworks",
    long_about = "Splits a multi-architecture .framework into per-platform slices with lipo \
and combines them into a .xcframework with xcodebuild. Frameworks embedded under Frameworks/ \
are converted as well.

Usage:
  xcframework-builder builder --framework-input-path Build/Foo.framework --output-path xcframeworks
  xcframework-builder spm --framework-name Foo --framework-path xcframeworks --output-path Package

Exit code 0 = every xcframework exists in the output directory."
)]
pub struct Args {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a fat framework into xcframeworks
    Builder(BuilderArgs),
    /// Generate a Package.swift for converted xcframeworks
    Spm(SpmArgs),
}

/// Arguments of the `builder` subcommand
#[derive(clap::Args, Debug)]
pub struct BuilderArgs {
    /// Fat framework to convert (must end in .framework)
    #[arg(long, value_name = "PATH")]
    pub framework_input_path: PathBuf,

    /// Directory receiving the xcframeworks (must not have an extension)
    #[arg(long, value_name = "DIR")]
    pub output_path: PathBuf,

    /// Print debugging output and keep the working directory
    #[arg(short, long, alias = "debug")]
    pub verbose: bool,

    /// Leave frameworks under Frameworks/ untouched
    #[arg(long)]
    pub ignore_nested_frameworks: bool,

    /// Remove the input framework after a successful conversion
    #[arg(long)]
    pub delete_input_on_success: bool,

    /// Deepest nesting level that is converted
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    pub max_nesting_depth: usize,

    /// Parent directory of the working directory
    #[arg(long, value_name = "DIR", env = "XCFRAMEWORK_BUILDER_SCRATCH_DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// lipo executable to use instead of the one on PATH
    #[arg(long, value_name = "PATH", env = "XCFRAMEWORK_BUILDER_LIPO")]
    pub lipo: Option<PathBuf>,

    /// xcodebuild executable to use instead of the one on PATH
    #[arg(long, value_name = "PATH", env = "XCFRAMEWORK_BUILDER_XCODEBUILD")]
    pub xcodebuild: Option<PathBuf>,

    /// Print the conversion report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments of the `spm` subcommand
#[derive(clap::Args, Debug)]
pub struct SpmArgs {
    /// Package and library product name
    #[arg(long, value_name = "NAME")]
    pub framework_name: String,

    /// Directory of xcframeworks, or a single .xcframework
    #[arg(long, value_name = "PATH")]
    pub framework_path: PathBuf,

    /// Directory receiving Package.swift
    #[arg(long, value_name = "DIR")]
    pub output_path: PathBuf,

    /// swift-tools-version of the manifest
    #[arg(long, value_name = "VERSION", default_value = DEFAULT_SWIFT_VERSION)]
    pub swift_version: String,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether debug logging was requested
    pub fn verbose(&self) -> bool {
        match &self.command {
            Command::Builder(args) => args.verbose,
            Command::Spm(_) => false,
        }
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Command::Spm(args) = &self.command {
            if args.framework_name.trim().is_empty() {
                return Err("Framework name cannot be empty".to_string());
            }
            if args.swift_version.trim().is_empty() {
                return Err("Swift version cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

impl BuilderArgs {
    /// Builds conversion settings from the flags.
    pub fn settings(&self) -> Result<Settings> {
        let mut builder = SettingsBuilder::new()
            .keep_workspace(self.verbose)
            .ignore_nested_frameworks(self.ignore_nested_frameworks)
            .delete_input_on_success(self.delete_input_on_success)
            .max_nesting_depth(self.max_nesting_depth);

        if let Some(dir) = &self.scratch_dir {
            builder = builder.scratch_root(dir);
        }
        if let Some(lipo) = &self.lipo {
            builder = builder.lipo(lipo);
        }
        if let Some(xcodebuild) = &self.xcodebuild {
            builder = builder.xcodebuild(xcodebuild);
        }

        builder.build()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    json: bool,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let json = match &args.command {
            Command::Builder(args) => args.json,
            Command::Spm(_) => false,
        };

        Self { json }
    }
}

impl RuntimeConfig {
    /// Whether results are printed as JSON
    pub fn json(&self) -> bool {
        self.json
    }

    /// Print success message unless JSON output was requested
    pub fn success_println(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }
}
