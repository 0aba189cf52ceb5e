//! xcframework-builder - converts fat frameworks into xcframeworks.
//!
//! This binary slices a multi-architecture `.framework` per platform with
//! `lipo`, assembles the slices with `xcodebuild`, and can generate a Swift
//! Package manifest for the results.

use std::process;
use xcframework_builder::cli;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse_args();

    // Initialize logging; RUST_LOG takes precedence over the default level
    let default_level = if args.verbose() { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Run CLI and get exit code
    let exit_code = match cli::run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
