//! Shared fixtures for integration tests.
//!
//! [`FakeToolchain`] stands in for `lipo` and `xcodebuild` on plain-text
//! "binaries" of the form `fat:<arch> <arch> ...`, so the whole pipeline runs
//! on any host.

#![allow(dead_code)]

use std::{
    ffi::{OsStr, OsString},
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};
use xcframework_builder::bundler::{CommandOutput, CommandRunner};

const FAT_PREFIX: &str = "fat:";

/// Simulated Xcode command line tools.
#[derive(Default)]
pub struct FakeToolchain {
    missing: Vec<&'static str>,
    fail_extract: bool,
    fail_assembly: bool,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `tool` unresolvable.
    pub fn without(mut self, tool: &'static str) -> Self {
        self.missing.push(tool);
        self
    }

    /// Makes every `lipo -extract` exit with status 1.
    pub fn failing_extract(mut self) -> Self {
        self.fail_extract = true;
        self
    }

    /// Makes `xcodebuild` exit with status 70 after writing partial output.
    pub fn failing_assembly(mut self) -> Self {
        self.fail_assembly = true;
        self
    }

    /// Recorded invocations: tool name followed by arguments.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    fn lipo(&self, args: &[String]) -> CommandOutput {
        match args {
            [flag, binary] if flag == "-info" => match read_fat(Path::new(binary)) {
                Some(archs) => ok(&format!(
                    "Architectures in the fat file: {binary} are: {}",
                    archs.join(" ")
                )),
                None => failure(
                    1,
                    &format!("fatal error: lipo: can't figure out the architecture type of: {binary}"),
                ),
            },
            [binary, flag] if flag == "-archs" => match read_fat(Path::new(binary)) {
                Some(archs) => ok(&format!("{}\n", archs.join(" "))),
                None => failure(1, "fatal error: lipo: not a fat file"),
            },
            [binary, flag, output, rest @ ..] if flag == "-output" => {
                if self.fail_extract {
                    return failure(1, "fatal error: lipo: simulated extraction failure");
                }
                let Some(available) = read_fat(Path::new(binary)) else {
                    return failure(1, "fatal error: lipo: not a fat file");
                };
                let requested: Vec<&String> = rest
                    .chunks(2)
                    .filter(|pair| pair[0] == "-extract")
                    .map(|pair| &pair[1])
                    .collect();
                if let Some(arch) = requested.iter().find(|arch| !available.contains(**arch)) {
                    return failure(
                        1,
                        &format!("fatal error: lipo: {binary} does not contain the specified architecture {arch}"),
                    );
                }
                let content = requested
                    .iter()
                    .map(|arch| arch.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                fs::write(output, format!("{FAT_PREFIX}{content}")).unwrap();
                ok("")
            }
            _ => failure(1, "lipo: unsupported invocation"),
        }
    }

    fn xcodebuild(&self, args: &[String]) -> CommandOutput {
        let [create, flag, output, rest @ ..] = args else {
            return failure(64, "xcodebuild: unsupported invocation");
        };
        if create != "-create-xcframework" || flag != "-output" {
            return failure(64, "xcodebuild: unsupported invocation");
        }

        let output = Path::new(output);
        if output.exists() {
            return failure(
                70,
                &format!("error: the path does not point to a valid xcframework: {}", output.display()),
            );
        }
        fs::create_dir_all(output).unwrap();
        if self.fail_assembly {
            fs::write(output.join("partial"), b"").unwrap();
            return failure(70, "error: simulated assembly failure");
        }

        let mut identifiers = Vec::new();
        for pair in rest.chunks(2) {
            let framework = Path::new(&pair[1]);
            let platform = framework.parent().unwrap().file_name().unwrap();
            let destination = output.join(platform).join(framework.file_name().unwrap());
            copy_tree(framework, &destination).unwrap();
            identifiers.push(platform.to_string_lossy().into_owned());
        }
        fs::write(output.join("Info.plist"), identifiers.join("\n")).unwrap();

        ok(&format!("xcframework successfully written out to: {}", output.display()))
    }
}

impl CommandRunner for FakeToolchain {
    async fn run(&self, program: &Path, args: &[OsString]) -> io::Result<CommandOutput> {
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let tool = program
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut call = vec![tool.clone()];
        call.extend(args.iter().cloned());
        self.calls.lock().unwrap().push(call);

        match tool.as_str() {
            "lipo" => Ok(self.lipo(&args)),
            "xcodebuild" => Ok(self.xcodebuild(&args)),
            _ => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }

    fn locate(&self, program: &OsStr) -> Option<PathBuf> {
        let path = PathBuf::from(program);
        let name = path.file_name()?.to_string_lossy().into_owned();
        if self.missing.iter().any(|tool| *tool == name) {
            None
        } else {
            Some(path)
        }
    }
}

fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        exit_code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

fn failure(code: i32, stderr: &str) -> CommandOutput {
    CommandOutput {
        exit_code: Some(code),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

/// Architectures recorded in a fake binary, `None` if it is not one.
pub fn read_fat(path: &Path) -> Option<Vec<String>> {
    let content = fs::read_to_string(path).ok()?;
    let archs = content.strip_prefix(FAT_PREFIX)?;
    Some(archs.split_whitespace().map(str::to_string).collect())
}

/// Creates `<dir>/<name>.framework` whose binary holds `archs`.
pub fn make_framework(dir: &Path, name: &str, archs: &str) -> PathBuf {
    let framework = dir.join(format!("{name}.framework"));
    fs::create_dir_all(framework.join("Headers")).unwrap();
    fs::write(framework.join(name), format!("{FAT_PREFIX}{archs}")).unwrap();
    fs::write(framework.join("Info.plist"), format!("<plist>{name}</plist>")).unwrap();
    fs::write(framework.join(format!("Headers/{name}.h")), "// header").unwrap();
    framework
}

/// Embeds `<name>.framework` under `<framework>/Frameworks`.
pub fn embed_framework(framework: &Path, name: &str, archs: &str) -> PathBuf {
    make_framework(&framework.join("Frameworks"), name, archs)
}

/// Entries of `dir`, empty if it does not exist.
pub fn entries(dir: &Path) -> Vec<String> {
    let Ok(read) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = read
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn copy_tree(from: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}
