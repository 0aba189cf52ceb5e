//! CPU architecture and target platform catalog.

use serde::Serialize;
use std::{fmt, str::FromStr};

/// CPU architecture embedded in a fat framework binary.
///
/// The set is closed: tokens reported by `lipo` that do not name one of these
/// variants never become an `Architecture` and are skipped by the inspector.
///
/// # Examples
///
/// ```
/// use xcframework_builder::bundler::{Architecture, Platform, platform_of};
///
/// let arch: Architecture = "x86_64".parse().unwrap();
/// assert_eq!(platform_of(arch), Platform::Simulator);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    /// 64-bit ARM, device builds
    Arm64,
    /// 64-bit ARM with pointer authentication
    Arm64e,
    /// 32-bit Intel, legacy simulator builds
    I386,
    /// 64-bit Intel, simulator builds
    X86_64,
}

impl Architecture {
    /// Every supported architecture, in declaration order.
    pub const ALL: [Architecture; 4] = [
        Architecture::Arm64,
        Architecture::Arm64e,
        Architecture::I386,
        Architecture::X86_64,
    ];

    /// Token used by `lipo` for this architecture.
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::Arm64 => "arm64",
            Architecture::Arm64e => "arm64e",
            Architecture::I386 => "i386",
            Architecture::X86_64 => "x86_64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token that does not name a supported architecture.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported architecture `{0}`")]
pub struct UnknownArchitecture(pub String);

impl FromStr for Architecture {
    type Err = UnknownArchitecture;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Architecture::ALL
            .into_iter()
            .find(|arch| arch.as_str() == token)
            .ok_or_else(|| UnknownArchitecture(token.to_string()))
    }
}

/// Execution environment a platform slice targets.
///
/// Ordering follows declaration order and fixes the layout of platform
/// directories inside the scratch workspace.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
pub enum Platform {
    /// Physical iOS devices
    #[serde(rename = "iOS")]
    Ios,
    /// iOS simulator on Intel hosts
    #[serde(rename = "simulator")]
    Simulator,
    /// macOS
    #[serde(rename = "mac")]
    Mac,
}

impl Platform {
    /// Directory name used for this platform's slice.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Simulator => "simulator",
            Platform::Mac => "mac",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Platform an architecture's slice belongs to.
pub fn platform_of(arch: Architecture) -> Platform {
    match arch {
        Architecture::Arm64 => Platform::Ios,
        Architecture::Arm64e => Platform::Mac,
        Architecture::I386 | Architecture::X86_64 => Platform::Simulator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_architecture_has_a_platform() {
        for arch in Architecture::ALL {
            assert_eq!(platform_of(arch), platform_of(arch));
        }
        assert_eq!(platform_of(Architecture::Arm64), Platform::Ios);
        assert_eq!(platform_of(Architecture::Arm64e), Platform::Mac);
        assert_eq!(platform_of(Architecture::I386), Platform::Simulator);
        assert_eq!(platform_of(Architecture::X86_64), Platform::Simulator);
    }

    #[test]
    fn parses_lipo_tokens() {
        for arch in Architecture::ALL {
            assert_eq!(arch.as_str().parse::<Architecture>(), Ok(arch));
        }
        assert_eq!(
            "armv7".parse::<Architecture>(),
            Err(UnknownArchitecture("armv7".into()))
        );
        assert!("ARM64".parse::<Architecture>().is_err());
    }

    #[test]
    fn platform_dir_names_are_stable() {
        assert_eq!(Platform::Ios.to_string(), "iOS");
        assert_eq!(Platform::Simulator.to_string(), "simulator");
        assert_eq!(Platform::Mac.to_string(), "mac");
        assert!(Platform::Ios < Platform::Simulator && Platform::Simulator < Platform::Mac);
    }
}
