//! Platform value objects - the fixed OpenSSL target matrix

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BcrError;

/// Operating system family of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Unix,
    Windows,
}

impl OsFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Unix => "unix",
            OsFamily::Windows => "windows",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OpenSSL configuration target
///
/// Platforms order by their configuration name, so the first entry of any
/// sorted collection is the lexicographically-first target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "darwin64-arm64-cc")]
    DarwinArm64,
    #[serde(rename = "darwin64-x86_64-cc")]
    DarwinX86_64,
    #[serde(rename = "linux-x86_64-clang")]
    LinuxX86_64Clang,
    #[serde(rename = "linux-aarch64")]
    LinuxAarch64,
    #[serde(rename = "VC-WIN64A-masm")]
    Win64AMasm,
    #[serde(rename = "VC-WIN64-CLANGASM-ARM")]
    Win64ClangAsmArm,
}

impl Platform {
    /// Unix targets, in release order
    pub const UNIX: [Platform; 4] = [
        Platform::DarwinArm64,
        Platform::DarwinX86_64,
        Platform::LinuxX86_64Clang,
        Platform::LinuxAarch64,
    ];

    /// Windows targets, in release order
    pub const WINDOWS: [Platform; 2] = [Platform::Win64AMasm, Platform::Win64ClangAsmArm];

    /// Every supported target; constants files are written for all of them
    pub const ALL: [Platform; 6] = [
        Platform::DarwinArm64,
        Platform::DarwinX86_64,
        Platform::LinuxX86_64Clang,
        Platform::LinuxAarch64,
        Platform::Win64AMasm,
        Platform::Win64ClangAsmArm,
    ];

    /// Name understood by OpenSSL's `Configure`
    pub fn config_name(&self) -> &'static str {
        match self {
            Platform::DarwinArm64 => "darwin64-arm64-cc",
            Platform::DarwinX86_64 => "darwin64-x86_64-cc",
            Platform::LinuxX86_64Clang => "linux-x86_64-clang",
            Platform::LinuxAarch64 => "linux-aarch64",
            Platform::Win64AMasm => "VC-WIN64A-masm",
            Platform::Win64ClangAsmArm => "VC-WIN64-CLANGASM-ARM",
        }
    }

    pub fn family(&self) -> OsFamily {
        match self {
            Platform::Win64AMasm | Platform::Win64ClangAsmArm => OsFamily::Windows,
            _ => OsFamily::Unix,
        }
    }

    pub fn arch(&self) -> &'static str {
        match self {
            Platform::DarwinArm64 => "arm64",
            Platform::DarwinX86_64 | Platform::LinuxX86_64Clang | Platform::Win64AMasm => "x86_64",
            Platform::LinuxAarch64 | Platform::Win64ClangAsmArm => "aarch64",
        }
    }

    pub fn toolchain(&self) -> &'static str {
        match self {
            Platform::DarwinArm64 | Platform::DarwinX86_64 => "cc",
            Platform::LinuxX86_64Clang => "clang",
            Platform::LinuxAarch64 => "gcc",
            Platform::Win64AMasm => "msvc-masm",
            Platform::Win64ClangAsmArm => "clang-cl",
        }
    }

    pub fn is_windows(&self) -> bool {
        self.family() == OsFamily::Windows
    }
}

impl Ord for Platform {
    fn cmp(&self, other: &Self) -> Ordering {
        self.config_name().cmp(other.config_name())
    }
}

impl PartialOrd for Platform {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}

impl FromStr for Platform {
    type Err = BcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .iter()
            .copied()
            .find(|p| p.config_name() == s)
            .ok_or_else(|| BcrError::UnknownPlatform {
                value: s.to_string(),
            })
    }
}

/// Host selection: which slice of the matrix this machine builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystem {
    Unix,
    Windows,
    /// Release flow: every platform, built with unix host conventions
    All,
}

impl OperatingSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingSystem::Unix => "unix",
            OperatingSystem::Windows => "windows",
            OperatingSystem::All => "all",
        }
    }

    /// Platforms configured on this host
    pub fn platforms(&self) -> &'static [Platform] {
        match self {
            OperatingSystem::Unix => &Platform::UNIX,
            OperatingSystem::Windows => &Platform::WINDOWS,
            OperatingSystem::All => &Platform::ALL,
        }
    }

    /// Host family whose tool conventions apply
    pub fn host_family(&self) -> OsFamily {
        match self {
            OperatingSystem::Windows => OsFamily::Windows,
            OperatingSystem::Unix | OperatingSystem::All => OsFamily::Unix,
        }
    }

    pub fn make_program(&self) -> &'static str {
        match self.host_family() {
            OsFamily::Windows => "nmake",
            OsFamily::Unix => "make",
        }
    }

    /// Leading words of the `Configure` invocation for `platform`
    ///
    /// Windows builds of Windows targets disable assembly: the MSVC
    /// assembler used by Bazel does not match the one OpenSSL expects.
    pub fn configure_prefix(&self, platform: Platform) -> Vec<&'static str> {
        match self.host_family() {
            OsFamily::Windows if platform.is_windows() => vec!["perl", "Configure", "no-asm"],
            OsFamily::Windows => vec!["perl", "Configure"],
            OsFamily::Unix => vec!["./Configure"],
        }
    }

    /// Whether archives get owner/group/mtime normalisation
    pub fn normalizes_archives(&self) -> bool {
        self.host_family() == OsFamily::Unix
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatingSystem {
    type Err = BcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unix" | "nix" => Ok(OperatingSystem::Unix),
            "windows" => Ok(OperatingSystem::Windows),
            "all" => Ok(OperatingSystem::All),
            _ => Err(BcrError::UnknownOperatingSystem {
                value: s.to_string(),
            }),
        }
    }
}
