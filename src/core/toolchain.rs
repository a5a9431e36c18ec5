//! Architecture and toolchain facts used to name and locate artifacts.
//!
//! Toolchain discovery is not done here; a descriptor is built from a known
//! architecture plus the configured compiler version.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Static archive extension, shared by every NDK toolchain.
pub const STATIC_LIBRARY_EXTENSION: &str = ".a";

/// Object file extension for prebuilt CRT objects.
pub const OBJECT_EXTENSION: &str = ".o";

/// Android target architectures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchType {
    Arm,
    Arm64,
    X86,
    #[serde(rename = "x86_64")]
    X86_64,
    Mips,
    Mips64,
}

impl ArchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchType::Arm => "arm",
            ArchType::Arm64 => "arm64",
            ArchType::X86 => "x86",
            ArchType::X86_64 => "x86_64",
            ArchType::Mips => "mips",
            ArchType::Mips64 => "mips64",
        }
    }

    pub fn is_64bit(&self) -> bool {
        matches!(self, ArchType::Arm64 | ArchType::X86_64 | ArchType::Mips64)
    }

    /// The ABI an architecture builds for when none is configured.
    pub fn default_abi(&self) -> &'static str {
        match self {
            ArchType::Arm => "armeabi-v7a",
            ArchType::Arm64 => "arm64-v8a",
            ArchType::X86 => "x86",
            ArchType::X86_64 => "x86_64",
            ArchType::Mips => "mips",
            ArchType::Mips64 => "mips64",
        }
    }
}

impl fmt::Display for ArchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing an architecture name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown architecture `{0}` (expected one of: arm, arm64, x86, x86_64, mips, mips64)")]
pub struct ArchParseError(String);

impl FromStr for ArchType {
    type Err = ArchParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arm" => Ok(ArchType::Arm),
            "arm64" | "aarch64" => Ok(ArchType::Arm64),
            "x86" | "i686" => Ok(ArchType::X86),
            "x86_64" => Ok(ArchType::X86_64),
            "mips" => Ok(ArchType::Mips),
            "mips64" => Ok(ArchType::Mips64),
            other => Err(ArchParseError(other.to_string())),
        }
    }
}

/// A target architecture with its ABI list, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arch {
    pub arch_type: ArchType,
    #[serde(default)]
    pub abi: Vec<String>,
}

impl Arch {
    pub fn new(arch_type: ArchType) -> Self {
        Arch {
            arch_type,
            abi: vec![arch_type.default_abi().to_string()],
        }
    }

    pub fn with_abi(mut self, abi: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.abi = abi.into_iter().map(Into::into).collect();
        self
    }

    /// The ABI directory prebuilts are laid out under.
    pub fn primary_abi(&self) -> &str {
        self.abi
            .first()
            .map(String::as_str)
            .unwrap_or_else(|| self.arch_type.default_abi())
    }
}

/// Compiler facts needed to name and locate prebuilt artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainDescriptor {
    /// Toolchain name as used in `arch-<name>` directories
    pub name: String,
    pub arch: Arch,
    pub is_64bit: bool,
    pub gcc_version: String,
    /// Shared library suffix including the dot (e.g., ".so")
    pub shlib_suffix: String,
    /// Static library suffix including the dot (e.g., ".a")
    pub static_lib_suffix: String,
}

impl ToolchainDescriptor {
    /// The NDK toolchain for an architecture.
    pub fn for_arch(arch: Arch, gcc_version: impl Into<String>) -> Self {
        let arch_type = arch.arch_type;
        ToolchainDescriptor {
            name: arch_type.as_str().to_string(),
            arch,
            is_64bit: arch_type.is_64bit(),
            gcc_version: gcc_version.into(),
            shlib_suffix: ".so".to_string(),
            static_lib_suffix: STATIC_LIBRARY_EXTENSION.to_string(),
        }
    }

    pub fn arch_type(&self) -> ArchType {
        self.arch.arch_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arch() {
        assert_eq!("arm64".parse::<ArchType>().unwrap(), ArchType::Arm64);
        assert_eq!("aarch64".parse::<ArchType>().unwrap(), ArchType::Arm64);
        assert_eq!("x86_64".parse::<ArchType>().unwrap(), ArchType::X86_64);
        assert!("riscv64".parse::<ArchType>().is_err());
    }

    #[test]
    fn test_toolchain_for_arch() {
        let tc = ToolchainDescriptor::for_arch(Arch::new(ArchType::X86_64), "4.9");
        assert_eq!(tc.name, "x86_64");
        assert!(tc.is_64bit);
        assert_eq!(tc.shlib_suffix, ".so");
        assert_eq!(tc.static_lib_suffix, ".a");

        let tc = ToolchainDescriptor::for_arch(Arch::new(ArchType::Arm), "4.9");
        assert!(!tc.is_64bit);
        assert_eq!(tc.arch.primary_abi(), "armeabi-v7a");
    }

    #[test]
    fn test_primary_abi_falls_back_when_empty() {
        let arch = Arch::new(ArchType::Arm).with_abi(Vec::<String>::new());
        assert_eq!(arch.primary_abi(), "armeabi-v7a");

        let arch = Arch::new(ArchType::Arm).with_abi(["armeabi", "armeabi-v7a"]);
        assert_eq!(arch.primary_abi(), "armeabi");
    }
}
