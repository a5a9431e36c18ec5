//! Configuration file support.
//!
//! Two locations are read:
//! - Global: `~/.ndkgraph/config.toml` - user-wide defaults
//! - Project: `.ndkgraph/config.toml` - overrides for one source tree
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default location of the NDK prebuilts, relative to the source root.
pub const DEFAULT_NDK_ROOT: &str = "prebuilts/ndk/current";

/// Platform version used when a module declares no `sdk_version`.
pub const DEFAULT_PLATFORM_VERSION: &str = "21";

pub const DEFAULT_GCC_VERSION: &str = "4.9";

pub const DEFAULT_OUT_DIR: &str = "out";

/// ndkgraph configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ndk: NdkConfig,
    pub toolchain: ToolchainConfig,
    pub build: BuildConfig,
}

/// Where prebuilts live and which platform they target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NdkConfig {
    /// NDK root (e.g., prebuilts/ndk/current)
    pub root: Option<PathBuf>,

    /// Default platform version for modules without `sdk_version`
    pub platform_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// GCC version used by the gnustl layout
    pub gcc_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output directory for compiled intermediates
    pub out_dir: Option<PathBuf>,

    /// Worker threads for the variant pass (None = rayon default)
    pub jobs: Option<usize>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration, falling back to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.ndk.root.is_some() {
            self.ndk.root = other.ndk.root;
        }
        if other.ndk.platform_version.is_some() {
            self.ndk.platform_version = other.ndk.platform_version;
        }
        if other.toolchain.gcc_version.is_some() {
            self.toolchain.gcc_version = other.toolchain.gcc_version;
        }
        if other.build.out_dir.is_some() {
            self.build.out_dir = other.build.out_dir;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
    }

    pub fn ndk_root(&self) -> PathBuf {
        self.ndk
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_NDK_ROOT))
    }

    pub fn platform_version(&self) -> &str {
        self.ndk
            .platform_version
            .as_deref()
            .unwrap_or(DEFAULT_PLATFORM_VERSION)
    }

    pub fn gcc_version(&self) -> &str {
        self.toolchain
            .gcc_version
            .as_deref()
            .unwrap_or(DEFAULT_GCC_VERSION)
    }

    pub fn out_dir(&self) -> PathBuf {
        self.build
            .out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR))
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.ndkgraph/config.toml)
/// 2. Global config (~/.ndkgraph/config.toml)
/// 3. Defaults
pub fn load_config(project_root: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_config_path() {
        config.merge(Config::load_or_default(&global_path));
    }

    config.merge(Config::load_or_default(&project_config_path(project_root)));

    config
}

/// Get the global config directory (~/.ndkgraph).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".ndkgraph"))
}

pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".ndkgraph").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ndk_root(), PathBuf::from("prebuilts/ndk/current"));
        assert_eq!(config.platform_version(), "21");
        assert_eq!(config.gcc_version(), "4.9");
        assert_eq!(config.out_dir(), PathBuf::from("out"));
    }

    #[test]
    fn test_parse_and_merge() {
        let mut global: Config = toml::from_str(
            r#"
            [ndk]
            root = "/opt/ndk"
            platform_version = "19"

            [build]
            jobs = 4
            "#,
        )
        .unwrap();

        let project: Config = toml::from_str(
            r#"
            [ndk]
            platform_version = "24"

            [toolchain]
            gcc_version = "4.8"
            "#,
        )
        .unwrap();

        global.merge(project);

        assert_eq!(global.ndk_root(), PathBuf::from("/opt/ndk"));
        assert_eq!(global.platform_version(), "24");
        assert_eq!(global.gcc_version(), "4.8");
        assert_eq!(global.build.jobs, Some(4));
    }

    #[test]
    fn test_load_or_default_on_broken_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[ndk\nroot = ").unwrap();

        let config = Config::load_or_default(&path);
        assert!(config.ndk.root.is_none());
    }

    #[test]
    fn test_project_config_overrides() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join(".ndkgraph");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "[build]\nout_dir = \"build\"\n").unwrap();

        let config = load_config(tmp.path());
        assert_eq!(config.out_dir(), PathBuf::from("build"));
    }
}
