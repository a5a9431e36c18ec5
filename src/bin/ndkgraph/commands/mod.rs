//! Command implementations

pub mod path;
pub mod plan;
pub mod toolchain;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use ndkgraph::core::toolchain::{Arch, ArchType};
use ndkgraph::util::config::load_config;
use ndkgraph::{Config, ToolchainDescriptor};

/// Load config for `project_root`, applying a `--ndk-root` override.
fn config_for(project_root: &Path, ndk_root: Option<PathBuf>) -> Config {
    let mut config = load_config(project_root);
    if ndk_root.is_some() {
        config.ndk.root = ndk_root;
    }
    config
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("failed to determine current directory")
}

fn parse_arch(arch: &str) -> Result<ArchType> {
    arch.parse::<ArchType>().map_err(Into::into)
}

fn toolchain_for(
    arch: ArchType,
    gcc_version: Option<&str>,
    config: &Config,
) -> ToolchainDescriptor {
    ToolchainDescriptor::for_arch(
        Arch::new(arch),
        gcc_version.unwrap_or_else(|| config.gcc_version()),
    )
}
