//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// ndkgraph - split C/C++ libraries into variants and locate NDK prebuilts
#[derive(Parser)]
#[command(name = "ndkgraph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// NDK root (overrides `ndk.root` from config)
    #[arg(long, global = true, env = "NDKGRAPH_NDK_ROOT")]
    pub ndk_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split every module in a blueprint and resolve its link outputs
    Plan(PlanArgs),

    /// Resolve the path of a single NDK prebuilt
    Path(PathArgs),

    /// Show the toolchain descriptor for an architecture
    Toolchain(ToolchainArgs),
}

#[derive(Args)]
pub struct PlanArgs {
    /// Path to Blueprint.toml (searched upwards from the current directory by default)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Target architecture (overrides `[target] arch`)
    #[arg(long)]
    pub arch: Option<String>,

    /// Emit the plan as JSON
    #[arg(long)]
    pub json: bool,
}

/// Prebuilt category for `ndkgraph path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrebuiltArg {
    Library,
    Object,
    Stl,
}

#[derive(Args)]
pub struct PathArgs {
    /// Module name (e.g., ndk_libc.so.21, ndk_libc++_shared)
    pub module: String,

    /// Target architecture
    #[arg(long)]
    pub arch: String,

    /// What kind of prebuilt the module is
    #[arg(long, value_enum, default_value = "library")]
    pub kind: PrebuiltArg,

    /// Platform version (overrides `ndk.platform_version`)
    #[arg(long)]
    pub sdk: Option<String>,

    /// Resolve the static variant instead of the shared one
    #[arg(long = "static")]
    pub is_static: bool,

    /// STL flavor (derived from the module name by default)
    #[arg(long)]
    pub stl: Option<String>,

    /// GCC version (overrides `toolchain.gcc_version`)
    #[arg(long)]
    pub gcc_version: Option<String>,
}

#[derive(Args)]
pub struct ToolchainArgs {
    /// Target architecture
    #[arg(long)]
    pub arch: String,

    /// GCC version (overrides `toolchain.gcc_version`)
    #[arg(long)]
    pub gcc_version: Option<String>,
}
