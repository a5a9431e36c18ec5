//! `ndkgraph toolchain` command

use anyhow::Result;

use super::{config_for, current_dir, parse_arch, toolchain_for};
use crate::cli::ToolchainArgs;
use ndkgraph::prebuilt::lib_dir_suffix;

pub fn execute(args: ToolchainArgs) -> Result<()> {
    let config = config_for(&current_dir()?, None);
    let arch = parse_arch(&args.arch)?;
    let tc = toolchain_for(arch, args.gcc_version.as_deref(), &config);

    println!("Toolchain:");
    println!();
    println!("  Name:          {}", tc.name);
    println!("  Arch:          {}", tc.arch_type());
    println!("  ABI:           {}", tc.arch.primary_abi());
    println!("  64-bit:        {}", tc.is_64bit);
    println!("  GCC version:   {}", tc.gcc_version);
    println!("  Shared suffix: {}", tc.shlib_suffix);
    println!("  Static suffix: {}", tc.static_lib_suffix);
    println!("  Library dir:   usr/lib{}", lib_dir_suffix(&tc));

    Ok(())
}
