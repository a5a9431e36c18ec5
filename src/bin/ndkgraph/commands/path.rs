//! `ndkgraph path` command

use std::path::PathBuf;

use anyhow::Result;

use super::{config_for, current_dir, parse_arch, toolchain_for};
use crate::cli::{PathArgs, PrebuiltArg};
use ndkgraph::core::toolchain::OBJECT_EXTENSION;
use ndkgraph::prebuilt::stl::stl_base_name;
use ndkgraph::prebuilt::{
    check_prefix, PrebuiltPathResolver, StlPathResolver, NDK_CRT_PREFIX, NDK_LIB_PREFIX,
    NDK_PREFIX,
};

pub fn execute(args: PathArgs, ndk_root: Option<PathBuf>) -> Result<()> {
    let config = config_for(&current_dir()?, ndk_root);
    let arch = parse_arch(&args.arch)?;
    let tc = toolchain_for(arch, args.gcc_version.as_deref(), &config);
    let version = args
        .sdk
        .as_deref()
        .unwrap_or_else(|| config.platform_version());
    let name = args.module.as_str();

    let path = match args.kind {
        PrebuiltArg::Library => {
            check_prefix(name, NDK_PREFIX)?;
            let ext = if args.is_static {
                &tc.static_lib_suffix
            } else {
                &tc.shlib_suffix
            };
            PrebuiltPathResolver::new(config.ndk_root()).resolve_path(name, &tc, version, ext)
        }
        PrebuiltArg::Object => {
            check_prefix(name, NDK_CRT_PREFIX)?;
            PrebuiltPathResolver::new(config.ndk_root()).resolve_path(
                name,
                &tc,
                version,
                OBJECT_EXTENSION,
            )
        }
        PrebuiltArg::Stl => {
            check_prefix(name, NDK_LIB_PREFIX)?;
            let flavor = args.stl.as_deref().unwrap_or_else(|| stl_base_name(name));
            StlPathResolver::new(config.ndk_root()).resolve_stl_path(
                name,
                &tc,
                flavor,
                args.is_static,
            )?
        }
    };

    println!("{}", path.display());
    Ok(())
}
