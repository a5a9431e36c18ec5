//! NDK STL prebuilts.
//!
//! STLs differ from platform prebuilts: they are not tied to a platform
//! version, and each flavor has its own directory layout.

use std::fmt;
use std::path::PathBuf;

use crate::core::errors::GraphError;
use crate::core::toolchain::ToolchainDescriptor;
use crate::prebuilt::strip_ndk_prefix;

/// The recognized STL flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StlFlavor {
    StlPort,
    LibCxx,
    GnuStl,
}

impl StlFlavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            StlFlavor::StlPort => "libstlport",
            StlFlavor::LibCxx => "libc++",
            StlFlavor::GnuStl => "libgnustl",
        }
    }

    /// Parse a flavor name; `module` is only used for the error.
    pub fn parse(module: &str, stl: &str) -> Result<Self, GraphError> {
        match stl {
            "libstlport" => Ok(StlFlavor::StlPort),
            "libc++" => Ok(StlFlavor::LibCxx),
            "libgnustl" => Ok(StlFlavor::GnuStl),
            _ => Err(GraphError::UnknownStl {
                module: module.to_string(),
                stl: stl.to_string(),
            }),
        }
    }

    /// Library directory relative to `<root>/sources`.
    pub fn lib_dir(&self, gcc_version: &str) -> PathBuf {
        match self {
            StlFlavor::StlPort => PathBuf::from("cxx-stl/stlport/libs"),
            StlFlavor::LibCxx => PathBuf::from("cxx-stl/llvm-libc++/libs"),
            StlFlavor::GnuStl => {
                PathBuf::from(format!("cxx-stl/gnu-libstdc++/{}/libs", gcc_version))
            }
        }
    }
}

impl fmt::Display for StlFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip `ndk_`, then a trailing `_shared`, then a trailing `_static`.
pub fn stl_base_name(module_name: &str) -> &str {
    let name = strip_ndk_prefix(module_name);
    let name = name.strip_suffix("_shared").unwrap_or(name);
    name.strip_suffix("_static").unwrap_or(name)
}

/// Resolves STL paths below an NDK root.
#[derive(Debug, Clone)]
pub struct StlPathResolver {
    root: PathBuf,
}

impl StlPathResolver {
    pub fn new(ndk_root: impl Into<PathBuf>) -> Self {
        StlPathResolver {
            root: ndk_root.into(),
        }
    }

    /// `<root>/sources/<flavor dir>/<abi>`
    pub fn stl_lib_dir(&self, toolchain: &ToolchainDescriptor, flavor: StlFlavor) -> PathBuf {
        self.root
            .join("sources")
            .join(flavor.lib_dir(&toolchain.gcc_version))
            .join(toolchain.arch.primary_abi())
    }

    /// Full path of an STL prebuilt.
    ///
    /// Fails with [`GraphError::UnknownStl`] before computing anything if
    /// `stl` is not a recognized flavor.
    pub fn resolve_stl_path(
        &self,
        module_name: &str,
        toolchain: &ToolchainDescriptor,
        stl: &str,
        is_static: bool,
    ) -> Result<PathBuf, GraphError> {
        let flavor = StlFlavor::parse(module_name, stl)?;

        let ext = if is_static {
            toolchain.static_lib_suffix.as_str()
        } else {
            toolchain.shlib_suffix.as_str()
        };
        let file_name = format!("{}{}", stl_base_name(module_name), ext);

        let path = self.stl_lib_dir(toolchain, flavor).join(file_name);
        tracing::debug!("resolved STL `{}` ({}) to {}", module_name, flavor, path.display());
        Ok(path)
    }
}
