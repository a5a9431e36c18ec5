//! NDK prebuilt path resolution.
//!
//! Prebuilts are never built; linking one only computes where it already
//! lives. Platform libraries and CRT objects sit under
//! `<root>/platforms/android-<version>/arch-<toolchain>/usr/lib[64]`, STLs
//! under `<root>/sources/cxx-stl` (see [`stl`]).

pub mod stl;

use std::path::PathBuf;

use crate::core::errors::GraphError;
use crate::core::toolchain::{ArchType, ToolchainDescriptor};

pub use stl::{StlFlavor, StlPathResolver};

/// Prefix every NDK prebuilt module name carries.
pub const NDK_PREFIX: &str = "ndk_";

/// Prefix required for prebuilt CRT objects.
pub const NDK_CRT_PREFIX: &str = "ndk_crt";

/// Prefix required for prebuilt STLs.
pub const NDK_LIB_PREFIX: &str = "ndk_lib";

/// 64-bit architectures whose NDK sysroot is not multilib and keeps its
/// libraries in `usr/lib` rather than `usr/lib64`.
const NON_MULTILIB_64BIT: &[ArchType] = &[ArchType::Arm64];

/// Check a module name against the prefix its prebuilt category requires.
pub fn check_prefix(module_name: &str, prefix: &'static str) -> Result<(), GraphError> {
    if module_name.starts_with(prefix) {
        Ok(())
    } else {
        Err(GraphError::Naming {
            module: module_name.to_string(),
            expected_prefix: prefix,
        })
    }
}

/// Strip the `ndk_` prefix, if present.
pub fn strip_ndk_prefix(module_name: &str) -> &str {
    module_name.strip_prefix(NDK_PREFIX).unwrap_or(module_name)
}

/// File stem for a platform prebuilt.
///
/// Names look like `ndk_NAME.EXT.SDK_VERSION`; only `NAME` is kept.
pub fn prebuilt_file_stem(module_name: &str) -> &str {
    let name = strip_ndk_prefix(module_name);
    name.split('.').next().unwrap_or(name)
}

/// `"64"` for multilib 64-bit toolchains, empty otherwise.
pub fn lib_dir_suffix(toolchain: &ToolchainDescriptor) -> &'static str {
    if toolchain.is_64bit && !NON_MULTILIB_64BIT.contains(&toolchain.arch_type()) {
        "64"
    } else {
        ""
    }
}

/// Resolves platform library and object paths below an NDK root.
#[derive(Debug, Clone)]
pub struct PrebuiltPathResolver {
    root: PathBuf,
}

impl PrebuiltPathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PrebuiltPathResolver { root: root.into() }
    }

    /// `<root>/platforms/android-<version>/arch-<name>/usr/lib<suffix>`
    pub fn ndk_lib_dir(&self, toolchain: &ToolchainDescriptor, platform_version: &str) -> PathBuf {
        self.root
            .join("platforms")
            .join(format!("android-{}", platform_version))
            .join(format!("arch-{}", toolchain.name))
            .join("usr")
            .join(format!("lib{}", lib_dir_suffix(toolchain)))
    }

    /// Full path of a platform prebuilt.
    ///
    /// The `ndk_` prefix is assumed to have been checked by the caller.
    pub fn resolve_path(
        &self,
        module_name: &str,
        toolchain: &ToolchainDescriptor,
        platform_version: &str,
        extension: &str,
    ) -> PathBuf {
        let file_name = format!("{}{}", prebuilt_file_stem(module_name), extension);
        let path = self
            .ndk_lib_dir(toolchain, platform_version)
            .join(file_name);
        tracing::debug!("resolved prebuilt `{}` to {}", module_name, path.display());
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::toolchain::Arch;

    fn toolchain(arch: ArchType) -> ToolchainDescriptor {
        ToolchainDescriptor::for_arch(Arch::new(arch), "4.9")
    }

    fn resolver() -> PrebuiltPathResolver {
        PrebuiltPathResolver::new("prebuilts/ndk/current")
    }

    #[test]
    fn test_x86_64_uses_lib64() {
        let path = resolver().resolve_path(
            "ndk_libfoo.so.24",
            &toolchain(ArchType::X86_64),
            "24",
            ".so",
        );
        assert_eq!(
            path,
            PathBuf::from(
                "prebuilts/ndk/current/platforms/android-24/arch-x86_64/usr/lib64/libfoo.so"
            )
        );
    }

    #[test]
    fn test_arm64_is_not_multilib() {
        let dir = resolver().ndk_lib_dir(&toolchain(ArchType::Arm64), "21");
        assert_eq!(
            dir,
            PathBuf::from("prebuilts/ndk/current/platforms/android-21/arch-arm64/usr/lib")
        );
    }

    #[test]
    fn test_lib_dir_suffix_table() {
        assert_eq!(lib_dir_suffix(&toolchain(ArchType::Arm)), "");
        assert_eq!(lib_dir_suffix(&toolchain(ArchType::X86)), "");
        assert_eq!(lib_dir_suffix(&toolchain(ArchType::Mips)), "");
        assert_eq!(lib_dir_suffix(&toolchain(ArchType::Arm64)), "");
        assert_eq!(lib_dir_suffix(&toolchain(ArchType::X86_64)), "64");
        assert_eq!(lib_dir_suffix(&toolchain(ArchType::Mips64)), "64");
    }

    #[test]
    fn test_file_stem_strips_decoration() {
        assert_eq!(prebuilt_file_stem("ndk_libfoo.so.24"), "libfoo");
        assert_eq!(prebuilt_file_stem("ndk_crtbegin_so.21"), "crtbegin_so");
        assert_eq!(prebuilt_file_stem("ndk_libm"), "libm");
        assert_eq!(prebuilt_file_stem("libz.so"), "libz");
    }

    #[test]
    fn test_check_prefix() {
        assert!(check_prefix("ndk_crtbegin_so.21", NDK_CRT_PREFIX).is_ok());
        assert_eq!(
            check_prefix("crtbegin_so", NDK_CRT_PREFIX),
            Err(GraphError::Naming {
                module: "crtbegin_so".to_string(),
                expected_prefix: NDK_CRT_PREFIX,
            })
        );
    }
}
