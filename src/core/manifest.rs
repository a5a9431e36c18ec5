//! Blueprint.toml manifest parsing.
//!
//! A blueprint names the target architecture and declares modules:
//!
//! ```toml
//! [target]
//! arch = "arm64"
//!
//! [[module]]
//! type = "cc_library"
//! name = "libfoo"
//! srcs = ["foo.c"]
//! shared = { cflags = ["-DFOO_SHARED"] }
//!
//! [[module]]
//! type = "ndk_prebuilt_shared_stl"
//! name = "ndk_libc++_shared"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::errors::GraphError;
use crate::core::module::{BuildKind, LibraryModule, LinkageCapability};
use crate::core::registry::ModuleTypeRegistry;
use crate::core::toolchain::{Arch, ArchType, ToolchainDescriptor};

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "Blueprint.toml";

/// A parsed blueprint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Blueprint {
    #[serde(default)]
    pub target: Option<TargetDecl>,

    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleDecl>,

    /// Where this blueprint was read from
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

/// `[target]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetDecl {
    pub arch: ArchType,

    /// ABI list, most preferred first (defaults to the architecture's ABI)
    #[serde(default)]
    pub abi: Vec<String>,

    #[serde(default)]
    pub gcc_version: Option<String>,
}

impl TargetDecl {
    /// Build the toolchain, falling back to `default_gcc` when no version is declared.
    pub fn toolchain(&self, default_gcc: &str) -> ToolchainDescriptor {
        let mut arch = Arch::new(self.arch);
        if !self.abi.is_empty() {
            arch = arch.with_abi(self.abi.iter().cloned());
        }
        ToolchainDescriptor::for_arch(arch, self.gcc_version.as_deref().unwrap_or(default_gcc))
    }
}

/// One `[[module]]` entry.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModuleDecl {
    #[serde(rename = "type")]
    pub module_type: String,
    pub name: String,

    #[serde(default)]
    pub srcs: Vec<String>,
    #[serde(default)]
    pub generated_sources: Vec<String>,

    #[serde(default, rename = "static")]
    pub static_props: KindDecl,
    #[serde(default, rename = "shared")]
    pub shared_props: KindDecl,

    #[serde(default)]
    pub export_include_dirs: Vec<String>,
    #[serde(default)]
    pub sdk_version: Option<String>,
    #[serde(default)]
    pub deps: Vec<String>,
}

/// Per-kind block (`static = { ... }` / `shared = { ... }`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KindDecl {
    /// Override whether this kind is built at all
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub cflags: Vec<String>,
}

impl ModuleDecl {
    /// Create the module through its registered factory and apply the
    /// declared properties on top of the factory defaults.
    pub fn instantiate(&self, registry: &ModuleTypeRegistry) -> Result<LibraryModule, GraphError> {
        let mut module = registry
            .create(&self.module_type, &self.name)?
            .with_sources(self.srcs.iter().cloned())
            .with_generated_sources(self.generated_sources.iter().cloned())
            .with_cflags(BuildKind::Static, self.static_props.cflags.iter().cloned())
            .with_cflags(BuildKind::Shared, self.shared_props.cflags.iter().cloned())
            .with_export_include_dirs(self.export_include_dirs.iter().cloned())
            .with_deps(self.deps.iter().cloned());

        if let Some(version) = &self.sdk_version {
            module = module.with_sdk_version(version.clone());
        }

        if let Some(mut linkage) = module.linkage() {
            if let Some(enabled) = self.static_props.enabled {
                linkage.build_static = enabled;
            }
            if let Some(enabled) = self.shared_props.enabled {
                linkage.build_shared = enabled;
            }
            module.set_linkage(linkage);
        }

        Ok(module)
    }
}

impl Blueprint {
    /// Load a blueprint from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        let mut blueprint = Self::parse(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        blueprint.path = Some(path.to_path_buf());
        Ok(blueprint)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let blueprint: Blueprint = toml::from_str(content)?;

        let mut seen = std::collections::HashSet::new();
        for decl in &blueprint.modules {
            if !seen.insert(decl.name.as_str()) {
                anyhow::bail!("module `{}` is declared more than once", decl.name);
            }
        }

        Ok(blueprint)
    }

    pub fn module(&self, name: &str) -> Option<&ModuleDecl> {
        self.modules.iter().find(|m| m.name == name)
    }
}

/// Search `start` and its ancestors for a blueprint.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_NAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::module::{Linkage, LinkStrategy, PrebuiltKind};
    use crate::core::registry::{register_cc_module_types, register_ndk_module_types};

    const BLUEPRINT: &str = r#"
        [target]
        arch = "x86_64"
        gcc_version = "4.8"

        [[module]]
        type = "cc_library"
        name = "libfoo"
        srcs = ["foo.c", "bar.c"]
        generated_sources = ["gen/version.c"]
        export_include_dirs = ["include"]
        static = { cflags = ["-DFOO_STATIC"] }

        [[module]]
        type = "cc_library"
        name = "libnothing"
        static = { enabled = false }
        shared = { enabled = false }

        [[module]]
        type = "ndk_prebuilt_library"
        name = "ndk_libfoo.so.24"
        sdk_version = "24"
    "#;

    fn registry() -> ModuleTypeRegistry {
        let mut registry = ModuleTypeRegistry::new();
        register_cc_module_types(&mut registry);
        register_ndk_module_types(&mut registry);
        registry
    }

    #[test]
    fn test_parse_blueprint() {
        let bp = Blueprint::parse(BLUEPRINT).unwrap();
        assert_eq!(bp.modules.len(), 3);

        let target = bp.target.as_ref().unwrap();
        assert_eq!(target.arch, ArchType::X86_64);
        let tc = target.toolchain("4.9");
        assert_eq!(tc.gcc_version, "4.8");
        assert_eq!(tc.arch.primary_abi(), "x86_64");
    }

    #[test]
    fn test_instantiate_applies_properties() {
        let bp = Blueprint::parse(BLUEPRINT).unwrap();
        let registry = registry();

        let foo = bp.module("libfoo").unwrap().instantiate(&registry).unwrap();
        assert_eq!(foo.sources.srcs, ["foo.c", "bar.c"]);
        assert_eq!(foo.sources.generated_sources, ["gen/version.c"]);
        assert_eq!(foo.additional_cflags(BuildKind::Static), ["-DFOO_STATIC"]);
        assert_eq!(foo.export_include_dirs, ["include"]);
        assert_eq!(foo.linkage(), Some(Linkage::BOTH));

        let nothing = bp
            .module("libnothing")
            .unwrap()
            .instantiate(&registry)
            .unwrap();
        assert_eq!(nothing.linkage(), Some(Linkage::default()));

        let ndk = bp
            .module("ndk_libfoo.so.24")
            .unwrap()
            .instantiate(&registry)
            .unwrap();
        assert_eq!(ndk.sdk_version.as_deref(), Some("24"));
        assert_eq!(ndk.strategy, LinkStrategy::Prebuilt(PrebuiltKind::Library));
    }

    #[test]
    fn test_duplicate_module_names_rejected() {
        let err = Blueprint::parse(
            r#"
            [[module]]
            type = "cc_library"
            name = "libfoo"

            [[module]]
            type = "cc_library_static"
            name = "libfoo"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("declared more than once"));
    }

    #[test]
    fn test_unknown_arch_rejected() {
        assert!(Blueprint::parse("[target]\narch = \"sparc\"\n").is_err());
    }

    #[test]
    fn test_load_records_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join(MANIFEST_NAME);
        std::fs::write(&path, BLUEPRINT).unwrap();

        let bp = Blueprint::load(&path).unwrap();
        assert_eq!(bp.path.as_deref(), Some(path.as_path()));
        assert!(Blueprint::parse(BLUEPRINT).unwrap().path.is_none());
    }

    #[test]
    fn test_find_manifest_walks_up() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join(MANIFEST_NAME), "").unwrap();
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_manifest(&nested),
            Some(tmp.path().join(MANIFEST_NAME))
        );
    }
}
