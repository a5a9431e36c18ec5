//! Logical library declarations.
//!
//! A `LibraryModule` is what a manifest declares: one name, the build kinds
//! it supports, and its sources. The variant pass turns it into concrete
//! `Variant`s.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::InternedString;

/// The kind of library a variant builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildKind {
    Static,
    Shared,
}

impl BuildKind {
    /// The variation name used for graph nodes.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildKind::Static => "static",
            BuildKind::Shared => "shared",
        }
    }
}

impl fmt::Display for BuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build kinds a library declares support for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Linkage {
    pub build_static: bool,
    pub build_shared: bool,
}

impl Linkage {
    pub const STATIC: Linkage = Linkage {
        build_static: true,
        build_shared: false,
    };

    pub const SHARED: Linkage = Linkage {
        build_static: false,
        build_shared: true,
    };

    pub const BOTH: Linkage = Linkage {
        build_static: true,
        build_shared: true,
    };
}

/// Capability query for modules that can be split by build kind.
///
/// Returns `None` for modules that have no linkage at all (prebuilt
/// objects); the variant pass leaves those unsplit.
pub trait LinkageCapability {
    fn linkage(&self) -> Option<Linkage>;

    fn build_static(&self) -> bool {
        self.linkage().is_some_and(|l| l.build_static)
    }

    fn build_shared(&self) -> bool {
        self.linkage().is_some_and(|l| l.build_shared)
    }
}

/// Which family of NDK prebuilt a module is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrebuiltKind {
    /// Platform library under `platforms/android-N/arch-*/usr/lib*`
    Library,
    /// CRT object under the same directory as platform libraries
    Object,
    /// C++ standard library under `sources/cxx-stl`
    Stl,
}

/// How a module produces its artifact at link time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "prebuilt", rename_all = "lowercase")]
pub enum LinkStrategy {
    /// Compile sources and archive or link them.
    Compiled,
    /// Compile nothing; the artifact already exists at a computed path.
    Prebuilt(PrebuiltKind),
}

impl LinkStrategy {
    pub fn compiles_sources(&self) -> bool {
        matches!(self, LinkStrategy::Compiled)
    }

    /// Flag used to export include directories to dependents.
    pub fn export_include_flag(&self) -> &'static str {
        match self {
            LinkStrategy::Prebuilt(PrebuiltKind::Library) => "-isystem",
            LinkStrategy::Prebuilt(_) | LinkStrategy::Compiled => "-I",
        }
    }
}

/// What sort of linker a module has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Library(Linkage),
    Object,
}

impl LinkageCapability for ModuleKind {
    fn linkage(&self) -> Option<Linkage> {
        match self {
            ModuleKind::Library(linkage) => Some(*linkage),
            ModuleKind::Object => None,
        }
    }
}

/// Primary and generated source lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSet {
    pub srcs: Vec<String>,
    pub generated_sources: Vec<String>,
}

impl SourceSet {
    pub fn is_empty(&self) -> bool {
        self.srcs.is_empty() && self.generated_sources.is_empty()
    }

    pub fn clear(&mut self) {
        self.srcs.clear();
        self.generated_sources.clear();
    }

    /// All sources, primary first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.srcs
            .iter()
            .chain(self.generated_sources.iter())
            .map(String::as_str)
    }
}

/// Properties that apply to only one build kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindProperties {
    pub cflags: Vec<String>,
}

/// A logical library module as declared.
#[derive(Debug, Clone)]
pub struct LibraryModule {
    pub name: InternedString,
    pub module_type: InternedString,
    pub kind: ModuleKind,
    pub strategy: LinkStrategy,
    pub sources: SourceSet,
    /// Flags added only to the static variant
    pub static_props: KindProperties,
    /// Flags added only to the shared variant
    pub shared_props: KindProperties,
    pub export_include_dirs: Vec<String>,
    pub sdk_version: Option<String>,
    pub deps: Vec<String>,
    /// Skip this module when exporting to the legacy make build
    pub hide_from_make: bool,
}

impl LibraryModule {
    pub fn new(
        name: impl Into<InternedString>,
        module_type: impl Into<InternedString>,
        kind: ModuleKind,
        strategy: LinkStrategy,
    ) -> Self {
        LibraryModule {
            name: name.into(),
            module_type: module_type.into(),
            kind,
            strategy,
            sources: SourceSet::default(),
            static_props: KindProperties::default(),
            shared_props: KindProperties::default(),
            export_include_dirs: Vec::new(),
            sdk_version: None,
            deps: Vec::new(),
            hide_from_make: false,
        }
    }

    /// A compiled library supporting the given build kinds.
    pub fn library(name: impl Into<InternedString>, linkage: Linkage) -> Self {
        Self::new(
            name,
            "cc_library",
            ModuleKind::Library(linkage),
            LinkStrategy::Compiled,
        )
    }

    pub fn with_sources(mut self, srcs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.sources.srcs = srcs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_generated_sources(
        mut self,
        srcs: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.sources.generated_sources = srcs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cflags(
        mut self,
        kind: BuildKind,
        cflags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let cflags = cflags.into_iter().map(Into::into).collect();
        match kind {
            BuildKind::Static => self.static_props.cflags = cflags,
            BuildKind::Shared => self.shared_props.cflags = cflags,
        }
        self
    }

    pub fn with_export_include_dirs(
        mut self,
        dirs: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.export_include_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sdk_version(mut self, version: impl Into<String>) -> Self {
        self.sdk_version = Some(version.into());
        self
    }

    pub fn with_deps(mut self, deps: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.deps = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Compiler flags that apply to one build kind only.
    pub fn additional_cflags(&self, kind: BuildKind) -> &[String] {
        match kind {
            BuildKind::Static => &self.static_props.cflags,
            BuildKind::Shared => &self.shared_props.cflags,
        }
    }

    /// Replace the declared linkage. No-op for object modules.
    pub fn set_linkage(&mut self, linkage: Linkage) {
        if let ModuleKind::Library(current) = &mut self.kind {
            *current = linkage;
        }
    }

    /// Dependencies the linker adds on top of `deps`.
    ///
    /// NDK prebuilts can't have any dependencies, so they get exactly what
    /// was passed in. Compiled libraries also link their declared deps.
    pub fn linker_deps(&self, mut deps: Vec<String>) -> Vec<String> {
        if self.strategy.compiles_sources() {
            for dep in &self.deps {
                if !deps.contains(dep) {
                    deps.push(dep.clone());
                }
            }
        } else if !self.deps.is_empty() {
            tracing::warn!(
                "ignoring {} declared dependencies of NDK prebuilt `{}`",
                self.deps.len(),
                self.name
            );
        }
        deps
    }
}

impl LinkageCapability for LibraryModule {
    fn linkage(&self) -> Option<Linkage> {
        self.kind.linkage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linkage_capability() {
        let both = LibraryModule::library("libfoo", Linkage::BOTH);
        assert!(both.build_static());
        assert!(both.build_shared());

        let object = LibraryModule::new(
            "ndk_crtbegin_so.21",
            "ndk_prebuilt_object",
            ModuleKind::Object,
            LinkStrategy::Prebuilt(PrebuiltKind::Object),
        );
        assert_eq!(object.linkage(), None);
        assert!(!object.build_static());
        assert!(!object.build_shared());
    }

    #[test]
    fn test_additional_cflags_per_kind() {
        let module = LibraryModule::library("libfoo", Linkage::BOTH)
            .with_cflags(BuildKind::Static, ["-DSTATIC"]);

        assert_eq!(module.additional_cflags(BuildKind::Static), ["-DSTATIC"]);
        assert!(module.additional_cflags(BuildKind::Shared).is_empty());
    }

    #[test]
    fn test_export_include_flag() {
        assert_eq!(
            LinkStrategy::Prebuilt(PrebuiltKind::Library).export_include_flag(),
            "-isystem"
        );
        assert_eq!(
            LinkStrategy::Prebuilt(PrebuiltKind::Stl).export_include_flag(),
            "-I"
        );
        assert_eq!(LinkStrategy::Compiled.export_include_flag(), "-I");
    }

    #[test]
    fn test_prebuilt_linker_deps_unchanged() {
        let mut module = LibraryModule::library("ndk_libc.21", Linkage::SHARED).with_deps(["libm"]);
        module.strategy = LinkStrategy::Prebuilt(PrebuiltKind::Library);

        assert!(module.linker_deps(Vec::new()).is_empty());
        assert_eq!(module.linker_deps(vec!["libdl".to_string()]), ["libdl"]);
    }

    #[test]
    fn test_compiled_linker_deps_include_declared() {
        let module = LibraryModule::library("libfoo", Linkage::BOTH).with_deps(["libbar", "libz"]);
        assert_eq!(
            module.linker_deps(vec!["libz".to_string()]),
            ["libz", "libbar"]
        );
    }

    #[test]
    fn test_source_set() {
        let module = LibraryModule::library("libfoo", Linkage::BOTH)
            .with_sources(["a.c"])
            .with_generated_sources(["gen/b.c"]);

        let all: Vec<_> = module.sources.iter().collect();
        assert_eq!(all, ["a.c", "gen/b.c"]);

        let mut sources = module.sources.clone();
        sources.clear();
        assert!(sources.is_empty());
    }
}
