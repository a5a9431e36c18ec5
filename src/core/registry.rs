//! Module type registry.
//!
//! The host fills a registry at startup by calling the registration
//! functions it wants; nothing is registered implicitly.

use std::collections::BTreeMap;

use crate::core::errors::GraphError;
use crate::core::module::{LibraryModule, Linkage, LinkStrategy, ModuleKind, PrebuiltKind};
use crate::util::InternedString;

/// Creates a module of one type with that type's defaults applied.
pub type ModuleFactory = fn(InternedString) -> LibraryModule;

/// Maps module type names to factories.
#[derive(Debug, Clone, Default)]
pub struct ModuleTypeRegistry {
    factories: BTreeMap<&'static str, ModuleFactory>,
}

impl ModuleTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory. A later registration of the same name wins.
    pub fn register(&mut self, module_type: &'static str, factory: ModuleFactory) {
        if self.factories.insert(module_type, factory).is_some() {
            tracing::debug!("replaced factory for module type `{}`", module_type);
        }
    }

    pub fn contains(&self, module_type: &str) -> bool {
        self.factories.contains_key(module_type)
    }

    /// Registered type names, sorted.
    pub fn module_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    pub fn create(&self, module_type: &str, name: &str) -> Result<LibraryModule, GraphError> {
        let factory =
            self.factories
                .get(module_type)
                .ok_or_else(|| GraphError::UnknownModuleType {
                    module: name.to_string(),
                    module_type: module_type.to_string(),
                })?;
        Ok(factory(InternedString::new(name)))
    }
}

/// Register the compiled `cc_library` family.
pub fn register_cc_module_types(registry: &mut ModuleTypeRegistry) {
    registry.register("cc_library", cc_library_factory);
    registry.register("cc_library_static", cc_library_static_factory);
    registry.register("cc_library_shared", cc_library_shared_factory);
}

/// Register the NDK prebuilt module types.
pub fn register_ndk_module_types(registry: &mut ModuleTypeRegistry) {
    registry.register("ndk_prebuilt_library", ndk_prebuilt_library_factory);
    registry.register("ndk_prebuilt_object", ndk_prebuilt_object_factory);
    registry.register("ndk_prebuilt_static_stl", ndk_prebuilt_static_stl_factory);
    registry.register("ndk_prebuilt_shared_stl", ndk_prebuilt_shared_stl_factory);
}

fn cc_library_factory(name: InternedString) -> LibraryModule {
    LibraryModule::new(
        name,
        "cc_library",
        ModuleKind::Library(Linkage::BOTH),
        LinkStrategy::Compiled,
    )
}

fn cc_library_static_factory(name: InternedString) -> LibraryModule {
    LibraryModule::new(
        name,
        "cc_library_static",
        ModuleKind::Library(Linkage::STATIC),
        LinkStrategy::Compiled,
    )
}

fn cc_library_shared_factory(name: InternedString) -> LibraryModule {
    LibraryModule::new(
        name,
        "cc_library_shared",
        ModuleKind::Library(Linkage::SHARED),
        LinkStrategy::Compiled,
    )
}

// NDK prebuilts aren't stripped and usually aren't installed, so they stay
// out of the make export.
fn ndk_prebuilt(
    name: InternedString,
    module_type: &'static str,
    kind: ModuleKind,
    prebuilt: PrebuiltKind,
) -> LibraryModule {
    let mut module = LibraryModule::new(name, module_type, kind, LinkStrategy::Prebuilt(prebuilt));
    module.hide_from_make = true;
    module
}

fn ndk_prebuilt_library_factory(name: InternedString) -> LibraryModule {
    ndk_prebuilt(
        name,
        "ndk_prebuilt_library",
        ModuleKind::Library(Linkage::SHARED),
        PrebuiltKind::Library,
    )
}

fn ndk_prebuilt_object_factory(name: InternedString) -> LibraryModule {
    ndk_prebuilt(
        name,
        "ndk_prebuilt_object",
        ModuleKind::Object,
        PrebuiltKind::Object,
    )
}

fn ndk_prebuilt_static_stl_factory(name: InternedString) -> LibraryModule {
    ndk_prebuilt(
        name,
        "ndk_prebuilt_static_stl",
        ModuleKind::Library(Linkage::STATIC),
        PrebuiltKind::Stl,
    )
}

fn ndk_prebuilt_shared_stl_factory(name: InternedString) -> LibraryModule {
    ndk_prebuilt(
        name,
        "ndk_prebuilt_shared_stl",
        ModuleKind::Library(Linkage::SHARED),
        PrebuiltKind::Stl,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::module::LinkageCapability;

    fn registry() -> ModuleTypeRegistry {
        let mut registry = ModuleTypeRegistry::new();
        register_cc_module_types(&mut registry);
        register_ndk_module_types(&mut registry);
        registry
    }

    #[test]
    fn test_empty_registry_knows_nothing() {
        let registry = ModuleTypeRegistry::new();
        let err = registry.create("cc_library", "libfoo").unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownModuleType {
                module: "libfoo".to_string(),
                module_type: "cc_library".to_string(),
            }
        );
    }

    #[test]
    fn test_registered_types() {
        let types: Vec<_> = registry().module_types().collect();
        assert_eq!(
            types,
            [
                "cc_library",
                "cc_library_shared",
                "cc_library_static",
                "ndk_prebuilt_library",
                "ndk_prebuilt_object",
                "ndk_prebuilt_shared_stl",
                "ndk_prebuilt_static_stl",
            ]
        );
    }

    #[test]
    fn test_ndk_factories() {
        let registry = registry();

        let lib = registry
            .create("ndk_prebuilt_library", "ndk_libc.21")
            .unwrap();
        assert_eq!(lib.linkage(), Some(Linkage::SHARED));
        assert_eq!(lib.strategy, LinkStrategy::Prebuilt(PrebuiltKind::Library));
        assert!(lib.hide_from_make);

        let obj = registry
            .create("ndk_prebuilt_object", "ndk_crtbegin_so.21")
            .unwrap();
        assert_eq!(obj.linkage(), None);

        let stl = registry
            .create("ndk_prebuilt_static_stl", "ndk_libc++_static")
            .unwrap();
        assert_eq!(stl.linkage(), Some(Linkage::STATIC));
        assert_eq!(stl.strategy, LinkStrategy::Prebuilt(PrebuiltKind::Stl));
    }

    #[test]
    fn test_cc_library_builds_both() {
        let lib = registry().create("cc_library", "libfoo").unwrap();
        assert_eq!(lib.linkage(), Some(Linkage::BOTH));
        assert!(!lib.hide_from_make);
        assert_eq!(lib.module_type.as_str(), "cc_library");
    }

    #[test]
    fn test_later_registration_wins() {
        let mut registry = registry();
        registry.register("cc_library", cc_library_static_factory);
        let lib = registry.create("cc_library", "libfoo").unwrap();
        assert_eq!(lib.linkage(), Some(Linkage::STATIC));
    }
}
