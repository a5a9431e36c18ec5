//! Core data structures.
//!
//! - Logical modules and the variants they split into
//! - Toolchain and architecture facts
//! - The module type registry and the blueprint manifest

pub mod errors;
pub mod manifest;
pub mod module;
pub mod registry;
pub mod toolchain;
pub mod variant;

pub use errors::GraphError;
pub use manifest::{find_manifest, Blueprint, ModuleDecl, MANIFEST_NAME};
pub use module::{
    BuildKind, LibraryModule, Linkage, LinkageCapability, LinkStrategy, ModuleKind, PrebuiltKind,
    SourceSet,
};
pub use registry::{
    register_cc_module_types, register_ndk_module_types, ModuleFactory, ModuleTypeRegistry,
};
pub use toolchain::{Arch, ArchType, ToolchainDescriptor};
pub use variant::{DependencyTag, Variant, VariantId};
