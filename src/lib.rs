//! ndkgraph - variant mutation and NDK prebuilt path resolution
//!
//! This crate splits logical C/C++ library declarations into concrete
//! static/shared variants, lets a shared variant reuse its static sibling's
//! objects when they would be identical, and computes where NDK prebuilt
//! libraries, CRT objects and STLs live. It performs no I/O of its own
//! outside manifest and config loading.

pub mod core;
pub mod graph;
pub mod link;
pub mod mutator;
pub mod ops;
pub mod prebuilt;
pub mod util;

pub use self::core::{
    errors::GraphError, module::LibraryModule, registry::ModuleTypeRegistry,
    toolchain::ToolchainDescriptor, variant::Variant,
};

pub use graph::BuildGraph;
pub use util::Config;
