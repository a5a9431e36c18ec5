//! Link phase.
//!
//! Runs after every module has been split. Each variant is linked according
//! to its [`LinkStrategy`]: compiled variants get an output path and object
//! list under the intermediates directory, prebuilts get the location of the
//! artifact shipped with the NDK. Nothing here touches the filesystem.

mod compiled;
mod prebuilt;

use std::path::PathBuf;

use serde::Serialize;

use crate::core::errors::GraphError;
use crate::core::module::LinkStrategy;
use crate::core::toolchain::ToolchainDescriptor;
use crate::core::variant::{Variant, VariantId};
use crate::graph::BuildGraph;
use crate::prebuilt::{PrebuiltPathResolver, StlPathResolver};

/// Everything a link step needs besides the variant itself.
#[derive(Debug, Clone)]
pub struct LinkContext {
    pub toolchain: ToolchainDescriptor,
    pub prebuilts: PrebuiltPathResolver,
    pub stls: StlPathResolver,
    /// Platform version for modules without their own `sdk_version`
    pub platform_version: String,
    pub out_dir: PathBuf,
}

impl LinkContext {
    pub fn new(
        toolchain: ToolchainDescriptor,
        ndk_root: impl Into<PathBuf>,
        platform_version: impl Into<String>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        let ndk_root = ndk_root.into();
        LinkContext {
            toolchain,
            prebuilts: PrebuiltPathResolver::new(ndk_root.clone()),
            stls: StlPathResolver::new(ndk_root),
            platform_version: platform_version.into(),
            out_dir: out_dir.into(),
        }
    }

    fn platform_version_for<'a>(&'a self, variant: &'a Variant) -> &'a str {
        variant
            .sdk_version
            .as_deref()
            .unwrap_or(&self.platform_version)
    }
}

/// What linking a variant produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkOutput {
    /// The artifact dependents link against
    pub output: PathBuf,
    /// Objects fed to the archiver or linker (empty for prebuilts)
    pub objects: Vec<PathBuf>,
    /// Flags exported to dependents
    pub exported_flags: Vec<String>,
}

/// Link one variant.
pub fn link(
    graph: &BuildGraph,
    id: VariantId,
    ctx: &LinkContext,
) -> Result<LinkOutput, GraphError> {
    let variant = graph.variant(id);
    match variant.strategy {
        LinkStrategy::Compiled => Ok(compiled::link_compiled(graph, variant, ctx)),
        LinkStrategy::Prebuilt(kind) => prebuilt::link_prebuilt(variant, kind, ctx),
    }
}

fn export_include_flags(variant: &Variant) -> Vec<String> {
    let flag = variant.strategy.export_include_flag();
    variant
        .export_include_dirs
        .iter()
        .map(|dir| format!("{} {}", flag, dir))
        .collect()
}
