//! Concrete build variants.

use std::path::PathBuf;
use std::sync::OnceLock;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::core::module::{BuildKind, LibraryModule, LinkStrategy, SourceSet};
use crate::util::InternedString;

/// Handle to a variant node in the build graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantId(pub(crate) NodeIndex);

/// Why one graph node depends on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyTag {
    /// The dependent links the target's compiled objects instead of its own.
    ReuseObjects,
}

/// A module specialized to one build kind.
#[derive(Debug, Clone)]
pub struct Variant {
    pub parent: InternedString,
    pub module_type: InternedString,
    /// `None` only for modules without linkage (prebuilt objects)
    pub kind: Option<BuildKind>,
    pub strategy: LinkStrategy,
    pub sources: SourceSet,
    /// Flags specific to this variant's kind
    pub additional_cflags: Vec<String>,
    pub export_include_dirs: Vec<String>,
    pub sdk_version: Option<String>,
    pub deps: Vec<String>,
    pub hide_from_make: bool,
    /// Sibling whose objects this variant links instead of compiling
    pub reuse_objects_from: Option<VariantId>,
    artifact: OnceLock<PathBuf>,
}

impl Variant {
    /// Derive a variant of `module`. `None` leaves the module unsplit.
    pub fn from_module(module: &LibraryModule, kind: Option<BuildKind>) -> Self {
        Variant {
            parent: module.name,
            module_type: module.module_type,
            kind,
            strategy: module.strategy,
            sources: module.sources.clone(),
            additional_cflags: kind
                .map(|k| module.additional_cflags(k).to_vec())
                .unwrap_or_default(),
            export_include_dirs: module.export_include_dirs.clone(),
            sdk_version: module.sdk_version.clone(),
            deps: module.linker_deps(Vec::new()),
            hide_from_make: module.hide_from_make,
            reuse_objects_from: None,
            artifact: OnceLock::new(),
        }
    }

    pub fn is_static(&self) -> bool {
        self.kind == Some(BuildKind::Static)
    }

    /// Variation name, empty for unsplit modules.
    pub fn variation(&self) -> &'static str {
        self.kind.map(|k| k.as_str()).unwrap_or("")
    }

    /// `name` or `name#variation`, for logs and reports.
    pub fn display_name(&self) -> String {
        match self.kind {
            Some(kind) => format!("{}#{}", self.parent, kind),
            None => self.parent.to_string(),
        }
    }

    /// The resolved prebuilt artifact, if it has been computed.
    pub fn artifact(&self) -> Option<&PathBuf> {
        self.artifact.get()
    }

    /// Return the cached artifact path, computing it on first request.
    pub fn artifact_or_try_init<E>(
        &self,
        resolve: impl FnOnce() -> Result<PathBuf, E>,
    ) -> Result<&PathBuf, E> {
        if let Some(path) = self.artifact.get() {
            return Ok(path);
        }
        let path = resolve()?;
        Ok(self.artifact.get_or_init(|| path))
    }
}
