//! `ndkgraph plan`: instantiate, split, and link a blueprint.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::errors::GraphError;
use crate::core::manifest::Blueprint;
use crate::core::registry::ModuleTypeRegistry;
use crate::core::toolchain::ToolchainDescriptor;
use crate::core::variant::DependencyTag;
use crate::graph::BuildGraph;
use crate::link::LinkContext;
use crate::ops::link::{link_all, LinkResult};
use crate::ops::mutate::{instantiate_modules, run_variant_pass};
use crate::util::Config;

/// Settings for a planning run.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub ndk_root: PathBuf,
    pub platform_version: String,
    pub out_dir: PathBuf,
    pub jobs: Option<usize>,
}

impl PlanOptions {
    pub fn from_config(config: &Config) -> Self {
        PlanOptions {
            ndk_root: config.ndk_root(),
            platform_version: config.platform_version().to_string(),
            out_dir: config.out_dir(),
            jobs: config.build.jobs,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantReport {
    pub module: String,
    pub variation: String,
    pub module_type: String,
    pub srcs: Vec<String>,
    pub generated_sources: Vec<String>,
    /// `module#variation` of the variant whose objects are reused
    pub reuse_objects_from: Option<String>,
    pub deps: Vec<String>,
    pub hide_from_make: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub module: String,
    pub error: String,
}

impl From<&GraphError> for FailureReport {
    fn from(e: &GraphError) -> Self {
        FailureReport {
            module: e.module().to_string(),
            error: e.to_string(),
        }
    }
}

/// Everything a planning run produced.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub toolchain: ToolchainDescriptor,
    pub variants: Vec<VariantReport>,
    pub links: Vec<LinkResult>,
    #[serde(skip)]
    pub errors: Vec<GraphError>,
    pub failures: Vec<FailureReport>,
}

impl PlanReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// `(from, to)` display names of every reuse edge.
    pub fn reuse_edges(&self) -> impl Iterator<Item = (String, &str)> {
        self.variants.iter().filter_map(|v| {
            v.reuse_objects_from
                .as_deref()
                .map(|to| (format!("{}#{}", v.module, v.variation), to))
        })
    }
}

/// Run the whole pipeline over a blueprint.
pub fn plan(
    blueprint: &Blueprint,
    registry: &ModuleTypeRegistry,
    toolchain: ToolchainDescriptor,
    options: &PlanOptions,
) -> PlanReport {
    let (modules, mut errors) = instantiate_modules(blueprint, registry);

    let pass = run_variant_pass(modules, options.jobs);
    errors.extend(pass.failures);

    let ctx = LinkContext::new(
        toolchain,
        options.ndk_root.clone(),
        options.platform_version.clone(),
        options.out_dir.clone(),
    );
    let phase = link_all(&pass.graph, &ctx);
    errors.extend(phase.failures);

    PlanReport {
        toolchain: ctx.toolchain,
        variants: variant_reports(&pass.graph),
        links: phase.results,
        failures: errors.iter().map(FailureReport::from).collect(),
        errors,
    }
}

fn variant_reports(graph: &BuildGraph) -> Vec<VariantReport> {
    graph
        .variants()
        .map(|(id, variant)| {
            let reuse_objects_from = graph
                .dependencies(id)
                .into_iter()
                .find(|(tag, _)| *tag == DependencyTag::ReuseObjects)
                .map(|(_, target)| graph.variant(target).display_name());

            VariantReport {
                module: variant.parent.to_string(),
                variation: variant.variation().to_string(),
                module_type: variant.module_type.to_string(),
                srcs: variant.sources.srcs.clone(),
                generated_sources: variant.sources.generated_sources.clone(),
                reuse_objects_from,
                deps: variant.deps.clone(),
                hide_from_make: variant.hide_from_make,
            }
        })
        .collect()
}
