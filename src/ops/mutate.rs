//! The variant pass over a whole blueprint.
//!
//! Expansion is pure, so every module is expanded in parallel first. Only
//! once all of them are done are the results applied to the graph, one
//! module at a time, in declaration order.

use rayon::prelude::*;

use crate::core::errors::GraphError;
use crate::core::manifest::Blueprint;
use crate::core::module::LibraryModule;
use crate::core::registry::ModuleTypeRegistry;
use crate::core::variant::Variant;
use crate::graph::BuildGraph;
use crate::mutator::{apply_variants, expand};

/// Result of the variant pass.
#[derive(Debug, Default)]
pub struct VariantPass {
    pub graph: BuildGraph,
    /// Modules that were dropped, with the reason
    pub failures: Vec<GraphError>,
}

/// Create modules from their declarations.
///
/// Declarations with an unknown type are reported and skipped.
pub fn instantiate_modules(
    blueprint: &Blueprint,
    registry: &ModuleTypeRegistry,
) -> (Vec<LibraryModule>, Vec<GraphError>) {
    let mut modules = Vec::with_capacity(blueprint.modules.len());
    let mut failures = Vec::new();

    for decl in &blueprint.modules {
        match decl.instantiate(registry) {
            Ok(module) => modules.push(module),
            Err(e) => {
                tracing::warn!("{}", e);
                failures.push(e);
            }
        }
    }

    (modules, failures)
}

/// Split every module into variants.
///
/// Takes the modules by value: a module that has been split cannot be fed
/// through the pass again.
pub fn run_variant_pass(modules: Vec<LibraryModule>, jobs: Option<usize>) -> VariantPass {
    let expanded = match jobs.map(|n| rayon::ThreadPoolBuilder::new().num_threads(n).build()) {
        Some(Ok(pool)) => pool.install(|| expand_all(&modules)),
        Some(Err(e)) => {
            tracing::warn!("falling back to the global thread pool: {}", e);
            expand_all(&modules)
        }
        None => expand_all(&modules),
    };

    let mut pass = VariantPass::default();

    for result in expanded {
        match result {
            Ok(variants) => {
                apply_variants(&mut pass.graph, variants);
            }
            Err(e) => {
                tracing::warn!("{}", e);
                pass.failures.push(e);
            }
        }
    }

    tracing::info!(
        "split {} module(s) into {} variant(s)",
        modules.len() - pass.failures.len(),
        pass.graph.len()
    );

    pass
}

fn expand_all(modules: &[LibraryModule]) -> Vec<Result<Vec<Variant>, GraphError>> {
    modules.par_iter().map(expand).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::module::{BuildKind, Linkage};
    use crate::core::registry::{register_cc_module_types, register_ndk_module_types};
    use crate::core::variant::DependencyTag;

    #[test]
    fn test_pass_keeps_declaration_order_and_skips_failures() {
        let modules = vec![
            LibraryModule::library("liba", Linkage::BOTH).with_sources(["a.c"]),
            LibraryModule::library("libbroken", Linkage::default()),
            LibraryModule::library("libb", Linkage::STATIC).with_sources(["b.c"]),
        ];

        let pass = run_variant_pass(modules, Some(2));

        assert_eq!(
            pass.failures,
            [GraphError::Configuration {
                module: "libbroken".to_string()
            }]
        );
        assert!(pass.graph.variants_of("libbroken").is_empty());

        let names: Vec<_> = pass
            .graph
            .variants()
            .map(|(_, v)| v.display_name())
            .collect();
        assert_eq!(names, ["liba#static", "liba#shared", "libb#static"]);
        assert_eq!(pass.graph.edges_tagged(DependencyTag::ReuseObjects).len(), 1);
    }

    #[test]
    fn test_instantiate_reports_unknown_types() {
        let blueprint = Blueprint::parse(
            r#"
            [[module]]
            type = "cc_library_static"
            name = "libfoo"

            [[module]]
            type = "java_library"
            name = "foo-java"
            "#,
        )
        .unwrap();

        let mut registry = ModuleTypeRegistry::new();
        register_cc_module_types(&mut registry);
        register_ndk_module_types(&mut registry);

        let (modules, failures) = instantiate_modules(&blueprint, &registry);
        assert_eq!(modules.len(), 1);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].module(), "foo-java");

        let pass = run_variant_pass(modules, None);
        let ids = pass.graph.variants_of("libfoo");
        assert_eq!(ids.len(), 1);
        assert_eq!(pass.graph.variant(ids[0]).kind, Some(BuildKind::Static));
    }
}
