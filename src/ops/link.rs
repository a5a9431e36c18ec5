//! The link phase over a whole graph.

use serde::Serialize;

use crate::core::errors::GraphError;
use crate::graph::BuildGraph;
use crate::link::{link, LinkContext, LinkOutput};

/// One linked variant, as recorded for the host.
#[derive(Debug, Clone, Serialize)]
pub struct LinkResult {
    pub module: String,
    pub variation: String,
    #[serde(flatten)]
    pub output: LinkOutput,
}

#[derive(Debug, Default)]
pub struct LinkPhase {
    /// Results in build order
    pub results: Vec<LinkResult>,
    pub failures: Vec<GraphError>,
}

/// Link every variant, dependencies first.
///
/// Must only run once the variant pass has finished for every module.
pub fn link_all(graph: &BuildGraph, ctx: &LinkContext) -> LinkPhase {
    let mut phase = LinkPhase::default();

    for id in graph.build_order() {
        let variant = graph.variant(id);
        match link(graph, id, ctx) {
            Ok(output) => {
                tracing::debug!("{} -> {}", variant.display_name(), output.output.display());
                phase.results.push(LinkResult {
                    module: variant.parent.to_string(),
                    variation: variant.variation().to_string(),
                    output,
                });
            }
            Err(e) => {
                tracing::warn!("{}", e);
                phase.failures.push(e);
            }
        }
    }

    phase
}
