//! The build graph of module variants.
//!
//! Nodes are variants; an edge `a -> b` means `a` depends on `b`.

use std::collections::HashMap;

use petgraph::graph::DiGraph;
use petgraph::visit::{EdgeRef, Topo};
use petgraph::Direction;

use crate::core::variant::{DependencyTag, Variant, VariantId};
use crate::mutator::MutatorContext;
use crate::util::InternedString;

#[derive(Debug, Clone, Default)]
pub struct BuildGraph {
    graph: DiGraph<Variant, DependencyTag>,

    /// Variants of each logical module, in creation order
    by_module: HashMap<InternedString, Vec<VariantId>>,
}

impl BuildGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn variant(&self, id: VariantId) -> &Variant {
        &self.graph[id.0]
    }

    pub fn variant_mut(&mut self, id: VariantId) -> &mut Variant {
        &mut self.graph[id.0]
    }

    /// Variants of a module, in the order they were created.
    pub fn variants_of(&self, module: &str) -> &[VariantId] {
        self.by_module
            .get(module)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All variants in creation order.
    pub fn variants(&self) -> impl Iterator<Item = (VariantId, &Variant)> {
        self.graph
            .node_indices()
            .map(move |idx| (VariantId(idx), &self.graph[idx]))
    }

    /// Direct dependencies of a variant.
    pub fn dependencies(&self, id: VariantId) -> Vec<(DependencyTag, VariantId)> {
        self.graph
            .edges_directed(id.0, Direction::Outgoing)
            .map(|edge| (*edge.weight(), VariantId(edge.target())))
            .collect()
    }

    /// Every edge with the given tag, as `(from, to)` pairs.
    pub fn edges_tagged(&self, tag: DependencyTag) -> Vec<(VariantId, VariantId)> {
        self.graph
            .edge_references()
            .filter(|edge| *edge.weight() == tag)
            .map(|edge| (VariantId(edge.source()), VariantId(edge.target())))
            .collect()
    }

    pub fn has_dependency(&self, tag: DependencyTag, from: VariantId, to: VariantId) -> bool {
        self.graph
            .edges_connecting(from.0, to.0)
            .any(|edge| *edge.weight() == tag)
    }

    /// Variants ordered so that dependencies come before dependents.
    pub fn build_order(&self) -> Vec<VariantId> {
        let mut topo = Topo::new(&self.graph);
        let mut order = Vec::with_capacity(self.len());

        while let Some(node) = topo.next(&self.graph) {
            order.push(VariantId(node));
        }

        // Topo visits `a` before `b` for `a -> b`, and edges point at dependencies.
        order.reverse();
        order
    }
}

impl MutatorContext for BuildGraph {
    fn create_variations(&mut self, variants: Vec<Variant>) -> Vec<VariantId> {
        variants
            .into_iter()
            .map(|variant| {
                let parent = variant.parent;
                let id = VariantId(self.graph.add_node(variant));
                self.by_module.entry(parent).or_default().push(id);
                id
            })
            .collect()
    }

    fn add_inter_variant_dependency(&mut self, tag: DependencyTag, from: VariantId, to: VariantId) {
        if !self.has_dependency(tag, from, to) {
            self.graph.add_edge(from.0, to.0, tag);
        }
    }

    fn variant(&self, id: VariantId) -> &Variant {
        BuildGraph::variant(self, id)
    }

    fn variant_mut(&mut self, id: VariantId) -> &mut Variant {
        BuildGraph::variant_mut(self, id)
    }
}
