//! The linkage mutator.
//!
//! Splits each library into `static` and/or `shared` variants and, when the
//! two would compile identical objects, lets the shared variant link the
//! static variant's objects instead of compiling its own.
//!
//! The mutator must run exactly once per module. It never exposes a partial
//! variant set: [`expand`] validates and builds every variant before any of
//! them is handed to the graph.

use crate::core::errors::GraphError;
use crate::core::module::{BuildKind, LibraryModule, LinkageCapability};
use crate::core::variant::{DependencyTag, Variant, VariantId};

/// Graph primitives the mutator needs from its host.
pub trait MutatorContext {
    /// Add `variants` as new graph nodes, returning handles in the same order.
    fn create_variations(&mut self, variants: Vec<Variant>) -> Vec<VariantId>;

    /// Record that `from` depends on `to`.
    fn add_inter_variant_dependency(&mut self, tag: DependencyTag, from: VariantId, to: VariantId);

    fn variant(&self, id: VariantId) -> &Variant;

    fn variant_mut(&mut self, id: VariantId) -> &mut Variant;
}

/// Split a module into its build-kind variants.
///
/// Returns `[static, shared]` when both kinds are built, a single variant
/// otherwise. Modules without linkage (prebuilt objects) pass through as one
/// unsplit variant.
pub fn expand(module: &LibraryModule) -> Result<Vec<Variant>, GraphError> {
    let Some(linkage) = module.linkage() else {
        return Ok(vec![Variant::from_module(module, None)]);
    };

    let kinds: &[BuildKind] = match (linkage.build_static, linkage.build_shared) {
        (true, true) => &[BuildKind::Static, BuildKind::Shared],
        (true, false) => &[BuildKind::Static],
        (false, true) => &[BuildKind::Shared],
        (false, false) => {
            return Err(GraphError::Configuration {
                module: module.name.to_string(),
            })
        }
    };

    Ok(kinds
        .iter()
        .map(|&kind| Variant::from_module(module, Some(kind)))
        .collect())
}

/// Let the shared variant reuse the static variant's objects if possible.
///
/// Applies only when neither variant has kind-specific compiler flags, so
/// both would compile byte-identical objects. On success the shared variant
/// depends on the static one and its own sources are cleared. Returns whether
/// the reuse edge was recorded.
pub fn optimize<C: MutatorContext + ?Sized>(
    ctx: &mut C,
    static_id: VariantId,
    shared_id: VariantId,
) -> bool {
    let static_lib = ctx.variant(static_id);
    let shared = ctx.variant(shared_id);

    debug_assert_eq!(static_lib.kind, Some(BuildKind::Static));
    debug_assert_eq!(shared.kind, Some(BuildKind::Shared));

    // Prebuilts compile nothing, so there are no objects to share.
    if !static_lib.strategy.compiles_sources() || !shared.strategy.compiles_sources() {
        return false;
    }

    if !static_lib.additional_cflags.is_empty() || !shared.additional_cflags.is_empty() {
        tracing::debug!(
            "`{}` has kind-specific cflags; compiling static and shared separately",
            static_lib.parent
        );
        return false;
    }

    tracing::debug!(
        "`{}` shares objects between static and shared variants",
        static_lib.parent
    );

    ctx.add_inter_variant_dependency(DependencyTag::ReuseObjects, shared_id, static_id);

    let shared = ctx.variant_mut(shared_id);
    shared.sources.clear();
    shared.reuse_objects_from = Some(static_id);
    true
}

/// Hand expanded variants to the graph and run the reuse optimization.
pub fn apply_variants<C: MutatorContext + ?Sized>(
    ctx: &mut C,
    variants: Vec<Variant>,
) -> Vec<VariantId> {
    let ids = ctx.create_variations(variants);

    if let [static_id, shared_id] = ids[..] {
        optimize(ctx, static_id, shared_id);
    }

    ids
}

/// Run the full linkage mutator on one module.
pub fn linkage_mutator<C: MutatorContext + ?Sized>(
    ctx: &mut C,
    module: &LibraryModule,
) -> Result<Vec<VariantId>, GraphError> {
    let variants = expand(module)?;
    tracing::debug!("splitting `{}` into {} variant(s)", module.name, variants.len());
    Ok(apply_variants(ctx, variants))
}
