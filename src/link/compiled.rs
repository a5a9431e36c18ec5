//! Output layout for compiled variants.

use std::path::{Component, Path, PathBuf};

use crate::core::module::BuildKind;
use crate::core::toolchain::OBJECT_EXTENSION;
use crate::core::variant::Variant;
use crate::graph::BuildGraph;
use crate::link::{export_include_flags, LinkContext, LinkOutput};

pub(super) fn link_compiled(
    graph: &BuildGraph,
    variant: &Variant,
    ctx: &LinkContext,
) -> LinkOutput {
    let ext = match variant.kind {
        Some(BuildKind::Static) => ctx.toolchain.static_lib_suffix.as_str(),
        Some(BuildKind::Shared) => ctx.toolchain.shlib_suffix.as_str(),
        None => OBJECT_EXTENSION,
    };
    let output = variant_dir(ctx, variant).join(format!("{}{}", variant.parent, ext));

    // A reusing variant has no sources of its own; its objects are the
    // static sibling's.
    let object_owner = match variant.reuse_objects_from {
        Some(id) => graph.variant(id),
        None => variant,
    };
    let obj_dir = variant_dir(ctx, object_owner).join("obj");
    let objects = object_owner
        .sources
        .iter()
        .map(|src| object_path(&obj_dir, src))
        .collect();

    LinkOutput {
        output,
        objects,
        exported_flags: export_include_flags(variant),
    }
}

/// Object for `src` below `obj_dir`, named `<file><ext>.o`.
///
/// Only the normal components of `src` are kept, so absolute and `..`
/// sources stay inside `obj_dir`. Keeping the source extension stops
/// `foo.c` and `foo.cpp` from sharing an object.
fn object_path(obj_dir: &Path, src: &str) -> PathBuf {
    let mut relative: PathBuf = Path::new(src)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();

    let mut file_name = relative.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    file_name.push(OBJECT_EXTENSION);
    relative.set_file_name(file_name);

    obj_dir.join(relative)
}

/// `<out>/.intermediates/<module>/<variation>`
fn variant_dir(ctx: &LinkContext, variant: &Variant) -> PathBuf {
    ctx.out_dir
        .join(".intermediates")
        .join(variant.parent.as_str())
        .join(variant.variation())
}
