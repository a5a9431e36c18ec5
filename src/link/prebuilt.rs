//! Linking NDK prebuilts: a null build step that only sets up the output path.

use std::path::PathBuf;

use crate::core::errors::GraphError;
use crate::core::module::PrebuiltKind;
use crate::core::toolchain::OBJECT_EXTENSION;
use crate::core::variant::Variant;
use crate::link::{export_include_flags, LinkContext, LinkOutput};
use crate::prebuilt::stl::stl_base_name;
use crate::prebuilt::{check_prefix, NDK_CRT_PREFIX, NDK_LIB_PREFIX, NDK_PREFIX};

pub(super) fn link_prebuilt(
    variant: &Variant,
    kind: PrebuiltKind,
    ctx: &LinkContext,
) -> Result<LinkOutput, GraphError> {
    let output = variant
        .artifact_or_try_init(|| resolve(variant, kind, ctx))?
        .clone();

    Ok(LinkOutput {
        output,
        objects: Vec::new(),
        exported_flags: export_include_flags(variant),
    })
}

fn resolve(
    variant: &Variant,
    kind: PrebuiltKind,
    ctx: &LinkContext,
) -> Result<PathBuf, GraphError> {
    let name = variant.parent.as_str();
    let toolchain = &ctx.toolchain;

    match kind {
        PrebuiltKind::Library => {
            check_prefix(name, NDK_PREFIX)?;
            let ext = if variant.is_static() {
                &toolchain.static_lib_suffix
            } else {
                &toolchain.shlib_suffix
            };
            Ok(ctx
                .prebuilts
                .resolve_path(name, toolchain, ctx.platform_version_for(variant), ext))
        }
        PrebuiltKind::Object => {
            check_prefix(name, NDK_CRT_PREFIX)?;
            Ok(ctx.prebuilts.resolve_path(
                name,
                toolchain,
                ctx.platform_version_for(variant),
                OBJECT_EXTENSION,
            ))
        }
        PrebuiltKind::Stl => {
            check_prefix(name, NDK_LIB_PREFIX)?;
            ctx.stls
                .resolve_stl_path(name, toolchain, stl_base_name(name), variant.is_static())
        }
    }
}
