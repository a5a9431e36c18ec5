//! `ndkgraph plan` command

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};

use super::{config_for, current_dir, parse_arch, toolchain_for};
use crate::cli::PlanArgs;
use ndkgraph::core::manifest::{find_manifest, Blueprint};
use ndkgraph::core::registry::{
    register_cc_module_types, register_ndk_module_types, ModuleTypeRegistry,
};
use ndkgraph::ops::{plan, PlanOptions, PlanReport};
use ndkgraph::util::diagnostic::{emit, suggestions};

pub fn execute(args: PlanArgs, ndk_root: Option<PathBuf>, color: bool) -> Result<()> {
    let cwd = current_dir()?;
    let manifest_path = match args.manifest {
        Some(path) => path,
        None => find_manifest(&cwd)
            .ok_or_else(|| anyhow!("could not find Blueprint.toml\n{}", suggestions::NO_MANIFEST))?,
    };

    let project_root = manifest_path.parent().unwrap_or(Path::new("."));
    let config = config_for(project_root, ndk_root);
    let blueprint = Blueprint::load(&manifest_path)?;

    let arch = match (&args.arch, &blueprint.target) {
        (Some(arch), _) => parse_arch(arch)?,
        (None, Some(target)) => target.arch,
        (None, None) => bail!(
            "no target architecture\nhelp: Add `[target] arch = \"...\"` to {} or pass `--arch`",
            manifest_path.display()
        ),
    };
    let toolchain = match &blueprint.target {
        Some(target) if target.arch == arch => target.toolchain(config.gcc_version()),
        _ => toolchain_for(arch, None, &config),
    };

    let mut registry = ModuleTypeRegistry::new();
    register_cc_module_types(&mut registry);
    register_ndk_module_types(&mut registry);

    let report = plan(&blueprint, &registry, toolchain, &PlanOptions::from_config(&config));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    for error in &report.errors {
        let mut diagnostic = error.to_diagnostic();
        if let Some(path) = &blueprint.path {
            diagnostic = diagnostic.with_location(path.clone());
        }
        emit(&diagnostic, color);
    }

    if !report.is_success() {
        bail!("{} module(s) could not be processed", report.errors.len());
    }

    Ok(())
}

fn print_report(report: &PlanReport) {
    let tc = &report.toolchain;
    println!(
        "Toolchain: {} ({}-bit, gcc {}, abi {})",
        tc.name,
        if tc.is_64bit { 64 } else { 32 },
        tc.gcc_version,
        tc.arch.primary_abi()
    );
    println!();

    println!("Variants:");
    for v in &report.variants {
        let name = if v.variation.is_empty() {
            v.module.clone()
        } else {
            format!("{}#{}", v.module, v.variation)
        };
        match &v.reuse_objects_from {
            Some(from) => println!(
                "  {:<32} {:<24} reuses objects of {}",
                name, v.module_type, from
            ),
            None => println!(
                "  {:<32} {:<24} {} source(s)",
                name,
                v.module_type,
                v.srcs.len() + v.generated_sources.len()
            ),
        }
    }
    if report.variants.is_empty() {
        println!("  (no variants)");
    }
    println!();

    println!("Link outputs:");
    for link in &report.links {
        if link.variation.is_empty() {
            println!("  {} -> {}", link.module, link.output.output.display());
        } else {
            println!(
                "  {}#{} -> {}",
                link.module,
                link.variation,
                link.output.output.display()
            );
        }
        for flag in &link.output.exported_flags {
            println!("      exports {}", flag);
        }
    }
    if report.links.is_empty() {
        println!("  (nothing linked)");
    }
}
