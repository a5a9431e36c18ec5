//! High-level operations driven by the CLI.
//!
//! These run the library's passes over a whole blueprint: the variant pass
//! first, then, after every module has been split, the link phase.

pub mod link;
pub mod mutate;
pub mod plan;

pub use link::{link_all, LinkPhase, LinkResult};
pub use mutate::{instantiate_modules, run_variant_pass, VariantPass};
pub use plan::{plan, PlanOptions, PlanReport};
