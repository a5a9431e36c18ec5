//! Errors raised while splitting modules and resolving prebuilt paths.
//!
//! Every variant is fatal for the module it names; processing of other
//! modules continues.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum GraphError {
    /// The module declares neither a static nor a shared build.
    #[error("library `{module}` is neither static nor shared")]
    #[diagnostic(code(ndkgraph::mutate::no_linkage))]
    Configuration { module: String },

    /// The module name lacks the prefix its category requires.
    #[error("NDK prebuilts must have an `{expected_prefix}` prefixed name, found `{module}`")]
    #[diagnostic(code(ndkgraph::prebuilt::naming))]
    Naming {
        module: String,
        expected_prefix: &'static str,
    },

    #[error("unknown NDK STL `{stl}` for module `{module}`")]
    #[diagnostic(code(ndkgraph::prebuilt::unknown_stl))]
    UnknownStl { module: String, stl: String },

    #[error("unknown module type `{module_type}` for module `{module}`")]
    #[diagnostic(code(ndkgraph::registry::unknown_type))]
    UnknownModuleType { module: String, module_type: String },
}

impl GraphError {
    /// The module this error aborts.
    pub fn module(&self) -> &str {
        match self {
            GraphError::Configuration { module }
            | GraphError::Naming { module, .. }
            | GraphError::UnknownStl { module, .. }
            | GraphError::UnknownModuleType { module, .. } => module,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GraphError::Configuration { module } => {
                Diagnostic::error(format!("library `{}` is not static or shared", module))
                    .with_context("a library must build at least one kind")
                    .with_suggestion(
                        "Set `static = { enabled = true }` or `shared = { enabled = true }`",
                    )
                    .with_suggestion(
                        "Declare it as `cc_library_static` or `cc_library_shared` instead",
                    )
            }

            GraphError::Naming {
                module,
                expected_prefix,
            } => Diagnostic::error(format!(
                "`{}` does not start with `{}`",
                module, expected_prefix
            ))
            .with_context(format!(
                "NDK prebuilts in this category are named `{}<name>`",
                expected_prefix
            ))
            .with_suggestion(format!("Rename the module to `{}...`", expected_prefix)),

            GraphError::UnknownStl { module, stl } => {
                Diagnostic::error(format!("unknown NDK STL `{}`", stl))
                    .with_context(format!("required by `{}`", module))
                    .with_context("known STLs: libstlport, libc++, libgnustl")
                    .with_suggestion(suggestions::FIX_DECLARATION)
            }

            GraphError::UnknownModuleType {
                module,
                module_type,
            } => Diagnostic::error(format!("unknown module type `{}`", module_type))
                .with_context(format!("declared by `{}`", module))
                .with_suggestion("Check the `type` field for typos"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_diagnostic() {
        let err = GraphError::Configuration {
            module: "libfoo".to_string(),
        };

        assert_eq!(err.module(), "libfoo");
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("`libfoo` is not static or shared"));
        assert!(output.contains("cc_library_static"));
    }

    #[test]
    fn test_unknown_stl_diagnostic() {
        let err = GraphError::UnknownStl {
            module: "ndk_libfoo++_shared".to_string(),
            stl: "libfoo++".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "unknown NDK STL `libfoo++` for module `ndk_libfoo++_shared`"
        );
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("known STLs"));
    }

    #[test]
    fn test_naming_message() {
        let err = GraphError::Naming {
            module: "crtbegin_so".to_string(),
            expected_prefix: "ndk_crt",
        };
        assert!(err.to_string().contains("`ndk_crt` prefixed name"));
    }
}
