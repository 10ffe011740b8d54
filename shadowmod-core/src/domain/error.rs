// shadowmod-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, PartialEq)]
pub enum DomainError {
    #[error("Package '{package}' depends on unknown module '{module}'")]
    #[diagnostic(
        code(shadowmod::domain::unknown_dependency),
        help("Every dependency must be declared as a package in the graph descriptor.")
    )]
    UnknownDependency { package: String, module: String },

    #[error("Module '{0}' is declared more than once")]
    #[diagnostic(code(shadowmod::domain::duplicate_module))]
    DuplicateModule(String),

    #[error("Root module '{0}' not found in package graph")]
    #[diagnostic(code(shadowmod::domain::root_not_found))]
    RootNotFound(String),

    #[error("Invalid manifest file name: {0}")]
    #[diagnostic(
        code(shadowmod::domain::manifest_name),
        help("The manifest path must end with a file name such as 'go.mod'.")
    )]
    InvalidManifestName(String),

    #[error("Unsafe shadow manifest name '{shadow}' for '{manifest}'")]
    #[diagnostic(
        code(shadowmod::domain::shadow_name),
        help("manifest.shadow-prefix must be non-empty and must not contain path separators.")
    )]
    UnsafeShadowName { manifest: String, shadow: String },
}
