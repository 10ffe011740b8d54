// shadowmod-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(shadowmod::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(shadowmod::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(shadowmod::infra::config))]
    ConfigError(String),

    #[error("Package graph descriptor not found at '{0}'")]
    #[diagnostic(
        code(shadowmod::infra::graph_missing),
        help("The generator writes the graph descriptor next to the package manifest.")
    )]
    GraphNotFound(String),

    // --- EXTERNAL PROCESSES ---
    #[error("Failed to spawn '{program}': {source}")]
    #[diagnostic(
        code(shadowmod::infra::spawn),
        help("Is the toolchain installed and on PATH? Override it with SHADOWMOD_TOOLCHAIN.")
    )]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' timed out after {after:?}")]
    #[diagnostic(
        code(shadowmod::infra::timeout),
        help("Raise toolchain.timeout-secs or SHADOWMOD_TIMEOUT_SECS.")
    )]
    Timeout { command: String, after: Duration },
}
