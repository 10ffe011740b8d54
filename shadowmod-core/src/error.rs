// shadowmod-core/src/error.rs

use crate::application::error::BuildError;
use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum ShadowmodError {
    // --- DOMAIN ERRORS (graph shape, manifest naming) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, YAML, processes) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- BUILD ERRORS (toolchain steps, cleanup) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),

    #[error("Unsafe path traversal detected: {0}")]
    UnsafePath(String),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for ShadowmodError {
    fn from(err: std::io::Error) -> Self {
        ShadowmodError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl ShadowmodError {
    /// Diagnostic text attached to a failed toolchain step, if any.
    pub fn diagnostic_text(&self) -> Option<&str> {
        match self {
            ShadowmodError::Build(err) => err.diagnostic_text(),
            _ => None,
        }
    }
}
