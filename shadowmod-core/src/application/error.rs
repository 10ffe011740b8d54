// shadowmod-core/src/application/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::ShadowmodError;
use crate::ports::toolchain::ToolchainStep;

/// Failures of the build state machine. Toolchain failures keep the shadow
/// artifacts on disk and carry the full shadow manifest as diagnostic.
#[derive(Error, Debug, Diagnostic)]
pub enum BuildError {
    #[error("Dependency download failed ({status}) with {}", .shadow_path.display())]
    #[diagnostic(
        code(shadowmod::build::download),
        help("The shadow manifest was kept for inspection. Run `shadowmod clean` once done.")
    )]
    DownloadFailed {
        shadow_path: PathBuf,
        status: String,
        stderr: String,
        diagnostic: String,
    },

    #[error("Build failed ({status}) with {}", .shadow_path.display())]
    #[diagnostic(
        code(shadowmod::build::compile),
        help("The shadow manifest was kept for inspection. Run `shadowmod clean` once done.")
    )]
    BuildFailed {
        shadow_path: PathBuf,
        status: String,
        stderr: String,
        diagnostic: String,
    },

    /// The toolchain could not run the step to completion (spawn failure,
    /// timeout). No exit status exists, the cause is kept as source.
    #[error("Toolchain {step} step aborted with {}: {source}", .shadow_path.display())]
    #[diagnostic(
        code(shadowmod::build::aborted),
        help("The shadow manifest was kept for inspection. Run `shadowmod clean` once done.")
    )]
    StepAborted {
        step: ToolchainStep,
        shadow_path: PathBuf,
        diagnostic: String,
        #[source]
        source: Box<ShadowmodError>,
    },

    #[error("Build succeeded but {} could not be removed: {source}", .path.display())]
    #[diagnostic(
        code(shadowmod::build::cleanup),
        help("Remove the file before publishing: it must not ship with the package.")
    )]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    /// Shadow manifest content captured when a toolchain step failed.
    pub fn diagnostic_text(&self) -> Option<&str> {
        match self {
            BuildError::DownloadFailed { diagnostic, .. }
            | BuildError::BuildFailed { diagnostic, .. }
            | BuildError::StepAborted { diagnostic, .. } => Some(diagnostic.as_str()),
            BuildError::CleanupFailed { .. } => None,
        }
    }

    pub fn stderr(&self) -> Option<&str> {
        match self {
            BuildError::DownloadFailed { stderr, .. } | BuildError::BuildFailed { stderr, .. } => {
                Some(stderr.as_str())
            }
            BuildError::StepAborted { .. } | BuildError::CleanupFailed { .. } => None,
        }
    }
}
