// shadowmod-core/src/ports/toolchain.rs

// What the build orchestrator needs from a language toolchain, without
// knowing which binary runs behind it. The process adapter shells out; tests
// plug in a scripted fake.

use crate::error::ShadowmodError;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainStep {
    /// Fetch every dependency named by the manifest (updates the lock artifact).
    Download,
    /// Compile all packages of the module.
    Build,
}

impl fmt::Display for ToolchainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolchainStep::Download => write!(f, "download"),
            ToolchainStep::Build => write!(f, "build"),
        }
    }
}

/// Completed toolchain invocation. A non-zero exit is not an `Err`: the
/// orchestrator decides what a failed step means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl StepOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn status(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Runs `step` in `package_dir` against `manifest` instead of the
    /// canonical manifest.
    async fn run(
        &self,
        step: ToolchainStep,
        package_dir: &Path,
        manifest: &Path,
    ) -> Result<StepOutput, ShadowmodError>;
}
