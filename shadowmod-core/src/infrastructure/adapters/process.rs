// shadowmod-core/src/infrastructure/adapters/process.rs

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::domain::project::ToolchainConfig;
use crate::error::ShadowmodError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::toolchain::{StepOutput, Toolchain, ToolchainStep};

/// Runs the Go toolchain (or any CLI with the same verbs) as a child process.
///
/// The configured environment is applied to the child only; the current
/// process environment is never modified. Children are killed when the
/// awaiting future is dropped, so a timeout or a cancelled build does not
/// leave a toolchain process behind.
#[derive(Debug, Clone)]
pub struct ProcessToolchain {
    program: String,
    env: BTreeMap<String, String>,
    timeout: Option<Duration>,
}

impl ProcessToolchain {
    pub fn new(program: impl Into<String>, env: BTreeMap<String, String>) -> Self {
        Self {
            program: program.into(),
            env,
            timeout: None,
        }
    }

    pub fn from_config(config: &ToolchainConfig) -> Self {
        let toolchain = Self::new(&config.program, config.env.clone());
        match config.timeout_secs {
            Some(secs) => toolchain.with_timeout(Duration::from_secs(secs)),
            None => toolchain,
        }
    }

    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// `mod download -modfile <m>` / `build -modfile <m> ./...`
    pub fn step_args(step: ToolchainStep, manifest: &Path) -> Vec<OsString> {
        let manifest = manifest.as_os_str().to_os_string();
        match step {
            ToolchainStep::Download => vec![
                "mod".into(),
                "download".into(),
                "-modfile".into(),
                manifest,
            ],
            ToolchainStep::Build => vec![
                "build".into(),
                "-modfile".into(),
                manifest,
                "./...".into(),
            ],
        }
    }

    fn describe(&self, args: &[OsString]) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

#[async_trait]
impl Toolchain for ProcessToolchain {
    async fn run(
        &self,
        step: ToolchainStep,
        package_dir: &Path,
        manifest: &Path,
    ) -> Result<StepOutput, ShadowmodError> {
        let args = Self::step_args(step, manifest);
        let command_line = self.describe(&args);
        debug!(cwd = ?package_dir, command = %command_line, "Spawning toolchain");

        let mut cmd = Command::new(&self.program);
        cmd.args(&args)
            .current_dir(package_dir)
            .envs(&self.env)
            .kill_on_drop(true)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|source| InfrastructureError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let output = match self.timeout {
            Some(limit) => timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| InfrastructureError::Timeout {
                    command: command_line.clone(),
                    after: limit,
                })??,
            None => child.wait_with_output().await?,
        };

        Ok(StepOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
