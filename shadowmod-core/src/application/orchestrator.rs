// shadowmod-core/src/application/orchestrator.rs

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

use crate::application::error::BuildError;
use crate::application::resolver::OverrideResolver;
use crate::domain::OverrideMap;
use crate::domain::ports::GraphProvider;
use crate::domain::project::ProjectConfig;
use crate::error::ShadowmodError;
use crate::infrastructure::fs::remove_if_exists;
use crate::infrastructure::graph::candidate_dirs;
use crate::infrastructure::locator::LocalModuleLocator;
use crate::infrastructure::patcher::{ManifestPatcher, ShadowManifest};
use crate::ports::toolchain::{StepOutput, Toolchain, ToolchainStep};

/// Outcome of the resolve step, also used for dry runs.
#[derive(Debug, Clone)]
pub struct ResolvePlan {
    pub candidate_dirs: Vec<PathBuf>,
    pub overrides: OverrideMap,
}

#[derive(Debug, Clone)]
pub struct BuildReport {
    pub package_dir: PathBuf,
    pub overrides: OverrideMap,
    /// Shadow artifacts deleted during cleanup.
    pub removed: Vec<PathBuf>,
    pub duration: Duration,
}

/// Verifies a generated package against the real toolchain:
/// Resolve -> Patch -> Download -> Compile -> Cleanup.
///
/// Steps run strictly in sequence. A failed toolchain step ends the build and
/// leaves the shadow manifest and lock artifact in place for postmortem.
/// Concurrent builds of the same package directory must be serialized by the
/// caller.
pub struct BuildOrchestrator<'a> {
    graph_provider: &'a dyn GraphProvider,
    toolchain: &'a dyn Toolchain,
    config: &'a ProjectConfig,
}

impl<'a> BuildOrchestrator<'a> {
    pub fn new(
        graph_provider: &'a dyn GraphProvider,
        toolchain: &'a dyn Toolchain,
        config: &'a ProjectConfig,
    ) -> Self {
        Self {
            graph_provider,
            toolchain,
            config,
        }
    }

    /// Resolve step: candidate build roots and the override map, without
    /// touching the package directory.
    pub fn plan(&self, package_dir: &Path) -> Result<ResolvePlan, ShadowmodError> {
        let graph = self.graph_provider.load(package_dir)?;
        let dirs = candidate_dirs(package_dir, self.config);

        let mut seeds = OverrideMap::new();
        for (module, path) in &self.config.runtime_modules {
            info!(module = %module, path = ?path, "Using local runtime module");
            seeds.record(module, path.clone());
        }

        let resolver =
            OverrideResolver::new(LocalModuleLocator::new(&self.config.manifest.file_name));
        let overrides = resolver.resolve_seeded(&graph, &dirs, seeds);

        Ok(ResolvePlan {
            candidate_dirs: dirs,
            overrides,
        })
    }

    #[instrument(skip(self), fields(package_dir = %package_dir.display()))]
    pub async fn build(&self, package_dir: &Path) -> Result<BuildReport, ShadowmodError> {
        let start = Instant::now();

        // 1. RESOLVE
        info!("🔎 Resolving local dependency overrides...");
        let plan = self.plan(package_dir)?;
        info!(
            overrides = plan.overrides.len(),
            candidates = plan.candidate_dirs.len(),
            "Resolution complete"
        );

        // 2. PATCH
        let manifest_path = self.config.manifest.manifest_path(package_dir);
        let shadow = ManifestPatcher::new(self.config.manifest.clone())
            .write_shadow(&manifest_path, &plan.overrides)?;
        info!(shadow = %shadow.path.display(), "📝 Shadow manifest written");

        // 3. DOWNLOAD
        info!("⬇️  Downloading dependencies...");
        let download = match self
            .toolchain
            .run(ToolchainStep::Download, package_dir, &shadow.path)
            .await
        {
            Ok(output) => output,
            Err(cause) => {
                let diagnostic = read_diagnostic(&shadow);
                info!("Content of {} file:\n{}", shadow.path.display(), diagnostic);
                error!(error = %cause, "❌ Dependency download aborted");
                return Err(aborted(ToolchainStep::Download, &shadow, cause, diagnostic).into());
            }
        };
        if !download.success() {
            let diagnostic = read_diagnostic(&shadow);
            info!("Content of {} file:\n{}", shadow.path.display(), diagnostic);
            error!(status = %download.status(), "❌ Dependency download failed");
            return Err(failure(ToolchainStep::Download, &shadow, download, diagnostic).into());
        }

        // 4. COMPILE
        info!("🔨 Building all packages...");
        let build = match self
            .toolchain
            .run(ToolchainStep::Build, package_dir, &shadow.path)
            .await
        {
            Ok(output) => output,
            Err(cause) => {
                error!(error = %cause, "❌ Build aborted");
                let diagnostic = read_diagnostic(&shadow);
                return Err(aborted(ToolchainStep::Build, &shadow, cause, diagnostic).into());
            }
        };
        if !build.success() {
            let diagnostic = read_diagnostic(&shadow);
            error!(status = %build.status(), "❌ Build failed");
            return Err(failure(ToolchainStep::Build, &shadow, build, diagnostic).into());
        }

        // 5. CLEANUP (shadow artifacts must never be published)
        let mut removed = Vec::new();
        for path in [&shadow.path, &shadow.lock_path] {
            let deleted = remove_if_exists(path).map_err(|source| BuildError::CleanupFailed {
                path: path.clone(),
                source,
            })?;
            if deleted {
                removed.push(path.clone());
            }
        }

        let duration = start.elapsed();
        info!("✨ Package verified in {:.2?}", duration);

        Ok(BuildReport {
            package_dir: package_dir.to_path_buf(),
            overrides: plan.overrides,
            removed,
            duration,
        })
    }
}

// The shadow file is the diagnostic; if even that cannot be read, say so
// rather than masking the toolchain failure.
fn read_diagnostic(shadow: &ShadowManifest) -> String {
    shadow
        .read_content()
        .unwrap_or_else(|e| format!("<unable to read {}: {}>", shadow.path.display(), e))
}

fn aborted(
    step: ToolchainStep,
    shadow: &ShadowManifest,
    cause: ShadowmodError,
    diagnostic: String,
) -> BuildError {
    BuildError::StepAborted {
        step,
        shadow_path: shadow.path.clone(),
        diagnostic,
        source: Box::new(cause),
    }
}

fn failure(
    step: ToolchainStep,
    shadow: &ShadowManifest,
    output: StepOutput,
    diagnostic: String,
) -> BuildError {
    let status = output.status();
    let shadow_path = shadow.path.clone();
    match step {
        ToolchainStep::Download => BuildError::DownloadFailed {
            shadow_path,
            status,
            stderr: output.stderr,
            diagnostic,
        },
        ToolchainStep::Build => BuildError::BuildFailed {
            shadow_path,
            status,
            stderr: output.stderr,
            diagnostic,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::graph::{PackageGraph, PackageSpec};
    use crate::domain::DomainError;
    use crate::infrastructure::error::InfrastructureError;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::{TempDir, tempdir};

    struct StaticGraph(PackageGraph);

    impl GraphProvider for StaticGraph {
        fn load(&self, _package_dir: &Path) -> Result<PackageGraph, ShadowmodError> {
            Ok(self.0.clone())
        }
    }

    /// Scripted toolchain: records every call, writes the lock artifact on
    /// download like `go mod download` does, exits with the scripted codes.
    struct FakeToolchain {
        download_exit: i32,
        build_exit: i32,
        lock_as_dir: bool,
        abort_on: Option<ToolchainStep>,
        calls: Mutex<Vec<(ToolchainStep, PathBuf, String)>>,
    }

    impl FakeToolchain {
        fn new(download_exit: i32, build_exit: i32) -> Self {
            Self {
                download_exit,
                build_exit,
                lock_as_dir: false,
                abort_on: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn steps(&self) -> Vec<ToolchainStep> {
            self.calls.lock().unwrap().iter().map(|c| c.0).collect()
        }
    }

    #[async_trait]
    impl Toolchain for FakeToolchain {
        async fn run(
            &self,
            step: ToolchainStep,
            package_dir: &Path,
            manifest: &Path,
        ) -> Result<StepOutput, ShadowmodError> {
            let seen = fs::read_to_string(manifest)?;
            self.calls
                .lock()
                .unwrap()
                .push((step, manifest.to_path_buf(), seen));

            if self.abort_on == Some(step) {
                return Err(InfrastructureError::Timeout {
                    command: format!("go {}", step),
                    after: Duration::from_secs(1),
                }
                .into());
            }

            let exit = match step {
                ToolchainStep::Download => {
                    let lock = package_dir.join("local.go.sum");
                    if self.lock_as_dir {
                        fs::create_dir_all(lock.join("nested"))?;
                    } else {
                        fs::write(lock, "example.com/foo v1.0.0 h1:abc=\n")?;
                    }
                    self.download_exit
                }
                ToolchainStep::Build => self.build_exit,
            };

            Ok(StepOutput {
                exit_code: Some(exit),
                stdout: String::new(),
                stderr: format!("{} exited {}", step, exit),
            })
        }
    }

    struct Fixture {
        _tmp: TempDir,
        package_dir: PathBuf,
        foo_dir: PathBuf,
        graph: PackageGraph,
    }

    // dist/go/demo depends on example.com/foo, generated next to it.
    fn fixture() -> Result<Fixture> {
        let tmp = tempdir()?;
        let out = tmp.path().join("dist/go");
        let package_dir = out.join("demo");
        let foo_dir = out.join("foo");
        fs::create_dir_all(&package_dir)?;
        fs::create_dir_all(&foo_dir)?;

        fs::write(
            package_dir.join("go.mod"),
            "module example.com/demo\n\ngo 1.21\n\nrequire example.com/foo v1.0.0\n",
        )?;
        fs::write(package_dir.join("main.go"), "package demo\n")?;
        fs::write(package_dir.join("LICENSE"), "MIT\n")?;
        fs::write(foo_dir.join("go.mod"), "module example.com/foo\n")?;
        let foo_dir = fs::canonicalize(foo_dir)?;

        let graph = PackageGraph::from_specs(
            "example.com/demo",
            &[
                PackageSpec {
                    name: "demo".into(),
                    module: "example.com/demo".into(),
                    dependencies: vec!["example.com/foo".into()],
                },
                PackageSpec {
                    name: "foo".into(),
                    module: "example.com/foo".into(),
                    dependencies: vec![],
                },
            ],
        )?;

        Ok(Fixture {
            _tmp: tmp,
            package_dir,
            foo_dir,
            graph,
        })
    }

    #[tokio::test]
    async fn test_build_success_cleans_shadow_artifacts_only() -> Result<()> {
        let fx = fixture()?;
        let provider = StaticGraph(fx.graph.clone());
        let toolchain = FakeToolchain::new(0, 0);
        let config = ProjectConfig::default();
        let canonical = fs::read_to_string(fx.package_dir.join("go.mod"))?;

        let report = BuildOrchestrator::new(&provider, &toolchain, &config)
            .build(&fx.package_dir)
            .await?;

        assert_eq!(
            toolchain.steps(),
            vec![ToolchainStep::Download, ToolchainStep::Build]
        );
        let calls = toolchain.calls.lock().unwrap();
        assert_eq!(calls[0].1, fx.package_dir.join("local.go.mod"));
        assert!(calls[0].2.ends_with(&format!(
            "replace example.com/foo => {}",
            fx.foo_dir.display()
        )));
        drop(calls);

        assert_eq!(report.overrides.get("example.com/foo"), Some(fx.foo_dir.as_path()));
        assert_eq!(
            report.removed,
            vec![
                fx.package_dir.join("local.go.mod"),
                fx.package_dir.join("local.go.sum")
            ]
        );
        assert!(!fx.package_dir.join("local.go.mod").exists());
        assert!(!fx.package_dir.join("local.go.sum").exists());
        assert_eq!(fs::read_to_string(fx.package_dir.join("go.mod"))?, canonical);
        assert!(fx.package_dir.join("main.go").exists());
        assert!(fx.package_dir.join("LICENSE").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_download_failure_keeps_shadow_and_reports_it() -> Result<()> {
        let fx = fixture()?;
        let provider = StaticGraph(fx.graph.clone());
        let toolchain = FakeToolchain::new(1, 0);
        let config = ProjectConfig::default();

        let err = BuildOrchestrator::new(&provider, &toolchain, &config)
            .build(&fx.package_dir)
            .await
            .unwrap_err();

        let shadow = fx.package_dir.join("local.go.mod");
        assert!(shadow.exists());
        assert!(fx.package_dir.join("local.go.sum").exists());
        assert_eq!(err.diagnostic_text(), Some(fs::read_to_string(&shadow)?.as_str()));
        assert!(matches!(
            err,
            ShadowmodError::Build(BuildError::DownloadFailed { ref stderr, .. })
                if stderr == "download exited 1"
        ));
        // build never ran
        assert_eq!(toolchain.steps(), vec![ToolchainStep::Download]);
        Ok(())
    }

    #[tokio::test]
    async fn test_download_timeout_keeps_shadow_and_carries_it() -> Result<()> {
        let fx = fixture()?;
        let provider = StaticGraph(fx.graph.clone());
        let mut toolchain = FakeToolchain::new(0, 0);
        toolchain.abort_on = Some(ToolchainStep::Download);
        let config = ProjectConfig::default();

        let err = BuildOrchestrator::new(&provider, &toolchain, &config)
            .build(&fx.package_dir)
            .await
            .unwrap_err();

        let shadow = fx.package_dir.join("local.go.mod");
        assert!(shadow.exists());
        assert_eq!(err.diagnostic_text(), Some(fs::read_to_string(&shadow)?.as_str()));
        match &err {
            ShadowmodError::Build(BuildError::StepAborted { step, source, .. }) => {
                assert_eq!(*step, ToolchainStep::Download);
                assert!(matches!(
                    **source,
                    ShadowmodError::Infrastructure(InfrastructureError::Timeout { .. })
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(toolchain.steps(), vec![ToolchainStep::Download]);
        Ok(())
    }

    #[tokio::test]
    async fn test_build_step_abort_keeps_shadow_artifacts() -> Result<()> {
        let fx = fixture()?;
        let provider = StaticGraph(fx.graph.clone());
        let mut toolchain = FakeToolchain::new(0, 0);
        toolchain.abort_on = Some(ToolchainStep::Build);
        let config = ProjectConfig::default();

        let err = BuildOrchestrator::new(&provider, &toolchain, &config)
            .build(&fx.package_dir)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ShadowmodError::Build(BuildError::StepAborted {
                step: ToolchainStep::Build,
                ..
            })
        ));
        assert!(err.diagnostic_text().is_some());
        assert!(fx.package_dir.join("local.go.mod").exists());
        assert!(fx.package_dir.join("local.go.sum").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_shadow_prefix_never_touches_canonical_manifest() -> Result<()> {
        let fx = fixture()?;
        let provider = StaticGraph(fx.graph.clone());
        let toolchain = FakeToolchain::new(0, 0);
        let mut config = ProjectConfig::default();
        config.manifest.shadow_prefix = String::new();
        let canonical = fs::read_to_string(fx.package_dir.join("go.mod"))?;

        let result = BuildOrchestrator::new(&provider, &toolchain, &config)
            .build(&fx.package_dir)
            .await;

        assert!(matches!(
            result,
            Err(ShadowmodError::Domain(DomainError::UnsafeShadowName { .. }))
        ));
        assert_eq!(fs::read_to_string(fx.package_dir.join("go.mod"))?, canonical);
        assert!(toolchain.steps().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_build_failure_keeps_shadow_artifacts() -> Result<()> {
        let fx = fixture()?;
        let provider = StaticGraph(fx.graph.clone());
        let toolchain = FakeToolchain::new(0, 2);
        let config = ProjectConfig::default();

        let err = BuildOrchestrator::new(&provider, &toolchain, &config)
            .build(&fx.package_dir)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ShadowmodError::Build(BuildError::BuildFailed { ref status, .. })
                if status == "exit code 2"
        ));
        assert!(fx.package_dir.join("local.go.mod").exists());
        assert!(fx.package_dir.join("local.go.sum").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_cleanup_failure_fails_the_build() -> Result<()> {
        let fx = fixture()?;
        let provider = StaticGraph(fx.graph.clone());
        let mut toolchain = FakeToolchain::new(0, 0);
        toolchain.lock_as_dir = true;
        let config = ProjectConfig::default();

        let err = BuildOrchestrator::new(&provider, &toolchain, &config)
            .build(&fx.package_dir)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ShadowmodError::Build(BuildError::CleanupFailed { ref path, .. })
                if path == &fx.package_dir.join("local.go.sum")
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_manifest_fails_before_toolchain() -> Result<()> {
        let fx = fixture()?;
        fs::remove_file(fx.package_dir.join("go.mod"))?;
        let provider = StaticGraph(fx.graph.clone());
        let toolchain = FakeToolchain::new(0, 0);
        let config = ProjectConfig::default();

        let result = BuildOrchestrator::new(&provider, &toolchain, &config)
            .build(&fx.package_dir)
            .await;

        assert!(matches!(result, Err(ShadowmodError::Infrastructure(_))));
        assert!(toolchain.steps().is_empty());
        Ok(())
    }

    #[test]
    fn test_plan_seeds_runtime_modules_first() -> Result<()> {
        let fx = fixture()?;
        let provider = StaticGraph(fx.graph.clone());
        let toolchain = FakeToolchain::new(0, 0);
        let mut config = ProjectConfig::default();
        config
            .runtime_modules
            .insert("example.com/foo".into(), PathBuf::from("/src/runtime/foo"));

        let plan = BuildOrchestrator::new(&provider, &toolchain, &config).plan(&fx.package_dir)?;

        assert_eq!(plan.candidate_dirs[0], fx.package_dir.parent().unwrap());
        assert_eq!(
            plan.overrides.get("example.com/foo"),
            Some(Path::new("/src/runtime/foo"))
        );
        Ok(())
    }
}
