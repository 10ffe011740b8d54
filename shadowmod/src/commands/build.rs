// shadowmod/src/commands/build.rs
//
// USE CASE: Verify a generated package against the real toolchain.

use std::path::PathBuf;

use anyhow::Context;
use shadowmod_core::ShadowmodError;
use shadowmod_core::application::BuildOrchestrator;
use shadowmod_core::infrastructure::adapters::ProcessToolchain;
use shadowmod_core::infrastructure::config::load_project_config;
use shadowmod_core::infrastructure::graph::YamlGraphProvider;

pub async fn execute(package_dir: PathBuf, project_dir: PathBuf) -> anyhow::Result<()> {
    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load shadowmod configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Toolchain: {}", config.toolchain.program);

    // B. Adapters
    let graph_provider = YamlGraphProvider::new(&config.graph_path);
    let toolchain = ProcessToolchain::from_config(&config.toolchain);

    // C. Run the build (Application Layer)
    let result = BuildOrchestrator::new(&graph_provider, &toolchain, &config)
        .build(&package_dir)
        .await;

    match result {
        Ok(report) => {
            for (module, path) in report.overrides.iter() {
                println!("   🔗 {} => {}", module, path.display());
            }
            println!(
                "\n✨ SUCCESS! {} verified in {:.2?}",
                report.package_dir.display(),
                report.duration
            );
        }
        Err(e) => {
            eprintln!("\n💥 BUILD FAILED");
            report_failure(&e);
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    }

    Ok(())
}

fn report_failure(err: &ShadowmodError) {
    let stderr = match err {
        ShadowmodError::Build(build_err) => build_err.stderr(),
        _ => None,
    };
    if let Some(stderr) = stderr.filter(|s| !s.trim().is_empty()) {
        eprintln!("\n--- toolchain stderr ---\n{}", stderr.trim_end());
    }
    if let Some(diagnostic) = err.diagnostic_text() {
        eprintln!("\n--- shadow manifest (kept for inspection) ---\n{}", diagnostic);
    }
}
