// shadowmod/src/commands/resolve.rs
//
// USE CASE: Dry run of the resolve step. Nothing is written.

use std::path::PathBuf;

use comfy_table::Table;
use shadowmod_core::application::BuildOrchestrator;
use shadowmod_core::infrastructure::adapters::ProcessToolchain;
use shadowmod_core::infrastructure::config::load_project_config;
use shadowmod_core::infrastructure::graph::YamlGraphProvider;

pub fn execute(package_dir: PathBuf, project_dir: PathBuf, json: bool) -> anyhow::Result<()> {
    let config = load_project_config(&project_dir)?;
    let graph_provider = YamlGraphProvider::new(&config.graph_path);
    // The toolchain is never invoked by `plan`.
    let toolchain = ProcessToolchain::from_config(&config.toolchain);

    let plan = BuildOrchestrator::new(&graph_provider, &toolchain, &config).plan(&package_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan.overrides)?);
        return Ok(());
    }

    println!("📂 Candidate build roots:");
    for dir in &plan.candidate_dirs {
        println!("   {}", dir.display());
    }

    if plan.overrides.is_empty() {
        println!("\nNo local builds found: every dependency resolves from the registry.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Module", "Local path"]);
    for (module, path) in plan.overrides.iter() {
        table.add_row(vec![module.to_string(), path.display().to_string()]);
    }
    println!("\n{table}");

    Ok(())
}
