// shadowmod/src/commands/clean.rs
//
// USE CASE: Remove shadow artifacts kept after a failed build.

use std::path::PathBuf;

use shadowmod_core::application::clean_shadow_artifacts;
use shadowmod_core::infrastructure::config::load_project_config;

pub fn execute(package_dir: PathBuf, project_dir: PathBuf) -> anyhow::Result<()> {
    let config = load_project_config(&project_dir)?;

    match clean_shadow_artifacts(&package_dir, &config.manifest) {
        Ok(removed) if removed.is_empty() => println!("✨ Nothing to clean."),
        Ok(removed) => {
            for path in removed {
                println!("   🗑️  Artifact removed: {}", path.display());
            }
        }
        Err(e) => {
            eprintln!("❌ Clean failed:\n{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    }
    Ok(())
}
