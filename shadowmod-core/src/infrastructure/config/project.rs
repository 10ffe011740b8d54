// shadowmod-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::project::configuration::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["shadowmod.yaml", "shadowmod.yml"];

// --- LOADER ---

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Discover the main file (optional: defaults target the Go toolchain)
    let mut config = match find_main_config(project_dir) {
        Some(config_path) => {
            info!(path = ?config_path, "Loading project configuration");
            let content = fs::read_to_string(&config_path)?;
            parse_config(&content)?
        }
        None => {
            info!(dir = ?project_dir, "No shadowmod.yaml found, using defaults");
            ProjectConfig::default()
        }
    };

    // 2. Relative paths are relative to the project, not to the caller's cwd
    absolutize_paths(&mut config, project_dir);

    // 3. Environment overrides (layering)
    // e.g. SHADOWMOD_TOOLCHAIN=/usr/local/go/bin/go shadowmod build ...
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    Ok(config)
}

pub fn parse_config(content: &str) -> Result<ProjectConfig, InfrastructureError> {
    // An empty file is a valid "all defaults" configuration.
    if content.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }
    let config: ProjectConfig = serde_yaml::from_str(content)?;
    config.manifest.validate().map_err(|e| {
        InfrastructureError::ConfigError(format!(
            "invalid manifest layout (file-name, shadow-prefix, lock-extension): {}",
            e
        ))
    })?;
    Ok(config)
}

fn find_main_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|filename| root.join(filename))
        .find(|p| p.is_file())
}

fn absolutize_paths(config: &mut ProjectConfig, project_dir: &Path) {
    let anchor = |p: &PathBuf| {
        if p.is_absolute() {
            p.clone()
        } else {
            project_dir.join(p)
        }
    };

    config.build_roots = config.build_roots.iter().map(anchor).collect();
    config.sibling_roots = config.sibling_roots.iter().map(anchor).collect();
    for path in config.runtime_modules.values_mut() {
        *path = anchor(&*path);
    }
}

fn apply_env_overrides<F>(config: &mut ProjectConfig, lookup: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("SHADOWMOD_TOOLCHAIN") {
        info!(old = ?config.toolchain.program, new = ?val, "Overriding toolchain via ENV");
        config.toolchain.program = val;
    }
    if let Some(val) = lookup("SHADOWMOD_TIMEOUT_SECS") {
        let secs = val.trim().parse::<u64>().map_err(|_| {
            InfrastructureError::ConfigError(format!(
                "SHADOWMOD_TIMEOUT_SECS must be a number of seconds, got '{}'",
                val
            ))
        })?;
        info!(old = ?config.toolchain.timeout_secs, new = secs, "Overriding timeout via ENV");
        config.toolchain.timeout_secs = Some(secs);
    }
    Ok(())
}
