// shadowmod-core/src/infrastructure/graph/roots.rs

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::domain::project::ProjectConfig;

/// Ordered directories that may hold locally generated sibling packages.
///
/// Priority: the package's own output directory (a recursive generation run
/// puts every package there), then explicit `build-roots`, then the output
/// trees discovered under `sibling-roots`. Duplicates keep their first slot.
pub fn candidate_dirs(package_dir: &Path, config: &ProjectConfig) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();

    let package_dir = std::path::absolute(package_dir).unwrap_or_else(|_| package_dir.to_path_buf());
    if let Some(output_dir) = package_dir.parent() {
        dirs.push(output_dir.to_path_buf());
    }

    dirs.extend(config.build_roots.iter().cloned());
    dirs.extend(discover_sibling_roots(
        &config.sibling_roots,
        &config.output_subdir,
    ));

    let mut seen = HashSet::new();
    dirs.retain(|d| seen.insert(d.clone()));
    dirs
}

/// `<child>/<output_subdir>` for every immediate child of each root that has
/// such a directory. Children are visited in file-name order.
pub fn discover_sibling_roots(roots: &[PathBuf], output_subdir: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for root in roots {
        if !root.is_dir() {
            debug!(root = ?root, "Sibling root does not exist, skipping");
            continue;
        }

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker.into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_dir() {
                continue;
            }
            let candidate = entry.path().join(output_subdir);
            if candidate.is_dir() {
                debug!(dir = ?candidate, "Discovered local build root");
                found.push(candidate);
            }
        }
    }

    found
}
