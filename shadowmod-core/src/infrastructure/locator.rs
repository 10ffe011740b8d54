// shadowmod-core/src/infrastructure/locator.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::domain::graph::PackageNode;
use crate::domain::project::ManifestText;

/// Probes build roots for a freshly generated copy of a dependency.
///
/// A candidate `<base>/<package name>/<manifest>` only counts when its
/// manifest declares exactly the expected module: a leftover build of another
/// major version shares the directory name but not the module identity.
#[derive(Debug, Clone)]
pub struct LocalModuleLocator {
    manifest_file: String,
}

impl LocalModuleLocator {
    pub fn new(manifest_file: impl Into<String>) -> Self {
        Self {
            manifest_file: manifest_file.into(),
        }
    }

    /// Absolute directory of the local build of `node` under `base_dir`, or
    /// `None` when there is none. Never writes, never fails.
    pub fn locate(&self, base_dir: &Path, node: &PackageNode) -> Option<PathBuf> {
        let manifest_path = base_dir
            .join(node.package_name())
            .join(&self.manifest_file);

        if !manifest_path.is_file() {
            return None;
        }

        let content = match fs::read_to_string(&manifest_path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = ?manifest_path, error = %e, "Unreadable manifest, skipping candidate");
                return None;
            }
        };

        if !ManifestText::parse(&content).declares_module(node.module()) {
            debug!(
                path = ?manifest_path,
                module = node.module(),
                "Manifest declares another module, skipping candidate"
            );
            return None;
        }

        let module_dir = manifest_path.parent()?;
        // `replace` targets must not carry `..` segments or symlinks.
        match fs::canonicalize(module_dir) {
            Ok(dir) => Some(dir),
            Err(e) => {
                warn!(path = ?module_dir, error = %e, "Cannot canonicalize module directory");
                None
            }
        }
    }
}
