// shadowmod-core/src/infrastructure/graph/descriptor.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::graph::{PackageGraph, PackageSpec};
use crate::domain::ports::GraphProvider;
use crate::error::ShadowmodError;
use crate::infrastructure::error::InfrastructureError;

/// On-disk form of the package graph, written by the generator next to the
/// generated package.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GraphDescriptor {
    /// Module identifier of the package being built.
    pub root: String,
    pub packages: Vec<PackageSpec>,
}

/// Reads the graph from a YAML descriptor. Relative descriptor paths are
/// resolved against the package directory.
#[derive(Debug, Clone)]
pub struct YamlGraphProvider {
    descriptor_path: PathBuf,
}

impl YamlGraphProvider {
    pub fn new(descriptor_path: impl Into<PathBuf>) -> Self {
        Self {
            descriptor_path: descriptor_path.into(),
        }
    }

    pub fn descriptor_for(&self, package_dir: &Path) -> PathBuf {
        package_dir.join(&self.descriptor_path)
    }
}

impl GraphProvider for YamlGraphProvider {
    fn load(&self, package_dir: &Path) -> Result<PackageGraph, ShadowmodError> {
        let path = self.descriptor_for(package_dir);
        if !path.is_file() {
            return Err(InfrastructureError::GraphNotFound(path.display().to_string()).into());
        }

        let content = fs::read_to_string(&path)?;
        let descriptor: GraphDescriptor =
            serde_yaml::from_str(&content).map_err(InfrastructureError::from)?;

        let graph = PackageGraph::from_specs(&descriptor.root, &descriptor.packages)?;
        info!(
            root = %descriptor.root,
            packages = graph.len(),
            "📦 Package graph loaded"
        );
        Ok(graph)
    }
}
