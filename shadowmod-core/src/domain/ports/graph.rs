use crate::domain::graph::PackageGraph;
use crate::error::ShadowmodError;
use std::path::Path;

/// Supplies the dependency graph of the package generated into `package_dir`.
pub trait GraphProvider: Send + Sync {
    fn load(&self, package_dir: &Path) -> Result<PackageGraph, ShadowmodError>;
}
