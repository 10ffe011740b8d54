// shadowmod-core/src/application/resolver.rs

use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, instrument};

use crate::domain::OverrideMap;
use crate::domain::graph::{NodeId, PackageGraph};
use crate::infrastructure::locator::LocalModuleLocator;

/// Walks the package graph and maps every dependency that has a local build
/// to its directory.
///
/// Traversal is depth-first from the root's direct dependencies, in
/// declaration order. A dependency resolved from the registry is still
/// descended into: its own dependencies may be local, and only the top-level
/// manifest's `replace` directives are honoured by the toolchain.
#[derive(Debug, Clone)]
pub struct OverrideResolver {
    locator: LocalModuleLocator,
}

impl OverrideResolver {
    pub fn new(locator: LocalModuleLocator) -> Self {
        Self { locator }
    }

    pub fn resolve(&self, graph: &PackageGraph, candidate_dirs: &[PathBuf]) -> OverrideMap {
        self.resolve_seeded(graph, candidate_dirs, OverrideMap::new())
    }

    /// Like [`resolve`](Self::resolve), starting from pre-recorded entries.
    /// Seeds are never overwritten by the walk.
    #[instrument(skip_all, fields(root = graph.root().module(), candidates = candidate_dirs.len()))]
    pub fn resolve_seeded(
        &self,
        graph: &PackageGraph,
        candidate_dirs: &[PathBuf],
        seeds: OverrideMap,
    ) -> OverrideMap {
        let mut overrides = seeds;
        let mut visited = HashSet::from([graph.root_id()]);

        self.visit(graph, graph.root_id(), candidate_dirs, &mut visited, &mut overrides);

        debug!(overrides = overrides.len(), "Override resolution finished");
        overrides
    }

    fn visit(
        &self,
        graph: &PackageGraph,
        id: NodeId,
        candidate_dirs: &[PathBuf],
        visited: &mut HashSet<NodeId>,
        overrides: &mut OverrideMap,
    ) {
        for (dep_id, dep) in graph.dependencies(id) {
            // Each node is probed and descended into once; cycles end here.
            if !visited.insert(dep_id) {
                continue;
            }

            if !overrides.contains(dep.module()) {
                let found = candidate_dirs
                    .iter()
                    .find_map(|base| self.locator.locate(base, dep));
                if let Some(path) = found {
                    debug!(module = dep.module(), path = ?path, "Found local build");
                    overrides.record(dep.module(), path);
                }
            }

            self.visit(graph, dep_id, candidate_dirs, visited, overrides);
        }
    }
}
