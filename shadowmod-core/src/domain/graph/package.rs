// shadowmod-core/src/domain/graph/package.rs

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Index of a node inside its owning [`PackageGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A generated package: its directory name, its module identity and its
/// direct dependencies (in declaration order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNode {
    package_name: String,
    module: String,
    dependencies: Vec<NodeId>,
}

impl PackageNode {
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn dependencies(&self) -> &[NodeId] {
        &self.dependencies
    }
}

/// Declarative form of a node, as emitted by the generator.
/// Dependencies are referenced by module identifier.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackageSpec {
    pub name: String,
    pub module: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Read-only package graph. Nodes live in an arena and reference each other
/// by [`NodeId`], so shared dependencies (diamonds) are stored once.
#[derive(Debug, Clone)]
pub struct PackageGraph {
    nodes: Vec<PackageNode>,
    root: NodeId,
}

impl PackageGraph {
    /// Builds the graph from flat package specs. Every dependency must refer
    /// to a declared module; module identifiers must be unique.
    pub fn from_specs(root_module: &str, specs: &[PackageSpec]) -> Result<Self, DomainError> {
        let mut builder = PackageGraphBuilder::default();
        let mut ids: HashMap<&str, NodeId> = HashMap::new();

        // 1. Declare every node first so forward references resolve.
        for spec in specs {
            if ids.contains_key(spec.module.as_str()) {
                return Err(DomainError::DuplicateModule(spec.module.clone()));
            }
            let id = builder.add_package(&spec.name, &spec.module);
            ids.insert(spec.module.as_str(), id);
        }

        // 2. Wire edges in declaration order
        for spec in specs {
            let from = ids[spec.module.as_str()];
            for dep in &spec.dependencies {
                let to = ids
                    .get(dep.as_str())
                    .copied()
                    .ok_or_else(|| DomainError::UnknownDependency {
                        package: spec.name.clone(),
                        module: dep.clone(),
                    })?;
                builder.add_dependency(from, to);
            }
        }

        let root = ids
            .get(root_module)
            .copied()
            .ok_or_else(|| DomainError::RootNotFound(root_module.to_string()))?;

        Ok(builder.build(root))
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &PackageNode {
        self.node(self.root)
    }

    pub fn node(&self, id: NodeId) -> &PackageNode {
        &self.nodes[id.0]
    }

    /// Direct dependencies of `id`, in declaration order.
    pub fn dependencies(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &PackageNode)> {
        self.node(id)
            .dependencies
            .iter()
            .map(move |dep| (*dep, self.node(*dep)))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Incremental construction of a [`PackageGraph`]. The graph is immutable
/// once `build` is called.
#[derive(Debug, Default)]
pub struct PackageGraphBuilder {
    nodes: Vec<PackageNode>,
}

impl PackageGraphBuilder {
    pub fn add_package(&mut self, package_name: &str, module: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(PackageNode {
            package_name: package_name.to_string(),
            module: module.to_string(),
            dependencies: Vec::new(),
        });
        id
    }

    pub fn add_dependency(&mut self, from: NodeId, to: NodeId) {
        self.nodes[from.0].dependencies.push(to);
    }

    pub fn build(self, root: NodeId) -> PackageGraph {
        PackageGraph {
            nodes: self.nodes,
            root,
        }
    }
}
