// shadowmod-core/src/domain/graph/mod.rs

pub mod package;

pub use package::{NodeId, PackageGraph, PackageGraphBuilder, PackageNode, PackageSpec};
