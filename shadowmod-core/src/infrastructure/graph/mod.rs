// shadowmod-core/src/infrastructure/graph/mod.rs

pub mod descriptor;
pub mod roots;

pub use descriptor::{GraphDescriptor, YamlGraphProvider};
pub use roots::{candidate_dirs, discover_sibling_roots};
