// src/domain/project/configuration.rs

use crate::domain::project::manifest::ManifestLayout;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// External toolchain driven against the shadow manifest.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ToolchainConfig {
    #[serde(default = "default_program")]
    pub program: String,

    /// Subprocess-only environment. Defaults to disabling the checksum
    /// database so freshly generated, unpublished modules are accepted.
    #[serde(default = "default_env")]
    pub env: BTreeMap<String, String>,

    #[serde(rename = "timeout-secs", default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            env: default_env(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    #[serde(default)]
    pub manifest: ManifestLayout,

    #[serde(rename = "graph-path", default = "default_graph_path")]
    pub graph_path: String,

    /// Extra local build roots, probed after the package's own output dir.
    #[serde(rename = "build-roots", default)]
    pub build_roots: Vec<PathBuf>,

    /// Directories whose children may hold a sibling package's output tree.
    #[serde(rename = "sibling-roots", default)]
    pub sibling_roots: Vec<PathBuf>,

    #[serde(rename = "output-subdir", default = "default_output_subdir")]
    pub output_subdir: String,

    /// Local runtime modules that are never part of the package graph.
    #[serde(rename = "runtime-modules", default)]
    pub runtime_modules: BTreeMap<String, PathBuf>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            toolchain: ToolchainConfig::default(),
            manifest: ManifestLayout::default(),
            graph_path: default_graph_path(),
            build_roots: Vec::new(),
            sibling_roots: Vec::new(),
            output_subdir: default_output_subdir(),
            runtime_modules: BTreeMap::new(),
        }
    }
}

fn default_program() -> String {
    "go".to_string()
}
fn default_env() -> BTreeMap<String, String> {
    BTreeMap::from([("GOSUMDB".to_string(), "off".to_string())])
}
fn default_graph_path() -> String {
    "shadowmod.graph.yaml".to_string()
}
fn default_output_subdir() -> String {
    "dist/go".to_string()
}
