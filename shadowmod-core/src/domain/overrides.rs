// shadowmod-core/src/domain/overrides.rs

use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Module identifier -> local directory replacing it.
///
/// First-found-wins: once a module is recorded its path never changes.
/// Iteration follows insertion order, which is the traversal order of the
/// resolver, so two runs over the same inputs produce the same map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OverrideMap {
    entries: IndexMap<String, PathBuf>,
}

impl OverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `module -> path` unless the module is already present.
    /// Returns `true` when the entry was inserted.
    pub fn record(&mut self, module: &str, path: PathBuf) -> bool {
        if self.entries.contains_key(module) {
            return false;
        }
        self.entries.insert(module.to_string(), path);
        true
    }

    pub fn get(&self, module: &str) -> Option<&Path> {
        self.entries.get(module).map(PathBuf::as_path)
    }

    pub fn contains(&self, module: &str) -> bool {
        self.entries.contains_key(module)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    /// One `replace` directive per entry, in map order.
    pub fn directives(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|(module, path)| format_directive(module, path))
    }
}

pub fn format_directive(module: &str, path: &Path) -> String {
    format!("replace {} => {}", module, path.display())
}
