// shadowmod-core/src/domain/project/manifest.rs

use crate::domain::error::DomainError;
use crate::domain::overrides::OverrideMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Canonical manifest content as an ordered list of lines.
///
/// Lines are split on `\n` and re-joined with `\n`, so a manifest rendered
/// with no overrides is byte-identical to its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestText {
    lines: Vec<String>,
}

impl ManifestText {
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when one line, ignoring surrounding whitespace, reads exactly
    /// `module <module>`.
    pub fn declares_module(&self, module: &str) -> bool {
        let expected = format!("module {}", module);
        self.lines.iter().any(|line| line.trim() == expected)
    }

    /// Manifest lines followed by one `replace` directive per override.
    pub fn render_shadow(&self, overrides: &OverrideMap) -> String {
        let mut lines = self.lines.clone();
        lines.extend(overrides.directives());
        lines.join("\n")
    }
}

/// Where the manifest lives and how its shadow artifacts are named.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestLayout {
    #[serde(rename = "file-name", default = "default_file_name")]
    pub file_name: String,

    #[serde(rename = "shadow-prefix", default = "default_shadow_prefix")]
    pub shadow_prefix: String,

    #[serde(rename = "lock-extension", default = "default_lock_extension")]
    pub lock_extension: String,
}

impl Default for ManifestLayout {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            shadow_prefix: default_shadow_prefix(),
            lock_extension: default_lock_extension(),
        }
    }
}

impl ManifestLayout {
    pub fn manifest_path(&self, package_dir: &Path) -> PathBuf {
        package_dir.join(&self.file_name)
    }

    /// Sibling of `manifest_path` named `<prefix><file name>`,
    /// e.g. `go.mod` -> `local.go.mod`.
    ///
    /// The shadow never aliases the canonical manifest and never leaves its
    /// directory.
    pub fn shadow_path(&self, manifest_path: &Path) -> Result<PathBuf, DomainError> {
        let file_name = manifest_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DomainError::InvalidManifestName(manifest_path.display().to_string()))?;
        let shadow_name = format!("{}{}", self.shadow_prefix, file_name);

        if !is_plain_file_name(&shadow_name) || shadow_name == file_name {
            return Err(DomainError::UnsafeShadowName {
                manifest: manifest_path.display().to_string(),
                shadow: shadow_name,
            });
        }
        Ok(manifest_path.with_file_name(shadow_name))
    }

    /// Checks the configured names once, before anything touches the disk.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !is_plain_file_name(&self.file_name) {
            return Err(DomainError::InvalidManifestName(self.file_name.clone()));
        }
        if !is_plain_file_name(&self.lock_extension) {
            return Err(DomainError::UnsafeShadowName {
                manifest: self.file_name.clone(),
                shadow: format!("*.{}", self.lock_extension),
            });
        }
        self.shadow_path(Path::new(&self.file_name)).map(|_| ())
    }

    /// Lock artifact written by the toolchain next to the shadow manifest,
    /// e.g. `local.go.mod` -> `local.go.sum`.
    pub fn lock_path(&self, shadow_path: &Path) -> PathBuf {
        shadow_path.with_extension(&self.lock_extension)
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

fn default_file_name() -> String {
    "go.mod".to_string()
}
fn default_shadow_prefix() -> String {
    "local.".to_string()
}
fn default_lock_extension() -> String {
    "sum".to_string()
}
