// shadowmod-core/src/infrastructure/patcher.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::OverrideMap;
use crate::domain::project::{ManifestLayout, ManifestText};
use crate::error::ShadowmodError;
use crate::infrastructure::fs::atomic_write;

/// Paths of the non-canonical manifest and of the lock artifact the toolchain
/// writes next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowManifest {
    pub path: PathBuf,
    pub lock_path: PathBuf,
}

impl ShadowManifest {
    pub fn read_content(&self) -> Result<String, ShadowmodError> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

/// Writes `local.<manifest>` carrying one `replace` directive per override.
/// The canonical manifest is only read.
#[derive(Debug, Clone, Default)]
pub struct ManifestPatcher {
    layout: ManifestLayout,
}

impl ManifestPatcher {
    pub fn new(layout: ManifestLayout) -> Self {
        Self { layout }
    }

    #[instrument(skip(self, overrides), fields(overrides = overrides.len()))]
    pub fn write_shadow(
        &self,
        manifest_path: &Path,
        overrides: &OverrideMap,
    ) -> Result<ShadowManifest, ShadowmodError> {
        let content = fs::read_to_string(manifest_path)?;
        let shadow_path = self.layout.shadow_path(manifest_path)?;

        for (module, path) in overrides.iter() {
            info!("Local replace: {} => {}", module, path.display());
        }

        let rendered = ManifestText::parse(&content).render_shadow(overrides);
        atomic_write(&shadow_path, rendered)?;

        Ok(ShadowManifest {
            lock_path: self.layout.lock_path(&shadow_path),
            path: shadow_path,
        })
    }
}
