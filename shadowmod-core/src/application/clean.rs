// shadowmod-core/src/application/clean.rs

use crate::application::error::BuildError;
use crate::domain::project::ManifestLayout;
use crate::error::ShadowmodError;
use crate::infrastructure::fs::remove_if_exists;
use std::path::{Path, PathBuf};

/// Removes the shadow manifest and lock artifact a failed build left behind.
/// Returns the files actually deleted; a clean directory is not an error.
pub fn clean_shadow_artifacts(
    package_dir: &Path,
    layout: &ManifestLayout,
) -> Result<Vec<PathBuf>, ShadowmodError> {
    tracing::info!("🧹 Removing shadow artifacts from {}", package_dir.display());

    let shadow_path = layout.shadow_path(&layout.manifest_path(package_dir))?;
    let targets = [layout.lock_path(&shadow_path), shadow_path];

    let mut removed = Vec::new();
    for target in targets {
        // Zero-Trust Path Traversal Guard (prefix and file names come from config)
        if target.parent() != Some(package_dir) {
            return Err(ShadowmodError::UnsafePath(target.display().to_string()));
        }

        let deleted = remove_if_exists(&target).map_err(|source| BuildError::CleanupFailed {
            path: target.clone(),
            source,
        })?;
        if deleted {
            tracing::info!("   🗑️  Artifact removed: {}", target.display());
            removed.push(target);
        }
    }

    Ok(removed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_clean_removes_only_shadow_artifacts() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("go.mod"), "module demo\n")?;
        fs::write(dir.path().join("local.go.mod"), "module demo\nreplace a => /a")?;
        fs::write(dir.path().join("local.go.sum"), "")?;

        let removed = clean_shadow_artifacts(dir.path(), &ManifestLayout::default())?;

        assert_eq!(removed.len(), 2);
        assert!(dir.path().join("go.mod").exists());
        assert!(!dir.path().join("local.go.mod").exists());
        assert!(!dir.path().join("local.go.sum").exists());
        Ok(())
    }

    #[test]
    fn test_clean_on_clean_dir_is_noop() -> Result<()> {
        let dir = tempdir()?;
        let removed = clean_shadow_artifacts(dir.path(), &ManifestLayout::default())?;
        assert!(removed.is_empty());
        Ok(())
    }

    #[test]
    fn test_clean_rejects_prefix_escaping_package_dir() -> Result<()> {
        let dir = tempdir()?;
        let layout = ManifestLayout {
            shadow_prefix: "../".to_string(),
            ..ManifestLayout::default()
        };

        fs::write(dir.path().join("go.mod"), "module demo\n")?;

        let result = clean_shadow_artifacts(dir.path(), &layout);

        assert!(matches!(
            result,
            Err(ShadowmodError::Domain(DomainError::UnsafeShadowName { .. }))
        ));
        assert!(dir.path().join("go.mod").exists());
        Ok(())
    }
}
