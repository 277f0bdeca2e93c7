//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the upload root exists (creating it if needed) and warn when the
/// frontend directory holding `index.html` is missing.
pub async fn ensure_env(frontend_dir: &Path, upload_dir: &Path) -> anyhow::Result<()> {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(frontend_dir = %frontend_dir.display(), "frontend directory not found; index page will 404");
    }
    if tokio::fs::metadata(upload_dir).await.is_err() {
        tokio::fs::create_dir_all(upload_dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", upload_dir.display()))?;
        info!(upload_dir = %upload_dir.display(), "created base upload folder");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_env_creates_missing_upload_dir() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("common_env_{}", uuid::Uuid::new_v4()));
        let uploads = root.join("static").join("uploads");

        ensure_env(&root.join("frontend"), &uploads).await?;
        assert!(tokio::fs::metadata(&uploads).await?.is_dir());

        // second call is a no-op on an existing directory
        ensure_env(&root.join("frontend"), &uploads).await?;

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
