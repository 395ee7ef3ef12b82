//! Environment/runtime helpers
//!
//! Sanity checks run once at startup before the router is built.

use std::path::Path;

use tracing::warn;

/// Make sure the data root exists and warn when the frontend entry file is missing.
///
/// The collection files themselves are optional; only the directory they
/// live in has to be there for atomic writes to succeed.
pub async fn ensure_env(root_dir: &Path, index_file: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(root_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", root_dir.display()))?;

    let index = root_dir.join(index_file);
    if tokio::fs::metadata(&index).await.is_err() {
        warn!(index = %index.display(), "frontend entry file not found; `/` will 404");
    }
    Ok(())
}
