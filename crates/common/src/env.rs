//! Environment/runtime helpers
//!
//! Sanity checks to ensure the preferences data directory exists at startup.

use tracing::warn;

/// Ensure the data directory exists.
///
/// Failure is reported but not fatal: the stores degrade to in-memory state
/// when the medium cannot be written, so callers may keep going on `Err`.
pub async fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(data_dir).await.is_err() {
        warn!(%data_dir, "data directory not found; creating it");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}
