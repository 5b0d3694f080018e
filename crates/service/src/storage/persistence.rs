use std::sync::Arc;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::medium::{KvMedium, StorageError, UnavailableMedium};
use super::memory_medium::MemoryMedium;

/// Best-effort JSON persistence over a [`KvMedium`].
///
/// Reads come back as `None` when the medium is unavailable, the key is
/// missing, or the stored text is not valid JSON. Writes serialize the whole
/// value and swallow every failure after logging it. The in-memory state of
/// the caller stays authoritative; the next successful write persists it in
/// full.
#[derive(Clone)]
pub struct JsonPersistence {
    medium: Arc<dyn KvMedium>,
}

impl JsonPersistence {
    pub fn new(medium: Arc<dyn KvMedium>) -> Self {
        Self { medium }
    }

    /// Persistence backed by a fresh [`MemoryMedium`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryMedium::new()))
    }

    /// Persistence that never stores anything.
    pub fn disabled() -> Self {
        Self::new(Arc::new(UnavailableMedium))
    }

    /// Read and parse the JSON stored under `key`.
    pub async fn read(&self, key: &str) -> Option<Value> {
        let text = match self.medium.get_item(key).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(key, "no persisted value");
                return None;
            }
            Err(e) => {
                warn!(key, error = %e, "persistence read failed");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                let e = StorageError::Corrupt(e.to_string());
                warn!(key, error = %e, "persisted value is not valid JSON");
                None
            }
        }
    }

    /// Read `key` and decode it as `T`; any mismatch reads as absent.
    pub async fn read_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.read(key).await?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, error = %e, "persisted value has unexpected shape");
                None
            }
        }
    }

    /// Serialize `value` and store it under `key`. Never fails.
    pub async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_write(key, value).await {
            warn!(key, error = %e, "persistence write failed; keeping in-memory state");
        }
    }

    /// Best-effort removal of `key`.
    pub async fn remove(&self, key: &str) {
        if let Err(e) = self.medium.remove_item(key).await {
            warn!(key, error = %e, "persistence remove failed");
        }
    }

    async fn try_write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let text = serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.medium.set_item(key, text).await?;
        debug!(key, "persisted value");
        Ok(())
    }
}
