//! Saved presets (named values such as filter configurations).
//!
//! Each collection lives under its own caller-chosen storage key. There is no
//! reconciliation step: a stored preset is taken as valid if it decodes.

use std::sync::Arc;
use models::preset::Preset;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::errors::ServiceError;
use crate::storage::JsonPersistence;

/// Load the collection stored under `key`.
///
/// Anything but a JSON array reads as an empty collection. Entries that do not
/// decode as `Preset<T>` are skipped individually.
pub async fn load_all<T: DeserializeOwned>(persistence: &JsonPersistence, key: &str) -> Vec<Preset<T>> {
    match persistence.read(key).await {
        Some(Value::Array(items)) => {
            let total = items.len();
            let presets: Vec<Preset<T>> = items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match serde_json::from_value(item) {
                    Ok(preset) => Some(preset),
                    Err(e) => {
                        warn!(key, index, error = %e, "skipping malformed preset");
                        None
                    }
                })
                .collect();
            debug!(key, count = presets.len(), total, "loaded presets");
            presets
        }
        Some(_) => {
            warn!(key, "persisted presets are not a list; ignoring");
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Overwrite the collection stored under `key` with `presets`.
pub async fn save_all<T: Serialize>(persistence: &JsonPersistence, key: &str, presets: &[Preset<T>]) {
    persistence.write(key, presets).await;
}

/// In-memory preset collection for one storage key.
///
/// Loaded once; every successful mutation re-saves the full collection.
pub struct PresetCollection<T> {
    persistence: JsonPersistence,
    key: String,
    presets: RwLock<Vec<Preset<T>>>,
}

impl<T> PresetCollection<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    pub async fn load(persistence: JsonPersistence, key: impl Into<String>) -> Arc<Self> {
        let key = key.into();
        let presets = load_all(&persistence, &key).await;
        Arc::new(Self { persistence, key, presets: RwLock::new(presets) })
    }

    /// All presets in insertion order.
    pub async fn list(&self) -> Vec<Preset<T>> {
        self.presets.read().await.clone()
    }

    /// First preset with the given id.
    pub async fn get(&self, id: &str) -> Option<Preset<T>> {
        self.presets.read().await.iter().find(|p| p.id == id).cloned()
    }

    /// Append a new preset with a generated id.
    pub async fn add(&self, name: impl Into<String>, value: T) -> Result<Preset<T>, ServiceError> {
        let preset = Preset::new(name, value)?;
        self.mutate(|presets| {
            presets.push(preset.clone());
            Ok(())
        })
        .await?;
        Ok(preset)
    }

    pub async fn rename(&self, id: &str, name: impl Into<String>) -> Result<Preset<T>, ServiceError> {
        let name = Preset::<T>::validate_name(name.into())?;
        self.mutate(|presets| {
            let existing = find_mut(presets, id)?;
            existing.name = name;
            Ok(existing.clone())
        })
        .await
    }

    pub async fn update_value(&self, id: &str, value: T) -> Result<Preset<T>, ServiceError> {
        self.mutate(|presets| {
            let existing = find_mut(presets, id)?;
            existing.value = value;
            Ok(existing.clone())
        })
        .await
    }

    /// Remove every preset with `id`; returns whether any existed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut presets = self.presets.write().await;
        let before = presets.len();
        presets.retain(|p| p.id != id);
        let existed = presets.len() != before;
        if existed {
            save_all(&self.persistence, &self.key, presets.as_slice()).await;
        }
        existed
    }

    /// Replace the whole collection.
    pub async fn replace_all(&self, replacement: Vec<Preset<T>>) {
        let mut presets = self.presets.write().await;
        *presets = replacement;
        save_all(&self.persistence, &self.key, presets.as_slice()).await;
    }

    /// Apply a mutation and persist the result; nothing is saved when `f` fails.
    async fn mutate<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<Preset<T>>) -> Result<R, ServiceError>,
    {
        let mut presets = self.presets.write().await;
        let out = f(&mut presets)?;
        save_all(&self.persistence, &self.key, presets.as_slice()).await;
        Ok(out)
    }
}

fn find_mut<'a, T>(presets: &'a mut [Preset<T>], id: &str) -> Result<&'a mut Preset<T>, ServiceError> {
    presets
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| ServiceError::not_found("preset"))
}
