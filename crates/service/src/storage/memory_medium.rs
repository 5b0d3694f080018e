use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::medium::{KvMedium, StorageError};

/// In-process medium. Nothing survives the process; used for tests and for
/// the `memory` backend.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the medium with raw text entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { inner: RwLock::new(map) }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl KvMedium for MemoryMedium {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, text: String) -> Result<(), StorageError> {
        self.inner.write().await.insert(key.to_string(), text);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner.write().await.remove(key);
        Ok(())
    }
}
