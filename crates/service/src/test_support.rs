#![cfg(test)]
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use async_trait::async_trait;

use crate::storage::{KvMedium, MemoryMedium, StorageError};

/// Memory medium that records every successful write and can be switched
/// into a failing mode at runtime.
#[derive(Default)]
pub struct RecordingMedium {
    inner: MemoryMedium,
    writes: Mutex<Vec<(String, String)>>,
    failing: AtomicBool,
    failed_calls: AtomicUsize,
}

impl RecordingMedium {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    pub fn failed_calls(&self) -> usize {
        self.failed_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            self.failed_calls.fetch_add(1, Ordering::SeqCst);
            return Err(StorageError::Io("quota exceeded".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl KvMedium for RecordingMedium {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, text: String) -> Result<(), StorageError> {
        self.check()?;
        if let Ok(mut w) = self.writes.lock() {
            w.push((key.to_string(), text.clone()));
        }
        self.inner.set_item(key, text).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.remove_item(key).await
    }
}
