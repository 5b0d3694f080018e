use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage medium unavailable")]
    Unavailable,
    #[error("io error: {0}")]
    Io(String),
    #[error("corrupt stored data: {0}")]
    Corrupt(String),
    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Durable key -> text medium.
///
/// The medium stores raw strings. Encoding is the job of
/// [`JsonPersistence`](super::JsonPersistence), so implementations stay free of
/// any schema knowledge. Implementations may fail on any call; callers above
/// the persistence layer never see those failures.
#[async_trait]
pub trait KvMedium: Send + Sync {
    /// Read the text stored under `key`; `Ok(None)` when the key is missing.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Store `text` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, text: String) -> Result<(), StorageError>;
    /// Remove `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// A medium that refuses every call, as when storage is disabled or blocked.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableMedium;

#[async_trait]
impl KvMedium for UnavailableMedium {
    async fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    async fn set_item(&self, _key: &str, _text: String) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    async fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
