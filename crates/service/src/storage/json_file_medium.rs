use std::{collections::HashMap, io::ErrorKind, path::PathBuf, sync::Arc};
use async_trait::async_trait;
use tokio::{fs, sync::Mutex};
use tracing::warn;

use super::medium::{KvMedium, StorageError};

/// JSON file-backed medium.
///
/// Keeps every key in a single `{ key: text }` JSON object on disk. Nothing is
/// cached: each read goes to the file, and each change re-reads the file,
/// applies only its own key and replaces the file atomically, so handles that
/// share a path never erase each other's keys. A missing or corrupt file reads
/// as empty.
pub struct JsonFileMedium {
    write_lock: Mutex<()>,
    file_path: PathBuf,
}

impl JsonFileMedium {
    /// Open the medium at `path`. The file itself is only created on first write.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }
        Arc::new(Self { write_lock: Mutex::new(()), file_path })
    }

    async fn load_map(&self) -> Result<HashMap<String, String>, StorageError> {
        match fs::read(&self.file_path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %self.file_path.display(), error = %e, "preferences file is corrupt; treating as empty");
                HashMap::new()
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    /// Re-read the file, apply `f` to it and write it back. Skips the write when `f` returns false.
    async fn modify<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut HashMap<String, String>) -> bool,
    {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load_map().await?;
        if !f(&mut map) {
            return Ok(());
        }
        self.flush(&map).await
    }

    /// Write to a sibling temp file, then rename it over the target.
    async fn flush(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        let data = serde_json::to_vec(map).map_err(|e| StorageError::Serialize(e.to_string()))?;
        let mut tmp_name = self.file_path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(format!(".{}.tmp", std::process::id()));
        let tmp_path = self.file_path.with_file_name(tmp_name);

        if let Err(e) = fs::write(&tmp_path, data).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::Io(e.to_string()));
        }
        if let Err(e) = fs::rename(&tmp_path, &self.file_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::Io(e.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KvMedium for JsonFileMedium {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut map = self.load_map().await?;
        Ok(map.remove(key))
    }

    async fn set_item(&self, key: &str, text: String) -> Result<(), StorageError> {
        self.modify(|map| {
            map.insert(key.to_string(), text);
            true
        })
        .await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|map| map.remove(key).is_some()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn json_file_medium_persists_across_reopen() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_file_medium_{}.json", Uuid::new_v4()));
        let medium = JsonFileMedium::open(&tmp).await;

        // initially empty
        assert_eq!(medium.get_item("a").await?, None);

        medium.set_item("a", "[\"x\"]".into()).await?;
        medium.set_item("b", "2".into()).await?;
        medium.remove_item("b").await?;

        // reload from disk
        let reopened = JsonFileMedium::open(&tmp).await;
        assert_eq!(reopened.get_item("a").await?.as_deref(), Some("[\"x\"]"));
        assert_eq!(reopened.get_item("b").await?, None);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn handles_sharing_a_file_keep_each_others_keys() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_file_medium_{}.json", Uuid::new_v4()));
        let a = JsonFileMedium::open(&tmp).await;
        let b = JsonFileMedium::open(&tmp).await;

        a.set_item("dashboard:pinned-cards", "[\"y\"]".into()).await?;
        b.set_item("transactions:presets", "[]".into()).await?;
        b.remove_item("missing").await?;

        // each handle sees the other's write
        assert_eq!(b.get_item("dashboard:pinned-cards").await?.as_deref(), Some("[\"y\"]"));
        assert_eq!(a.get_item("transactions:presets").await?.as_deref(), Some("[]"));

        let reopened = JsonFileMedium::open(&tmp).await;
        assert_eq!(reopened.get_item("dashboard:pinned-cards").await?.as_deref(), Some("[\"y\"]"));
        assert_eq!(reopened.get_item("transactions:presets").await?.as_deref(), Some("[]"));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn writes_leave_no_temp_files_behind() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("json_file_medium_dir_{}", Uuid::new_v4()));
        let medium = JsonFileMedium::open(dir.join("preferences.json")).await;
        medium.set_item("a", "1".into()).await?;
        medium.set_item("b", "2".into()).await?;
        medium.remove_item("a").await?;

        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        assert_eq!(names, vec!["preferences.json"]);

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_opens_empty() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_file_medium_{}.json", Uuid::new_v4()));
        tokio::fs::write(&tmp, b"{not json").await?;

        let medium = JsonFileMedium::open(&tmp).await;
        assert_eq!(medium.get_item("anything").await?, None);

        // first write replaces the corrupt content
        medium.set_item("k", "1".into()).await?;
        let reopened = JsonFileMedium::open(&tmp).await;
        assert_eq!(reopened.get_item("k").await?.as_deref(), Some("1"));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_path_fails_without_writing() -> Result<(), anyhow::Error> {
        // a directory cannot be read or written as a file
        let dir = std::env::temp_dir().join(format!("json_file_medium_dir_{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await?;

        let medium = JsonFileMedium::open(&dir).await;
        let res = medium.set_item("k", "1".into()).await;
        assert!(matches!(res, Err(StorageError::Io(_))));
        assert!(matches!(medium.get_item("k").await, Err(StorageError::Io(_))));
        assert!(tokio::fs::metadata(&dir).await?.is_dir());

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
