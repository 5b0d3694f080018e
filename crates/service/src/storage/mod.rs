//! Storage abstractions for the preference stores
//!
//! A [`medium::KvMedium`] is a passive key -> text store (file, memory, or
//! nothing at all). [`persistence::JsonPersistence`] sits on top of it and
//! moves JSON values in and out without ever failing the caller.

pub mod medium;
pub mod memory_medium;
pub mod json_file_medium;
pub mod persistence;

pub use medium::{KvMedium, StorageError, UnavailableMedium};
pub use memory_medium::MemoryMedium;
pub use json_file_medium::JsonFileMedium;
pub use persistence::JsonPersistence;

use std::path::PathBuf;
use tracing::info;

/// Build the persistence layer for a named backend: `file`, `memory` or `disabled`.
///
/// Unknown names behave like `disabled`; validation of the name belongs to config loading.
pub async fn open_backend(backend: &str, file_path: PathBuf) -> JsonPersistence {
    let persistence = match backend {
        "file" => JsonPersistence::new(JsonFileMedium::open(file_path.clone()).await),
        "memory" => JsonPersistence::in_memory(),
        _ => JsonPersistence::disabled(),
    };
    info!(backend, path = %file_path.display(), "preferences storage ready");
    persistence
}
