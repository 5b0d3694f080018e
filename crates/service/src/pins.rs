//! Pinned dashboard cards.
//!
//! The user's selection is reconciled against the cards that currently exist
//! every time it is loaded: ids that are no longer available are dropped, and
//! a selection that ends up empty falls back to the product defaults.

use std::collections::HashSet;
use std::sync::Arc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::storage::JsonPersistence;

/// Storage key of the pinned card ids.
pub const PINNED_CARDS_KEY: &str = "dashboard:pinned-cards";

/// Keep only the ids present in `universe`, in their original order.
pub fn sanitize<S, U>(ids: &[S], universe: &[U]) -> Vec<String>
where
    S: AsRef<str>,
    U: AsRef<str>,
{
    if universe.is_empty() {
        return Vec::new();
    }
    let allowed: HashSet<&str> = universe.iter().map(AsRef::<str>::as_ref).collect();
    ids.iter()
        .map(AsRef::<str>::as_ref)
        .filter(|id| allowed.contains(id))
        .map(str::to_string)
        .collect()
}

/// The user's pinned card selection.
///
/// Loaded once; afterwards the in-memory set is the source of truth and every
/// mutation rewrites the whole set to storage.
pub struct PinStore {
    persistence: JsonPersistence,
    default_pins: Vec<String>,
    pinned: RwLock<Vec<String>>,
}

impl PinStore {
    /// Load the persisted selection, sanitized against `available_ids`.
    ///
    /// Falls back to the sanitized `default_pins` when nothing usable is stored.
    /// A stored empty list counts as nothing usable.
    pub async fn load<A, D>(persistence: JsonPersistence, available_ids: &[A], default_pins: &[D]) -> Arc<Self>
    where
        A: AsRef<str>,
        D: AsRef<str>,
    {
        let default_pins = sanitize(default_pins, available_ids);

        let persisted = match persistence.read(PINNED_CARDS_KEY).await {
            // non-string entries are leftovers of older layouts
            Some(Value::Array(items)) => {
                let ids: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                sanitize(&ids, available_ids)
            }
            Some(_) => {
                debug!(key = PINNED_CARDS_KEY, "persisted pins are not a list; ignoring");
                Vec::new()
            }
            None => Vec::new(),
        };

        let pinned = if persisted.is_empty() {
            debug!(count = default_pins.len(), source = "defaults", "loaded pinned cards");
            default_pins.clone()
        } else {
            debug!(count = persisted.len(), source = "persisted", "loaded pinned cards");
            persisted
        };

        Arc::new(Self { persistence, default_pins, pinned: RwLock::new(pinned) })
    }

    /// Current pinned ids in insertion order.
    pub async fn pinned(&self) -> Vec<String> {
        self.pinned.read().await.clone()
    }

    pub async fn is_pinned(&self, id: &str) -> bool {
        self.pinned.read().await.iter().any(|p| p == id)
    }

    /// The sanitized defaults computed at load time.
    pub fn default_pins(&self) -> &[String] {
        &self.default_pins
    }

    /// Unpin `id` if pinned, otherwise append it. Returns whether `id` is pinned afterwards.
    ///
    /// `id` is not checked against the available cards; an unknown id is dropped
    /// on the next load.
    pub async fn toggle_pin(&self, id: &str) -> bool {
        let mut pinned = self.pinned.write().await;
        let now_pinned = if pinned.iter().any(|p| p == id) {
            pinned.retain(|p| p != id);
            false
        } else {
            pinned.push(id.to_string());
            true
        };
        debug!(id, pinned = now_pinned, "toggled pin");
        // the lock is held until the write is issued so writes follow mutation order
        self.persistence.write(PINNED_CARDS_KEY, &*pinned).await;
        now_pinned
    }

    /// Replace the selection with the defaults computed at load time.
    pub async fn reset_pins(&self) {
        let mut pinned = self.pinned.write().await;
        *pinned = self.default_pins.clone();
        debug!(count = pinned.len(), "reset pins to defaults");
        self.persistence.write(PINNED_CARDS_KEY, &*pinned).await;
    }
}
