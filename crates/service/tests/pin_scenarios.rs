use std::sync::Arc;

use service::pins::{sanitize, PinStore, PINNED_CARDS_KEY};
use service::storage::{JsonPersistence, KvMedium, MemoryMedium};

fn stored(text: &str) -> JsonPersistence {
    JsonPersistence::new(Arc::new(MemoryMedium::with_entries([(PINNED_CARDS_KEY, text)])))
}

#[tokio::test]
async fn unknown_default_is_dropped() {
    let store = PinStore::load(JsonPersistence::in_memory(), &["a", "b", "c"], &["a", "x"]).await;
    assert_eq!(store.pinned().await, vec!["a"]);
}

#[tokio::test]
async fn stale_persisted_ids_are_dropped_without_fallback() {
    let store = PinStore::load(stored(r#"["a","b"]"#), &["b", "c"], &["b"]).await;
    assert_eq!(store.pinned().await, vec!["b"]);
}

#[tokio::test]
async fn fully_stale_selection_falls_back_to_defaults() {
    let store = PinStore::load(stored(r#"["z"]"#), &["b", "c"], &["c"]).await;
    assert_eq!(store.pinned().await, vec!["c"]);
    assert_eq!(store.pinned().await, sanitize(&["c"], &["b", "c"]));
}

#[tokio::test]
async fn toggle_twice_restores_selection() {
    let store = PinStore::load(JsonPersistence::in_memory(), &["a", "b"], &["a"]).await;
    store.toggle_pin("b").await;
    assert_eq!(store.pinned().await, vec!["a", "b"]);
    store.toggle_pin("b").await;
    assert_eq!(store.pinned().await, vec!["a"]);
}

#[tokio::test]
async fn reset_ignores_prior_mutations() {
    let store = PinStore::load(stored(r#"["b","c"]"#), &["a", "b", "c"], &["a", "c"]).await;
    assert_eq!(store.pinned().await, vec!["b", "c"]);
    store.toggle_pin("a").await;
    store.toggle_pin("c").await;
    store.reset_pins().await;
    assert_eq!(store.pinned().await, vec!["a", "c"]);
}

#[tokio::test]
async fn selection_round_trips_through_storage() -> Result<(), anyhow::Error> {
    let medium = Arc::new(MemoryMedium::new());
    let persistence = JsonPersistence::new(medium.clone());
    let universe = ["net-worth", "budgets", "cash-flow"];

    let first = PinStore::load(persistence.clone(), &universe, &["net-worth"]).await;
    first.toggle_pin("cash-flow").await;
    assert_eq!(medium.get_item(PINNED_CARDS_KEY).await?.as_deref(), Some(r#"["net-worth","cash-flow"]"#));

    let second = PinStore::load(persistence, &universe, &["net-worth"]).await;
    assert_eq!(second.pinned().await, first.pinned().await);
    Ok(())
}

#[tokio::test]
async fn removed_card_disappears_on_next_load() {
    let persistence = JsonPersistence::in_memory();
    let before = PinStore::load(persistence.clone(), &["a", "b", "c"], &["a"]).await;
    before.toggle_pin("c").await;

    // card "c" removed from the product
    let after = PinStore::load(persistence, &["a", "b"], &["a"]).await;
    assert_eq!(after.pinned().await, vec!["a"]);
}
