use lingua_types::HistoryItem;

use crate::kv::{KeyValueStore, StoreError};

pub const HISTORY_KEY: &str = "lingua.history.v1";
pub const MAX_ITEMS: usize = 50;

/// Load the persisted history, newest first. Malformed or non-array
/// payloads read as empty; items missing `mode` pick up the default.
pub fn load(store: &dyn KeyValueStore) -> Vec<HistoryItem> {
    let Some(raw) = store.get(HISTORY_KEY) else {
        return Vec::new();
    };
    serde_json::from_str(&raw).unwrap_or_default()
}

/// Prepend an item, evicting the oldest beyond capacity, and persist the
/// full bounded sequence. Returns the new sequence.
pub fn append(store: &dyn KeyValueStore, item: HistoryItem) -> Result<Vec<HistoryItem>, StoreError> {
    let mut items = load(store);
    items.insert(0, item);
    items.truncate(MAX_ITEMS);
    save(store, &items)?;
    Ok(items)
}

pub fn clear(store: &dyn KeyValueStore) -> Result<(), StoreError> {
    store.remove(HISTORY_KEY)
}

fn save(store: &dyn KeyValueStore, items: &[HistoryItem]) -> Result<(), StoreError> {
    let bounded = &items[..items.len().min(MAX_ITEMS)];
    let raw = serde_json::to_string(bounded)?;
    store.set(HISTORY_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use lingua_types::Mode;

    use super::*;
    use crate::kv::MemoryStore;

    fn item(id: &str) -> HistoryItem {
        HistoryItem {
            id: id.to_string(),
            created_at: 1,
            source_text: "hi".to_string(),
            translated_text: "hola".to_string(),
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
            detected_source_lang: Some("en".to_string()),
            latency_ms: 10,
            mode: Mode::Smart,
            used_mode: None,
        }
    }

    #[test]
    fn append_then_load_round_trips() {
        let store = MemoryStore::new();
        append(&store, item("1")).unwrap();

        let items = load(&store);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[0].translated_text, "hola");
        assert_eq!(items[0].detected_source_lang.as_deref(), Some("en"));
        assert_eq!(items[0].latency_ms, 10);
    }

    #[test]
    fn capacity_evicts_oldest_newest_first() {
        let store = MemoryStore::new();
        for i in 0..MAX_ITEMS + 3 {
            append(&store, item(&i.to_string())).unwrap();
        }

        let items = load(&store);
        assert_eq!(items.len(), MAX_ITEMS);
        // newest first, the 3 oldest (ids 0..=2) evicted
        assert_eq!(items[0].id, (MAX_ITEMS + 2).to_string());
        assert_eq!(items.last().unwrap().id, "3");
    }

    #[test]
    fn missing_mode_defaults_to_smart() {
        let store = MemoryStore::new();
        let raw = r#"[{
            "id": "legacy",
            "createdAt": 5,
            "sourceText": "hi",
            "translatedText": "hola",
            "sourceLang": "en",
            "targetLang": "es",
            "detectedSourceLang": null,
            "latencyMs": 7
        }]"#;
        store.set(HISTORY_KEY, raw).unwrap();

        let items = load(&store);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].mode, Mode::Smart);
        assert_eq!(items[0].used_mode, None);
    }

    #[test]
    fn corrupted_payload_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, "not json at all").unwrap();
        assert!(load(&store).is_empty());

        // valid JSON but not an array
        store.set(HISTORY_KEY, r#"{"id":"1"}"#).unwrap();
        assert!(load(&store).is_empty());
    }

    #[test]
    fn clear_empties_the_sequence() {
        let store = MemoryStore::new();
        append(&store, item("1")).unwrap();
        clear(&store).unwrap();
        assert!(load(&store).is_empty());
    }
}
