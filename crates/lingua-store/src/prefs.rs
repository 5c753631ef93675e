use lingua_types::{Mode, Theme};

use crate::kv::{KeyValueStore, StoreError};

pub const MODE_KEY: &str = "lingua.mode.v1";
pub const THEME_KEY: &str = "lingua.theme.v1";

/// Unrecognized stored values fall back to the default, matching the
/// defensive history reads.
pub fn load_mode(store: &dyn KeyValueStore) -> Mode {
    store
        .get(MODE_KEY)
        .and_then(|raw| Mode::parse(raw.trim()))
        .unwrap_or_default()
}

pub fn save_mode(store: &dyn KeyValueStore, mode: Mode) -> Result<(), StoreError> {
    store.set(MODE_KEY, mode.as_str())
}

pub fn load_theme(store: &dyn KeyValueStore) -> Theme {
    store
        .get(THEME_KEY)
        .and_then(|raw| Theme::parse(raw.trim()))
        .unwrap_or_default()
}

pub fn save_theme(store: &dyn KeyValueStore, theme: Theme) -> Result<(), StoreError> {
    store.set(THEME_KEY, theme.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[test]
    fn mode_round_trips_and_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_mode(&store), Mode::Smart);

        save_mode(&store, Mode::Natural).unwrap();
        assert_eq!(load_mode(&store), Mode::Natural);

        store.set(MODE_KEY, "bogus").unwrap();
        assert_eq!(load_mode(&store), Mode::Smart);
    }

    #[test]
    fn theme_round_trips_and_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_theme(&store), Theme::System);

        save_theme(&store, Theme::Dark).unwrap();
        assert_eq!(load_theme(&store), Theme::Dark);

        store.set(THEME_KEY, "midnight").unwrap();
        assert_eq!(load_theme(&store), Theme::System);
    }
}
