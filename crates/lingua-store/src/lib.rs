pub mod history;
pub mod kv;
pub mod prefs;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
