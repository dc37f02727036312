//! Storage Backends
//!
//! Synchronous key/value storage behind a trait so stores can run against
//! the browser's `localStorage` or an in-memory map in tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{id_text, Journey};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("failed to write key '{key}'")]
    Write { key: String },
    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Minimal key/value storage contract
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str);
}

impl<S: StorageBackend + ?Sized> StorageBackend for Rc<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) {
        (**self).remove_item(key)
    }
}

/// Window `localStorage`, looked up on every call
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl StorageBackend for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write { key: key.to_string() })
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-process storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Read a JSON array; missing or malformed data reads as empty
pub fn read_json_list<T: DeserializeOwned>(backend: &impl StorageBackend, key: &str) -> Vec<T> {
    let Some(raw) = backend.get_item(key) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(list) => list,
        Err(e) => {
            log::debug!("[STORAGE] Ignoring malformed '{}': {}", key, e);
            Vec::new()
        }
    }
}

/// Read a JSON array entry by entry; entries that do not decode are skipped
pub fn read_json_entries<T: DeserializeOwned>(backend: &impl StorageBackend, key: &str) -> Vec<T> {
    decode_entries(read_json_list::<Value>(backend, key))
}

/// Decode each entry on its own, dropping the ones that do not fit `T`
pub fn decode_entries<T: DeserializeOwned>(entries: Vec<Value>) -> Vec<T> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                log::debug!("[STORAGE] Skipping unreadable entry: {}", e);
                None
            }
        })
        .collect()
}

pub fn write_json<T: Serialize + ?Sized>(backend: &impl StorageBackend, key: &str, value: &T) -> StorageResult<()> {
    let text = serde_json::to_string(value)?;
    backend.set_item(key, &text)
}

/// Generated id for journeys saved only locally: `j_<millis in base 36>`
pub fn local_journey_id(now_ms: i64) -> String {
    format!("j_{}", to_base36(now_ms.max(0) as u64))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Locally saved journeys, used when the API is unreachable
pub struct JourneyArchive<S: StorageBackend> {
    backend: S,
    key: String,
}

impl<S: StorageBackend> JourneyArchive<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self { backend, key: key.into() }
    }

    /// Raw entries, unknown fields included
    pub fn list(&self) -> Vec<Value> {
        read_json_list(&self.backend, &self.key)
    }

    pub fn find(&self, id: &str) -> Option<Journey> {
        self.list()
            .into_iter()
            .find(|entry| entry_id(entry).as_deref() == Some(id))
            .and_then(|entry| serde_json::from_value(entry).ok())
    }

    /// Insert or merge `journey`, returning the id it was stored under
    pub fn upsert(&self, journey: &Journey, now_ms: i64) -> StorageResult<String> {
        let mut list = self.list();
        let supplied = journey.id.clone().filter(|id| !id.is_empty());
        let id = supplied.clone().unwrap_or_else(|| local_journey_id(now_ms));

        let mut fields = match serde_json::to_value(journey)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        fields.insert("id".to_string(), Value::String(id.clone()));

        // Generated ids always append
        let existing = match supplied {
            Some(_) => list.iter_mut().find(|entry| entry_id(entry).as_deref() == Some(id.as_str())),
            None => None,
        };
        match existing {
            Some(Value::Object(existing)) => {
                for (k, v) in fields {
                    existing.insert(k, v);
                }
            }
            Some(other) => *other = Value::Object(fields),
            None => list.push(Value::Object(fields)),
        }

        write_json(&self.backend, &self.key, &list)?;
        Ok(id)
    }
}

fn entry_id(entry: &Value) -> Option<String> {
    entry.get("id").and_then(id_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_malformed_is_empty() {
        let mem = MemoryStorage::new();
        mem.set_item("k", "{not json").unwrap();
        let list: Vec<Value> = read_json_list(&mem, "k");
        assert!(list.is_empty());
        let missing: Vec<Value> = read_json_list(&mem, "absent");
        assert!(missing.is_empty());
    }

    #[test]
    fn test_base36_id() {
        assert_eq!(local_journey_id(0), "j_0");
        assert_eq!(local_journey_id(35), "j_z");
        assert_eq!(local_journey_id(36), "j_10");
        assert_eq!(local_journey_id(1_700_000_000_000), "j_loyw3v28");
    }

    #[test]
    fn test_upsert_appends_with_generated_id() {
        let archive = JourneyArchive::new(MemoryStorage::new(), "journeys");
        let j = Journey { name: "Trip".into(), ..Default::default() };
        let id = archive.upsert(&j, 36).unwrap();
        assert_eq!(id, "j_10");
        assert_eq!(archive.find("j_10").unwrap().name, "Trip");
    }

    #[test]
    fn test_upsert_merges_existing_entry() {
        let mem = Rc::new(MemoryStorage::new());
        mem.set_item("journeys", &json!([{"id": 7, "name": "Old", "note": "keep"}]).to_string()).unwrap();
        let archive = JourneyArchive::new(mem.clone(), "journeys");

        let j = Journey { id: Some("7".into()), name: "New".into(), ..Default::default() };
        archive.upsert(&j, 1).unwrap();

        let list = archive.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["name"], "New");
        assert_eq!(list[0]["note"], "keep");
        assert_eq!(list[0]["id"], "7");
    }

    #[test]
    fn test_generated_ids_never_merge() {
        let archive = JourneyArchive::new(MemoryStorage::new(), "journeys");
        let first = Journey { name: "First".into(), ..Default::default() };
        let second = Journey { name: "Second".into(), ..Default::default() };

        assert_eq!(archive.upsert(&first, 36).unwrap(), "j_10");
        assert_eq!(archive.upsert(&second, 36).unwrap(), "j_10");

        let list = archive.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["name"], "First");
        assert_eq!(list[1]["name"], "Second");
    }

    #[test]
    fn test_entries_decode_one_by_one() {
        let mem = MemoryStorage::new();
        mem.set_item("k", r#"[{"id": "1"}, {"name": "no id"}, 5, {"id": 2}]"#).unwrap();
        let items: Vec<Journey> = read_json_entries(&mem, "k");
        let ids: Vec<Option<String>> = items.into_iter().map(|j| j.id).collect();
        assert!(ids.contains(&Some("1".to_string())));
        assert!(ids.contains(&Some("2".to_string())));
    }

    #[test]
    fn test_upsert_unknown_id_appends() {
        let archive = JourneyArchive::new(MemoryStorage::new(), "journeys");
        archive.upsert(&Journey { id: Some("a".into()), ..Default::default() }, 1).unwrap();
        archive.upsert(&Journey { id: Some("b".into()), ..Default::default() }, 2).unwrap();
        assert_eq!(archive.list().len(), 2);
    }
}
