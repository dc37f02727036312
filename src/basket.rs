//! Basket Store
//!
//! Ordered set of selected activities, unique by id, persisted as JSON under
//! one canonical storage key. Both pages share this store.

use std::sync::Arc;

use serde_json::Value;

use crate::models::Activity;
use crate::storage::{decode_entries, read_json_entries, write_json, StorageBackend, StorageResult};

/// Called with the new contents after every persisted change
pub type BasketListener = Arc<dyn Fn(&[Activity]) + Send + Sync>;

/// Result of the one-time legacy key migration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Migration {
    /// No legacy data
    Nothing,
    /// Legacy entries copied to the canonical key
    Copied(usize),
    /// Legacy key removed without copying (canonical key present, or junk)
    Discarded,
}

#[derive(Clone)]
pub struct BasketStore<S: StorageBackend> {
    backend: S,
    key: String,
    placeholder: String,
    listener: Option<BasketListener>,
}

impl<S: StorageBackend> BasketStore<S> {
    pub fn new(backend: S, key: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            placeholder: placeholder.into(),
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: BasketListener) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored entries in order; entries without a usable id are skipped
    pub fn get(&self) -> Vec<Activity> {
        read_json_entries(&self.backend, &self.key)
    }

    /// Overwrite and persist the whole basket
    pub fn set(&self, items: &[Activity]) -> StorageResult<()> {
        write_json(&self.backend, &self.key, items)?;
        if let Some(listener) = &self.listener {
            listener(items);
        }
        Ok(())
    }

    /// Append unless an entry with the same id exists; returns whether it was added
    pub fn add(&self, item: &Activity) -> StorageResult<bool> {
        let mut items = self.get();
        if items.iter().any(|a| a.id == item.id) {
            return Ok(false);
        }
        let image = if item.image.trim().is_empty() {
            self.placeholder.clone()
        } else {
            item.image.clone()
        };
        items.push(Activity {
            id: item.id.clone(),
            name: item.name.clone(),
            image,
            types: item.types.clone(),
        });
        self.set(&items)?;
        log::info!("[BASKET] Added {} ({} items)", item.id, items.len());
        Ok(true)
    }

    pub fn remove(&self, id: &str) -> StorageResult<()> {
        let items: Vec<Activity> = self.get().into_iter().filter(|a| a.id != id).collect();
        self.set(&items)?;
        log::info!("[BASKET] Removed {} ({} items)", id, items.len());
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<Activity> {
        self.get().into_iter().find(|a| a.id == id)
    }

    /// Move a legacy basket into the canonical key, then drop the legacy key
    pub fn migrate_legacy(&self, legacy_key: &str) -> Migration {
        if legacy_key == self.key {
            return Migration::Nothing;
        }
        let Some(raw) = self.backend.get_item(legacy_key) else {
            return Migration::Nothing;
        };

        let outcome = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) if self.backend.get_item(&self.key).is_none() => {
                let items: Vec<Activity> = decode_entries(entries);
                match write_json(&self.backend, &self.key, &items) {
                    Ok(()) => Migration::Copied(items.len()),
                    Err(e) => {
                        log::warn!("[BASKET] Legacy migration write failed: {}", e);
                        return Migration::Nothing;
                    }
                }
            }
            _ => Migration::Discarded,
        };

        self.backend.remove_item(legacy_key);
        log::info!("[BASKET] Legacy key '{}' migrated: {:?}", legacy_key, outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::rc::Rc;
    use std::sync::Mutex;

    fn act(id: &str, name: &str) -> Activity {
        Activity { id: id.into(), name: name.into(), image: String::new(), types: vec![] }
    }

    fn store(mem: &Rc<MemoryStorage>) -> BasketStore<Rc<MemoryStorage>> {
        BasketStore::new(mem.clone(), "wish_basket_v1", "/ph.jpg")
    }

    #[test]
    fn test_add_is_unique_and_ordered() {
        let mem = Rc::new(MemoryStorage::new());
        let basket = store(&mem);

        assert!(basket.add(&act("1", "A")).unwrap());
        assert!(basket.add(&act("2", "B")).unwrap());
        assert!(!basket.add(&act("1", "A again")).unwrap());
        assert!(basket.add(&act("3", "C")).unwrap());

        let ids: Vec<String> = basket.get().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(basket.get()[0].name, "A");
    }

    #[test]
    fn test_add_fills_placeholder_image() {
        let mem = Rc::new(MemoryStorage::new());
        let basket = store(&mem);
        basket.add(&act("1", "A")).unwrap();
        assert_eq!(basket.get()[0].image, "/ph.jpg");
    }

    #[test]
    fn test_numeric_and_text_ids_match() {
        let mem = Rc::new(MemoryStorage::new());
        mem.set_item("wish_basket_v1", r#"[{"id": 12, "name": "Num"}]"#).unwrap();
        let basket = store(&mem);

        assert!(!basket.add(&act("12", "Text")).unwrap());
        basket.remove("12").unwrap();
        assert!(basket.get().is_empty());
    }

    #[test]
    fn test_set_get_round_trip() {
        let mem = Rc::new(MemoryStorage::new());
        let basket = store(&mem);
        let items = vec![
            Activity { id: "a".into(), name: "A".into(), image: "https://x/a.jpg".into(), types: vec!["Museum".into()] },
            act("b", "B"),
        ];
        basket.set(&items).unwrap();
        assert_eq!(basket.get(), items);
    }

    #[test]
    fn test_entry_without_id_does_not_hide_the_rest() {
        let mem = Rc::new(MemoryStorage::new());
        mem.set_item("wish_basket_v1", r#"[{"id":"1"},{"name":"no id"},{"id":"2"}]"#).unwrap();
        let basket = store(&mem);

        assert_eq!(basket.get().len(), 2);
        assert!(basket.add(&act("3", "C")).unwrap());

        let ids: Vec<String> = basket.get().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_migration_skips_entries_without_id() {
        let mem = Rc::new(MemoryStorage::new());
        mem.set_item("basket", r#"[{"id":"1","name":"A"},{"name":"orphan"},{"id":2}]"#).unwrap();
        let basket = store(&mem);

        assert_eq!(basket.migrate_legacy("basket"), Migration::Copied(2));
        assert!(!mem.contains("basket"));
        let ids: Vec<String> = basket.get().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_malformed_storage_reads_empty() {
        let mem = Rc::new(MemoryStorage::new());
        mem.set_item("wish_basket_v1", "oops").unwrap();
        assert!(store(&mem).get().is_empty());
    }

    #[test]
    fn test_listener_sees_each_change() {
        let mem = Rc::new(MemoryStorage::new());
        let seen = Arc::new(Mutex::new(Vec::<usize>::new()));
        let sink = seen.clone();
        let basket = store(&mem).with_listener(Arc::new(move |items: &[Activity]| {
            sink.lock().unwrap().push(items.len());
        }));

        basket.add(&act("1", "Musée")).unwrap();
        basket.add(&act("1", "Musée")).unwrap();
        basket.remove("1").unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 0]);
        assert!(basket.get().is_empty());
    }

    #[test]
    fn test_migration_copies_then_drops_legacy() {
        let mem = Rc::new(MemoryStorage::new());
        mem.set_item("basket", r#"[{"id":"1","name":"A","image":"x"}]"#).unwrap();
        let basket = store(&mem);

        assert_eq!(basket.migrate_legacy("basket"), Migration::Copied(1));
        assert!(!mem.contains("basket"));
        assert_eq!(basket.get().len(), 1);

        assert_eq!(basket.migrate_legacy("basket"), Migration::Nothing);
    }

    #[test]
    fn test_migration_keeps_canonical_data() {
        let mem = Rc::new(MemoryStorage::new());
        mem.set_item("basket", r#"[{"id":"old"}]"#).unwrap();
        mem.set_item("wish_basket_v1", r#"[{"id":"new"}]"#).unwrap();
        let basket = store(&mem);

        assert_eq!(basket.migrate_legacy("basket"), Migration::Discarded);
        assert!(!mem.contains("basket"));
        assert_eq!(basket.get()[0].id, "new");
    }

    #[test]
    fn test_migration_same_key_is_noop() {
        let mem = Rc::new(MemoryStorage::new());
        mem.set_item("wish_basket_v1", "[]").unwrap();
        assert_eq!(store(&mem).migrate_legacy("wish_basket_v1"), Migration::Nothing);
        assert!(mem.contains("wish_basket_v1"));
    }
}
