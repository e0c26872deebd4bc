//! Best-effort draft of the contact form in browser local storage.
//!
//! Drafts are a convenience. Every storage problem is logged and swallowed so
//! the form keeps working when storage is disabled, full or holds garbage.

use log::{debug, warn};
use web_sys::Storage;

use super::error::PersistenceError;
use super::fields::{Field, FormValues};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// `window.localStorage`, if the page is allowed to use it.
pub struct BrowserStorage {
    storage: Option<Storage>,
}

impl BrowserStorage {
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("Local storage unavailable, drafts will not be kept");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, PersistenceError> {
        self.storage.as_ref().ok_or(PersistenceError::Unavailable)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| PersistenceError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| PersistenceError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| PersistenceError::Storage(format!("{:?}", e)))
    }
}

pub struct DraftStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> DraftStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn load(&self) -> Option<FormValues> {
        match self.try_load() {
            Ok(draft) => draft,
            Err(e) => {
                warn!("Ignoring saved draft: {}", e);
                None
            }
        }
    }

    pub fn save(&self, values: &FormValues) {
        if let Err(e) = self.try_save(values) {
            debug!("Draft not saved: {}", e);
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            debug!("Draft not cleared: {}", e);
        }
    }

    pub fn try_load(&self) -> Result<Option<FormValues>, PersistenceError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let record: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
        let Some(entries) = record.as_object() else {
            return Err(PersistenceError::Corrupt("draft is not a JSON object".to_string()));
        };

        // Keys are restored one by one; a bad entry only loses that field.
        let mut values = FormValues::default();
        for field in Field::ALL {
            match entries.get(field.id()) {
                Some(serde_json::Value::String(value)) => values.set(field, value.clone()),
                Some(other) => debug!("Skipping draft field {}: {}", field, other),
                None => {}
            }
        }
        Ok(Some(values))
    }

    pub fn try_save(&self, values: &FormValues) -> Result<(), PersistenceError> {
        let raw =
            serde_json::to_string(values).map_err(|e| PersistenceError::Serialize(e.to_string()))?;
        self.store.set(&self.key, &raw)
    }
}

#[cfg(test)]
pub(crate) use self::memory::MemoryStorage;


#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "contact_form_draft";

    fn sample() -> FormValues {
        FormValues {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..FormValues::default()
        }
    }

    #[test]
    fn test_save_writes_flat_record() {
        let storage = MemoryStorage::default();
        let drafts = DraftStore::new(storage.clone(), KEY);
        drafts.save(&sample());

        let raw = storage.raw(KEY).unwrap();
        let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(record["name"], "Ada");
        assert_eq!(record["email"], "ada@example.com");
        assert_eq!(record["message"], "");
    }

    #[test]
    fn test_load_returns_saved_values() {
        let storage = MemoryStorage::default();
        let drafts = DraftStore::new(storage, KEY);
        assert_eq!(drafts.load(), None);

        drafts.save(&sample());
        assert_eq!(drafts.load(), Some(sample()));
    }

    #[test]
    fn test_clear_removes_record() {
        let storage = MemoryStorage::default();
        let drafts = DraftStore::new(storage.clone(), KEY);
        drafts.save(&sample());
        drafts.clear();
        assert_eq!(storage.raw(KEY), None);
        assert_eq!(drafts.load(), None);
    }

    #[test]
    fn test_corrupt_record_is_ignored() {
        let storage = MemoryStorage::default();
        storage.put_raw(KEY, "{not json");
        let drafts = DraftStore::new(storage, KEY);

        assert!(matches!(drafts.try_load(), Err(PersistenceError::Corrupt(_))));
        assert_eq!(drafts.load(), None);
    }

    #[test]
    fn test_mistyped_entry_keeps_the_rest() {
        let storage = MemoryStorage::default();
        storage.put_raw(KEY, r#"{"name":5,"email":"a@b.co","budget":null}"#);
        let drafts = DraftStore::new(storage, KEY);

        let draft = drafts.load().unwrap();
        assert_eq!(draft.email, "a@b.co");
        assert_eq!(draft.name, "");
        assert_eq!(draft.budget, "");
    }

    #[test]
    fn test_non_object_record_is_corrupt() {
        let storage = MemoryStorage::default();
        storage.put_raw(KEY, r#"["Ada"]"#);
        let drafts = DraftStore::new(storage, KEY);

        assert!(matches!(drafts.try_load(), Err(PersistenceError::Corrupt(_))));
    }

    #[test]
    fn test_broken_storage_degrades_silently() {
        let storage = MemoryStorage::default();
        let drafts = DraftStore::new(storage.clone(), KEY);
        storage.break_storage();

        drafts.save(&sample());
        drafts.clear();
        assert_eq!(drafts.load(), None);
        assert!(matches!(drafts.try_save(&sample()), Err(PersistenceError::Storage(_))));
    }
}
