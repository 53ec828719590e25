use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{FieldMap, HashStore, StoreError};

/// In-process hash store for tests. Behaves like Redis hashes: a hash with no
/// fields does not exist.
#[derive(Default)]
pub struct InMemoryStore {
    hashes: Mutex<BTreeMap<String, FieldMap>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a hash directly, bypassing the service (e.g. keys with chosen timestamps).
    pub fn insert(&self, key: &str, fields: &[(&str, &str)]) {
        let mut hashes = self.hashes.lock().unwrap();
        let entry = hashes.entry(key.to_string()).or_default();
        for (k, v) in fields {
            entry.insert(k.to_string(), v.to_string());
        }
    }

    pub fn hash_count(&self) -> usize {
        self.hashes.lock().unwrap().len()
    }
}

#[async_trait]
impl HashStore for InMemoryStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.hashes.lock().unwrap().contains_key(key))
    }

    async fn set_fields(&self, key: &str, fields: &FieldMap) -> Result<(), StoreError> {
        if fields.is_empty() {
            return Err(StoreError::EmptyHash(key.to_string()));
        }
        let mut hashes = self.hashes.lock().unwrap();
        hashes
            .entry(key.to_string())
            .or_default()
            .extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    async fn get_fields(&self, key: &str) -> Result<FieldMap, StoreError> {
        Ok(self
            .hashes
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .hashes
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prefix_scan_excludes_bare_key() {
        let store = InMemoryStore::new();
        store.insert("P1", &[("created", "true")]);
        store.insert("P1:MoCA 5min:1:x", &[("score", "4")]);
        store.insert("P10:MoCA 5min:1:x", &[("score", "2")]);

        let keys = store.keys_with_prefix("P1:").await.unwrap();
        assert_eq!(keys, vec!["P1:MoCA 5min:1:x".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_hash_reads_empty() {
        let store = InMemoryStore::new();
        assert!(store.get_fields("nobody").await.unwrap().is_empty());
        assert!(!store.exists("nobody").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_write_rejected() {
        let store = InMemoryStore::new();
        let err = store.set_fields("k", &FieldMap::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::EmptyHash(_)));
        assert_eq!(store.hash_count(), 0);
    }
}
