//! Hash store seam: the key-value operations the service relies on.
//!
//! `AppState` holds an `Arc<dyn HashStore>`; production wires in `RedisStore`,
//! tests wire in the in-memory store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

pub mod redis_store;

#[cfg(test)]
pub mod memory;

pub use redis_store::RedisStore;

/// Field name → string value, the shape of every stored hash.
pub type FieldMap = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Refusing to write an empty hash under '{0}'")]
    EmptyHash(String),
}

#[async_trait]
pub trait HashStore: Send + Sync {
    /// True when any value is stored under `key`.
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Writes all `fields` onto the hash at `key` in one command.
    async fn set_fields(&self, key: &str, fields: &FieldMap) -> Result<(), StoreError>;

    /// Returns every field of the hash at `key`; empty when the key is absent.
    async fn get_fields(&self, key: &str) -> Result<FieldMap, StoreError>;

    /// Enumerates keys starting with `prefix`. Order is unspecified.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
