//! In-memory storage backend.
//!
//! Suitable for development and tests. Expired entries are dropped lazily on
//! access; there is no background sweeper.

use crate::{StorageBackend, StorageError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Entry stored in memory with optional expiration.
#[derive(Clone)]
struct StorageEntry {
	value: Vec<u8>,
	expires_at: Option<Instant>,
}

impl StorageEntry {
	fn is_expired(&self) -> bool {
		self.expires_at.map(|t| Instant::now() >= t).unwrap_or(false)
	}
}

/// In-memory storage implementation.
#[derive(Default)]
pub struct MemoryStorage {
	data: DashMap<String, StorageEntry>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self {
			data: DashMap::new(),
		}
	}
}

#[async_trait]
impl StorageBackend for MemoryStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		if let Some(entry) = self.data.get(key) {
			if !entry.is_expired() {
				return Ok(entry.value.clone());
			}
		}
		// Drop the stale entry so expired keys do not accumulate.
		self.data.remove_if(key, |_, entry| entry.is_expired());
		Err(StorageError::NotFound)
	}

	async fn set_bytes(
		&self,
		key: &str,
		value: Vec<u8>,
		ttl: Option<Duration>,
	) -> Result<(), StorageError> {
		let entry = StorageEntry {
			value,
			expires_at: ttl.map(|d| Instant::now() + d),
		};
		self.data.insert(key.to_string(), entry);
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<(), StorageError> {
		self.data.remove(key);
		Ok(())
	}

	async fn exists(&self, key: &str) -> Result<bool, StorageError> {
		Ok(self
			.data
			.get(key)
			.map(|entry| !entry.is_expired())
			.unwrap_or(false))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn stores_and_retrieves_without_ttl() {
		let storage = MemoryStorage::new();
		storage
			.set_bytes("k", b"value".to_vec(), None)
			.await
			.unwrap();

		assert_eq!(storage.get_bytes("k").await.unwrap(), b"value".to_vec());
		assert!(storage.exists("k").await.unwrap());
	}

	#[tokio::test]
	async fn expired_entry_behaves_like_missing() {
		let storage = MemoryStorage::new();
		storage
			.set_bytes("k", b"value".to_vec(), Some(Duration::from_millis(10)))
			.await
			.unwrap();

		tokio::time::sleep(Duration::from_millis(25)).await;

		assert!(!storage.exists("k").await.unwrap());
		assert!(matches!(
			storage.get_bytes("k").await,
			Err(StorageError::NotFound)
		));
	}

	#[tokio::test]
	async fn delete_is_idempotent() {
		let storage = MemoryStorage::new();
		storage.delete("missing").await.unwrap();
		storage
			.set_bytes("k", b"value".to_vec(), None)
			.await
			.unwrap();
		storage.delete("k").await.unwrap();
		storage.delete("k").await.unwrap();
		assert!(!storage.exists("k").await.unwrap());
	}
}
