//! Key-value persistence for intents and claim jobs.
//!
//! The gateway treats storage as an external capability: get and put with a
//! time-to-live, nothing more. This module provides the backend seam and a
//! typed service on top of it, with in-memory and file-based backends.

use async_trait::async_trait;
use presale_types::{StorageBackendKind, StorageConfig};
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// Error that occurs when a requested item is not found or has expired.
	#[error("Not found")]
	NotFound,
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
	/// Error that occurs when the backend cannot be constructed.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Low-level interface a storage backend must implement.
///
/// Values are opaque bytes with an optional time-to-live. An expired value
/// must behave exactly like a missing one.
#[async_trait]
pub trait StorageBackend: Send + Sync {
	/// Retrieves raw bytes for the given key.
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError>;

	/// Stores raw bytes with optional time-to-live.
	async fn set_bytes(
		&self,
		key: &str,
		value: Vec<u8>,
		ttl: Option<Duration>,
	) -> Result<(), StorageError>;

	/// Deletes the value associated with the given key.
	async fn delete(&self, key: &str) -> Result<(), StorageError>;

	/// Checks if a live (non-expired) value exists for the key.
	async fn exists(&self, key: &str) -> Result<bool, StorageError>;
}

/// High-level storage service that provides typed operations.
///
/// Wraps a backend and adds JSON serialization plus namespaced keys. The
/// write semantics are last write wins; the single post-creation writer in
/// this system makes that safe.
pub struct StorageService {
	backend: Box<dyn StorageBackend>,
}

impl StorageService {
	/// Creates a new StorageService with the specified backend.
	pub fn new(backend: Box<dyn StorageBackend>) -> Self {
		Self { backend }
	}

	/// Stores a serializable value with optional time-to-live.
	pub async fn store_with_ttl<T: Serialize>(
		&self,
		namespace: &str,
		id: &str,
		data: &T,
		ttl: Option<Duration>,
	) -> Result<(), StorageError> {
		let key = format!("{}:{}", namespace, id);
		let bytes =
			serde_json::to_vec(data).map_err(|e| StorageError::Serialization(e.to_string()))?;
		self.backend.set_bytes(&key, bytes, ttl).await
	}

	/// Retrieves and deserializes a value from storage.
	pub async fn retrieve<T: DeserializeOwned>(
		&self,
		namespace: &str,
		id: &str,
	) -> Result<T, StorageError> {
		let key = format!("{}:{}", namespace, id);
		let bytes = self.backend.get_bytes(&key).await?;
		serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
	}

	/// Like `retrieve`, but maps a missing or expired value to `None`.
	pub async fn retrieve_opt<T: DeserializeOwned>(
		&self,
		namespace: &str,
		id: &str,
	) -> Result<Option<T>, StorageError> {
		match self.retrieve(namespace, id).await {
			Ok(value) => Ok(Some(value)),
			Err(StorageError::NotFound) => Ok(None),
			Err(e) => Err(e),
		}
	}

	/// Removes a value from storage.
	pub async fn remove(&self, namespace: &str, id: &str) -> Result<(), StorageError> {
		let key = format!("{}:{}", namespace, id);
		self.backend.delete(&key).await
	}
}

/// Builds a storage backend from configuration.
pub fn create_backend(config: &StorageConfig) -> Result<Box<dyn StorageBackend>, StorageError> {
	match config.backend {
		StorageBackendKind::Memory => Ok(Box::new(implementations::memory::MemoryStorage::new())),
		StorageBackendKind::File => {
			let path = config.path.clone().unwrap_or_else(|| {
				PathBuf::from("./data/storage")
			});
			Ok(Box::new(implementations::file::FileStorage::new(path)))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde::Deserialize;

	#[derive(Debug, Serialize, Deserialize, PartialEq)]
	struct Record {
		name: String,
		value: u64,
	}

	#[tokio::test]
	async fn typed_roundtrip_through_memory_backend() {
		let service = StorageService::new(Box::new(
			implementations::memory::MemoryStorage::new(),
		));
		let record = Record {
			name: "alpha".to_string(),
			value: 42,
		};

		service
			.store_with_ttl("test", "a", &record, None)
			.await
			.unwrap();
		let loaded: Record = service.retrieve("test", "a").await.unwrap();
		assert_eq!(loaded, record);

		service.remove("test", "a").await.unwrap();
		let gone: Option<Record> = service.retrieve_opt("test", "a").await.unwrap();
		assert!(gone.is_none());
	}
}
