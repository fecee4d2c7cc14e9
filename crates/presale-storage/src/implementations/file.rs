//! File-based storage backend.
//!
//! Stores each value as a small JSON envelope carrying its expiry, so TTLs
//! survive restarts. Writes go through a temp file and rename.

use crate::{StorageBackend, StorageError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;

#[derive(Serialize, Deserialize)]
struct Envelope {
	/// Unix seconds; None means the value never expires.
	expires_at: Option<i64>,
	payload: Vec<u8>,
}

impl Envelope {
	fn is_expired(&self) -> bool {
		self.expires_at
			.map(|t| chrono::Utc::now().timestamp() >= t)
			.unwrap_or(false)
	}
}

/// File-based storage implementation.
pub struct FileStorage {
	base_path: PathBuf,
}

impl FileStorage {
	pub fn new(base_path: PathBuf) -> Self {
		Self { base_path }
	}

	/// Converts a storage key to a filesystem-safe file path.
	fn get_file_path(&self, key: &str) -> PathBuf {
		let safe_key = key.replace(['/', ':'], "_");
		self.base_path.join(format!("{}.json", safe_key))
	}

	async fn read_envelope(&self, key: &str) -> Result<Option<Envelope>, StorageError> {
		let path = self.get_file_path(key);
		let data = match fs::read(&path).await {
			Ok(data) => data,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(StorageError::Backend(e.to_string())),
		};
		let envelope: Envelope = serde_json::from_slice(&data)
			.map_err(|e| StorageError::Serialization(e.to_string()))?;
		if envelope.is_expired() {
			// Stale files are removed on the next read rather than by a sweeper.
			let _ = fs::remove_file(&path).await;
			return Ok(None);
		}
		Ok(Some(envelope))
	}
}

#[async_trait]
impl StorageBackend for FileStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		match self.read_envelope(key).await? {
			Some(envelope) => Ok(envelope.payload),
			None => Err(StorageError::NotFound),
		}
	}

	async fn set_bytes(
		&self,
		key: &str,
		value: Vec<u8>,
		ttl: Option<Duration>,
	) -> Result<(), StorageError> {
		let path = self.get_file_path(key);

		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)
				.await
				.map_err(|e| StorageError::Backend(e.to_string()))?;
		}

		let envelope = Envelope {
			expires_at: ttl.map(|d| chrono::Utc::now().timestamp() + d.as_secs() as i64),
			payload: value,
		};
		let bytes = serde_json::to_vec(&envelope)
			.map_err(|e| StorageError::Serialization(e.to_string()))?;

		// Write atomically by writing to temp file then renaming
		let temp_path = path.with_extension("tmp");
		fs::write(&temp_path, bytes)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;

		fs::rename(&temp_path, &path)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;

		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<(), StorageError> {
		let path = self.get_file_path(key);

		match fs::remove_file(&path).await {
			Ok(_) => Ok(()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(StorageError::Backend(e.to_string())),
		}
	}

	async fn exists(&self, key: &str) -> Result<bool, StorageError> {
		Ok(self.read_envelope(key).await?.is_some())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn roundtrip_and_key_sanitization() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path().to_path_buf());

		storage
			.set_bytes("intent:abc/def", b"payload".to_vec(), None)
			.await
			.unwrap();

		assert_eq!(
			storage.get_bytes("intent:abc/def").await.unwrap(),
			b"payload".to_vec()
		);
	}

	#[tokio::test]
	async fn ttl_survives_in_the_envelope() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path().to_path_buf());

		// A TTL of zero is already expired on the next read.
		storage
			.set_bytes("k", b"payload".to_vec(), Some(Duration::ZERO))
			.await
			.unwrap();

		assert!(matches!(
			storage.get_bytes("k").await,
			Err(StorageError::NotFound)
		));
		assert!(!storage.exists("k").await.unwrap());
	}

	#[tokio::test]
	async fn unexpired_ttl_keeps_the_value() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path().to_path_buf());

		storage
			.set_bytes("k", b"payload".to_vec(), Some(Duration::from_secs(3600)))
			.await
			.unwrap();

		assert_eq!(storage.get_bytes("k").await.unwrap(), b"payload".to_vec());
	}
}
