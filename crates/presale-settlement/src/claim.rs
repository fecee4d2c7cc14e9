//! Early-claim confirmation.
//!
//! Accepting a claim is a hand-off, not a verification: the buyer submits
//! the signature of their fee payment, the gateway checks the string is
//! shaped like a transaction signature, and a job record is queued for the
//! external processor. That processor must run the real memo-and-asset check
//! before distributing anything.

use chrono::Utc;
use presale_intent::new_reference;
use presale_storage::{StorageError, StorageService};
use presale_types::{
	validation::is_plausible_signature, ClaimJob, ClaimJobStatus, CLAIMABLE_NAMESPACE,
	CLAIM_JOB_NAMESPACE, CLAIM_JOB_TTL,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ClaimError {
	#[error("fee_signature is not a plausible transaction signature")]
	InvalidSignature,

	#[error(transparent)]
	Storage(#[from] StorageError),
}

/// Queues early-claim jobs and reads claimable balances.
pub struct ClaimQueue {
	storage: Arc<StorageService>,
}

impl ClaimQueue {
	pub fn new(storage: Arc<StorageService>) -> Self {
		Self { storage }
	}

	/// Queues a claim job for the submitted fee payment.
	///
	/// The signature is format-checked only. Anything base58-shaped is
	/// accepted and queued; a bogus but well-formed signature is caught by
	/// the downstream processor's verification, not here.
	pub async fn confirm_early_claim(
		&self,
		buyer: &str,
		claimed_signature: &str,
	) -> Result<ClaimJob, ClaimError> {
		if !is_plausible_signature(claimed_signature) {
			return Err(ClaimError::InvalidSignature);
		}

		let job = ClaimJob {
			job_id: new_reference(),
			buyer_address: buyer.to_string(),
			claimed_fee_signature: claimed_signature.to_string(),
			status: ClaimJobStatus::Queued,
			queued_at: Utc::now().timestamp(),
		};

		self.storage
			.store_with_ttl(CLAIM_JOB_NAMESPACE, &job.job_id, &job, Some(CLAIM_JOB_TTL))
			.await?;

		info!("queued early-claim job {} for {}", job.job_id, buyer);
		Ok(job)
	}

	/// Claimable token balance for a wallet, as written by the distribution
	/// worker. Absent means nothing is claimable yet.
	pub async fn pending_claimable(&self, wallet: &str) -> Result<Decimal, ClaimError> {
		Ok(self
			.storage
			.retrieve_opt::<Decimal>(CLAIMABLE_NAMESPACE, wallet)
			.await?
			.unwrap_or(Decimal::ZERO))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use presale_storage::implementations::memory::MemoryStorage;

	fn queue() -> (Arc<StorageService>, ClaimQueue) {
		let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
		(storage.clone(), ClaimQueue::new(storage))
	}

	const BUYER: &str = "BuyerWallet111111111111111111111111111111111";

	#[tokio::test]
	async fn rejects_malformed_signatures() {
		let (_, queue) = queue();

		for bad in ["", "abc", "not base58 at all!!", &"5".repeat(120)] {
			let err = queue.confirm_early_claim(BUYER, bad).await.unwrap_err();
			assert!(matches!(err, ClaimError::InvalidSignature), "{:?}", bad);
		}
	}

	#[tokio::test]
	async fn queues_a_job_for_a_plausible_signature() {
		let (storage, queue) = queue();
		let signature = "5".repeat(87);

		let job = queue.confirm_early_claim(BUYER, &signature).await.unwrap();
		assert_eq!(job.status, ClaimJobStatus::Queued);
		assert_eq!(job.buyer_address, BUYER);

		let stored: ClaimJob = storage
			.retrieve(CLAIM_JOB_NAMESPACE, &job.job_id)
			.await
			.unwrap();
		assert_eq!(stored.claimed_fee_signature, signature);
	}

	#[tokio::test]
	async fn claimable_balance_defaults_to_zero() {
		let (storage, queue) = queue();

		assert_eq!(
			queue.pending_claimable(BUYER).await.unwrap(),
			Decimal::ZERO
		);

		storage
			.store_with_ttl(
				CLAIMABLE_NAMESPACE,
				BUYER,
				&"1234.5".parse::<Decimal>().unwrap(),
				None,
			)
			.await
			.unwrap();
		assert_eq!(
			queue.pending_claimable(BUYER).await.unwrap(),
			"1234.5".parse::<Decimal>().unwrap()
		);
	}
}
