//! Settlement matching.
//!
//! Correlates a pending intent with an on-chain payment without callbacks or
//! webhooks: scan the deposit account's recent history and look for a
//! transaction that carries the intent's memo tag AND moves the expected
//! stablecoin. A memo alone is trivially spoofable, so both conditions are
//! required. The amount is deliberately not compared against the intent;
//! over- or underpayment must not hide a real payment from the buyer, and
//! exact reconciliation belongs to downstream accounting.

use chrono::Utc;
use presale_ledger::LedgerQuery;
use presale_storage::{StorageError, StorageService};
use presale_types::{
	ContributionIntent, IntentStatus, PresaleConfig, INTENT_NAMESPACE, SETTLED_INTENT_TTL,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub mod claim;

pub use claim::{ClaimError, ClaimQueue};

/// How many recent deposit-address signatures one check inspects. A payment
/// older than this window is found once traffic quiets down, or not at all;
/// the window must stay bounded to bound request latency.
pub const SCAN_WINDOW: usize = 50;

/// Transaction details fetched concurrently per batch. Recency order is
/// preserved across and within batches.
const DETAIL_BATCH: usize = 8;

#[derive(Debug, Error)]
pub enum SettlementError {
	#[error(transparent)]
	Storage(#[from] StorageError),
}

/// Outcome of a settlement check.
///
/// `Degraded` means the ledger could not be queried; it is deliberately a
/// separate variant so callers never confuse "not yet paid" with "could not
/// verify".
#[derive(Debug, Clone, PartialEq)]
pub enum SettlementCheck {
	Pending,
	Settled { signature: String },
	UnknownReference,
	Degraded { reason: String },
}

/// Scans for payments matching pending intents and records the transition.
pub struct SettlementMatcher {
	storage: Arc<StorageService>,
	ledger: Arc<dyn LedgerQuery>,
}

impl SettlementMatcher {
	pub fn new(storage: Arc<StorageService>, ledger: Arc<dyn LedgerQuery>) -> Self {
		Self { storage, ledger }
	}

	/// Checks whether the referenced intent has settled.
	///
	/// Safe to poll: the pending-to-settled transition happens at most once,
	/// and every later call returns the recorded signature without touching
	/// the ledger. Re-writing an already settled record with the same
	/// signature is harmless, so concurrent polls need no locking.
	pub async fn check_settlement(
		&self,
		config: &PresaleConfig,
		reference: &str,
	) -> Result<SettlementCheck, SettlementError> {
		let Some(mut intent) = self
			.storage
			.retrieve_opt::<ContributionIntent>(INTENT_NAMESPACE, reference)
			.await?
		else {
			return Ok(SettlementCheck::UnknownReference);
		};

		if intent.status == IntentStatus::Settled {
			return Ok(SettlementCheck::Settled {
				signature: intent.settlement_signature.unwrap_or_default(),
			});
		}

		let signatures = match self
			.ledger
			.get_recent_signatures(&config.deposit.vault_ata, SCAN_WINDOW)
			.await
		{
			Ok(signatures) => signatures,
			Err(e) => {
				return Ok(SettlementCheck::Degraded {
					reason: e.to_string(),
				})
			}
		};

		for chunk in signatures.chunks(DETAIL_BATCH) {
			let details = futures::future::join_all(
				chunk
					.iter()
					.map(|entry| self.ledger.get_transaction(&entry.signature)),
			)
			.await;

			for (entry, result) in chunk.iter().zip(details) {
				let detail = match result {
					Ok(Some(detail)) => detail,
					// The node no longer has this transaction; it cannot be
					// the settlement we issued an intent for this week.
					Ok(None) => continue,
					Err(e) => {
						return Ok(SettlementCheck::Degraded {
							reason: e.to_string(),
						})
					}
				};

				if !detail.mentions_memo(&intent.memo_tag) {
					continue;
				}
				if !detail.touches_mint(&config.assets.stablecoin_mint) {
					debug!(
						"memo match without stablecoin movement in {}, ignoring",
						entry.signature
					);
					continue;
				}

				intent.status = IntentStatus::Settled;
				intent.settlement_signature = Some(entry.signature.clone());
				intent.settled_at = Some(Utc::now().timestamp());
				self.storage
					.store_with_ttl(
						INTENT_NAMESPACE,
						reference,
						&intent,
						Some(SETTLED_INTENT_TTL),
					)
					.await?;

				info!(
					"intent {} settled by transaction {}",
					reference, entry.signature
				);
				return Ok(SettlementCheck::Settled {
					signature: entry.signature.clone(),
				});
			}
		}

		Ok(SettlementCheck::Pending)
	}
}
