//! Early-claim processing jobs.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage namespace for queued claim jobs, keyed by job id.
pub const CLAIM_JOB_NAMESPACE: &str = "job";

/// Storage namespace for claimable token balances, keyed by buyer wallet.
/// Written by the external distribution worker, read here for display.
pub const CLAIMABLE_NAMESPACE: &str = "claimable";

/// Retention for queued jobs. The external processor is expected to pick a
/// job up well within this window.
pub const CLAIM_JOB_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 3);

/// Job lifecycle as tracked here. Downstream processing keeps its own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimJobStatus {
	Queued,
}

/// A hand-off record for the external early-claim processor.
///
/// The claimed fee signature is stored as submitted. It is format-checked but
/// not verified against the ledger; the processor must re-verify the payment
/// before distributing anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimJob {
	pub job_id: String,
	pub buyer_address: String,
	pub claimed_fee_signature: String,
	pub status: ClaimJobStatus,
	/// Unix seconds.
	pub queued_at: i64,
}
