//! Contribution and fee intent records.
//!
//! An intent is a server-issued expectation of a future on-chain payment.
//! The correlation key is the memo tag: the exact string must appear in the
//! paying transaction for the settlement matcher to accept it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage namespace for contribution intents, keyed by reference.
pub const INTENT_NAMESPACE: &str = "intent";

/// Storage namespace for early-claim fee intents, keyed by buyer wallet.
pub const EARLY_INTENT_NAMESPACE: &str = "early";

/// How long a pending intent stays retrievable.
pub const PENDING_INTENT_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7);

/// Retention after settlement. Kept longer so contributions can be audited.
pub const SETTLED_INTENT_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 60);

/// Retention for early-claim fee intents.
pub const EARLY_INTENT_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 30);

/// Intent lifecycle. The only transition is pending to settled; expiry is
/// handled by the storage TTL rather than an explicit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentStatus {
	Pending,
	Settled,
}

/// Which flow an intent belongs to. Determines the memo prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
	Presale,
	EarlyClaim,
}

impl IntentKind {
	pub fn memo_prefix(&self) -> &'static str {
		match self {
			IntentKind::Presale => "presale",
			IntentKind::EarlyClaim => "early-claim",
		}
	}
}

/// Derives the memo string that must appear verbatim in the paying
/// transaction's metadata.
pub fn memo_tag(kind: IntentKind, reference: &str) -> String {
	format!("{}-{}", kind.memo_prefix(), reference)
}

/// A server-issued expectation of a future on-chain contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionIntent {
	/// Opaque high-entropy identifier, also embedded in the memo tag.
	pub reference: String,
	/// Exact string the settlement matcher looks for on chain.
	pub memo_tag: String,
	/// Wallet expected to pay. Advisory only; matching verifies destination,
	/// asset, and memo, not the sender.
	pub buyer_address: String,
	/// Stablecoin amount due, rounded to six fractional digits.
	pub amount_due: Decimal,
	/// Unit price actually applied, for audit.
	pub price_used: Decimal,
	/// Whether the gating discount applied at issuance time.
	pub gated: bool,
	pub status: IntentStatus,
	/// Unix seconds.
	pub created_at: i64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub settled_at: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub settlement_signature: Option<String>,
}

/// Fee intent for receiving tokens ahead of the distribution date.
///
/// Same shape as a contribution intent, but the amount is a flat fee and no
/// discount logic applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlyClaimFeeIntent {
	pub reference: String,
	pub memo_tag: String,
	pub buyer_address: String,
	pub flat_fee: Decimal,
	pub status: IntentStatus,
	/// Unix seconds.
	pub created_at: i64,
}
