//! Intent issuance.
//!
//! Creating an intent is the only write in the contribution flow: resolve
//! the effective price, enforce the caps, persist the record with a TTL, and
//! hand back a payment request the buyer's wallet can execute. Two
//! concurrent requests from the same buyer produce two independent intents;
//! a buyer may legitimately want two separate contributions.

use chrono::Utc;
use presale_ledger::LedgerQuery;
use presale_pricing::{round_stable, to_stable_amount, PricingError};
use presale_storage::{StorageError, StorageService};
use presale_types::{
	memo_tag, ContributionIntent, EarlyClaimFeeIntent, IntentKind, IntentStatus, PresaleConfig,
	PresalePhase, EARLY_INTENT_NAMESPACE, EARLY_INTENT_TTL, INTENT_NAMESPACE, PENDING_INTENT_TTL,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub mod pay;
pub mod reference;

pub use reference::new_reference;

#[derive(Debug, Error)]
pub enum IntentError {
	#[error("presale closed")]
	PresaleClosed,

	#[error(transparent)]
	Pricing(#[from] PricingError),

	#[error(transparent)]
	Storage(#[from] StorageError),
}

/// Requested contribution size, in exactly one of the two units.
#[derive(Debug, Clone, Copy)]
pub enum ContributionAmount {
	/// Stablecoin display units.
	Stable(Decimal),
	/// Token display units, converted at the effective price.
	Token(Decimal),
}

/// Everything the caller needs to execute a freshly issued intent.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedIntent {
	pub reference: String,
	pub memo_tag: String,
	pub amount_usdc: Decimal,
	pub price_used: Option<Decimal>,
	pub gated: bool,
	pub solana_pay_url: String,
	pub qr_url: String,
}

/// Issues contribution and early-claim fee intents.
pub struct IntentService {
	storage: Arc<StorageService>,
	ledger: Arc<dyn LedgerQuery>,
}

impl IntentService {
	pub fn new(storage: Arc<StorageService>, ledger: Arc<dyn LedgerQuery>) -> Self {
		Self { storage, ledger }
	}

	/// Creates a contribution intent and its payment request.
	pub async fn create_contribution_intent(
		&self,
		config: &PresaleConfig,
		buyer: &str,
		amount: ContributionAmount,
	) -> Result<IssuedIntent, IntentError> {
		if config.sale.phase == PresalePhase::Closed {
			return Err(IntentError::PresaleClosed);
		}

		// Best effort: a failed gate lookup means no discount, never an error.
		let gated = match &config.assets.gate_collectible_mint {
			Some(gate_mint) => self.ledger.holds_asset(buyer, gate_mint).await,
			None => false,
		};

		let quote = presale_pricing::quote(&config.sale, gated)?;

		let amount_due = match amount {
			ContributionAmount::Stable(stable) => round_stable(stable),
			ContributionAmount::Token(tokens) => {
				to_stable_amount(tokens, quote.effective_price_usdc)
			}
		};
		presale_pricing::enforce_caps(amount_due, quote.caps_min, quote.caps_max)?;

		let reference = new_reference();
		let memo = memo_tag(IntentKind::Presale, &reference);

		let intent = ContributionIntent {
			reference: reference.clone(),
			memo_tag: memo.clone(),
			buyer_address: buyer.to_string(),
			amount_due,
			price_used: quote.effective_price_usdc,
			gated,
			status: IntentStatus::Pending,
			created_at: Utc::now().timestamp(),
			settled_at: None,
			settlement_signature: None,
		};

		self.storage
			.store_with_ttl(INTENT_NAMESPACE, &reference, &intent, Some(PENDING_INTENT_TTL))
			.await?;

		info!(
			"issued contribution intent {} for {} USDC (gated: {})",
			reference, amount_due, gated
		);

		let pay_url = pay::solana_pay_url(
			&config.deposit.owner,
			&amount_due,
			&config.assets.stablecoin_mint,
			&config.payment.label,
			&config.payment.message,
			&memo,
		);
		let qr_url = pay::qr_url(&config.payment.qr_endpoint, &pay_url);

		Ok(IssuedIntent {
			reference,
			memo_tag: memo,
			amount_usdc: amount_due,
			price_used: Some(quote.effective_price_usdc),
			gated,
			solana_pay_url: pay_url,
			qr_url,
		})
	}

	/// Creates a flat-fee intent for the early-claim flow. No discount logic
	/// and no caps; the fee comes straight from configuration.
	pub async fn create_early_claim_intent(
		&self,
		config: &PresaleConfig,
		buyer: &str,
	) -> Result<IssuedIntent, IntentError> {
		let flat_fee = round_stable(config.early_claim.flat_fee_usdc);

		let reference = new_reference();
		let memo = memo_tag(IntentKind::EarlyClaim, &reference);

		let intent = EarlyClaimFeeIntent {
			reference: reference.clone(),
			memo_tag: memo.clone(),
			buyer_address: buyer.to_string(),
			flat_fee,
			status: IntentStatus::Pending,
			created_at: Utc::now().timestamp(),
		};

		// Keyed by buyer: a newer fee intent supersedes the previous one.
		self.storage
			.store_with_ttl(EARLY_INTENT_NAMESPACE, buyer, &intent, Some(EARLY_INTENT_TTL))
			.await?;

		info!("issued early-claim fee intent {} for {}", reference, buyer);

		let pay_url = pay::solana_pay_url(
			&config.deposit.owner,
			&flat_fee,
			&config.assets.stablecoin_mint,
			&config.payment.early_label,
			&config.payment.early_message,
			&memo,
		);
		let qr_url = pay::qr_url(&config.payment.qr_endpoint, &pay_url);

		Ok(IssuedIntent {
			reference,
			memo_tag: memo,
			amount_usdc: flat_fee,
			price_used: None,
			gated: false,
			solana_pay_url: pay_url,
			qr_url,
		})
	}
}
