//! Early-claim endpoints: fee intent, confirmation, claimable balance.

use super::{balances::WalletQuery, ApiError};
use crate::state::AppState;
use axum::{
	extract::{Query, State},
	Json,
};
use presale_types::validation::is_plausible_address;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EarlyIntentRequest {
	pub wallet: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfirmRequest {
	pub wallet: String,
	pub fee_signature: String,
}

/// Issues the flat-fee intent for the early-claim flow.
pub async fn early_intent(
	State(state): State<AppState>,
	Json(request): Json<EarlyIntentRequest>,
) -> Result<Json<Value>, ApiError> {
	if !is_plausible_address(&request.wallet) {
		return Err(ApiError::bad_request("wallet required"));
	}

	let config = state.provider.current();
	let issued = state
		.intents
		.create_early_claim_intent(&config, &request.wallet)
		.await?;

	Ok(Json(json!({
		"ok": true,
		"ref": issued.reference,
		"memo": issued.memo_tag,
		"amount_usdc": issued.amount_usdc,
		"pay": {
			"solana_pay_url": issued.solana_pay_url,
			"qr_url": issued.qr_url,
		},
	})))
}

/// Accepts the fee-payment signature and queues the processing job. No
/// synchronous ledger verification happens here.
pub async fn confirm(
	State(state): State<AppState>,
	Json(request): Json<ConfirmRequest>,
) -> Result<Json<Value>, ApiError> {
	if !is_plausible_address(&request.wallet) {
		return Err(ApiError::bad_request("wallet required"));
	}
	if request.fee_signature.is_empty() {
		return Err(ApiError::bad_request("fee_signature required"));
	}

	let job = state
		.claims
		.confirm_early_claim(&request.wallet, &request.fee_signature)
		.await?;

	Ok(Json(json!({ "ok": true, "job_id": job.job_id })))
}

/// Claimable balance as computed by the external distribution worker.
pub async fn claim_status(
	State(state): State<AppState>,
	Query(query): Query<WalletQuery>,
) -> Result<Json<Value>, ApiError> {
	let Some(wallet) = query.wallet.filter(|w| !w.is_empty()) else {
		return Err(ApiError::bad_request("wallet required"));
	};

	let pending = state.claims.pending_claimable(&wallet).await?;
	Ok(Json(json!({ "pending_tokens": pending })))
}
