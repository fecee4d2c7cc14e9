//! Settlement polling.

use super::ApiError;
use crate::state::AppState;
use axum::{
	extract::{Query, State},
	response::{IntoResponse, Response},
	Json,
};
use presale_settlement::SettlementCheck;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
	#[serde(rename = "ref")]
	pub reference: Option<String>,
}

/// Pollable without side effects beyond the first successful match. The
/// degraded case is a distinct status so clients can tell "try again soon"
/// from "the checker itself could not reach the ledger".
pub async fn check_settlement(
	State(state): State<AppState>,
	Query(query): Query<CheckQuery>,
) -> Result<Response, ApiError> {
	let Some(reference) = query.reference.filter(|r| !r.is_empty()) else {
		return Err(ApiError::bad_request("ref required"));
	};

	let config = state.provider.current();
	let outcome = state.matcher.check_settlement(&config, &reference).await?;

	let response = match outcome {
		SettlementCheck::Pending => Json(json!({ "status": "pending" })),
		SettlementCheck::Settled { signature } => {
			Json(json!({ "status": "settled", "signature": signature }))
		}
		SettlementCheck::UnknownReference => return Err(ApiError::not_found("unknown ref")),
		SettlementCheck::Degraded { reason } => {
			Json(json!({ "status": "unknown", "error": reason }))
		}
	};

	Ok(response.into_response())
}
