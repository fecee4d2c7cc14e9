//! Wallet balance display.

use super::ApiError;
use crate::state::AppState;
use axum::{
	extract::{Query, State},
	Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct WalletQuery {
	pub wallet: Option<String>,
}

/// Best-effort balances for the connected wallet. Display-only data must
/// never block the flow, so every lookup degrades to zero or false and the
/// first failure is attached for debugging.
pub async fn wallet_balances(
	State(state): State<AppState>,
	Query(query): Query<WalletQuery>,
) -> Result<Json<Value>, ApiError> {
	let Some(wallet) = query.wallet.filter(|w| !w.is_empty()) else {
		return Err(ApiError::bad_request("wallet required"));
	};

	let config = state.provider.current();

	let (usdc, token, gate_ok) = tokio::join!(
		state
			.ledger
			.get_token_balance(&wallet, &config.assets.stablecoin_mint),
		state
			.ledger
			.get_token_balance(&wallet, &config.assets.token_mint),
		async {
			match &config.assets.gate_collectible_mint {
				Some(gate_mint) => state.ledger.holds_asset(&wallet, gate_mint).await,
				None => false,
			}
		}
	);

	let mut error: Option<String> = None;
	let usdc = usdc.unwrap_or_else(|e| {
		error.get_or_insert(e.to_string());
		Decimal::ZERO
	});
	let token = token.unwrap_or_else(|e| {
		error.get_or_insert(e.to_string());
		Decimal::ZERO
	});

	let mut body = json!({
		"usdc": { "ui_amount": usdc },
		"token": { "ui_amount": token },
		"gate_ok": gate_ok,
	});
	if let Some(error) = error {
		body["error"] = json!(error);
	}

	Ok(Json(body))
}
