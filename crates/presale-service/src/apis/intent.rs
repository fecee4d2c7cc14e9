//! Contribution intent creation.

use super::ApiError;
use crate::state::AppState;
use axum::{extract::State, Json};
use presale_intent::{ContributionAmount, IssuedIntent};
use presale_types::validation::is_plausible_address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateIntentRequest {
	pub wallet: String,
	#[serde(default)]
	pub amount_usdc: Option<Decimal>,
	#[serde(default)]
	pub amount_token: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct PayLinks {
	pub solana_pay_url: String,
	pub qr_url: String,
}

#[derive(Debug, Serialize)]
pub struct CreateIntentResponse {
	pub ok: bool,
	#[serde(rename = "ref")]
	pub reference: String,
	pub memo: String,
	pub amount_usdc: Decimal,
	pub pay: PayLinks,
}

impl From<IssuedIntent> for CreateIntentResponse {
	fn from(issued: IssuedIntent) -> Self {
		Self {
			ok: true,
			reference: issued.reference,
			memo: issued.memo_tag,
			amount_usdc: issued.amount_usdc,
			pay: PayLinks {
				solana_pay_url: issued.solana_pay_url,
				qr_url: issued.qr_url,
			},
		}
	}
}

pub async fn create_intent(
	State(state): State<AppState>,
	Json(request): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>, ApiError> {
	if !is_plausible_address(&request.wallet) {
		return Err(ApiError::bad_request("wallet required"));
	}

	let amount = match (request.amount_usdc, request.amount_token) {
		(Some(stable), None) => ContributionAmount::Stable(stable),
		(None, Some(tokens)) => ContributionAmount::Token(tokens),
		(None, None) => {
			return Err(ApiError::bad_request(
				"amount_usdc or amount_token required",
			))
		}
		(Some(_), Some(_)) => {
			return Err(ApiError::bad_request(
				"provide exactly one of amount_usdc and amount_token",
			))
		}
	};

	let config = state.provider.current();
	let issued = state
		.intents
		.create_contribution_intent(&config, &request.wallet, amount)
		.await?;

	Ok(Json(issued.into()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_fields_are_rejected() {
		let err = serde_json::from_str::<CreateIntentRequest>(
			r#"{"wallet":"abc","amount_usdc":"10","amounts":"oops"}"#,
		)
		.unwrap_err();
		assert!(err.to_string().contains("unknown field"));
	}

	#[test]
	fn amounts_accept_both_numbers_and_strings() {
		let from_number: CreateIntentRequest =
			serde_json::from_str(r#"{"wallet":"abc","amount_usdc":50}"#).unwrap();
		let from_string: CreateIntentRequest =
			serde_json::from_str(r#"{"wallet":"abc","amount_usdc":"50"}"#).unwrap();
		assert_eq!(from_number.amount_usdc, from_string.amount_usdc);
	}
}
