//! Request handlers.
//!
//! Every handler deserializes into a strict request type first; payloads
//! with unknown or missing fields are rejected before any business logic
//! runs. Errors map onto the taxonomy the clients poll against: 400 for
//! input problems, 404 for unknown references, 500 for configuration and
//! infrastructure failures.

pub mod balances;
pub mod check;
pub mod claim;
pub mod intent;
pub mod status;

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use presale_intent::IntentError;
use presale_pricing::PricingError;
use presale_settlement::{ClaimError, SettlementError};
use serde_json::json;

/// Error response carrying a human-readable reason.
pub struct ApiError {
	status: StatusCode,
	message: String,
}

impl ApiError {
	pub fn bad_request(message: impl Into<String>) -> Self {
		Self {
			status: StatusCode::BAD_REQUEST,
			message: message.into(),
		}
	}

	pub fn not_found(message: impl Into<String>) -> Self {
		Self {
			status: StatusCode::NOT_FOUND,
			message: message.into(),
		}
	}

	pub fn internal(message: impl Into<String>) -> Self {
		Self {
			status: StatusCode::INTERNAL_SERVER_ERROR,
			message: message.into(),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(json!({ "error": self.message }))).into_response()
	}
}

impl From<IntentError> for ApiError {
	fn from(err: IntentError) -> Self {
		match err {
			IntentError::PresaleClosed => ApiError::bad_request("presale closed"),
			IntentError::Pricing(PricingError::PriceNotConfigured) => {
				ApiError::internal("price not configured")
			}
			IntentError::Pricing(e) => ApiError::bad_request(e.to_string()),
			IntentError::Storage(e) => ApiError::internal(format!("storage error: {}", e)),
		}
	}
}

impl From<SettlementError> for ApiError {
	fn from(err: SettlementError) -> Self {
		match err {
			SettlementError::Storage(e) => ApiError::internal(format!("storage error: {}", e)),
		}
	}
}

impl From<ClaimError> for ApiError {
	fn from(err: ClaimError) -> Self {
		match err {
			ClaimError::InvalidSignature => ApiError::bad_request(err.to_string()),
			ClaimError::Storage(e) => ApiError::internal(format!("storage error: {}", e)),
		}
	}
}
