//! Read-only ledger access with ordered endpoint failover.
//!
//! RPC nodes are unreliable and rate-limited, so every call walks the
//! configured endpoint list in order and returns the first success. When all
//! endpoints fail the typed error is returned to the caller; whether that is
//! fatal depends on the call site. Balance reads degrade to safe defaults,
//! settlement checks surface the failure.

use async_trait::async_trait;
use presale_types::LedgerConfig;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub mod types;

pub use types::{
	RpcEnvelope, SignatureInfo, TokenAccountsByOwner, TokenAmount, TokenBalanceRecord,
	TransactionDetail, TransactionMeta,
};

#[derive(Debug, Error)]
pub enum LedgerError {
	#[error("Transport error: {0}")]
	Transport(String),

	#[error("Ledger error {code}: {message}")]
	Rpc { code: i64, message: String },

	#[error("Malformed response: {0}")]
	Malformed(String),

	#[error("No ledger endpoints configured")]
	NoEndpoints,
}

/// Read methods the gateway needs from the ledger.
#[async_trait]
pub trait LedgerQuery: Send + Sync {
	/// Total display-unit balance the owner holds of the mint, across all of
	/// their token accounts.
	async fn get_token_balance(&self, owner: &str, mint: &str) -> Result<Decimal, LedgerError>;

	/// Recent transaction signatures for an address, most recent first.
	async fn get_recent_signatures(
		&self,
		address: &str,
		limit: usize,
	) -> Result<Vec<SignatureInfo>, LedgerError>;

	/// Full transaction detail, or None when the node no longer has it.
	async fn get_transaction(
		&self,
		signature: &str,
	) -> Result<Option<TransactionDetail>, LedgerError>;

	/// Best-effort gate check. Degrades to false on any failure so that
	/// discount and display logic never block the flow.
	async fn holds_asset(&self, owner: &str, mint: &str) -> bool {
		match self.get_token_balance(owner, mint).await {
			Ok(balance) => balance > Decimal::ZERO,
			Err(e) => {
				debug!("gating balance lookup degraded to false: {}", e);
				false
			}
		}
	}
}

/// JSON-RPC client over an ordered list of endpoints.
pub struct RpcLedgerClient {
	client: reqwest::Client,
	endpoints: Vec<String>,
}

impl RpcLedgerClient {
	pub fn new(config: &LedgerConfig) -> Result<Self, LedgerError> {
		if config.endpoints.is_empty() {
			return Err(LedgerError::NoEndpoints);
		}

		let client = reqwest::Client::builder()
			.timeout(Duration::from_millis(config.request_timeout_ms))
			.build()
			.map_err(|e| LedgerError::Transport(e.to_string()))?;

		Ok(Self {
			client,
			endpoints: config.endpoints.clone(),
		})
	}

	/// Issues one JSON-RPC call, failing over through the endpoint list.
	async fn call(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
		let body = json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": method,
			"params": params,
		});

		let mut last_err = LedgerError::NoEndpoints;
		for endpoint in &self.endpoints {
			match self.try_endpoint(endpoint, &body).await {
				Ok(result) => return Ok(result),
				Err(e) => {
					warn!("ledger call {} via {} failed: {}", method, endpoint, e);
					last_err = e;
				}
			}
		}
		Err(last_err)
	}

	async fn try_endpoint(&self, endpoint: &str, body: &Value) -> Result<Value, LedgerError> {
		let response = self
			.client
			.post(endpoint)
			.json(body)
			.send()
			.await
			.map_err(|e| LedgerError::Transport(e.to_string()))?;

		let status = response.status();
		let text = response
			.text()
			.await
			.map_err(|e| LedgerError::Transport(e.to_string()))?;

		let envelope: RpcEnvelope = serde_json::from_str(&text)
			.map_err(|_| LedgerError::Malformed(truncate(&text)))?;

		if let Some(error) = envelope.error {
			return Err(LedgerError::Rpc {
				code: error.code,
				message: error.message,
			});
		}
		if !status.is_success() {
			return Err(LedgerError::Transport(format!(
				"HTTP {}: {}",
				status,
				truncate(&text)
			)));
		}

		Ok(envelope.result.unwrap_or(Value::Null))
	}
}

#[async_trait]
impl LedgerQuery for RpcLedgerClient {
	async fn get_token_balance(&self, owner: &str, mint: &str) -> Result<Decimal, LedgerError> {
		let result = self
			.call(
				"getParsedTokenAccountsByOwner",
				json!([owner, { "mint": mint }, { "commitment": "confirmed" }]),
			)
			.await?;

		let accounts: TokenAccountsByOwner = serde_json::from_value(result)
			.map_err(|e| LedgerError::Malformed(e.to_string()))?;
		Ok(accounts.total_ui_amount())
	}

	async fn get_recent_signatures(
		&self,
		address: &str,
		limit: usize,
	) -> Result<Vec<SignatureInfo>, LedgerError> {
		let result = self
			.call("getSignaturesForAddress", json!([address, { "limit": limit }]))
			.await?;

		serde_json::from_value(result).map_err(|e| LedgerError::Malformed(e.to_string()))
	}

	async fn get_transaction(
		&self,
		signature: &str,
	) -> Result<Option<TransactionDetail>, LedgerError> {
		let result = self
			.call(
				"getTransaction",
				json!([signature, { "maxSupportedTransactionVersion": 0 }]),
			)
			.await?;

		if result.is_null() {
			return Ok(None);
		}

		let detail: TransactionDetail = serde_json::from_value(result)
			.map_err(|e| LedgerError::Malformed(e.to_string()))?;
		Ok(Some(detail))
	}
}

fn truncate(text: &str) -> String {
	text.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use presale_types::LedgerConfig;

	#[test]
	fn rejects_empty_endpoint_list() {
		let config = LedgerConfig {
			endpoints: vec![],
			request_timeout_ms: 1000,
		};
		assert!(matches!(
			RpcLedgerClient::new(&config),
			Err(LedgerError::NoEndpoints)
		));
	}

	#[test]
	fn rpc_error_wins_over_http_status() {
		// Some providers return JSON-RPC errors with a 200 status and vice
		// versa; the error member is the authoritative signal.
		let envelope: RpcEnvelope = serde_json::from_str(
			r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32005,"message":"node is behind"}}"#,
		)
		.unwrap();
		assert!(envelope.result.is_none());
		assert_eq!(envelope.error.unwrap().code, -32005);
	}
}
