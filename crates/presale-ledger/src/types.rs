//! Typed views of the ledger RPC responses.
//!
//! Only the fields the gateway reads are modeled; everything else in the
//! node's responses is ignored. Different indexers surface memo text in
//! different places, so the memo check looks at both the log output and the
//! raw instruction payload.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
pub struct RpcEnvelope {
	pub result: Option<Value>,
	pub error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorBody {
	pub code: i64,
	pub message: String,
}

/// One entry from `getSignaturesForAddress`, most recent first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureInfo {
	pub signature: String,
	#[serde(default)]
	pub slot: Option<u64>,
	#[serde(default)]
	pub err: Option<Value>,
	#[serde(default)]
	pub block_time: Option<i64>,
}

/// Amount fields of a token balance as the node reports them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
	#[serde(default)]
	pub ui_amount_string: Option<String>,
	#[serde(default)]
	pub ui_amount: Option<f64>,
}

impl TokenAmount {
	/// Display-unit amount. The string form is preferred; the float form is
	/// a fallback for older nodes.
	pub fn as_decimal(&self) -> Decimal {
		if let Some(s) = &self.ui_amount_string {
			if let Ok(d) = s.parse::<Decimal>() {
				return d;
			}
		}
		self.ui_amount
			.and_then(Decimal::from_f64_retain)
			.unwrap_or(Decimal::ZERO)
	}
}

/// `getParsedTokenAccountsByOwner` response body.
#[derive(Debug, Deserialize)]
pub struct TokenAccountsByOwner {
	#[serde(default)]
	pub value: Vec<TokenAccountEntry>,
}

impl TokenAccountsByOwner {
	/// Total display-unit balance across the owner's accounts for the mint.
	pub fn total_ui_amount(&self) -> Decimal {
		self.value
			.iter()
			.map(|entry| entry.account.data.parsed.info.token_amount.as_decimal())
			.sum()
	}
}

#[derive(Debug, Deserialize)]
pub struct TokenAccountEntry {
	pub account: TokenAccount,
}

#[derive(Debug, Deserialize)]
pub struct TokenAccount {
	pub data: TokenAccountData,
}

#[derive(Debug, Deserialize)]
pub struct TokenAccountData {
	pub parsed: ParsedTokenData,
}

#[derive(Debug, Deserialize)]
pub struct ParsedTokenData {
	pub info: ParsedTokenInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTokenInfo {
	#[serde(default)]
	pub token_amount: TokenAmount,
}

/// Pre- or post-transfer token balance snapshot inside a transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceRecord {
	pub mint: String,
	#[serde(default)]
	pub owner: Option<String>,
	#[serde(default)]
	pub ui_token_amount: Option<TokenAmount>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
	#[serde(default)]
	pub log_messages: Option<Vec<String>>,
	#[serde(default)]
	pub pre_token_balances: Option<Vec<TokenBalanceRecord>>,
	#[serde(default)]
	pub post_token_balances: Option<Vec<TokenBalanceRecord>>,
	#[serde(default)]
	pub err: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMessage {
	#[serde(default)]
	pub instructions: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionEnvelope {
	#[serde(default)]
	pub message: Option<TransactionMessage>,
}

/// Full transaction detail from `getTransaction`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
	#[serde(default)]
	pub meta: Option<TransactionMeta>,
	#[serde(default)]
	pub transaction: Option<TransactionEnvelope>,
	#[serde(default)]
	pub block_time: Option<i64>,
}

impl TransactionDetail {
	/// True when the memo tag appears in the log output or in the raw
	/// instruction payload.
	pub fn mentions_memo(&self, tag: &str) -> bool {
		if let Some(meta) = &self.meta {
			if let Some(logs) = &meta.log_messages {
				if logs.join("\n").contains(tag) {
					return true;
				}
			}
		}
		if let Some(tx) = &self.transaction {
			if let Some(message) = &tx.message {
				if let Some(instructions) = &message.instructions {
					if instructions.to_string().contains(tag) {
						return true;
					}
				}
			}
		}
		false
	}

	/// True when any pre- or post-transfer balance snapshot references the
	/// mint. A memo alone is spoofable; this check requires that the asset
	/// itself moved through the transaction.
	pub fn touches_mint(&self, mint: &str) -> bool {
		let Some(meta) = &self.meta else {
			return false;
		};
		meta.pre_token_balances
			.iter()
			.flatten()
			.chain(meta.post_token_balances.iter().flatten())
			.any(|record| record.mint == mint)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

	fn transfer_with_memo(memo: &str, mint: &str) -> TransactionDetail {
		let raw = serde_json::json!({
			"blockTime": 1_768_000_000,
			"meta": {
				"logMessages": [
					"Program MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr invoke [1]",
					format!("Program log: Memo (len {}): \"{}\"", memo.len(), memo),
					"Program MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr success"
				],
				"preTokenBalances": [
					{ "mint": mint, "owner": "SenderOwner", "uiTokenAmount": { "uiAmountString": "120.5" } }
				],
				"postTokenBalances": [
					{ "mint": mint, "owner": "VaultOwner", "uiTokenAmount": { "uiAmountString": "170.5" } }
				]
			},
			"transaction": { "message": { "instructions": [] } }
		});
		serde_json::from_value(raw).unwrap()
	}

	#[test]
	fn memo_found_in_log_messages() {
		let tx = transfer_with_memo("presale-deadbeef", USDC);
		assert!(tx.mentions_memo("presale-deadbeef"));
		assert!(!tx.mentions_memo("presale-cafebabe"));
	}

	#[test]
	fn memo_found_in_instruction_payload() {
		let raw = serde_json::json!({
			"meta": { "logMessages": [] },
			"transaction": {
				"message": {
					"instructions": [
						{ "parsed": "presale-deadbeef", "program": "spl-memo" }
					]
				}
			}
		});
		let tx: TransactionDetail = serde_json::from_value(raw).unwrap();
		assert!(tx.mentions_memo("presale-deadbeef"));
	}

	#[test]
	fn mint_check_requires_the_expected_asset() {
		let tx = transfer_with_memo("presale-deadbeef", "SomeOtherMint1111111111111111111111111111111");
		assert!(tx.mentions_memo("presale-deadbeef"));
		assert!(!tx.touches_mint(USDC));
	}

	#[test]
	fn balance_total_prefers_the_string_form() {
		let raw = serde_json::json!({
			"value": [
				{ "account": { "data": { "parsed": { "info": { "tokenAmount": { "uiAmountString": "1.25", "uiAmount": 999.0 } } } } } },
				{ "account": { "data": { "parsed": { "info": { "tokenAmount": { "uiAmount": 0.75 } } } } } }
			]
		});
		let accounts: TokenAccountsByOwner = serde_json::from_value(raw).unwrap();
		assert_eq!(accounts.total_ui_amount(), "2.00".parse::<Decimal>().unwrap());
	}

	#[test]
	fn missing_meta_never_matches() {
		let tx = TransactionDetail::default();
		assert!(!tx.mentions_memo("presale-deadbeef"));
		assert!(!tx.touches_mint(USDC));
	}
}
