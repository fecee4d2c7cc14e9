//! Derived price quotes. Not persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of the terms applied to a single pricing decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
	pub base_price_usdc: Decimal,
	pub discount_bps: u32,
	/// Base price with the gating discount applied, or the base price exactly
	/// when the buyer is not gated.
	pub effective_price_usdc: Decimal,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub caps_min: Option<Decimal>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub caps_max: Option<Decimal>,
}
