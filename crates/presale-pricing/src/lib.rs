//! Fixed-point price computation.
//!
//! All stablecoin amounts carry six fractional digits, matching the
//! stablecoin's on-chain precision. Rounding is half away from zero and
//! happens at the final step of a computation, never on intermediates, so an
//! issued payment request is bit-exact against the stored intent.

use presale_types::{PriceQuote, SaleTerms};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Fractional digits of the stablecoin.
pub const STABLE_SCALE: u32 = 6;

#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
	#[error("price not configured")]
	PriceNotConfigured,

	#[error("amount must be positive")]
	NonPositiveAmount,

	#[error("minimum contribution is {0} USDC")]
	BelowMinimum(Decimal),

	#[error("maximum contribution is {0} USDC")]
	AboveMaximum(Decimal),
}

/// Rounds a stablecoin amount to its final six-digit form.
pub fn round_stable(amount: Decimal) -> Decimal {
	let mut rounded =
		amount.round_dp_with_strategy(STABLE_SCALE, RoundingStrategy::MidpointAwayFromZero);
	rounded.rescale(STABLE_SCALE);
	rounded
}

/// Unit price after the gating discount. An ungated buyer pays the base
/// price exactly, with no rounding applied.
pub fn effective_price(base: Decimal, discount_bps: u32, gated: bool) -> Decimal {
	if !gated || discount_bps == 0 {
		return base;
	}
	let factor = Decimal::ONE - Decimal::from(discount_bps) / Decimal::from(10_000u32);
	round_stable(base * factor)
}

/// Stablecoin amount due for a token amount at the given unit price.
pub fn to_stable_amount(token_amount: Decimal, price: Decimal) -> Decimal {
	round_stable(token_amount * price)
}

/// Whole tokens a stablecoin amount buys at the given unit price. Estimate
/// for display; actual issuance happens elsewhere.
pub fn to_token_amount(stable_amount: Decimal, price: Decimal) -> Result<Decimal, PricingError> {
	if price <= Decimal::ZERO {
		return Err(PricingError::PriceNotConfigured);
	}
	Ok((stable_amount / price).floor())
}

/// The single validation gate in the contribution flow.
pub fn enforce_caps(
	amount: Decimal,
	min: Option<Decimal>,
	max: Option<Decimal>,
) -> Result<(), PricingError> {
	if amount <= Decimal::ZERO {
		return Err(PricingError::NonPositiveAmount);
	}
	if let Some(min) = min {
		if amount < min {
			return Err(PricingError::BelowMinimum(min));
		}
	}
	if let Some(max) = max {
		if amount > max {
			return Err(PricingError::AboveMaximum(max));
		}
	}
	Ok(())
}

/// Builds the quote for the current terms and gating outcome.
pub fn quote(terms: &SaleTerms, gated: bool) -> Result<PriceQuote, PricingError> {
	let base = terms
		.base_price_usdc
		.filter(|p| *p > Decimal::ZERO)
		.ok_or(PricingError::PriceNotConfigured)?;

	Ok(PriceQuote {
		base_price_usdc: base,
		discount_bps: terms.discount_bps,
		effective_price_usdc: effective_price(base, terms.discount_bps, gated),
		caps_min: terms.min_contribution_usdc,
		caps_max: terms.max_contribution_usdc,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn dec(s: &str) -> Decimal {
		s.parse().unwrap()
	}

	#[test]
	fn gated_buyer_gets_the_discounted_price() {
		let price = effective_price(dec("0.0005"), 1000, true);
		assert_eq!(price, dec("0.00045"));
	}

	#[test]
	fn ungated_buyer_pays_base_exactly() {
		let base = dec("0.0005");
		assert_eq!(effective_price(base, 1000, false), base);
		assert_eq!(effective_price(base, 0, true), base);
	}

	#[test]
	fn rounding_is_half_away_from_zero_at_six_digits() {
		assert_eq!(round_stable(dec("1.0000005")), dec("1.000001"));
		assert_eq!(round_stable(dec("1.0000004")), dec("1.000000"));
		assert_eq!(round_stable(dec("-1.0000005")), dec("-1.000001"));
	}

	#[test]
	fn caps_are_inclusive_bounds() {
		let min = Some(Decimal::TEN);
		let max = Some(Decimal::from(1000));

		assert_eq!(
			enforce_caps(dec("5"), min, max),
			Err(PricingError::BelowMinimum(Decimal::TEN))
		);
		assert!(enforce_caps(dec("10"), min, max).is_ok());
		assert!(enforce_caps(dec("1000"), min, max).is_ok());
		assert_eq!(
			enforce_caps(dec("1000.01"), min, max),
			Err(PricingError::AboveMaximum(Decimal::from(1000)))
		);
	}

	#[test]
	fn zero_amount_is_rejected_even_without_caps() {
		assert_eq!(
			enforce_caps(Decimal::ZERO, None, None),
			Err(PricingError::NonPositiveAmount)
		);
	}

	#[test]
	fn conversion_roundtrip_loses_at_most_one_price_unit() {
		for (amount, price) in [
			("50", "0.00045"),
			("50", "0.0005"),
			("123.456789", "0.37"),
			("1000", "1.25"),
		] {
			let amount = dec(amount);
			let price = dec(price);
			let tokens = to_token_amount(amount, price).unwrap();
			let back = to_stable_amount(tokens, price);
			assert!(back <= amount, "{} -> {} -> {}", amount, tokens, back);
			assert!(
				amount - back < price,
				"{} -> {} -> {} drifted by a full price unit",
				amount,
				tokens,
				back
			);
		}
	}

	#[test]
	fn exact_multiple_roundtrips_exactly() {
		let tokens = to_token_amount(dec("50"), dec("0.0005")).unwrap();
		assert_eq!(tokens, dec("100000"));
		assert_eq!(to_stable_amount(tokens, dec("0.0005")), dec("50.000000"));
	}

	#[test]
	fn quote_requires_a_positive_base_price() {
		let mut terms = SaleTerms::default();
		assert_eq!(quote(&terms, false), Err(PricingError::PriceNotConfigured));

		terms.base_price_usdc = Some(dec("0.0005"));
		terms.discount_bps = 1000;
		let quoted = quote(&terms, true).unwrap();
		assert_eq!(quoted.effective_price_usdc, dec("0.00045"));
		assert_eq!(quoted.base_price_usdc, dec("0.0005"));
	}
}
