//! Payment-request URI construction.
//!
//! The URI format is an external protocol contract: wallet apps parse these
//! field names, so both the names and their order are fixed. Values are
//! form-urlencoded.

use rust_decimal::Decimal;
use url::form_urlencoded;

/// Builds a `solana:` payment-request URI for a stablecoin transfer with an
/// attached memo.
pub fn solana_pay_url(
	recipient: &str,
	amount: &Decimal,
	mint: &str,
	label: &str,
	message: &str,
	memo: &str,
) -> String {
	let query = form_urlencoded::Serializer::new(String::new())
		.append_pair("amount", &amount.to_string())
		.append_pair("spl-token", mint)
		.append_pair("label", label)
		.append_pair("message", message)
		.append_pair("memo", memo)
		.finish();
	format!("solana:{}?{}", recipient, query)
}

/// Link to an external QR renderer for the payment URI, for clients without
/// a local QR library.
pub fn qr_url(endpoint: &str, pay_url: &str) -> String {
	let query = form_urlencoded::Serializer::new(String::new())
		.append_pair("size", "240x240")
		.append_pair("data", pay_url)
		.finish();
	format!("{}?{}", endpoint, query)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn uri_fields_appear_in_protocol_order() {
		let url = solana_pay_url(
			"OwnerAddress11111111111111111111111111111111",
			&"50.000000".parse().unwrap(),
			"EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
			"Token Presale",
			"Presale Deposit",
			"presale-deadbeef",
		);

		let expected = concat!(
			"solana:OwnerAddress11111111111111111111111111111111",
			"?amount=50.000000",
			"&spl-token=EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
			"&label=Token+Presale",
			"&message=Presale+Deposit",
			"&memo=presale-deadbeef",
		);
		assert_eq!(url, expected);
	}

	#[test]
	fn qr_link_encodes_the_full_pay_url() {
		let qr = qr_url(
			"https://api.qrserver.com/v1/create-qr-code/",
			"solana:Owner?amount=1.000000&memo=early-claim-deadbeef",
		);

		assert!(qr.starts_with("https://api.qrserver.com/v1/create-qr-code/?size=240x240&data="));
		assert!(qr.contains("solana%3AOwner%3Famount%3D1.000000"));
		assert!(!qr.contains("amount=1.000000"));
	}
}
