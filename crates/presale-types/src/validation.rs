//! Wire-format checks applied before requests reach business logic.
//!
//! These are shape checks only. A string that passes is plausibly an address
//! or a signature; whether it refers to anything real is the ledger's
//! business.

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

pub fn is_base58(s: &str) -> bool {
	!s.is_empty() && s.chars().all(|c| BASE58_ALPHABET.contains(c))
}

/// Shape of a base58 account address. 32 bytes encode to 32 to 44 characters.
pub fn is_plausible_address(s: &str) -> bool {
	(32..=44).contains(&s.len()) && is_base58(s)
}

/// Shape of a base58 transaction signature. 64 bytes encode to 86 to 88
/// characters.
pub fn is_plausible_signature(s: &str) -> bool {
	(86..=88).contains(&s.len()) && is_base58(s)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_non_base58_characters() {
		assert!(!is_base58("O0Il"));
		assert!(!is_base58(""));
		assert!(!is_base58("hello world"));
		assert!(is_base58("5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp"));
	}

	#[test]
	fn address_length_bounds() {
		let addr = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
		assert!(is_plausible_address(addr));
		assert!(!is_plausible_address("short"));
		assert!(!is_plausible_address(&addr.repeat(2)));
	}

	#[test]
	fn signature_length_bounds() {
		let sig = "5".repeat(87);
		assert!(is_plausible_signature(&sig));
		assert!(!is_plausible_signature(&"5".repeat(64)));
		assert!(!is_plausible_signature(&"5".repeat(89)));
		assert!(!is_plausible_signature(&format!("{}!", "5".repeat(86))));
	}
}
