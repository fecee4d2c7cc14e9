//! Intent reference generation.

use uuid::Uuid;

/// Generates an opaque intent reference: 16 random bytes, hex encoded.
///
/// The reference ends up verbatim in a public on-chain memo and is the sole
/// correlation key, so it must be unguessable. 128 bits keeps the collision
/// probability negligible at any volume this gateway will see.
pub fn new_reference() -> String {
	hex::encode(Uuid::new_v4().as_bytes())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn references_are_lowercase_hex_of_fixed_width() {
		let reference = new_reference();
		assert_eq!(reference.len(), 32);
		assert!(reference.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
	}

	#[test]
	fn ten_thousand_references_do_not_collide() {
		let refs: HashSet<String> = (0..10_000).map(|_| new_reference()).collect();
		assert_eq!(refs.len(), 10_000);
	}
}
