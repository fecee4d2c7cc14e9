//! Public status snapshot.
//!
//! Pure aggregation of the configuration into the single structure the
//! presentation layer polls. No state and no ledger access.

use crate::config::{DistributionSchedule, PresaleConfig, PresalePhase};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Early-claim terms as shown to buyers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlyClaimTerms {
	pub enabled: bool,
	pub flat_usdc: Decimal,
	pub fee_dest_wallet: String,
}

/// Everything a client needs to render the sale and build a contribution,
/// assembled from configuration alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
	pub presale_state: PresalePhase,
	pub token_mint: String,
	pub usdc_mint: String,
	pub deposit_usdc_ata: String,
	pub deposit_usdc_owner: String,
	pub presale_price_usdc: Option<Decimal>,
	pub public_price_usdc: Option<Decimal>,
	pub discount_bps: u32,
	pub presale_min_usdc: Option<Decimal>,
	pub presale_max_usdc: Option<Decimal>,
	pub tge_ts: Option<i64>,
	pub early_claim: EarlyClaimTerms,
	pub airdrop_bonus_bps: u32,
	pub distribution: DistributionSchedule,
}

impl From<&PresaleConfig> for StatusSnapshot {
	fn from(config: &PresaleConfig) -> Self {
		Self {
			presale_state: config.sale.phase,
			token_mint: config.assets.token_mint.clone(),
			usdc_mint: config.assets.stablecoin_mint.clone(),
			deposit_usdc_ata: config.deposit.vault_ata.clone(),
			deposit_usdc_owner: config.deposit.owner.clone(),
			presale_price_usdc: config.sale.base_price_usdc,
			public_price_usdc: config.sale.public_price_usdc,
			discount_bps: config.sale.discount_bps,
			presale_min_usdc: config.sale.min_contribution_usdc,
			presale_max_usdc: config.sale.max_contribution_usdc,
			tge_ts: config.sale.tge_ts,
			early_claim: EarlyClaimTerms {
				enabled: config.early_claim.enabled,
				flat_usdc: config.early_claim.flat_fee_usdc,
				fee_dest_wallet: config.deposit.owner.clone(),
			},
			airdrop_bonus_bps: config.sale.airdrop_bonus_bps,
			distribution: config.distribution.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{
		AssetConfig, DepositConfig, EarlyClaimConfig, LedgerConfig, PaymentLabels, SaleTerms,
		ServiceConfig, StorageConfig,
	};

	fn sample_config() -> PresaleConfig {
		PresaleConfig {
			service: ServiceConfig::default(),
			sale: SaleTerms {
				phase: PresalePhase::Open,
				base_price_usdc: Some("0.0005".parse().unwrap()),
				public_price_usdc: Some("0.001".parse().unwrap()),
				discount_bps: 1000,
				min_contribution_usdc: Some(Decimal::TEN),
				max_contribution_usdc: Some(Decimal::from(1000)),
				tge_ts: Some(1_768_000_000),
				airdrop_bonus_bps: 600,
			},
			assets: AssetConfig {
				stablecoin_mint: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
				token_mint: "So11111111111111111111111111111111111111112".to_string(),
				gate_collectible_mint: None,
			},
			deposit: DepositConfig {
				vault_ata: "VaultAtaAddress11111111111111111111111111111".to_string(),
				owner: "OwnerAddress11111111111111111111111111111111".to_string(),
			},
			early_claim: EarlyClaimConfig {
				enabled: true,
				flat_fee_usdc: Decimal::ONE,
			},
			ledger: LedgerConfig {
				endpoints: vec!["https://api.mainnet-beta.solana.com".to_string()],
				request_timeout_ms: 10_000,
			},
			storage: StorageConfig::default(),
			distribution: DistributionSchedule::default(),
			payment: PaymentLabels::default(),
		}
	}

	#[test]
	fn snapshot_mirrors_config_terms() {
		let config = sample_config();
		let snapshot = StatusSnapshot::from(&config);

		assert_eq!(snapshot.presale_state, PresalePhase::Open);
		assert_eq!(snapshot.discount_bps, 1000);
		assert_eq!(snapshot.early_claim.fee_dest_wallet, config.deposit.owner);
		assert!(snapshot.distribution.total_bps() <= 10_000);
	}
}
