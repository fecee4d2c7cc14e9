//! Configuration sections for the presale gateway.
//!
//! Loaded once from TOML by `presale-config` and handed to request handlers
//! as an immutable snapshot. Nothing here is a process-wide mutable global.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Lifecycle phase of the sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PresalePhase {
	#[default]
	Pre,
	Open,
	Closed,
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresaleConfig {
	#[serde(default)]
	pub service: ServiceConfig,
	#[serde(default)]
	pub sale: SaleTerms,
	pub assets: AssetConfig,
	pub deposit: DepositConfig,
	#[serde(default)]
	pub early_claim: EarlyClaimConfig,
	pub ledger: LedgerConfig,
	#[serde(default)]
	pub storage: StorageConfig,
	#[serde(default)]
	pub distribution: DistributionSchedule,
	#[serde(default)]
	pub payment: PaymentLabels,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
	#[serde(default = "default_service_name")]
	pub name: String,
	#[serde(default = "default_http_port")]
	pub http_port: u16,
	#[serde(default = "default_log_level")]
	pub log_level: String,
	/// Comma-separated origin patterns for CORS. `*` allows everything;
	/// `https://*.host` admits subdomains of `host`.
	#[serde(default = "default_allowed_origins")]
	pub allowed_origins: String,
}

impl Default for ServiceConfig {
	fn default() -> Self {
		Self {
			name: default_service_name(),
			http_port: default_http_port(),
			log_level: default_log_level(),
			allowed_origins: default_allowed_origins(),
		}
	}
}

/// Commercial terms of the current sale phase.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SaleTerms {
	#[serde(default)]
	pub phase: PresalePhase,
	/// Presale unit price in stablecoin. Absent means intents cannot be
	/// issued yet; the status endpoint still works.
	pub base_price_usdc: Option<Decimal>,
	/// Post-sale listing price, display only.
	pub public_price_usdc: Option<Decimal>,
	#[serde(default)]
	pub discount_bps: u32,
	pub min_contribution_usdc: Option<Decimal>,
	pub max_contribution_usdc: Option<Decimal>,
	/// Token generation event, unix seconds.
	pub tge_ts: Option<i64>,
	#[serde(default = "default_airdrop_bonus_bps")]
	pub airdrop_bonus_bps: u32,
}

/// On-chain asset identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
	/// Mint of the stablecoin contributions are paid in.
	pub stablecoin_mint: String,
	/// Mint of the token being sold.
	pub token_mint: String,
	/// Collectible whose holders get the discounted price.
	pub gate_collectible_mint: Option<String>,
}

/// Where contributions land and which history gets scanned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositConfig {
	/// Stablecoin token account whose transaction history is scanned for
	/// settlement matching.
	pub vault_ata: String,
	/// Wallet that owns the vault. Used as the payment-request recipient.
	pub owner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlyClaimConfig {
	#[serde(default)]
	pub enabled: bool,
	#[serde(default = "default_flat_fee")]
	pub flat_fee_usdc: Decimal,
}

impl Default for EarlyClaimConfig {
	fn default() -> Self {
		Self {
			enabled: false,
			flat_fee_usdc: default_flat_fee(),
		}
	}
}

/// Ledger RPC access. Endpoints are tried in order on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
	pub endpoints: Vec<String>,
	#[serde(default = "default_request_timeout_ms")]
	pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
	#[default]
	Memory,
	File,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
	#[serde(default)]
	pub backend: StorageBackendKind,
	/// Base directory for the file backend.
	pub path: Option<PathBuf>,
}

/// Labels embedded in payment-request URIs. Wallet apps show these to the
/// buyer next to the amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentLabels {
	#[serde(default = "default_label")]
	pub label: String,
	#[serde(default = "default_message")]
	pub message: String,
	#[serde(default = "default_early_label")]
	pub early_label: String,
	#[serde(default = "default_early_message")]
	pub early_message: String,
	#[serde(default = "default_qr_endpoint")]
	pub qr_endpoint: String,
}

impl Default for PaymentLabels {
	fn default() -> Self {
		Self {
			label: default_label(),
			message: default_message(),
			early_label: default_early_label(),
			early_message: default_early_message(),
			qr_endpoint: default_qr_endpoint(),
		}
	}
}

/// Fixed supply split across the eight distribution buckets, in basis points
/// of total supply. The shares must sum to at most 10000.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionSchedule {
	#[serde(default = "default_supply_total")]
	pub supply_total: u64,
	#[serde(default = "default_presale_bps")]
	pub presale_bps: u16,
	#[serde(default = "default_dex_liquidity_bps")]
	pub dex_liquidity_bps: u16,
	#[serde(default = "default_staking_bps")]
	pub staking_bps: u16,
	#[serde(default = "default_ecosystem_bps")]
	pub ecosystem_bps: u16,
	#[serde(default = "default_treasury_bps")]
	pub treasury_bps: u16,
	#[serde(default = "default_team_bps")]
	pub team_bps: u16,
	#[serde(default = "default_airdrop_nft_bps")]
	pub airdrop_nft_bps: u16,
	#[serde(default = "default_buyback_reserve_bps")]
	pub buyback_reserve_bps: u16,
}

impl DistributionSchedule {
	pub fn total_bps(&self) -> u32 {
		u32::from(self.presale_bps)
			+ u32::from(self.dex_liquidity_bps)
			+ u32::from(self.staking_bps)
			+ u32::from(self.ecosystem_bps)
			+ u32::from(self.treasury_bps)
			+ u32::from(self.team_bps)
			+ u32::from(self.airdrop_nft_bps)
			+ u32::from(self.buyback_reserve_bps)
	}
}

impl Default for DistributionSchedule {
	fn default() -> Self {
		Self {
			supply_total: default_supply_total(),
			presale_bps: default_presale_bps(),
			dex_liquidity_bps: default_dex_liquidity_bps(),
			staking_bps: default_staking_bps(),
			ecosystem_bps: default_ecosystem_bps(),
			treasury_bps: default_treasury_bps(),
			team_bps: default_team_bps(),
			airdrop_nft_bps: default_airdrop_nft_bps(),
			buyback_reserve_bps: default_buyback_reserve_bps(),
		}
	}
}

fn default_service_name() -> String {
	"presale-gateway".to_string()
}

fn default_http_port() -> u16 {
	8080
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_allowed_origins() -> String {
	"*".to_string()
}

fn default_airdrop_bonus_bps() -> u32 {
	600
}

fn default_flat_fee() -> Decimal {
	Decimal::ONE
}

fn default_request_timeout_ms() -> u64 {
	10_000
}

fn default_label() -> String {
	"Token Presale".to_string()
}

fn default_message() -> String {
	"Presale Deposit".to_string()
}

fn default_early_label() -> String {
	"Early Claim".to_string()
}

fn default_early_message() -> String {
	"Early Claim Fee".to_string()
}

fn default_qr_endpoint() -> String {
	"https://api.qrserver.com/v1/create-qr-code/".to_string()
}

fn default_supply_total() -> u64 {
	3_141_592_653
}

fn default_presale_bps() -> u16 {
	1000
}

fn default_dex_liquidity_bps() -> u16 {
	2000
}

fn default_staking_bps() -> u16 {
	700
}

fn default_ecosystem_bps() -> u16 {
	2000
}

fn default_treasury_bps() -> u16 {
	1500
}

fn default_team_bps() -> u16 {
	1000
}

fn default_airdrop_nft_bps() -> u16 {
	1000
}

fn default_buyback_reserve_bps() -> u16 {
	800
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_distribution_fills_whole_supply() {
		let schedule = DistributionSchedule::default();
		assert_eq!(schedule.total_bps(), 10_000);
	}

	#[test]
	fn phase_parses_lowercase() {
		let phase: PresalePhase = serde_json::from_str("\"closed\"").unwrap();
		assert_eq!(phase, PresalePhase::Closed);
	}
}
