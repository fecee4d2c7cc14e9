//! Configuration loading for the presale gateway.
//!
//! Reads a TOML file, substitutes `${ENV_VAR}` placeholders, applies a small
//! set of environment overrides, and validates the result before anything
//! else starts. Handlers never read the environment themselves; they receive
//! an immutable snapshot through [`provider::ConfigProvider`].

use std::env;
use std::path::Path;
use thiserror::Error;

use presale_types::PresaleConfig;

pub mod provider;

pub use provider::{ConfigProvider, StaticConfigProvider};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Configuration loader with environment variable substitution.
#[derive(Default)]
pub struct ConfigLoader {
	file_path: Option<String>,
	env_prefix: String,
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "PRESALE_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_string_lossy().to_string());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	pub async fn load(&self) -> Result<PresaleConfig, ConfigError> {
		let mut config = if let Some(file_path) = &self.file_path {
			self.load_from_file(file_path).await?
		} else {
			return Err(ConfigError::FileNotFound(
				"No configuration file specified".to_string(),
			));
		};

		self.apply_env_overrides(&mut config)?;

		validate_config(&config)?;

		Ok(config)
	}

	async fn load_from_file(&self, file_path: &str) -> Result<PresaleConfig, ConfigError> {
		let content = tokio::fs::read_to_string(file_path).await?;

		let substituted_content = self.substitute_env_vars(&content)?;

		let config: PresaleConfig = toml::from_str(&substituted_content)
			.map_err(|e| ConfigError::ParseError(e.to_string()))?;

		Ok(config)
	}

	fn substitute_env_vars(&self, content: &str) -> Result<String, ConfigError> {
		let mut result = content.to_string();

		// Find and replace ${VAR_NAME} patterns
		let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

		for cap in re.captures_iter(content) {
			let full_match = &cap[0];
			let var_name = &cap[1];

			let env_value = env::var(var_name)
				.map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

			result = result.replace(full_match, &env_value);
		}

		Ok(result)
	}

	fn apply_env_overrides(&self, config: &mut PresaleConfig) -> Result<(), ConfigError> {
		if let Ok(log_level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) {
			config.service.log_level = log_level;
		}

		if let Ok(http_port) = env::var(format!("{}HTTP_PORT", self.env_prefix)) {
			config.service.http_port = http_port
				.parse()
				.map_err(|e| ConfigError::ValidationError(format!("Invalid HTTP port: {}", e)))?;
		}

		Ok(())
	}
}

/// Checks the invariants that would otherwise surface as confusing runtime
/// failures: missing RPC endpoints, inverted caps, overcommitted supply.
pub fn validate_config(config: &PresaleConfig) -> Result<(), ConfigError> {
	if config.ledger.endpoints.is_empty() {
		return Err(ConfigError::ValidationError(
			"At least one ledger RPC endpoint must be configured".to_string(),
		));
	}

	if config.deposit.vault_ata.is_empty() || config.deposit.owner.is_empty() {
		return Err(ConfigError::ValidationError(
			"Deposit vault and owner addresses must be configured".to_string(),
		));
	}

	if config.sale.discount_bps > 10_000 {
		return Err(ConfigError::ValidationError(format!(
			"discount_bps {} exceeds 10000",
			config.sale.discount_bps
		)));
	}

	if let (Some(min), Some(max)) = (
		config.sale.min_contribution_usdc,
		config.sale.max_contribution_usdc,
	) {
		if min > max {
			return Err(ConfigError::ValidationError(format!(
				"min contribution {} exceeds max {}",
				min, max
			)));
		}
	}

	let total_bps = config.distribution.total_bps();
	if total_bps > 10_000 {
		return Err(ConfigError::ValidationError(format!(
			"distribution schedule allocates {} bps, more than the whole supply",
			total_bps
		)));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	const MINIMAL: &str = r#"
[sale]
phase = "open"
base_price_usdc = "0.0005"
discount_bps = 1000

[assets]
stablecoin_mint = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"
token_mint = "So11111111111111111111111111111111111111112"

[deposit]
vault_ata = "VaultAtaAddress11111111111111111111111111111"
owner = "OwnerAddress11111111111111111111111111111111"

[ledger]
endpoints = ["https://api.mainnet-beta.solana.com"]
"#;

	fn write_config(content: &str) -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(content.as_bytes()).unwrap();
		file
	}

	#[tokio::test]
	async fn loads_minimal_config_with_defaults() {
		let file = write_config(MINIMAL);
		let config = ConfigLoader::new()
			.with_file(file.path())
			.load()
			.await
			.unwrap();

		assert_eq!(config.service.http_port, 8080);
		assert_eq!(config.sale.discount_bps, 1000);
		assert_eq!(config.distribution.total_bps(), 10_000);
		assert!(!config.early_claim.enabled);
	}

	#[tokio::test]
	async fn substitutes_environment_variables() {
		env::set_var("TEST_PRESALE_VAULT", "SubstitutedVault1111111111111111111111111111");
		let content = MINIMAL.replace(
			"VaultAtaAddress11111111111111111111111111111",
			"${TEST_PRESALE_VAULT}",
		);
		let file = write_config(&content);

		let config = ConfigLoader::new()
			.with_file(file.path())
			.load()
			.await
			.unwrap();

		assert_eq!(
			config.deposit.vault_ata,
			"SubstitutedVault1111111111111111111111111111"
		);
	}

	#[tokio::test]
	async fn missing_env_var_is_an_error() {
		let content = MINIMAL.replace(
			"VaultAtaAddress11111111111111111111111111111",
			"${TEST_PRESALE_DOES_NOT_EXIST}",
		);
		let file = write_config(&content);

		let err = ConfigLoader::new()
			.with_file(file.path())
			.load()
			.await
			.unwrap_err();
		assert!(matches!(err, ConfigError::EnvVarNotFound(_)));
	}

	#[tokio::test]
	async fn rejects_overcommitted_distribution() {
		let content = format!("{}\n[distribution]\npresale_bps = 9000\n", MINIMAL);
		let file = write_config(&content);

		let err = ConfigLoader::new()
			.with_file(file.path())
			.load()
			.await
			.unwrap_err();
		assert!(matches!(err, ConfigError::ValidationError(_)));
	}

	#[tokio::test]
	async fn rejects_inverted_caps() {
		let content = MINIMAL.replace(
			"discount_bps = 1000",
			"discount_bps = 1000\nmin_contribution_usdc = \"100\"\nmax_contribution_usdc = \"10\"",
		);
		let file = write_config(&content);

		let err = ConfigLoader::new()
			.with_file(file.path())
			.load()
			.await
			.unwrap_err();
		assert!(matches!(err, ConfigError::ValidationError(_)));
	}
}
