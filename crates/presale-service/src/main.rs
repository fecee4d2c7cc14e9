use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use presale_config::{ConfigLoader, StaticConfigProvider};
use presale_intent::IntentService;
use presale_ledger::{LedgerQuery, RpcLedgerClient};
use presale_settlement::{ClaimQueue, SettlementMatcher};
use presale_storage::StorageService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod apis;
mod origin;
mod state;

#[derive(Parser)]
#[command(name = "presale-gateway")]
#[command(about = "Presale payment-intent gateway", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	#[arg(short, long, value_name = "FILE", default_value = "config/local.toml")]
	config: PathBuf,

	#[arg(long, env = "PRESALE_LOG_LEVEL", default_value = "info")]
	log_level: String,
}

#[derive(Subcommand)]
enum Commands {
	/// Start the gateway service
	Start,
	/// Validate the configuration file
	Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_tracing(&cli.log_level)?;

	match cli.command {
		Some(Commands::Start) | None => start_service(cli).await,
		Some(Commands::Validate) => validate_config(cli).await,
	}
}

async fn start_service(cli: Cli) -> Result<()> {
	info!("Starting presale gateway");
	info!("Loading configuration from: {:?}", cli.config);

	let config = ConfigLoader::new()
		.with_file(&cli.config)
		.load()
		.await
		.context("Failed to load configuration")?;

	info!("Configuration loaded successfully");
	info!("Service name: {}", config.service.name);
	info!("HTTP port: {}", config.service.http_port);
	info!("Presale phase: {:?}", config.sale.phase);

	let backend =
		presale_storage::create_backend(&config.storage).context("Failed to create storage")?;
	let storage = Arc::new(StorageService::new(backend));

	let ledger: Arc<dyn LedgerQuery> = Arc::new(
		RpcLedgerClient::new(&config.ledger).context("Failed to create ledger client")?,
	);

	let app_state = state::AppState {
		provider: Arc::new(StaticConfigProvider::new(config.clone())),
		ledger: ledger.clone(),
		intents: Arc::new(IntentService::new(storage.clone(), ledger.clone())),
		matcher: Arc::new(SettlementMatcher::new(storage.clone(), ledger)),
		claims: Arc::new(ClaimQueue::new(storage)),
	};

	api::serve(app_state, &config).await?;

	info!("Presale gateway stopped");
	Ok(())
}

async fn validate_config(cli: Cli) -> Result<()> {
	info!("Validating configuration file: {:?}", cli.config);

	let config = ConfigLoader::new()
		.with_file(&cli.config)
		.load()
		.await
		.context("Failed to load configuration")?;

	info!("Configuration is valid");
	info!("Service name: {}", config.service.name);
	info!("Presale phase: {:?}", config.sale.phase);
	info!("Ledger endpoints: {}", config.ledger.endpoints.len());
	info!(
		"Distribution allocated: {} bps of supply",
		config.distribution.total_bps()
	);

	Ok(())
}

fn setup_tracing(log_level: &str) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	tracing_subscriber::registry()
		.with(env_filter)
		.with(tracing_subscriber::fmt::layer())
		.init();

	Ok(())
}
