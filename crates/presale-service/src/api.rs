//! HTTP server and routing.

use crate::{apis, origin, state::AppState};
use axum::{
	http::StatusCode,
	routing::{get, post},
	Router,
};
use presale_types::PresaleConfig;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builds the API router.
pub fn router(state: AppState, allowed_origins: &str) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/token/status", get(apis::status::get_status))
		.route("/api/token/wallet/balances", get(apis::balances::wallet_balances))
		.route("/api/token/presale/intent", post(apis::intent::create_intent))
		.route("/api/token/presale/check", get(apis::check::check_settlement))
		.route("/api/token/claim/status", get(apis::claim::claim_status))
		.route("/api/token/claim/early-intent", post(apis::claim::early_intent))
		.route("/api/token/claim/confirm", post(apis::claim::confirm))
		.with_state(state)
		.layer(TraceLayer::new_for_http())
		.layer(origin::cors_layer(allowed_origins))
}

/// Serves the API until a shutdown signal arrives.
pub async fn serve(state: AppState, config: &PresaleConfig) -> anyhow::Result<()> {
	let app = router(state, &config.service.allowed_origins);

	let listener =
		tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.service.http_port)).await?;

	info!("API server listening on port {}", config.service.http_port);

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	Ok(())
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn shutdown_signal() {
	let ctrl_c = async {
		signal::ctrl_c()
			.await
			.expect("failed to install Ctrl+C handler");
	};

	#[cfg(unix)]
	let terminate = async {
		signal::unix::signal(signal::unix::SignalKind::terminate())
			.expect("failed to install signal handler")
			.recv()
			.await;
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	info!("Shutdown signal received, stopping server");
}
