//! Shared request-handler state.

use presale_config::ConfigProvider;
use presale_intent::IntentService;
use presale_ledger::LedgerQuery;
use presale_settlement::{ClaimQueue, SettlementMatcher};
use std::sync::Arc;

/// Handles are cheap clones; axum clones this per request.
#[derive(Clone)]
pub struct AppState {
	pub provider: Arc<dyn ConfigProvider>,
	pub ledger: Arc<dyn LedgerQuery>,
	pub intents: Arc<IntentService>,
	pub matcher: Arc<SettlementMatcher>,
	pub claims: Arc<ClaimQueue>,
}
