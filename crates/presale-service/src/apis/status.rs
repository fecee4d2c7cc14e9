//! Status endpoint.

use crate::state::AppState;
use axum::{extract::State, Json};
use presale_types::StatusSnapshot;

/// Current phase, prices, caps, deposit address, and the distribution
/// schedule, assembled from the per-request configuration snapshot.
pub async fn get_status(State(state): State<AppState>) -> Json<StatusSnapshot> {
	let config = state.provider.current();
	Json(StatusSnapshot::from(config.as_ref()))
}
