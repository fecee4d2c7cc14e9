//! Per-request configuration snapshots.
//!
//! Handlers source their terms once per request through [`ConfigProvider`]
//! and work from that snapshot for the rest of the request, so a mid-flight
//! swap never produces a half-updated view.

use arc_swap::ArcSwap;
use presale_types::PresaleConfig;
use std::sync::Arc;

/// Source of the current configuration snapshot.
pub trait ConfigProvider: Send + Sync {
	/// Returns the snapshot to use for the current request.
	fn current(&self) -> Arc<PresaleConfig>;
}

/// Provider backed by an atomically swappable snapshot.
///
/// Loaded once at startup; `replace` lets an operator-facing reloader install
/// a new snapshot without restarting.
pub struct StaticConfigProvider {
	inner: ArcSwap<PresaleConfig>,
}

impl StaticConfigProvider {
	pub fn new(config: PresaleConfig) -> Self {
		Self {
			inner: ArcSwap::from_pointee(config),
		}
	}

	/// Installs a new snapshot. In-flight requests keep the one they started
	/// with.
	pub fn replace(&self, config: PresaleConfig) {
		self.inner.store(Arc::new(config));
	}
}

impl ConfigProvider for StaticConfigProvider {
	fn current(&self) -> Arc<PresaleConfig> {
		self.inner.load_full()
	}
}
