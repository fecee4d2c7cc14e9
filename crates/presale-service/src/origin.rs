//! Origin allow-list for CORS.
//!
//! Patterns are comma separated. `*` allows every origin; a pattern may use
//! `*` once in the host position (`https://*.example.pages.dev`) to admit
//! subdomains. Globs translate to anchored regexes over the whole origin, so
//! the scheme always has to match.

use regex::Regex;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub struct AllowedOrigins {
	allow_all: bool,
	patterns: Vec<Regex>,
}

impl AllowedOrigins {
	pub fn parse(list: &str) -> Self {
		let mut allow_all = false;
		let mut patterns = Vec::new();

		for raw in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
			if raw == "*" {
				allow_all = true;
				continue;
			}
			if let Some(re) = glob_to_regex(raw) {
				patterns.push(re);
			}
		}

		// Nothing configured behaves like nothing allowed rather than
		// everything allowed; the permissive default lives in the config
		// layer, not here.
		Self {
			allow_all,
			patterns,
		}
	}

	pub fn allows_any(&self) -> bool {
		self.allow_all
	}

	pub fn matches(&self, origin: &str) -> bool {
		if self.allow_all {
			return true;
		}
		let origin = origin.to_ascii_lowercase();
		self.patterns.iter().any(|re| re.is_match(&origin))
	}
}

/// Translates one origin glob into an anchored regex.
fn glob_to_regex(pattern: &str) -> Option<Regex> {
	let escaped = regex::escape(&pattern.to_ascii_lowercase());
	// regex::escape turns `*` into `\*`
	let body = escaped.replace(r"\*", "[a-z0-9.-]+");
	Regex::new(&format!("^{}$", body)).ok()
}

/// Builds the CORS layer from the configured pattern list.
pub fn cors_layer(list: &str) -> CorsLayer {
	let origins = AllowedOrigins::parse(list);
	let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

	if origins.allows_any() {
		layer.allow_origin(Any)
	} else {
		layer.allow_origin(AllowOrigin::predicate(move |origin, _| {
			origin
				.to_str()
				.map(|o| origins.matches(o))
				.unwrap_or(false)
		}))
	}
}
