//! Client configuration: credentials, base URL, and pacing/pagination defaults.

// self
use crate::{_prelude::*, auth::Secret, client::PageOrder, error::ConfigError, gate::RateGate};

/// Immutable client configuration validated at construction.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: Secret,
	/// API base URL, normalized without a trailing slash.
	pub base_url: String,
	/// Minimum spacing between the starts of two outbound calls.
	pub min_interval: StdDuration,
	/// Default page size for collection reads.
	pub page_size: u32,
	/// Default concatenation order for accumulated pages.
	pub page_order: PageOrder,
}
impl ClientConfig {
	/// Page size used when the caller does not pick one.
	pub const DEFAULT_PAGE_SIZE: u32 = 100;

	/// Returns a builder with every required field unset.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
	client_id: Option<String>,
	client_secret: Option<Secret>,
	base_url: Option<String>,
	min_interval: Option<StdDuration>,
	page_size: Option<u32>,
	page_order: Option<PageOrder>,
}
impl ClientConfigBuilder {
	/// Sets the client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, client_secret: impl Into<Secret>) -> Self {
		self.client_secret = Some(client_secret.into());

		self
	}

	/// Sets the API base URL, e.g. `https://api.intra.42.fr`.
	pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());

		self
	}

	/// Overrides the minimum inter-call spacing (defaults to 550 ms).
	pub fn min_interval(mut self, interval: StdDuration) -> Self {
		self.min_interval = Some(interval);

		self
	}

	/// Overrides the default page size (defaults to 100).
	pub fn page_size(mut self, page_size: u32) -> Self {
		self.page_size = Some(page_size);

		self
	}

	/// Overrides the default page concatenation order.
	pub fn page_order(mut self, order: PageOrder) -> Self {
		self.page_order = Some(order);

		self
	}

	/// Validates the collected fields and produces a [`ClientConfig`].
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let client_id = self
			.client_id
			.filter(|id| !id.trim().is_empty())
			.ok_or(ConfigError::MissingField { field: "client_id" })?;
		let client_secret = self
			.client_secret
			.filter(|secret| !secret.is_blank())
			.ok_or(ConfigError::MissingField { field: "client_secret" })?;
		let raw_base_url = self
			.base_url
			.filter(|url| !url.trim().is_empty())
			.ok_or(ConfigError::MissingField { field: "base_url" })?;
		let base_url = normalize_base_url(raw_base_url.trim())?;
		let page_size = self.page_size.unwrap_or(ClientConfig::DEFAULT_PAGE_SIZE);

		if page_size == 0 {
			return Err(ConfigError::ZeroPageSize);
		}

		Ok(ClientConfig {
			client_id,
			client_secret,
			base_url,
			min_interval: self.min_interval.unwrap_or(RateGate::DEFAULT_MIN_INTERVAL),
			page_size,
			page_order: self.page_order.unwrap_or_default(),
		})
	}
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
	let url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

	match url.scheme() {
		"http" | "https" => Ok(url.as_str().trim_end_matches('/').to_owned()),
		other => Err(ConfigError::UnsupportedScheme { scheme: other.to_owned() }),
	}
}
