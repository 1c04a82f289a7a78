//! Rate-gated API client for OAuth 2.0 client-credentials services: transparent token refresh,
//! minimum inter-call spacing, cursor pagination, and typed status errors in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod gate;
pub mod http;
pub mod obs;
pub mod query;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{client::ReqwestApiClient, config::ClientConfig};

	/// Client identifier used by test fixtures.
	pub const TEST_CLIENT_ID: &str = "test-client";
	/// Client secret used by test fixtures.
	pub const TEST_CLIENT_SECRET: &str = "test-secret";

	/// Builds a [`ClientConfig`] pointing at `base_url` with the test credentials and no
	/// inter-call spacing.
	pub fn test_config(base_url: &str) -> ClientConfig {
		ClientConfig::builder()
			.client_id(TEST_CLIENT_ID)
			.client_secret(TEST_CLIENT_SECRET)
			.base_url(base_url)
			.min_interval(StdDuration::ZERO)
			.build()
			.expect("Test client configuration should be valid.")
	}

	/// Constructs a reqwest-backed client for `base_url` (typically an `httpmock` server URL).
	pub fn build_test_client(base_url: &str) -> ReqwestApiClient {
		ReqwestApiClient::new(test_config(base_url))
	}

	/// Token endpoint body that stays valid for two hours from now.
	pub fn fresh_token_body(access_token: &str) -> String {
		token_body(access_token, OffsetDateTime::now_utc().unix_timestamp(), 7_200)
	}

	/// Token endpoint body with explicit timing fields.
	pub fn token_body(access_token: &str, created_at: i64, expires_in: i64) -> String {
		serde_json::json!({
			"access_token": access_token,
			"token_type": "bearer",
			"created_at": created_at,
			"expires_in": expires_in,
		})
		.to_string()
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
