//! Client-credentials token lifecycle with a singleflight refresh guard.
//!
//! The held token is checked at the start of every call. When it is absent or expired the
//! client POSTs the credentials to [`TOKEN_PATH`] through the same rate gate as any other call,
//! stores the new token in place of the old one, and derives the bearer header from it. A
//! failing token endpoint surfaces the same [`StatusError`](crate::error::StatusError) as any
//! other call.

// crates.io
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::Token,
	client::ApiClient,
	http::{ApiHttpClient, ApiRequest, Headers, Method},
	obs::{self, CallKind, CallOutcome, CallSpan},
	query::Filters,
};

/// Path of the client-credentials token endpoint, relative to the base URL.
pub const TOKEN_PATH: &str = "/oauth/token";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Returns a valid token, exchanging the credentials for a new one when needed.
	pub async fn ensure_token(&self) -> Result<Token> {
		if let Some(current) = self.valid_token(OffsetDateTime::now_utc()) {
			return Ok(current);
		}

		let _singleflight = self.refresh_guard.lock().await;

		if let Some(current) = self.valid_token(OffsetDateTime::now_utc()) {
			return Ok(current);
		}

		const KIND: CallKind = CallKind::Token;

		let span = CallSpan::new(KIND, "ensure_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.refresh_token()).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// `Authorization: Bearer <access_token>` for the current token, refreshing it first if
	/// needed. Never cached apart from the token itself.
	pub async fn bearer_headers(&self) -> Result<Headers> {
		let token = self.ensure_token().await?;

		Ok(Headers::authorization(token.bearer()))
	}

	/// Snapshot of the held token, expired or not.
	pub fn current_token(&self) -> Option<Token> {
		self.token.read().clone()
	}

	/// Drops the held token so the next call performs a fresh exchange.
	pub fn invalidate_token(&self) {
		*self.token.write() = None;
	}

	fn valid_token(&self, now: OffsetDateTime) -> Option<Token> {
		self.token.read().as_ref().filter(|token| !token.is_expired_at(now)).cloned()
	}

	async fn refresh_token(&self) -> Result<Token> {
		let form = form_urlencoded::Serializer::new(String::new())
			.append_pair("grant_type", "client_credentials")
			.append_pair("client_id", &self.config.client_id)
			.append_pair("client_secret", self.config.client_secret.expose())
			.finish();
		// No bearer header here; the exchange is what produces it.
		let headers = Headers::new().with(Headers::CONTENT_TYPE, FORM_CONTENT_TYPE);
		let url = self.build_url(TOKEN_PATH, &Filters::new());
		let request = ApiRequest::new(Method::Post, url, headers).with_body(form);
		let response = self.send(request).await?;
		let token: Token = response.json()?;

		*self.token.write() = Some(token.clone());

		obs::trace_token_refresh(token.expires_at());

		Ok(token)
	}
}
