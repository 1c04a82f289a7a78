//! Bearer token issued by the client-credentials exchange, plus lifetime helpers.

// self
use crate::{_prelude::*, auth::Secret};

/// OAuth 2.0 bearer credential as returned by the token endpoint.
///
/// Validity is computed in whole seconds: a token is valid while `created_at + expires_in > now`.
/// Tokens are never mutated; a refresh replaces the held value wholesale.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
	/// Access token secret; callers must avoid logging it.
	pub access_token: Secret,
	/// Creation instant, in seconds since the Unix epoch.
	pub created_at: i64,
	/// Time-to-live in seconds, counted from [`created_at`](Self::created_at).
	pub expires_in: i64,
}
impl Token {
	/// Creates a token from its raw parts.
	pub fn new(access_token: impl Into<Secret>, created_at: i64, expires_in: i64) -> Self {
		Self { access_token: access_token.into(), created_at, expires_in }
	}

	/// Unix timestamp (seconds) at which the token stops being valid.
	pub fn expires_at(&self) -> i64 {
		self.created_at.saturating_add(self.expires_in)
	}

	/// Returns `true` once `created_at + expires_in <= now`.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at() <= now.unix_timestamp()
	}

	/// Checks expiry against the current UTC clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Value for the `Authorization` header.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.access_token.expose())
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Token")
			.field("access_token", &"<redacted>")
			.field("created_at", &self.created_at)
			.field("expires_in", &self.expires_in)
			.finish()
	}
}

/// Absent tokens always count as expired.
pub fn is_expired_at(token: Option<&Token>, now: OffsetDateTime) -> bool {
	token.is_none_or(|token| token.is_expired_at(now))
}
