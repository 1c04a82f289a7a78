//! Client-level error types shared across token refresh, request execution, and pagination.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Every variant is terminal for the call that produced it; the client never retries.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Upstream answered with a status other than 200.
	#[error(transparent)]
	Status(#[from] StatusError),

	/// Response body could not be decoded into the requested shape.
	#[error("Response body with status {status} could not be decoded.")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the offending response.
		status: u16,
	},
}
impl Error {
	/// Returns the HTTP status code when the error came from an upstream response.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status(e) => Some(e.status),
			Self::Decode { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},

	/// A required configuration field was not supplied or is blank.
	#[error("Client configuration is missing `{field}`.")]
	MissingField {
		/// Name of the missing field.
		field: &'static str,
	},
	/// Base URL uses a scheme other than http(s).
	#[error("Base URL must use http or https, got `{scheme}`.")]
	UnsupportedScheme {
		/// Scheme that failed validation.
		scheme: String,
	},
	/// Page size must be at least one item.
	#[error("Page size must be greater than zero.")]
	ZeroPageSize,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Classification of a non-200 upstream status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusKind {
	/// 400.
	BadRequest,
	/// 401.
	Unauthorized,
	/// 403.
	Forbidden,
	/// 404.
	NotFound,
	/// 422.
	UnprocessableEntity,
	/// 429; the provider uses it for throttling as well as for rejected credentials.
	TooManyRequests,
	/// 500.
	ServerError,
	/// Any other status, including non-200 success codes.
	Unexpected,
}
impl StatusKind {
	/// Classifies a status code. Only 200 counts as success, so callers must not pass it here.
	pub const fn from_status(status: u16) -> Self {
		match status {
			400 => Self::BadRequest,
			401 => Self::Unauthorized,
			403 => Self::Forbidden,
			404 => Self::NotFound,
			422 => Self::UnprocessableEntity,
			429 => Self::TooManyRequests,
			500 => Self::ServerError,
			_ => Self::Unexpected,
		}
	}

	/// Human-readable description for the documented kinds.
	pub const fn message(self) -> Option<&'static str> {
		match self {
			Self::BadRequest => Some(
				"Malformed request: the server does not understand something in the request",
			),
			Self::Unauthorized =>
				Some("Insufficient permissions: you don't have the right to access this resource"),
			Self::Forbidden => Some("Forbidden: access to this resource is refused"),
			Self::NotFound => Some("Resource not found"),
			Self::UnprocessableEntity =>
				Some("Unprocessable entity: the request was well-formed but semantically invalid"),
			Self::TooManyRequests =>
				Some("Rate limited or invalid credentials: are the credentials valid?"),
			Self::ServerError => Some("Upstream server error"),
			Self::Unexpected => None,
		}
	}
}

/// Non-200 response surfaced to callers, carrying the numeric status as data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusError {
	/// HTTP status code returned by the API.
	pub status: u16,
	/// Classification of [`status`](Self::status).
	pub kind: StatusKind,
}
impl StatusError {
	/// Builds the error for a non-200 status.
	pub const fn new(status: u16) -> Self {
		Self { status, kind: StatusKind::from_status(status) }
	}

	/// Returns `true` for 4xx statuses.
	pub const fn is_client_error(&self) -> bool {
		matches!(self.status, 400..=499)
	}

	/// Returns `true` for 5xx statuses.
	pub const fn is_server_error(&self) -> bool {
		matches!(self.status, 500..=599)
	}
}
impl Display for StatusError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self.kind.message() {
			Some(message) => write!(f, "{message} (status {}).", self.status),
			None => write!(f, "Unexpected status `{}`.", self.status),
		}
	}
}
impl StdError for StatusError {}
