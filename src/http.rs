//! Transport primitives for outbound API calls.
//!
//! [`ApiHttpClient`] is the client's only dependency on an HTTP stack. The default
//! [`ReqwestHttpClient`] sits behind the `reqwest` feature; tests and embedders can plug in any
//! other transport that turns an [`ApiRequest`] into a [`RawResponse`].

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports able to run a single request.
///
/// Implementations must not interpret the status code; the client maps non-200 statuses to
/// typed errors itself. Timeouts, TLS, and connection reuse are the transport's concern.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Executes `request` and returns the raw response, whatever its status.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// HTTP methods used by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
}
impl Method {
	/// Returns the canonical method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Ordered request or response headers.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);
impl Headers {
	/// Header name carrying the bearer credential.
	pub const AUTHORIZATION: &'static str = "Authorization";
	/// Header name describing the body encoding.
	pub const CONTENT_TYPE: &'static str = "Content-Type";

	/// Creates an empty header set.
	pub fn new() -> Self {
		Self::default()
	}

	/// `Authorization: <value>` only.
	pub fn authorization(value: impl Into<String>) -> Self {
		Self::new().with(Self::AUTHORIZATION, value)
	}

	/// Appends a header, builder style.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(name, value);

		self
	}

	/// Appends a header.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.0.push((name.into(), value.into()));
	}

	/// Case-insensitive lookup of the first value for `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Returns `true` when no headers are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates `(name, value)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}
}
impl Debug for Headers {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut map = f.debug_map();

		for (key, value) in self.iter() {
			if key.eq_ignore_ascii_case(Self::AUTHORIZATION) {
				map.entry(&key, &"<redacted>");
			} else {
				map.entry(&key, &value);
			}
		}

		map.finish()
	}
}
impl FromIterator<(String, String)> for Headers {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (String, String)>,
	{
		Self(iter.into_iter().collect())
	}
}

/// Fully resolved outbound request.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL including the query string.
	pub url: String,
	/// Request headers.
	pub headers: Headers,
	/// Optional request body.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Creates a body-less request.
	pub fn new(method: Method, url: impl Into<String>, headers: Headers) -> Self {
		Self { method, url: url.into(), headers, body: None }
	}

	/// Attaches a body.
	pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = Some(body.into());

		self
	}
}

/// Unparsed response as returned by the transport.
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response headers.
	pub headers: Headers,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Creates a response with no headers.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers: Headers::new(), body: body.into() }
	}

	/// Returns `true` for 200, the only status the client treats as success.
	pub fn is_success(&self) -> bool {
		self.status == 200
	}

	/// Decodes the body as JSON into `T`, reporting the failing path on error.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut de = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| Error::Decode { source, status: self.status })
	}

	/// Body decoded as UTF-8, with invalid sequences replaced.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
			};
			let mut builder = client.request(method, &request.url);

			for (name, value) in request.headers.iter() {
				builder = builder.header(name, value);
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let headers = response
				.headers()
				.iter()
				.filter_map(|(name, value)| {
					value.to_str().ok().map(|value| (name.as_str().to_owned(), value.to_owned()))
				})
				.collect();
			let body = response.bytes().await?.to_vec();

			Ok(RawResponse { status, headers, body })
		})
	}
}
