//! API client: token lifecycle, rate-gated request execution, and paginated reads.

pub mod pagination;

mod token;

pub use pagination::*;
pub use token::*;

// self
use crate::{
	_prelude::*,
	auth::Token,
	config::ClientConfig,
	error::{ConfigError, StatusError},
	gate::RateGate,
	http::{ApiHttpClient, ApiRequest, Headers, Method, RawResponse},
	obs::{self, CallKind, CallOutcome, CallSpan},
	query::{self, Filter, Filters},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestHttpClient>;

/// Per-call options for [`ApiClient::get_with`].
///
/// Unset fields fall back to the client's [`ClientConfig`].
#[derive(Clone, Debug)]
pub struct GetOptions {
	/// Items requested per page.
	pub page_size: Option<u32>,
	/// Walks every page when `true`; issues a single request otherwise.
	pub multi_request: bool,
	/// Concatenation order for accumulated pages.
	pub page_order: Option<PageOrder>,
}
impl GetOptions {
	/// Overrides the page size.
	pub fn page_size(mut self, page_size: u32) -> Self {
		self.page_size = Some(page_size);

		self
	}

	/// Disables the accumulation loop; the first page is returned as-is.
	pub fn single_request(mut self) -> Self {
		self.multi_request = false;

		self
	}

	/// Overrides the page concatenation order.
	pub fn page_order(mut self, order: PageOrder) -> Self {
		self.page_order = Some(order);

		self
	}
}
impl Default for GetOptions {
	fn default() -> Self {
		Self { page_size: None, multi_request: true, page_order: None }
	}
}

/// Client for a single OAuth 2.0 client-credentials API.
///
/// The client owns its token and rate gate. Every outbound call, token exchanges and each page
/// of a paginated read included, passes through the gate first. Non-200 responses surface as
/// [`StatusError`]; nothing is retried.
pub struct ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP transport used for every outbound request.
	pub http_client: Arc<C>,
	config: ClientConfig,
	gate: RateGate,
	token: RwLock<Option<Token>>,
	refresh_guard: AsyncMutex<()>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			http_client: http_client.into(),
			gate: RateGate::new(config.min_interval),
			config,
			token: RwLock::new(None),
			refresh_guard: AsyncMutex::new(()),
		}
	}

	/// Configuration the client was built with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Rate gate shared by every outbound call.
	pub fn gate(&self) -> &RateGate {
		&self.gate
	}

	/// `base_url + path`, followed by the query string when `filters` is non-empty.
	pub fn build_url(&self, path: &str, filters: &Filters) -> String {
		query::build_url(&self.config.base_url, path, filters)
	}

	/// Runs `request` through the transport without touching the rate gate.
	///
	/// Fails with [`StatusError`] unless the response status is exactly 200.
	pub async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
		let response = self.http_client.execute(request).await?;

		if response.is_success() {
			Ok(response)
		} else {
			Err(StatusError::new(response.status).into())
		}
	}

	/// Reads `path`, walking every page with default options.
	pub async fn get(&self, path: &str, filters: impl Into<Filters>) -> Result<Value> {
		self.get_with(path, filters, GetOptions::default()).await
	}

	/// Reads `path` and deserializes the (possibly accumulated) result into `T`.
	pub async fn get_json<T>(&self, path: &str, filters: impl Into<Filters>) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let value = self.get(path, filters).await?;

		serde_path_to_error::deserialize(value)
			.map_err(|source| Error::Decode { source, status: 200 })
	}

	/// Reads `path` with explicit pagination options.
	///
	/// A `page[size]` filter is appended unless the caller already supplied one. When
	/// `multi_request` is off or the filters pin a `page[number]`, exactly one request is made and
	/// its body returned. Otherwise pages 1, 2, ... are fetched until one holds fewer items than
	/// the configured (or [`GetOptions::page_size`]) page size, even when a caller-supplied
	/// `page[size]` filter asks the server for a different count. A non-array body short-circuits
	/// and is returned unchanged.
	pub async fn get_with(
		&self,
		path: &str,
		filters: impl Into<Filters>,
		options: GetOptions,
	) -> Result<Value> {
		const KIND: CallKind = CallKind::Get;

		let span = CallSpan::new(KIND, "get");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let filters = filters.into();
		let result = span.instrument(self.read(path, filters, options)).await;

		record_result(KIND, &result);

		result
	}

	/// Issues a single POST.
	///
	/// Without explicit `headers` the bearer header is used, refreshing the token first if
	/// needed. The response is returned unparsed.
	pub async fn post(
		&self,
		path: &str,
		filters: impl Into<Filters>,
		body: impl Into<Vec<u8>>,
		headers: Option<Headers>,
	) -> Result<RawResponse> {
		const KIND: CallKind = CallKind::Post;

		let span = CallSpan::new(KIND, "post");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let filters = filters.into();
		let body = body.into();
		let result = span
			.instrument(async move {
				let headers = match headers {
					Some(headers) => headers,
					None => self.bearer_headers().await?,
				};
				let url = self.build_url(path, &filters);

				self.send(ApiRequest::new(Method::Post, url, headers).with_body(body)).await
			})
			.await;

		record_result(KIND, &result);

		result
	}

	async fn read(&self, path: &str, mut filters: Filters, options: GetOptions) -> Result<Value> {
		let page_size = options.page_size.unwrap_or(self.config.page_size);

		if page_size == 0 {
			return Err(ConfigError::ZeroPageSize.into());
		}
		if !filters.has_page_size() {
			filters.push(Filter::page_size(page_size));
		}
		if !options.multi_request || filters.has_page_number() {
			let url = self.build_url(path, &filters);
			let headers = self.bearer_headers().await?;

			return self.send(ApiRequest::new(Method::Get, url, headers)).await?.json();
		}

		let order = options.page_order.unwrap_or(self.config.page_order);
		let mut pages = PageAccumulator::new(page_size, order);

		while !pages.is_done() {
			let page_filters = filters.clone().with(Filter::page_number(pages.page()));
			let url = self.build_url(path, &page_filters);
			let headers = self.bearer_headers().await?;
			let response = self.send(ApiRequest::new(Method::Get, url, headers)).await?;
			let body: Value = response.json()?;

			match body {
				Value::Array(items) => {
					obs::trace_page(pages.page(), items.len());
					pages.absorb(items);
				},
				other => return Ok(other),
			}
		}

		Ok(Value::Array(pages.into_items()))
	}

	/// Waits for the rate gate, then executes `request`.
	async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
		self.gate.throttle().await;

		self.execute(request).await
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: ClientConfig) -> Self {
		Self::with_http_client(config, ReqwestHttpClient::default())
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("config", &self.config)
			.field("gate", &self.gate)
			.field("token_set", &self.token.read().is_some())
			.finish()
	}
}

fn record_result<T>(kind: CallKind, result: &Result<T>) {
	match result {
		Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
		Err(_) => obs::record_call_outcome(kind, CallOutcome::Failure),
	}
}
