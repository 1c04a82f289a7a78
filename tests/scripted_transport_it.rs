// std
use std::collections::VecDeque;
// crates.io
use parking_lot::Mutex;
use serde_json::json;
use tokio::time::Instant;
// self
use api42::{
	_preludet::*,
	client::{ApiClient, GetOptions, PageOrder, TOKEN_PATH},
	config::ClientConfig,
	error::{ConfigError, StatusKind, TransportError},
	gate::RateGate,
	http::{ApiHttpClient, ApiRequest, Headers, Method, RawResponse, TransportFuture},
	query::Filters,
};

/// Transport that replays canned responses and records every request it sees.
#[derive(Default)]
struct ScriptedHttpClient {
	responses: Mutex<VecDeque<RawResponse>>,
	requests: Mutex<Vec<ApiRequest>>,
}
impl ScriptedHttpClient {
	fn new<I>(responses: I) -> Self
	where
		I: IntoIterator<Item = RawResponse>,
	{
		Self { responses: Mutex::new(responses.into_iter().collect()), ..Default::default() }
	}

	fn recorded(&self) -> Vec<ApiRequest> {
		self.requests.lock().clone()
	}
}
impl ApiHttpClient for ScriptedHttpClient {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
		self.requests.lock().push(request);

		let next = self.responses.lock().pop_front();

		Box::pin(async move {
			next.ok_or_else(|| TransportError::Io(std::io::Error::other("Script exhausted.")))
		})
	}
}

const BASE_URL: &str = "https://api.example.test";

fn scripted_client<I>(responses: I) -> ApiClient<ScriptedHttpClient>
where
	I: IntoIterator<Item = RawResponse>,
{
	ApiClient::with_http_client(test_config(BASE_URL), ScriptedHttpClient::new(responses))
}

fn token_response(access_token: &str) -> RawResponse {
	RawResponse::new(200, fresh_token_body(access_token))
}

fn page(ids: std::ops::Range<u64>) -> RawResponse {
	let items: Vec<Value> = ids.map(|id| json!({ "id": id })).collect();

	RawResponse::new(200, Value::Array(items).to_string())
}

#[tokio::test]
async fn token_exchange_is_an_unauthenticated_form_post() {
	let client = scripted_client([token_response("abc"), RawResponse::new(200, "{}")]);

	client
		.get_with("/v2/me", Filters::new(), GetOptions::default().single_request())
		.await
		.expect("Scripted read should succeed.");

	let requests = client.http_client.recorded();

	assert_eq!(requests.len(), 2);

	let exchange = &requests[0];

	assert_eq!(exchange.method, Method::Post);
	assert_eq!(exchange.url, format!("{BASE_URL}/oauth/token"));
	assert_eq!(exchange.headers.get(Headers::AUTHORIZATION), None);
	assert_eq!(
		exchange.headers.get(Headers::CONTENT_TYPE),
		Some("application/x-www-form-urlencoded")
	);
	assert_eq!(
		exchange.body.as_deref(),
		Some(&b"grant_type=client_credentials&client_id=test-client&client_secret=test-secret"[..])
	);

	let read = &requests[1];

	assert_eq!(read.method, Method::Get);
	assert_eq!(read.url, format!("{BASE_URL}/v2/me?page[size]=100"));
	assert_eq!(read.headers.get(Headers::AUTHORIZATION), Some("Bearer abc"));
	assert!(read.body.is_none());
}

#[tokio::test]
async fn refreshed_token_is_picked_up_immediately() {
	let client = scripted_client([
		token_response("first"),
		RawResponse::new(200, "{}"),
		token_response("second"),
		RawResponse::new(200, "{}"),
	]);
	let options = GetOptions::default().single_request();

	client.get_with("/v2/me", Filters::new(), options.clone()).await.expect("First read.");
	client.invalidate_token();
	client.get_with("/v2/me", Filters::new(), options).await.expect("Second read.");

	let bearers: Vec<_> = client
		.http_client
		.recorded()
		.into_iter()
		.filter(|request| request.method == Method::Get)
		.filter_map(|request| request.headers.get(Headers::AUTHORIZATION).map(str::to_owned))
		.collect();

	assert_eq!(bearers, ["Bearer first", "Bearer second"]);
}

#[tokio::test]
async fn page_urls_keep_filter_order() {
	let client = scripted_client([token_response("abc"), page(0..100), page(100..150)]);
	let value = client
		.get("/v2/cursus/21/users", ["filter[campus_id]=22", "sort=login"])
		.await
		.expect("Scripted pagination should succeed.");

	assert_eq!(value.as_array().map(Vec::len), Some(150));

	let urls: Vec<_> =
		client.http_client.recorded().into_iter().skip(1).map(|request| request.url).collect();

	let base = format!("{BASE_URL}/v2/cursus/21/users?filter[campus_id]=22&sort=login");

	assert_eq!(urls, [
		format!("{base}&page[size]=100&page[number]=1"),
		format!("{base}&page[size]=100&page[number]=2"),
	]);
}

#[tokio::test]
async fn custom_page_size_drives_termination() {
	let client = scripted_client([token_response("abc"), page(0..2), page(2..4), page(4..5)]);
	let value = client
		.get_with(
			"/v2/teams",
			Filters::new(),
			GetOptions::default().page_size(2).page_order(PageOrder::Append),
		)
		.await
		.expect("Scripted pagination should succeed.");

	assert_eq!(value, json!([{ "id": 0 }, { "id": 1 }, { "id": 2 }, { "id": 3 }, { "id": 4 }]));
	assert_eq!(client.http_client.recorded().len(), 4);
}

#[tokio::test]
async fn page_size_filter_leaves_the_threshold_alone() {
	let client = scripted_client([token_response("abc"), page(0..30), page(30..60), page(60..67)]);
	let value = client
		.get("/v2/teams", ["page[size]=30"])
		.await
		.expect("Scripted pagination should succeed.");

	assert_eq!(value.as_array().map(Vec::len), Some(30));

	let urls: Vec<_> =
		client.http_client.recorded().into_iter().map(|request| request.url).collect();

	assert_eq!(urls, [
		format!("{BASE_URL}{TOKEN_PATH}"),
		format!("{BASE_URL}/v2/teams?page[size]=30&page[number]=1"),
	]);
}

#[tokio::test(start_paused = true)]
async fn every_page_takes_a_gate_slot() {
	let config = ClientConfig::builder()
		.client_id(TEST_CLIENT_ID)
		.client_secret(TEST_CLIENT_SECRET)
		.base_url(BASE_URL)
		.build()
		.expect("Default-paced configuration should build.");
	let client = ApiClient::with_http_client(
		config,
		ScriptedHttpClient::new([
			token_response("abc"),
			page(0..100),
			page(100..200),
			page(200..240),
		]),
	);
	let start = Instant::now();
	let value =
		client.get("/v2/users", Filters::new()).await.expect("Paced pagination should succeed.");

	assert_eq!(value.as_array().map(Vec::len), Some(240));
	assert_eq!(client.http_client.recorded().len(), 4);
	// Token exchange plus three pages: four call starts, three full intervals.
	assert!(start.elapsed() >= RateGate::DEFAULT_MIN_INTERVAL * 3);
}

#[tokio::test]
async fn typed_reads_deserialize_accumulated_pages() {
	#[derive(Debug, Deserialize, PartialEq)]
	struct Campus {
		id: u64,
	}

	let client = scripted_client([token_response("abc"), page(0..3)]);
	let campuses: Vec<Campus> =
		client.get_json("/v2/campus", Filters::new()).await.expect("Typed read should succeed.");

	assert_eq!(campuses, [Campus { id: 0 }, Campus { id: 1 }, Campus { id: 2 }]);
}

#[tokio::test]
async fn created_status_is_not_success() {
	let client = scripted_client([token_response("abc"), RawResponse::new(201, "{}")]);
	let err = client
		.post("/v2/events_users", Filters::new(), "user_id=1", None)
		.await
		.expect_err("201 should not count as success.");

	match err {
		Error::Status(status) => assert_eq!(status.kind, StatusKind::Unexpected),
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn transport_errors_propagate() {
	let client = scripted_client([]);
	let err = client.ensure_token().await.expect_err("Exhausted script should fail.");

	assert!(matches!(err, Error::Transport(TransportError::Io(_))));
}

#[tokio::test]
async fn zero_page_size_is_rejected_before_any_call() {
	let client = scripted_client([]);
	let err = client
		.get_with("/v2/me", Filters::new(), GetOptions::default().page_size(0))
		.await
		.expect_err("Zero page size should be rejected.");

	assert!(matches!(err, Error::Config(ConfigError::ZeroPageSize)));
	assert!(client.http_client.recorded().is_empty());
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
	let client = scripted_client([token_response("abc"), RawResponse::new(200, "<html>")]);
	let err = client.get("/v2/me", Filters::new()).await.expect_err("HTML body should fail.");

	assert!(matches!(err, Error::Decode { status: 200, .. }));
}
