// std
use std::time::Instant;
// crates.io
use httpmock::prelude::*;
// self
use api42::{
	_preludet::*,
	client::{GetOptions, ReqwestApiClient},
	config::ClientConfig,
	error::StatusKind,
	http::{ApiRequest, Headers, Method},
	query::Filters,
};

#[tokio::test]
async fn execute_maps_documented_statuses() {
	let server = MockServer::start_async().await;
	let client = build_test_client(&server.base_url());
	let table = [
		(400, StatusKind::BadRequest),
		(401, StatusKind::Unauthorized),
		(403, StatusKind::Forbidden),
		(404, StatusKind::NotFound),
		(422, StatusKind::UnprocessableEntity),
		(429, StatusKind::TooManyRequests),
		(500, StatusKind::ServerError),
		(204, StatusKind::Unexpected),
		(201, StatusKind::Unexpected),
		(503, StatusKind::Unexpected),
	];

	for (code, kind) in table {
		let path = format!("/status/{code}");
		let mock = server
			.mock_async(|when, then| {
				when.method(GET).path(path.as_str());
				then.status(code);
			})
			.await;
		let err = client
			.execute(ApiRequest::new(Method::Get, server.url(&path), Headers::new()))
			.await
			.expect_err("Every non-200 status should fail.");

		match err {
			Error::Status(status) => {
				assert_eq!(status.status, code);
				assert_eq!(status.kind, kind);

				let expected = match kind.message() {
					Some(message) => format!("{message} (status {code})."),
					None => format!("Unexpected status `{code}`."),
				};

				assert_eq!(status.to_string(), expected);
			},
			other => panic!("Unexpected error variant for {code}: {other:?}."),
		}

		mock.assert_async().await;
	}
}

#[tokio::test]
async fn unexpected_status_message_carries_code() {
	let server = MockServer::start_async().await;
	let client = build_test_client(&server.base_url());
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/gone");
			then.status(204);
		})
		.await;
	let err = client
		.execute(ApiRequest::new(Method::Get, server.url("/gone"), Headers::new()))
		.await
		.expect_err("204 is not treated as success.");

	assert_eq!(err.to_string(), "Unexpected status `204`.");
}

#[tokio::test]
async fn not_found_carries_documented_message() {
	let server = MockServer::start_async().await;
	let client = build_test_client(&server.base_url());
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/users/0");
			then.status(404);
		})
		.await;
	let err = client
		.execute(ApiRequest::new(Method::Get, server.url("/v2/users/0"), Headers::new()))
		.await
		.expect_err("404 should fail.");

	assert_eq!(err.to_string(), "Resource not found (status 404).");
	assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn transport_failure_is_reported() {
	// Nothing listens on the discard port.
	let client = build_test_client("http://127.0.0.1:9");
	let err = client
		.execute(ApiRequest::new(Method::Get, "http://127.0.0.1:9/v2/me", Headers::new()))
		.await
		.expect_err("Connection refusal should fail.");

	assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn calls_are_spaced_by_the_rate_gate() {
	let server = MockServer::start_async().await;
	let config = ClientConfig::builder()
		.client_id(TEST_CLIENT_ID)
		.client_secret(TEST_CLIENT_SECRET)
		.base_url(server.base_url())
		.build()
		.expect("Default-paced configuration should build.");
	let client = ReqwestApiClient::new(config);
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body(fresh_token_body("paced-token"));
		})
		.await;
	let me = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/me");
			then.status(200).header("content-type", "application/json").body(r#"{"id":1}"#);
		})
		.await;
	let start = Instant::now();

	for _ in 0..3 {
		client
			.get_with("/v2/me", Filters::new(), GetOptions::default().single_request())
			.await
			.expect("Paced read should succeed.");
	}

	// Token exchange plus three reads: four call starts, three full intervals.
	assert!(start.elapsed() >= StdDuration::from_millis(1_650));

	token.assert_calls_async(1).await;
	me.assert_calls_async(3).await;
}
