//! Demonstrates a paginated read against a mock API: the client exchanges its credentials once,
//! paces every call through the rate gate, and accumulates pages until a short one arrives.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use api42::{
	client::{GetOptions, PageOrder, ReqwestApiClient},
	config::ClientConfig,
	query::Filters,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200).header("content-type", "application/json").body(
				json!({
					"access_token": "demo-access",
					"token_type": "bearer",
					"created_at": time::OffsetDateTime::now_utc().unix_timestamp(),
					"expires_in": 7200,
				})
				.to_string(),
			);
		})
		.await;

	for (page, count) in [(1_u64, 2_u64), (2, 2), (3, 1)] {
		let items: Vec<_> = (0..count).map(|idx| json!({ "id": page * 10 + idx })).collect();
		let body = json!(items).to_string();

		server
			.mock_async(|when, then| {
				when.method(GET).path("/v2/campus").query_param("page[number]", page.to_string());
				then.status(200).header("content-type", "application/json").body(body);
			})
			.await;
	}

	let config = ClientConfig::builder()
		.client_id("demo-client")
		.client_secret("super-secret")
		.base_url(server.base_url())
		.page_size(2)
		.build()?;
	let client = ReqwestApiClient::new(config);
	let campuses = client
		.get_with("/v2/campus", Filters::new(), GetOptions::default().page_order(PageOrder::Append))
		.await?;

	println!("Collected campuses: {campuses}.");

	token_mock.assert_async().await;

	Ok(())
}
