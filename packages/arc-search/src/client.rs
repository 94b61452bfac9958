use std::time::Duration;

use reqwest::{Client, header::HeaderMap};
use serde_json::Value;

use arc_domain::SearchQuery;

use crate::{Error, Result, SearchResponse, dsl, response};

const MAX_ERROR_BODY_CHARS: usize = 500;

/// HTTP client for one index's `_search` endpoint. Cheap to clone and safe to share.
#[derive(Clone, Debug)]
pub struct SearchClient {
	client: Client,
	url: String,
	headers: HeaderMap,
}
impl SearchClient {
	pub fn new(cfg: &arc_config::Search) -> Result<Self> {
		let client = Client::builder()
			.connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.build()?;
		let headers = crate::request_headers(&cfg.default_headers)?;

		Ok(Self { client, url: search_url(cfg), headers })
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	/// Issues one POST per call. Non-2xx statuses and unparseable bodies are errors.
	pub async fn execute(&self, query: &SearchQuery) -> Result<SearchResponse> {
		let body = dsl::render(query);

		tracing::debug!(url = %self.url, from = query.from, size = query.size, "Search request.");

		let res =
			self.client.post(&self.url).headers(self.headers.clone()).json(&body).send().await?;
		let status = res.status();

		if !status.is_success() {
			let text = res.text().await.unwrap_or_default();

			return Err(Error::Status {
				status: status.as_u16(),
				body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
			});
		}

		let bytes = res.bytes().await?;
		let json: Value = serde_json::from_slice(&bytes)?;

		response::parse_search_response(json)
	}
}

pub fn search_url(cfg: &arc_config::Search) -> String {
	format!("{}/{}/_search", cfg.url.trim_end_matches('/'), cfg.index)
}
