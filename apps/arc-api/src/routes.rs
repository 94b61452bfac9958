use std::collections::HashMap;

use axum::{
	Json, Router,
	extract::{Query, State, rejection::QueryRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::{Deserialize, Serialize};

use arc_service::{BrowseResult, FilterTag, Suggestion};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
	#[serde(default)]
	pub query: String,
	pub limit: Option<u32>,
	pub culture: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
	pub results: Vec<Suggestion>,
}

#[derive(Debug, Serialize)]
pub struct FilterTagsResponse {
	pub tags: Vec<FilterTag>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<QueryRejection> for ApiError {
	fn from(err: QueryRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.body_text())
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/repositories/browse", get(browse))
		.route("/v1/repositories/autocomplete", get(autocomplete))
		.route("/v1/repositories/filter_tags", get(filter_tags))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

/// Always 200. Engine faults show up as an empty result with a `fault` field.
async fn browse(
	State(state): State<AppState>,
	Query(params): Query<HashMap<String, String>>,
) -> Json<BrowseResult> {
	Json(state.service.browse(&params).await)
}

async fn autocomplete(
	State(state): State<AppState>,
	params: Result<Query<AutocompleteParams>, QueryRejection>,
) -> Result<Json<AutocompleteResponse>, ApiError> {
	let Query(params) = params?;
	let results =
		state.service.autocomplete(&params.query, params.limit, params.culture.as_deref()).await;

	Ok(Json(AutocompleteResponse { results }))
}

async fn filter_tags(
	State(state): State<AppState>,
	Query(params): Query<HashMap<String, String>>,
) -> Json<FilterTagsResponse> {
	Json(FilterTagsResponse { tags: state.service.filter_tags(&params).await })
}
