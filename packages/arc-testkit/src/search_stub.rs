use std::{
	future::IntoFuture,
	sync::{Arc, Mutex},
	time::Duration,
};

use axum::{
	Json, Router,
	body::Bytes,
	extract::{Path, State},
	http::{StatusCode, header},
	response::{IntoResponse, Response},
	routing,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::oneshot, time};

use crate::Result;

/// Canned answer for every `POST /{index}/_search`.
#[derive(Clone, Debug)]
pub enum StubReply {
	Json(Value),
	Status(u16, String),
	/// Sent with a JSON content type but not parsed, for malformed bodies.
	Raw(String),
	Delayed(Duration, Box<StubReply>),
}

#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub index: String,
	pub body: Value,
}

#[derive(Clone)]
struct StubState {
	reply: StubReply,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// In-process stand-in for the search engine's query endpoint.
pub struct SearchStub {
	url: String,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
	shutdown: Option<oneshot::Sender<()>>,
}
impl SearchStub {
	pub async fn start(reply: StubReply) -> Result<Self> {
		let requests = Arc::new(Mutex::new(Vec::new()));
		let state = StubState { reply, requests: requests.clone() };
		let app = Router::new()
			.route("/{index}/_search", routing::post(search_handler))
			.with_state(state);
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let (tx, rx) = oneshot::channel();
		let server = axum::serve(listener, app).with_graceful_shutdown(async move {
			let _ = rx.await;
		});

		tokio::spawn(async move {
			let _ = server.into_future().await;
		});

		Ok(Self { url: format!("http://{addr}"), requests, shutdown: Some(tx) })
	}

	/// Base URL of a local port with no listener behind it.
	pub async fn unreachable_url() -> Result<String> {
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;

		drop(listener);

		Ok(format!("http://{addr}"))
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn request_count(&self) -> usize {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).len()
	}
}
impl Drop for SearchStub {
	fn drop(&mut self) {
		if let Some(tx) = self.shutdown.take() {
			let _ = tx.send(());
		}
	}
}

async fn search_handler(
	State(state): State<StubState>,
	Path(index): Path<String>,
	body: Bytes,
) -> Response {
	let body = serde_json::from_slice(&body).unwrap_or(Value::Null);

	state
		.requests
		.lock()
		.unwrap_or_else(|err| err.into_inner())
		.push(RecordedRequest { index, body });

	render(state.reply).await
}

async fn render(mut reply: StubReply) -> Response {
	loop {
		match reply {
			StubReply::Delayed(delay, inner) => {
				time::sleep(delay).await;

				reply = *inner;
			},
			StubReply::Json(value) => return (StatusCode::OK, Json(value)).into_response(),
			StubReply::Status(code, body) => {
				let status =
					StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

				return (status, body).into_response();
			},
			StubReply::Raw(body) =>
				return (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body)
					.into_response(),
		}
	}
}
