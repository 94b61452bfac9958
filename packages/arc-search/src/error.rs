use serde::{Deserialize, Serialize};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error(transparent)]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("Search engine returned HTTP {status}: {body}")]
	Status { status: u16, body: String },
	#[error("{message}")]
	InvalidConfig { message: String },
	#[error("{message}")]
	InvalidResponse { message: String },
}
impl Error {
	pub fn fault_kind(&self) -> FaultKind {
		match self {
			Self::Reqwest(err) if err.is_timeout() => FaultKind::Timeout,
			Self::Reqwest(err) if err.is_decode() => FaultKind::Decode,
			Self::Reqwest(_) => FaultKind::Transport,
			Self::Status { .. } => FaultKind::Status,
			Self::SerdeJson(_) | Self::InvalidResponse { .. } => FaultKind::Decode,
			Self::InvalidHeaderName(_) | Self::InvalidHeaderValue(_) | Self::InvalidConfig { .. } =>
				FaultKind::Config,
		}
	}
}

/// Coarse fault class, safe to surface to callers.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
	Timeout,
	Transport,
	Status,
	Decode,
	Config,
}
impl FaultKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Timeout => "timeout",
			Self::Transport => "transport",
			Self::Status => "status",
			Self::Decode => "decode",
			Self::Config => "config",
		}
	}
}
