use arc_search::FaultKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Invalid configuration: {message}")]
	Config { message: String },
	#[error("Search error: {message}")]
	Search { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<arc_search::Error> for Error {
	fn from(err: arc_search::Error) -> Self {
		let message = err.to_string();

		match err.fault_kind() {
			FaultKind::Config => Self::Config { message },
			_ => Self::Search { message },
		}
	}
}

impl From<arc_storage::Error> for Error {
	fn from(err: arc_storage::Error) -> Self {
		match err {
			arc_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			arc_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}
