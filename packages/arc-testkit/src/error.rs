pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("ARC_PG_DSN is not a usable Postgres DSN.")]
	InvalidDsn(#[source] sqlx::Error),

	#[error("None of the admin databases ({tried}) accepted a connection.")]
	NoAdminDatabase { tried: String, source: sqlx::Error },

	#[error("Statement against test database {database} failed.")]
	Statement { database: String, source: sqlx::Error },

	#[error(transparent)]
	Io(#[from] std::io::Error),
}
