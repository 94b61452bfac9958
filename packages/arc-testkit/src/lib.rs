mod error;
mod search_stub;

pub use error::{Error, Result};
pub use search_stub::{RecordedRequest, SearchStub, StubReply};

use std::{env, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::runtime::Builder;
use uuid::Uuid;

const ADMIN_DATABASES: [&str; 2] = ["postgres", "template1"];

/// A uniquely named Postgres database that is dropped again when the value goes away.
pub struct TestDatabase {
	name: String,
	options: PgConnectOptions,
	admin: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	pub async fn create(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn).map_err(Error::InvalidDsn)?;
		let (admin, mut conn) = admin_connection(&base).await?;
		let name = format!("arc_test_{}", Uuid::new_v4().simple());

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str())
			.await
			.map_err(|source| Error::Statement { database: name.clone(), source })?;

		Ok(Self { options: base.database(&name), name, admin, dropped: false })
	}

	pub fn dsn(&self) -> String {
		self.options.to_url_lossy().to_string()
	}

	/// Runs a `;`-separated SQL script, one statement at a time.
	pub async fn seed(&self, script: &str) -> Result<()> {
		let mut conn = PgConnection::connect_with(&self.options).await.map_err(|source| {
			Error::Statement { database: self.name.clone(), source }
		})?;

		for statement in script.split(';').map(str::trim).filter(|sql| !sql.is_empty()) {
			conn.execute(statement)
				.await
				.map_err(|source| Error::Statement { database: self.name.clone(), source })?;
		}

		Ok(())
	}

	pub async fn drop_database(mut self) -> Result<()> {
		drop_database(&self.name, &self.admin).await?;

		self.dropped = true;

		Ok(())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let name = self.name.clone();
		let admin = self.admin.clone();
		let worker = thread::spawn(move || {
			let outcome = Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(Error::from)
				.and_then(|runtime| runtime.block_on(drop_database(&name, &admin)));

			if let Err(err) = outcome {
				eprintln!("Leaked test database {name}: {err}");
			}
		});
		let _ = worker.join();
	}
}

pub fn env_dsn() -> Option<String> {
	env::var("ARC_PG_DSN").ok()
}

async fn admin_connection(base: &PgConnectOptions) -> Result<(PgConnectOptions, PgConnection)> {
	let mut last_err = None;

	for database in ADMIN_DATABASES {
		let options = base.clone().database(database);

		match PgConnection::connect_with(&options).await {
			Ok(conn) => return Ok((options, conn)),
			Err(err) => last_err = Some(err),
		}
	}

	Err(Error::NoAdminDatabase {
		tried: ADMIN_DATABASES.join(", "),
		source: last_err.unwrap_or(sqlx::Error::PoolClosed),
	})
}

async fn drop_database(name: &str, admin: &PgConnectOptions) -> Result<()> {
	let statement_failed = |source: sqlx::Error| Error::Statement { database: name.to_string(), source };
	let mut conn = PgConnection::connect_with(admin).await.map_err(statement_failed)?;

	// Open pool connections would block the drop.
	sqlx::query(
		"\
SELECT pg_terminate_backend(pid)
FROM pg_stat_activity
WHERE datname = $1 AND pid <> pg_backend_pid()",
	)
	.bind(name)
	.fetch_all(&mut conn)
	.await
	.map_err(statement_failed)?;

	conn.execute(format!(r#"DROP DATABASE IF EXISTS "{name}""#).as_str())
		.await
		.map_err(statement_failed)?;

	Ok(())
}
