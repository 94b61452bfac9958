pub mod assemble;
pub mod autocomplete;
pub mod browse;
pub mod filter_tags;
pub mod query;
pub mod resolve;

mod error;

pub use assemble::{BrowseFault, BrowseHit, BrowseResult, FacetBucket};
pub use autocomplete::Suggestion;
pub use error::{Error, Result};
pub use filter_tags::FilterTag;
pub use resolve::{NameResolver, ResolvedNames};

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use arc_config::Config;
use arc_domain::{BrowseDefaults, FacetCatalog, LanguageNames, SearchQuery};
use arc_search::{SearchClient, SearchResponse};
use arc_storage::{
	db::Db,
	repositories::{self, RepositoryName},
	terms,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait SearchBackend
where
	Self: Send + Sync,
{
	fn execute<'a>(
		&'a self,
		query: &'a SearchQuery,
	) -> BoxFuture<'a, arc_search::Result<SearchResponse>>;
}

pub trait TermStore
where
	Self: Send + Sync,
{
	/// One lookup for the whole id set.
	fn term_names<'a>(
		&'a self,
		ids: &'a [i64],
		culture: &'a str,
	) -> BoxFuture<'a, Result<HashMap<i64, String>>>;

	fn repository_names<'a>(
		&'a self,
		prefix: &'a str,
		culture: &'a str,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<RepositoryName>>>;
}

#[derive(Clone)]
pub struct Backends {
	pub search: Arc<dyn SearchBackend>,
	pub terms: Arc<dyn TermStore>,
}

pub struct BrowseService {
	pub cfg: Config,
	pub catalog: FacetCatalog,
	pub languages: LanguageNames,
	pub defaults: BrowseDefaults,
	pub backends: Backends,
}

struct PgTermStore {
	db: Db,
}

impl SearchBackend for SearchClient {
	fn execute<'a>(
		&'a self,
		query: &'a SearchQuery,
	) -> BoxFuture<'a, arc_search::Result<SearchResponse>> {
		Box::pin(SearchClient::execute(self, query))
	}
}

impl TermStore for PgTermStore {
	fn term_names<'a>(
		&'a self,
		ids: &'a [i64],
		culture: &'a str,
	) -> BoxFuture<'a, Result<HashMap<i64, String>>> {
		Box::pin(async move { Ok(terms::term_names(&self.db, ids, culture).await?) })
	}

	fn repository_names<'a>(
		&'a self,
		prefix: &'a str,
		culture: &'a str,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<RepositoryName>>> {
		Box::pin(async move {
			Ok(repositories::name_prefix(&self.db, prefix, culture, limit).await?)
		})
	}
}

impl Backends {
	pub fn new(search: Arc<dyn SearchBackend>, terms: Arc<dyn TermStore>) -> Self {
		Self { search, terms }
	}

	/// Engine client plus a lazily connected Postgres pool.
	pub fn connect(cfg: &Config) -> Result<Self> {
		let search = SearchClient::new(&cfg.search)?;
		let db = Db::connect_lazy(&cfg.storage.postgres)?;

		Ok(Self { search: Arc::new(search), terms: Arc::new(PgTermStore { db }) })
	}
}

impl BrowseService {
	pub fn new(cfg: Config) -> Result<Self> {
		let backends = Backends::connect(&cfg)?;

		Ok(Self::with_backends(cfg, backends))
	}

	pub fn with_backends(cfg: Config, backends: Backends) -> Self {
		let catalog = FacetCatalog::from_config(&cfg);
		let languages = LanguageNames::from_config(&cfg);
		let defaults = BrowseDefaults::from_config(&cfg);

		Self { cfg, catalog, languages, defaults, backends }
	}

	pub fn resolver(&self) -> NameResolver<'_> {
		NameResolver::new(self.backends.terms.as_ref(), &self.languages)
	}
}
