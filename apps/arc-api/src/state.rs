use std::sync::Arc;

use arc_service::BrowseService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<BrowseService>,
}
impl AppState {
	/// Builds the engine client and a lazy Postgres pool. Neither backend is contacted until the
	/// first request.
	pub fn new(config: arc_config::Config) -> color_eyre::Result<Self> {
		let service = BrowseService::new(config)?;

		Ok(Self::with_service(service))
	}

	pub fn with_service(service: BrowseService) -> Self {
		Self { service: Arc::new(service) }
	}
}
