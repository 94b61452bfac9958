use std::collections::HashMap;

use arc_domain::BrowseRequest;

use crate::{
	BrowseService,
	assemble::{self, BrowseFault, BrowseResult},
	query::{self, BuiltQuery},
};

impl BrowseService {
	/// Runs one browse from raw query parameters. Engine faults come back as an empty result with
	/// `fault` set, never as an error.
	pub async fn browse(&self, params: &HashMap<String, String>) -> BrowseResult {
		let request = BrowseRequest::from_params(params, &self.defaults);

		self.browse_request(&request).await
	}

	pub async fn browse_request(&self, request: &BrowseRequest) -> BrowseResult {
		let pagination = request.pagination(self.defaults.max_result_window);
		let catalog = self.catalog.resolve(&request.culture);
		let BuiltQuery { query, active_filters } = query::build(request, &catalog, pagination);
		let response = match self.backends.search.execute(&query).await {
			Ok(response) => response,
			Err(err) => {
				let kind = err.fault_kind();

				tracing::warn!(
					error = %err,
					fault = kind.as_str(),
					page = pagination.page,
					limit = pagination.limit,
					"Browse search failed."
				);

				let fault = BrowseFault { kind, message: err.to_string() };

				return BrowseResult::empty(pagination, active_filters, Some(fault));
			},
		};
		let ids = assemble::term_ids(&response, &catalog);
		let names = self.resolver().resolve(&ids, catalog.culture()).await;
		let result = assemble::assemble(response, &catalog, &names, pagination, active_filters);

		tracing::info!(
			total = result.total,
			hit_count = result.hits.len(),
			page = result.page,
			limit = result.limit,
			filter_count = result.active_filters.len(),
			"Browse completed."
		);

		result
	}
}
