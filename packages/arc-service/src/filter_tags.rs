use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use arc_domain::{BrowseRequest, FacetKind};
use arc_search::BucketKey;

use crate::{BrowseService, query};

/// Human-readable label for one applied filter.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FilterTag {
	pub facet: String,
	pub value: String,
	pub label: String,
}

impl BrowseService {
	/// One tag per filter that names a catalog facet, in catalog order, then the empty-field
	/// filter. Term ids share one lookup.
	pub async fn filter_tags(&self, params: &HashMap<String, String>) -> Vec<FilterTag> {
		let request = BrowseRequest::from_params(params, &self.defaults);
		let catalog = self.catalog.resolve(&request.culture);
		let active: Vec<_> = catalog
			.iter()
			.filter_map(|facet| request.filters.get(&facet.name).map(|value| (facet, value)))
			.collect();
		let ids: Vec<i64> = active
			.iter()
			.filter(|(facet, _)| facet.kind == FacetKind::TermId)
			.filter_map(|(_, value)| value.parse().ok())
			.collect();
		let names = self.resolver().resolve(&ids, catalog.culture()).await;

		let mut tags: Vec<FilterTag> = active
			.into_iter()
			.map(|(facet, value)| FilterTag {
				facet: facet.name.clone(),
				value: value.clone(),
				label: names.display(facet.kind, &BucketKey::Str(value.clone())),
			})
			.collect();

		if let Some(field) = request
			.empty_field
			.filter(|field| query::empty_field(field, catalog.culture()).is_some())
		{
			tags.push(FilterTag {
				facet: "emptyField".to_string(),
				label: format!("Empty: {field}"),
				value: field,
			});
		}

		tags
	}
}
