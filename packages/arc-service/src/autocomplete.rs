use serde::{Deserialize, Serialize};

use arc_domain::{
	Clause, MAX_PAGE_LIMIT, Operator, SearchQuery, SortClause, SortDir, culture_or_default,
};

use crate::{BrowseService, assemble::BrowseHit};

const NAME_FIELD: &str = "authorizedFormOfName";
const SOURCE_FIELDS: [&str; 2] = ["slug", "i18n"];

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Suggestion {
	pub name: String,
	pub slug: String,
}
impl Suggestion {
	fn from_hit(hit: &BrowseHit, culture: &str) -> Self {
		Self {
			name: hit.i18n_field(NAME_FIELD, culture).unwrap_or_default().to_string(),
			slug: hit
				.fields
				.get("slug")
				.and_then(|slug| slug.as_str())
				.unwrap_or_default()
				.to_string(),
		}
	}
}

impl BrowseService {
	/// Name suggestions for a typed prefix. Falls back to the database when the engine fails or
	/// has no match.
	pub async fn autocomplete(
		&self,
		query: &str,
		limit: Option<u32>,
		culture: Option<&str>,
	) -> Vec<Suggestion> {
		let prefix = query.trim();

		if prefix.is_empty() {
			return Vec::new();
		}

		let limit = limit.unwrap_or(self.cfg.browse.autocomplete_limit).clamp(1, MAX_PAGE_LIMIT);
		let culture = culture_or_default(culture, &self.defaults.culture);
		let search = autocomplete_query(prefix, &culture, limit);
		let suggestions: Vec<Suggestion> = match self.backends.search.execute(&search).await {
			Ok(response) => response
				.hits
				.into_iter()
				.map(|hit| Suggestion::from_hit(&BrowseHit::from(hit), &culture))
				.collect(),
			Err(err) => {
				tracing::warn!(
					error = %err,
					fault = err.fault_kind().as_str(),
					"Autocomplete search failed."
				);

				Vec::new()
			},
		};

		if !suggestions.is_empty() {
			return suggestions;
		}

		match self.backends.terms.repository_names(prefix, &culture, limit).await {
			Ok(rows) =>
				rows.into_iter().map(|row| Suggestion { name: row.name, slug: row.slug }).collect(),
			Err(err) => {
				tracing::warn!(error = %err, "Autocomplete fallback lookup failed.");

				Vec::new()
			},
		}
	}
}

pub fn autocomplete_query(prefix: &str, culture: &str, limit: u32) -> SearchQuery {
	SearchQuery {
		must: vec![Clause::Match {
			field: format!("i18n.{culture}.{NAME_FIELD}.autocomplete"),
			query: prefix.to_string(),
			operator: Operator::And,
		}],
		must_not: Vec::new(),
		filter: Vec::new(),
		sort: vec![SortClause {
			field: format!("i18n.{culture}.{NAME_FIELD}.alphasort"),
			order: SortDir::Asc,
			unmapped_type: Some("keyword"),
		}],
		source: SOURCE_FIELDS.iter().map(|field| field.to_string()).collect(),
		aggregations: Vec::new(),
		from: 0,
		size: u64::from(limit),
	}
}
