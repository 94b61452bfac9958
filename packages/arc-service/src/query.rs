use std::collections::BTreeMap;

use arc_domain::{
	BrowseRequest, Clause, Criterion, CriterionOp, Operator, Pagination, ResolvedCatalog,
	SearchQuery, TermsAggregation, facet::CULTURE_PLACEHOLDER, sort,
};

/// Weighted free-text fields. The authorized name outranks context fields five to one.
pub const TEXT_FIELDS: [&str; 9] = [
	"i18n.{culture}.authorizedFormOfName^5",
	"i18n.{culture}.history",
	"i18n.{culture}.geoculturalContext",
	"i18n.{culture}.collectingPolicies",
	"i18n.{culture}.holdings",
	"identifier",
	"contactInformations.i18n.{culture}.region",
	"contactInformations.i18n.{culture}.city",
	"all",
];
/// Field names accepted by `subqueryField` and `sf{i}`, with the weighted paths they search.
pub const SCOPED_FIELDS: [(&str, &[&str]); 9] = [
	("authorizedFormOfName", &["i18n.{culture}.authorizedFormOfName^5"]),
	("history", &["i18n.{culture}.history"]),
	("geoculturalContext", &["i18n.{culture}.geoculturalContext"]),
	("collectingPolicies", &["i18n.{culture}.collectingPolicies"]),
	("holdings", &["i18n.{culture}.holdings"]),
	("identifier", &["identifier"]),
	("region", &["contactInformations.i18n.{culture}.region"]),
	("city", &["contactInformations.i18n.{culture}.city"]),
	(
		"location",
		&[
			"contactInformations.i18n.{culture}.region^2",
			"contactInformations.i18n.{culture}.city",
		],
	),
];
/// Field names accepted by `emptyField`.
pub const EMPTY_FIELDS: [(&str, &str); 6] = [
	("authorizedFormOfName", "i18n.{culture}.authorizedFormOfName"),
	("history", "i18n.{culture}.history"),
	("geoculturalContext", "i18n.{culture}.geoculturalContext"),
	("collectingPolicies", "i18n.{culture}.collectingPolicies"),
	("holdings", "i18n.{culture}.holdings"),
	("identifier", "identifier"),
];
pub const SOURCE_FIELDS: [&str; 8] = [
	"slug",
	"identifier",
	"i18n",
	"contactInformations",
	"types",
	"logoPath",
	"updatedAt",
	"createdAt",
];

#[derive(Clone, Debug, PartialEq)]
pub struct BuiltQuery {
	pub query: SearchQuery,
	/// Filters that matched a catalog facet and became `term` clauses.
	pub active_filters: BTreeMap<String, String>,
}

pub fn build(
	request: &BrowseRequest,
	catalog: &ResolvedCatalog,
	pagination: Pagination,
) -> BuiltQuery {
	let culture = catalog.culture();
	let mut must: Vec<Clause> = request
		.subquery
		.as_deref()
		.map(|text| text_clause(text, request.subquery_field.as_deref(), culture))
		.into_iter()
		.collect();
	let (advanced, mut must_not) = criteria_clauses(&request.criteria, culture);

	must.extend(advanced);

	if must.is_empty() {
		must.push(Clause::MatchAll);
	}
	if let Some(field) = request.empty_field.as_deref().and_then(|name| empty_field(name, culture))
	{
		must_not.push(Clause::Exists { field });
	}

	let mut filter = Vec::new();
	let mut active_filters = BTreeMap::new();

	for facet in catalog.iter() {
		let Some(value) = request.filters.get(&facet.name) else { continue };
		let value = value.trim();

		if value.is_empty() {
			continue;
		}

		filter.push(Clause::Term { field: facet.field.clone(), value: value.to_string() });
		active_filters.insert(facet.name.clone(), value.to_string());
	}

	let aggregations = catalog
		.iter()
		.map(|facet| TermsAggregation {
			name: facet.name.clone(),
			field: facet.field.clone(),
			size: facet.size,
		})
		.collect();
	let query = SearchQuery {
		must,
		must_not,
		filter,
		sort: sort::sort_clauses(request.sort, request.sort_dir),
		source: SOURCE_FIELDS.iter().map(|field| field.to_string()).collect(),
		aggregations,
		from: pagination.skip,
		size: u64::from(pagination.limit),
	};

	BuiltQuery { query, active_filters }
}

pub fn text_fields(culture: &str) -> Vec<String> {
	scoped_fields(None, culture)
}

/// Paths searched for a field name. Missing or unknown names search every text field.
pub fn scoped_fields(field: Option<&str>, culture: &str) -> Vec<String> {
	let templates: &[&str] =
		match field.and_then(|name| SCOPED_FIELDS.iter().find(|(scope, _)| *scope == name)) {
			Some((_, paths)) => *paths,
			None => &TEXT_FIELDS,
		};

	templates.iter().map(|path| path.replace(CULTURE_PLACEHOLDER, culture)).collect()
}

pub fn empty_field(name: &str, culture: &str) -> Option<String> {
	EMPTY_FIELDS
		.iter()
		.find(|(field, _)| *field == name)
		.map(|(_, path)| path.replace(CULTURE_PLACEHOLDER, culture))
}

/// `not` criteria are excluded. An `or` criterion joins everything collected so far into one
/// `AnyOf` with itself.
fn criteria_clauses(criteria: &[Criterion], culture: &str) -> (Vec<Clause>, Vec<Clause>) {
	let mut must = Vec::new();
	let mut must_not = Vec::new();

	for criterion in criteria {
		let clause = text_clause(&criterion.query, criterion.field.as_deref(), culture);

		match criterion.op {
			CriterionOp::Not => must_not.push(clause),
			CriterionOp::Or if !must.is_empty() => {
				let mut any_of = std::mem::take(&mut must);

				any_of.push(clause);
				must.push(Clause::AnyOf(any_of));
			},
			CriterionOp::And | CriterionOp::Or => must.push(clause),
		}
	}

	(must, must_not)
}

fn text_clause(text: &str, field: Option<&str>, culture: &str) -> Clause {
	Clause::QueryString {
		query: text.to_string(),
		fields: scoped_fields(field, culture),
		default_operator: Operator::And,
	}
}
