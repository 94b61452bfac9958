//! Rendering of [`SearchQuery`] into the engine's JSON query DSL.

use serde_json::{Map, Value, json};

use arc_domain::{Clause, SearchQuery, SortClause, TermsAggregation};

pub fn render(query: &SearchQuery) -> Value {
	json!({
		"size": query.size,
		"from": query.from,
		"_source": query.source,
		"query": {
			"bool": {
				"must": query.must.iter().map(render_clause).collect::<Vec<_>>(),
				"must_not": query.must_not.iter().map(render_clause).collect::<Vec<_>>(),
				"filter": query.filter.iter().map(render_clause).collect::<Vec<_>>(),
			}
		},
		"sort": query.sort.iter().map(render_sort).collect::<Vec<_>>(),
		"aggs": render_aggregations(&query.aggregations),
	})
}

pub fn render_clause(clause: &Clause) -> Value {
	match clause {
		Clause::MatchAll => json!({ "match_all": {} }),
		Clause::QueryString { query, fields, default_operator } => json!({
			"query_string": {
				"query": query,
				"fields": fields,
				"default_operator": default_operator.as_str(),
			}
		}),
		Clause::Term { field, value } => {
			let mut term = Map::new();

			term.insert(field.clone(), Value::String(value.clone()));

			json!({ "term": term })
		},
		Clause::Match { field, query, operator } => {
			let mut matched = Map::new();

			matched.insert(
				field.clone(),
				json!({ "query": query, "operator": operator.as_str().to_ascii_lowercase() }),
			);

			json!({ "match": matched })
		},
		Clause::Exists { field } => json!({ "exists": { "field": field } }),
		Clause::AnyOf(clauses) => json!({
			"bool": {
				"should": clauses.iter().map(render_clause).collect::<Vec<_>>(),
				"minimum_should_match": 1,
			}
		}),
	}
}

fn render_sort(clause: &SortClause) -> Value {
	let mut options = Map::new();

	options.insert("order".to_string(), Value::String(clause.order.as_str().to_string()));

	if let Some(unmapped_type) = clause.unmapped_type {
		options.insert("unmapped_type".to_string(), Value::String(unmapped_type.to_string()));
	}

	let mut sort = Map::new();

	sort.insert(clause.field.clone(), Value::Object(options));

	Value::Object(sort)
}

fn render_aggregations(aggregations: &[TermsAggregation]) -> Value {
	let mut aggs = Map::new();

	for aggregation in aggregations {
		aggs.insert(
			aggregation.name.clone(),
			json!({ "terms": { "field": aggregation.field, "size": aggregation.size } }),
		);
	}

	Value::Object(aggs)
}
