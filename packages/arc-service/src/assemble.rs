use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use arc_domain::{FacetKind, Pagination, ResolvedCatalog};
use arc_search::{BucketKey, FaultKind, Hit, SearchResponse};

use crate::resolve::ResolvedNames;

const FALLBACK_CULTURES: [&str; 3] = ["en", "fr", "es"];

/// One engine hit: the requested source fields plus the engine id under `_id`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BrowseHit {
	#[serde(rename = "_id")]
	pub id: String,
	#[serde(flatten)]
	pub fields: Map<String, Value>,
}
impl BrowseHit {
	/// Reads `i18n.<culture>.<field>`, trying `culture` and then en, fr, es. Blank values are
	/// skipped.
	pub fn i18n_field(&self, field: &str, culture: &str) -> Option<&str> {
		let i18n = self.fields.get("i18n")?.as_object()?;

		std::iter::once(culture).chain(FALLBACK_CULTURES).find_map(|culture| {
			i18n.get(culture)?
				.get(field)?
				.as_str()
				.filter(|value| !value.trim().is_empty())
		})
	}
}
impl From<Hit> for BrowseHit {
	fn from(hit: Hit) -> Self {
		let mut fields = hit.source;

		fields.remove("_id");

		Self { id: hit.id, fields }
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FacetBucket {
	pub key: BucketKey,
	pub display: String,
	pub doc_count: u64,
}

/// Why a browse came back empty when the engine could not answer.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BrowseFault {
	pub kind: FaultKind,
	pub message: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BrowseResult {
	pub hits: Vec<BrowseHit>,
	pub total: u64,
	pub facets: BTreeMap<String, Vec<FacetBucket>>,
	pub page: u32,
	pub limit: u32,
	#[serde(rename = "activeFilters")]
	pub active_filters: BTreeMap<String, String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fault: Option<BrowseFault>,
}
impl BrowseResult {
	/// Result for a failed engine call: no hits, no facets, request paging kept.
	pub fn empty(
		pagination: Pagination,
		active_filters: BTreeMap<String, String>,
		fault: Option<BrowseFault>,
	) -> Self {
		Self {
			hits: Vec::new(),
			total: 0,
			facets: BTreeMap::new(),
			page: pagination.page,
			limit: pagination.limit,
			active_filters,
			fault,
		}
	}
}

/// Every term id in buckets of term-id facets, for a single batched name lookup.
pub fn term_ids(response: &SearchResponse, catalog: &ResolvedCatalog) -> Vec<i64> {
	catalog
		.iter()
		.filter(|facet| facet.kind == FacetKind::TermId)
		.filter_map(|facet| response.aggregations.get(&facet.name))
		.flatten()
		.filter_map(|bucket| bucket.key.as_term_id())
		.collect()
}

pub fn assemble(
	response: SearchResponse,
	catalog: &ResolvedCatalog,
	names: &ResolvedNames<'_>,
	pagination: Pagination,
	active_filters: BTreeMap<String, String>,
) -> BrowseResult {
	let SearchResponse { hits, total, mut aggregations } = response;
	let facets = catalog
		.iter()
		.map(|facet| {
			let buckets = aggregations
				.remove(&facet.name)
				.unwrap_or_default()
				.into_iter()
				.map(|bucket| FacetBucket {
					display: names.display(facet.kind, &bucket.key),
					key: bucket.key,
					doc_count: bucket.doc_count,
				})
				.collect();

			(facet.name.clone(), buckets)
		})
		.collect();

	BrowseResult {
		hits: hits.into_iter().map(BrowseHit::from).collect(),
		total,
		facets,
		page: pagination.page,
		limit: pagination.limit,
		active_filters,
		fault: None,
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use serde_json::json;

	use arc_domain::{FacetCatalog, LanguageNames};
	use arc_search::Bucket;

	use super::*;

	fn pagination() -> Pagination {
		Pagination { page: 1, limit: 10, skip: 0 }
	}

	fn response_with(aggregations: &[(&str, Vec<Bucket>)]) -> SearchResponse {
		SearchResponse {
			hits: Vec::new(),
			total: 0,
			aggregations: aggregations
				.iter()
				.map(|(name, buckets)| (name.to_string(), buckets.clone()))
				.collect(),
		}
	}

	fn bucket(key: BucketKey, doc_count: u64) -> Bucket {
		Bucket { key, doc_count }
	}

	#[test]
	fn resolves_term_buckets() {
		let catalog = FacetCatalog::default_repository().resolve("en");
		let languages = LanguageNames::builtin();
		let response = response_with(&[("types", vec![bucket(BucketKey::Int(42), 7)])]);
		let names =
			ResolvedNames::new(HashMap::from([(42, "Archives".to_string())]), &languages, "en");
		let result = assemble(response, &catalog, &names, pagination(), BTreeMap::new());

		assert_eq!(
			result.facets["types"],
			vec![FacetBucket {
				key: BucketKey::Int(42),
				display: "Archives".to_string(),
				doc_count: 7
			}]
		);
		assert_eq!(
			serde_json::to_value(&result.facets["types"]).expect("Failed to serialize facet."),
			json!([{ "key": 42, "display": "Archives", "doc_count": 7 }])
		);
	}

	#[test]
	fn unresolved_terms_fall_back_to_hash_id() {
		let catalog = FacetCatalog::default_repository().resolve("en");
		let languages = LanguageNames::builtin();
		let response = response_with(&[("types", vec![bucket(BucketKey::Int(99), 3)])]);
		let names = ResolvedNames::new(HashMap::new(), &languages, "en");
		let result = assemble(response, &catalog, &names, pagination(), BTreeMap::new());

		assert_eq!(result.facets["types"][0].display, "#99");
		assert_eq!(result.facets["types"][0].doc_count, 3);
	}

	#[test]
	fn every_catalog_facet_is_present() {
		let catalog = FacetCatalog::default_repository().resolve("en");
		let languages = LanguageNames::builtin();
		let response = response_with(&[("types", Vec::new())]);
		let names = ResolvedNames::new(HashMap::new(), &languages, "en");
		let result = assemble(response, &catalog, &names, pagination(), BTreeMap::new());

		assert_eq!(result.facets.len(), catalog.len());

		for facet in catalog.iter() {
			assert_eq!(result.facets.get(&facet.name), Some(&Vec::new()));
		}
	}

	#[test]
	fn preserves_bucket_order_and_kinds() {
		let catalog = FacetCatalog::default_repository().resolve("fr");
		let languages = LanguageNames::builtin();
		let response = response_with(&[
			(
				"languages",
				vec![
					bucket(BucketKey::Str("en".to_string()), 9),
					bucket(BucketKey::Str("zz".to_string()), 1),
				],
			),
			(
				"regions",
				vec![
					bucket(BucketKey::Str("Québec".to_string()), 5),
					bucket(BucketKey::Str("Ontario".to_string()), 2),
				],
			),
		]);
		let names = ResolvedNames::new(HashMap::new(), &languages, "fr");
		let result = assemble(response, &catalog, &names, pagination(), BTreeMap::new());
		let language_labels: Vec<&str> =
			result.facets["languages"].iter().map(|bucket| bucket.display.as_str()).collect();
		let regions: Vec<&str> =
			result.facets["regions"].iter().map(|bucket| bucket.display.as_str()).collect();

		assert_eq!(language_labels, ["anglais", "zz"]);
		assert_eq!(regions, ["Québec", "Ontario"]);
	}

	#[test]
	fn collects_term_ids_across_term_facets_only() {
		let catalog = FacetCatalog::default_repository().resolve("en");
		let response = response_with(&[
			("types", vec![bucket(BucketKey::Int(42), 7), bucket(BucketKey::Int(43), 1)]),
			("thematicAreas", vec![bucket(BucketKey::Str("501".to_string()), 4)]),
			("regions", vec![bucket(BucketKey::Str("12".to_string()), 2)]),
		]);
		let mut ids = term_ids(&response, &catalog);

		ids.sort_unstable();

		assert_eq!(ids, [42, 43, 501]);
	}

	#[test]
	fn hits_keep_engine_order_and_id() {
		let catalog = FacetCatalog::default_repository().resolve("en");
		let languages = LanguageNames::builtin();
		let mut response = response_with(&[]);

		for (id, slug) in [("3", "b-archive"), ("1", "a-archive")] {
			let source = json!({ "slug": slug }).as_object().cloned().unwrap_or_default();

			response.hits.push(Hit { id: id.to_string(), source });
		}

		response.total = 2;

		let names = ResolvedNames::new(HashMap::new(), &languages, "en");
		let result = assemble(response, &catalog, &names, pagination(), BTreeMap::new());
		let body = serde_json::to_value(&result.hits).expect("Failed to serialize hits.");

		assert_eq!(result.total, 2);
		assert_eq!(
			body,
			json!([{ "_id": "3", "slug": "b-archive" }, { "_id": "1", "slug": "a-archive" }])
		);
	}

	#[test]
	fn i18n_field_falls_back_through_cultures() {
		let hit = BrowseHit {
			id: "1".to_string(),
			fields: json!({
				"i18n": {
					"de": { "authorizedFormOfName": " " },
					"fr": { "authorizedFormOfName": "Archives nationales" }
				}
			})
			.as_object()
			.cloned()
			.unwrap_or_default(),
		};

		assert_eq!(hit.i18n_field("authorizedFormOfName", "de"), Some("Archives nationales"));
		assert_eq!(hit.i18n_field("history", "de"), None);
	}

	#[test]
	fn empty_result_serializes_without_fault_field() {
		let result = BrowseResult::empty(pagination(), BTreeMap::new(), None);
		let body = serde_json::to_value(&result).expect("Failed to serialize result.");

		assert_eq!(
			body,
			json!({
				"hits": [],
				"total": 0,
				"facets": {},
				"page": 1,
				"limit": 10,
				"activeFilters": {}
			})
		);
	}
}
