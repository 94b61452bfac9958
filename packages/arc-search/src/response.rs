use std::{
	collections::HashMap,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
	pub id: String,
	pub source: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BucketKey {
	Int(i64),
	Str(String),
}
impl BucketKey {
	/// Integer view of the key, used for taxonomy term buckets.
	pub fn as_term_id(&self) -> Option<i64> {
		match self {
			Self::Int(id) => Some(*id),
			Self::Str(raw) => raw.trim().parse().ok(),
		}
	}
}
impl Display for BucketKey {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Int(id) => write!(f, "{id}"),
			Self::Str(raw) => f.write_str(raw),
		}
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Bucket {
	pub key: BucketKey,
	#[serde(default)]
	pub doc_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResponse {
	pub hits: Vec<Hit>,
	pub total: u64,
	/// Raw buckets keyed by aggregation name, in engine order.
	pub aggregations: HashMap<String, Vec<Bucket>>,
}

#[derive(Deserialize)]
struct RawResponse {
	hits: Option<RawHits>,
	#[serde(default)]
	aggregations: HashMap<String, RawAggregation>,
}

#[derive(Deserialize)]
struct RawHits {
	total: Option<RawTotal>,
	#[serde(default)]
	hits: Vec<RawHit>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTotal {
	Object { value: u64 },
	Count(u64),
}

#[derive(Deserialize)]
struct RawHit {
	#[serde(rename = "_id")]
	id: String,
	#[serde(rename = "_source", default)]
	source: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawAggregation {
	#[serde(default)]
	buckets: Vec<RawBucket>,
}

#[derive(Deserialize)]
struct RawBucket {
	#[serde(default)]
	key: Value,
	#[serde(default)]
	doc_count: u64,
}

pub fn parse_search_response(json: Value) -> Result<SearchResponse> {
	if !json.is_object() {
		return Err(Error::InvalidResponse {
			message: "Search response must be a JSON object.".to_string(),
		});
	}

	let raw: RawResponse = serde_json::from_value(json)?;
	let Some(hits) = raw.hits else {
		return Err(Error::InvalidResponse {
			message: "Search response is missing hits.".to_string(),
		});
	};
	let total = match hits.total {
		Some(RawTotal::Object { value }) | Some(RawTotal::Count(value)) => value,
		None => hits.hits.len() as u64,
	};

	Ok(SearchResponse {
		hits: hits.hits.into_iter().map(|hit| Hit { id: hit.id, source: hit.source }).collect(),
		total,
		aggregations: raw
			.aggregations
			.into_iter()
			.map(|(name, aggregation)| {
				let buckets = scalar_buckets(&name, aggregation.buckets);

				(name, buckets)
			})
			.collect(),
	})
}

/// Non-integer numbers keep their JSON text. Buckets without a scalar key are dropped so one odd
/// aggregation cannot sink the whole response.
fn scalar_buckets(aggregation: &str, raw: Vec<RawBucket>) -> Vec<Bucket> {
	raw.into_iter()
		.filter_map(|bucket| {
			let key = match bucket.key {
				Value::Number(number) => match number.as_i64() {
					Some(id) => BucketKey::Int(id),
					None => BucketKey::Str(number.to_string()),
				},
				Value::String(raw) => BucketKey::Str(raw),
				Value::Bool(flag) => BucketKey::Str(flag.to_string()),
				other => {
					tracing::warn!(
						aggregation,
						key = %other,
						"Dropping bucket without a scalar key."
					);

					return None;
				},
			};

			Some(Bucket { key, doc_count: bucket.doc_count })
		})
		.collect()
}
