use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub search: Search,
	pub browse: Browse,
	/// Optional. Replaces the built-in repository facet catalog when present.
	pub facets: Option<Vec<Facet>>,
	/// Optional. Map keys are cultures, values map ISO 639-1 codes to display names.
	pub languages: Option<HashMap<String, HashMap<String, String>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	/// Base URL of the engine, e.g. "http://localhost:9200".
	pub url: String,
	pub index: String,
	#[serde(default = "default_connect_timeout_ms")]
	pub connect_timeout_ms: u64,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Browse {
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	#[serde(default = "default_max_result_window")]
	pub max_result_window: u64,
	#[serde(default = "default_culture")]
	pub default_culture: String,
	#[serde(default = "default_autocomplete_limit")]
	pub autocomplete_limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Facet {
	pub name: String,
	/// May contain a "{culture}" placeholder.
	pub field: String,
	#[serde(default = "default_facet_size")]
	pub size: u32,
	pub kind: FacetKind,
}

/// How bucket keys of a facet turn into display labels.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
	/// Bucket keys are taxonomy term ids.
	TermId,
	/// Bucket keys are already display strings.
	LocaleRegionString,
	/// Bucket keys are ISO 639-1 language codes.
	LanguageCode,
}

fn default_connect_timeout_ms() -> u64 {
	5_000
}

fn default_timeout_ms() -> u64 {
	10_000
}

fn default_limit() -> u32 {
	30
}

fn default_max_result_window() -> u64 {
	10_000
}

fn default_culture() -> String {
	"en".to_string()
}

fn default_autocomplete_limit() -> u32 {
	10
}

fn default_facet_size() -> u32 {
	10
}
