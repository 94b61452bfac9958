use std::collections::{BTreeMap, HashMap};

use arc_config::{Config, is_valid_culture};

use crate::sort::{SortDir, SortKey};

pub const MAX_PAGE_LIMIT: u32 = 100;

/// Advanced criteria slots read from `sq0`..`sq19`.
pub const MAX_CRITERIA: usize = 20;

const RESERVED_PARAMS: [&str; 8] =
	["page", "limit", "subquery", "subqueryField", "sort", "sortDir", "culture", "emptyField"];
const CRITERION_PREFIXES: [&str; 3] = ["sq", "sf", "so"];

#[derive(Clone, Debug)]
pub struct BrowseDefaults {
	pub limit: u32,
	pub culture: String,
	pub max_result_window: u64,
}
impl BrowseDefaults {
	pub fn from_config(cfg: &Config) -> Self {
		Self {
			limit: cfg.browse.default_limit,
			culture: cfg.browse.default_culture.clone(),
			max_result_window: cfg.browse.max_result_window,
		}
	}
}

/// How an advanced criterion combines with the ones before it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CriterionOp {
	And,
	Or,
	Not,
}
impl CriterionOp {
	/// Anything other than `or` or `not` is `and`.
	pub fn parse(raw: &str) -> Self {
		match raw.trim().to_ascii_lowercase().as_str() {
			"or" => Self::Or,
			"not" => Self::Not,
			_ => Self::And,
		}
	}
}

/// One `sq{i}`/`sf{i}`/`so{i}` triple.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Criterion {
	pub query: String,
	/// Search field name; `None` searches every text field.
	pub field: Option<String>,
	pub op: CriterionOp,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BrowseRequest {
	pub page: u32,
	pub limit: u32,
	pub subquery: Option<String>,
	pub subquery_field: Option<String>,
	/// Advanced criteria in slot order. Slots with a blank query are skipped.
	pub criteria: Vec<Criterion>,
	/// Field that must be missing from every hit.
	pub empty_field: Option<String>,
	/// Facet name to selected value. Names are not checked against the catalog here.
	pub filters: BTreeMap<String, String>,
	pub sort: SortKey,
	pub sort_dir: SortDir,
	pub culture: String,
}
impl BrowseRequest {
	/// Parses raw query parameters. Every non-reserved, non-empty parameter is a filter
	/// candidate.
	pub fn from_params(params: &HashMap<String, String>, defaults: &BrowseDefaults) -> Self {
		let page = params.get("page").and_then(|raw| parse_int(raw)).unwrap_or(1);
		let limit =
			params.get("limit").and_then(|raw| parse_int(raw)).unwrap_or(i64::from(defaults.limit));
		let subquery = non_blank(params, "subquery");
		let subquery_field = non_blank(params, "subqueryField");
		let empty_field = non_blank(params, "emptyField");
		let criteria = (0..MAX_CRITERIA)
			.filter_map(|slot| {
				let query = non_blank(params, &format!("sq{slot}"))?;

				Some(Criterion {
					query,
					field: non_blank(params, &format!("sf{slot}")),
					op: params
						.get(&format!("so{slot}"))
						.map(|raw| CriterionOp::parse(raw))
						.unwrap_or(CriterionOp::And),
				})
			})
			.collect();
		let sort =
			params.get("sort").map(|raw| SortKey::parse(raw)).unwrap_or(SortKey::LastUpdated);
		let sort_dir = params
			.get("sortDir")
			.and_then(|raw| SortDir::parse(raw))
			.unwrap_or_else(|| SortDir::default_for(sort));
		let culture =
			culture_or_default(params.get("culture").map(String::as_str), &defaults.culture);
		let filters = params
			.iter()
			.filter(|(name, _)| !is_reserved(name))
			.filter_map(|(name, value)| {
				let value = value.trim();

				(!value.is_empty()).then(|| (name.clone(), value.to_string()))
			})
			.collect();

		Self {
			page: page.clamp(1, i64::from(u32::MAX)) as u32,
			limit: limit.clamp(1, i64::from(MAX_PAGE_LIMIT)) as u32,
			subquery,
			subquery_field,
			criteria,
			empty_field,
			filters,
			sort,
			sort_dir,
			culture,
		}
	}

	pub fn pagination(&self, max_result_window: u64) -> Pagination {
		Pagination::clamp(self.page, self.limit, max_result_window)
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pagination {
	pub page: u32,
	pub limit: u32,
	pub skip: u64,
}
impl Pagination {
	/// Keeps `skip + limit` inside the engine's result window by moving to the last page that
	/// fits.
	pub fn clamp(page: u32, limit: u32, max_result_window: u64) -> Self {
		let page = page.max(1);
		let limit = limit.clamp(1, MAX_PAGE_LIMIT);
		let wide_limit = u64::from(limit);
		let skip = u64::from(page - 1) * wide_limit;

		if skip + wide_limit <= max_result_window {
			return Self { page, limit, skip };
		}

		let skip = max_result_window.saturating_sub(wide_limit);
		let page = u32::try_from(skip / wide_limit + 1).unwrap_or(u32::MAX);

		Self { page, limit, skip }
	}
}

/// Cultures end up inside field paths, so anything that is not a plain locale code is replaced by
/// `default`.
pub fn culture_or_default(raw: Option<&str>, default: &str) -> String {
	raw.map(str::trim)
		.filter(|raw| is_valid_culture(raw))
		.map(str::to_string)
		.unwrap_or_else(|| default.to_string())
}

fn non_blank(params: &HashMap<String, String>, name: &str) -> Option<String> {
	params.get(name).map(|raw| raw.trim()).filter(|raw| !raw.is_empty()).map(str::to_string)
}

fn is_reserved(name: &str) -> bool {
	RESERVED_PARAMS.contains(&name)
		|| CRITERION_PREFIXES.iter().any(|prefix| {
			name.strip_prefix(prefix)
				.is_some_and(|slot| !slot.is_empty() && slot.bytes().all(|b| b.is_ascii_digit()))
		})
}

fn parse_int(raw: &str) -> Option<i64> {
	raw.trim().parse().ok()
}
