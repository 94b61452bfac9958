use serde::{Deserialize, Serialize};

pub const NAME_ALPHASORT_FIELD: &str = "authorizedFormOfName.alphasort";
pub const REGION_FIELD: &str = "region.untouched";
pub const LOCALITY_FIELD: &str = "city.untouched";
pub const IDENTIFIER_FIELD: &str = "identifier.untouched";
pub const UPDATED_AT_FIELD: &str = "updatedAt";
pub const SCORE_FIELD: &str = "_score";

const KEYWORD: &str = "keyword";

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
	Relevance,
	#[serde(rename = "nameUp")]
	NameAsc,
	#[serde(rename = "nameDown")]
	NameDesc,
	#[serde(rename = "regionUp")]
	RegionAsc,
	#[serde(rename = "regionDown")]
	RegionDesc,
	#[serde(rename = "localityUp")]
	LocalityAsc,
	#[serde(rename = "localityDown")]
	LocalityDesc,
	Identifier,
	Alphabetic,
	LastUpdated,
}
impl SortKey {
	/// Unrecognized values sort by last update.
	pub fn parse(raw: &str) -> Self {
		match raw.trim() {
			"relevance" => Self::Relevance,
			"nameUp" => Self::NameAsc,
			"nameDown" => Self::NameDesc,
			"regionUp" => Self::RegionAsc,
			"regionDown" => Self::RegionDesc,
			"localityUp" => Self::LocalityAsc,
			"localityDown" => Self::LocalityDesc,
			"identifier" => Self::Identifier,
			"alphabetic" => Self::Alphabetic,
			_ => Self::LastUpdated,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Relevance => "relevance",
			Self::NameAsc => "nameUp",
			Self::NameDesc => "nameDown",
			Self::RegionAsc => "regionUp",
			Self::RegionDesc => "regionDown",
			Self::LocalityAsc => "localityUp",
			Self::LocalityDesc => "localityDown",
			Self::Identifier => "identifier",
			Self::Alphabetic => "alphabetic",
			Self::LastUpdated => "lastUpdated",
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
	Asc,
	Desc,
}
impl SortDir {
	pub fn parse(raw: &str) -> Option<Self> {
		let raw = raw.trim();

		if raw.eq_ignore_ascii_case("asc") {
			Some(Self::Asc)
		} else if raw.eq_ignore_ascii_case("desc") {
			Some(Self::Desc)
		} else {
			None
		}
	}

	/// Direction used when the request does not name one.
	pub fn default_for(key: SortKey) -> Self {
		match key {
			SortKey::LastUpdated | SortKey::Relevance => Self::Desc,
			_ => Self::Asc,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortClause {
	pub field: String,
	pub order: SortDir,
	/// Type the engine assumes when the field is missing from the index mapping.
	pub unmapped_type: Option<&'static str>,
}
impl SortClause {
	fn keyword(field: &str, order: SortDir) -> Self {
		Self { field: field.to_string(), order, unmapped_type: Some(KEYWORD) }
	}

	fn plain(field: &str, order: SortDir) -> Self {
		Self { field: field.to_string(), order, unmapped_type: None }
	}
}

/// `dir` only applies to the identifier, alphabetic, and last-updated sorts; the up/down keys
/// carry their own direction.
pub fn sort_clauses(key: SortKey, dir: SortDir) -> Vec<SortClause> {
	match key {
		SortKey::NameAsc => vec![SortClause::keyword(NAME_ALPHASORT_FIELD, SortDir::Asc)],
		SortKey::NameDesc => vec![SortClause::keyword(NAME_ALPHASORT_FIELD, SortDir::Desc)],
		SortKey::RegionAsc => vec![SortClause::keyword(REGION_FIELD, SortDir::Asc)],
		SortKey::RegionDesc => vec![SortClause::keyword(REGION_FIELD, SortDir::Desc)],
		SortKey::LocalityAsc => vec![SortClause::keyword(LOCALITY_FIELD, SortDir::Asc)],
		SortKey::LocalityDesc => vec![SortClause::keyword(LOCALITY_FIELD, SortDir::Desc)],
		SortKey::Identifier => vec![
			SortClause::keyword(IDENTIFIER_FIELD, dir),
			SortClause::keyword(NAME_ALPHASORT_FIELD, dir),
		],
		SortKey::Alphabetic => vec![SortClause::keyword(NAME_ALPHASORT_FIELD, dir)],
		SortKey::Relevance => vec![SortClause::plain(SCORE_FIELD, SortDir::Desc)],
		SortKey::LastUpdated => vec![SortClause::plain(UPDATED_AT_FIELD, dir)],
	}
}
