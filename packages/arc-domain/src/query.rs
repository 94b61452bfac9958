use crate::sort::SortClause;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operator {
	And,
	Or,
}
impl Operator {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::And => "AND",
			Self::Or => "OR",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Clause {
	MatchAll,
	/// Free text over weighted fields, e.g. "i18n.en.authorizedFormOfName^5".
	QueryString { query: String, fields: Vec<String>, default_operator: Operator },
	/// Exact match on a keyword field.
	Term { field: String, value: String },
	Match { field: String, query: String, operator: Operator },
	/// Documents where `field` holds a value.
	Exists { field: String },
	/// At least one inner clause must match.
	AnyOf(Vec<Clause>),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TermsAggregation {
	pub name: String,
	pub field: String,
	pub size: u32,
}

/// Engine-agnostic search request. `must` is never empty once built.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchQuery {
	pub must: Vec<Clause>,
	pub must_not: Vec<Clause>,
	pub filter: Vec<Clause>,
	pub sort: Vec<SortClause>,
	pub source: Vec<String>,
	pub aggregations: Vec<TermsAggregation>,
	pub from: u64,
	pub size: u64,
}
