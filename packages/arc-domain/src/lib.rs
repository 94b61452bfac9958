//! Request, catalog, and query model for repository browse.
//!
//! Everything in this crate is pure: no I/O, no clocks, no shared mutable state.

pub mod facet;
pub mod language;
pub mod query;
pub mod request;
pub mod sort;

pub use facet::{FacetCatalog, FacetDefinition, FacetKind, ResolvedCatalog, ResolvedFacet};
pub use language::LanguageNames;
pub use query::{Clause, Operator, SearchQuery, TermsAggregation};
pub use request::{
	BrowseDefaults, BrowseRequest, Criterion, CriterionOp, MAX_CRITERIA, MAX_PAGE_LIMIT, Pagination,
	culture_or_default,
};
pub use sort::{SortClause, SortDir, SortKey};
