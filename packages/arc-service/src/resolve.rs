use std::collections::{BTreeSet, HashMap};

use arc_domain::{FacetKind, LanguageNames};
use arc_search::BucketKey;

use crate::TermStore;

pub struct NameResolver<'a> {
	store: &'a dyn TermStore,
	languages: &'a LanguageNames,
}
impl<'a> NameResolver<'a> {
	pub fn new(store: &'a dyn TermStore, languages: &'a LanguageNames) -> Self {
		Self { store, languages }
	}

	/// Ids without a stored name are absent from the result. A failed lookup yields an empty map
	/// so every id falls back to `#<id>`.
	pub async fn resolve_term_names(&self, ids: &[i64], culture: &str) -> HashMap<i64, String> {
		let ids: Vec<i64> = ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

		if ids.is_empty() {
			return HashMap::new();
		}

		match self.store.term_names(&ids, culture).await {
			Ok(names) => names,
			Err(err) => {
				tracing::warn!(
					error = %err,
					culture,
					term_count = ids.len(),
					"Term name lookup failed."
				);

				HashMap::new()
			},
		}
	}

	pub fn resolve_language_name(&self, code: &str, culture: &str) -> String {
		self.languages.name(culture, code)
	}

	pub async fn resolve(&self, ids: &[i64], culture: &str) -> ResolvedNames<'a> {
		let terms = self.resolve_term_names(ids, culture).await;

		ResolvedNames { terms, languages: self.languages, culture: culture.to_string() }
	}
}

/// Display names for one request, ready for per-bucket lookups.
pub struct ResolvedNames<'a> {
	terms: HashMap<i64, String>,
	languages: &'a LanguageNames,
	culture: String,
}
impl<'a> ResolvedNames<'a> {
	pub fn new(terms: HashMap<i64, String>, languages: &'a LanguageNames, culture: &str) -> Self {
		Self { terms, languages, culture: culture.to_string() }
	}

	pub fn term(&self, id: i64) -> String {
		self.terms.get(&id).cloned().unwrap_or_else(|| format!("#{id}"))
	}

	pub fn display(&self, kind: FacetKind, key: &BucketKey) -> String {
		match kind {
			FacetKind::TermId => match key.as_term_id() {
				Some(id) => self.term(id),
				None => key.to_string(),
			},
			FacetKind::LanguageCode => self.languages.name(&self.culture, &key.to_string()),
			FacetKind::LocaleRegionString => key.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;

	use arc_storage::repositories::RepositoryName;

	use super::*;
	use crate::{BoxFuture, Error, Result};

	struct RecordingStore {
		names: HashMap<i64, String>,
		calls: Mutex<Vec<Vec<i64>>>,
		fail: bool,
	}
	impl RecordingStore {
		fn new(names: &[(i64, &str)]) -> Self {
			Self {
				names: names.iter().map(|(id, name)| (*id, name.to_string())).collect(),
				calls: Mutex::new(Vec::new()),
				fail: false,
			}
		}

		fn calls(&self) -> Vec<Vec<i64>> {
			self.calls.lock().expect("Failed to lock calls.").clone()
		}
	}
	impl TermStore for RecordingStore {
		fn term_names<'a>(
			&'a self,
			ids: &'a [i64],
			_culture: &'a str,
		) -> BoxFuture<'a, Result<HashMap<i64, String>>> {
			self.calls.lock().expect("Failed to lock calls.").push(ids.to_vec());

			let result = if self.fail {
				Err(Error::Storage { message: "connection refused".to_string() })
			} else {
				Ok(ids
					.iter()
					.filter_map(|id| self.names.get(id).map(|name| (*id, name.clone())))
					.collect())
			};

			Box::pin(async move { result })
		}

		fn repository_names<'a>(
			&'a self,
			_prefix: &'a str,
			_culture: &'a str,
			_limit: u32,
		) -> BoxFuture<'a, Result<Vec<RepositoryName>>> {
			Box::pin(async { Ok(Vec::new()) })
		}
	}

	#[tokio::test]
	async fn deduplicates_ids_into_one_lookup() {
		let store = RecordingStore::new(&[(42, "Archives"), (7, "Museum")]);
		let languages = LanguageNames::builtin();
		let resolver = NameResolver::new(&store, &languages);
		let names = resolver.resolve_term_names(&[42, 7, 42, 99, 7], "en").await;

		assert_eq!(store.calls(), vec![vec![7, 42, 99]]);
		assert_eq!(names.len(), 2);
		assert_eq!(names.get(&42).map(String::as_str), Some("Archives"));
		assert!(!names.contains_key(&99));
	}

	#[tokio::test]
	async fn superset_lookup_keeps_existing_mappings() {
		let store = RecordingStore::new(&[(42, "Archives"), (7, "Museum"), (8, "Library")]);
		let languages = LanguageNames::builtin();
		let resolver = NameResolver::new(&store, &languages);
		let first = resolver.resolve_term_names(&[42, 7], "en").await;
		let again = resolver.resolve_term_names(&[7, 42], "en").await;
		let superset = resolver.resolve_term_names(&[42, 7, 8], "en").await;

		assert_eq!(first, again);

		for (id, name) in &first {
			assert_eq!(superset.get(id), Some(name));
		}

		assert_eq!(superset.len(), 3);
	}

	#[tokio::test]
	async fn empty_ids_skip_the_store() {
		let store = RecordingStore::new(&[]);
		let languages = LanguageNames::builtin();
		let resolver = NameResolver::new(&store, &languages);
		let names = resolver.resolve_term_names(&[], "en").await;

		assert!(names.is_empty());
		assert!(store.calls().is_empty());
	}

	#[tokio::test]
	async fn store_failure_degrades_to_fallback_names() {
		let mut store = RecordingStore::new(&[(42, "Archives")]);

		store.fail = true;

		let languages = LanguageNames::builtin();
		let resolver = NameResolver::new(&store, &languages);
		let names = resolver.resolve(&[42], "en").await;

		assert_eq!(names.display(FacetKind::TermId, &BucketKey::Int(42)), "#42");
	}

	#[test]
	fn language_names_follow_culture() {
		let store = RecordingStore::new(&[]);
		let languages = LanguageNames::builtin();
		let resolver = NameResolver::new(&store, &languages);

		assert_eq!(resolver.resolve_language_name("de", "en"), "German");
		assert_eq!(resolver.resolve_language_name("de", "fr_CA"), "allemand");
		assert_eq!(resolver.resolve_language_name("tlh", "en"), "tlh");
	}

	#[test]
	fn display_dispatches_by_kind() {
		let languages = LanguageNames::builtin();
		let terms = HashMap::from([(42, "Archives".to_string())]);
		let names = ResolvedNames::new(terms, &languages, "en");
		let text = |raw: &str| BucketKey::Str(raw.to_string());

		assert_eq!(names.display(FacetKind::TermId, &BucketKey::Int(42)), "Archives");
		assert_eq!(names.display(FacetKind::TermId, &text("42")), "Archives");
		assert_eq!(names.display(FacetKind::TermId, &BucketKey::Int(99)), "#99");
		assert_eq!(names.display(FacetKind::LanguageCode, &text("fr")), "French");
		assert_eq!(names.display(FacetKind::LanguageCode, &text("xx")), "xx");
		assert_eq!(names.display(FacetKind::LocaleRegionString, &text("Ontario")), "Ontario");
	}
}
