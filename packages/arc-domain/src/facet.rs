use std::sync::Arc;

pub use arc_config::FacetKind;

use arc_config::Config;

pub const CULTURE_PLACEHOLDER: &str = "{culture}";
pub const DEFAULT_FACET_SIZE: u32 = 10;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FacetDefinition {
	pub name: String,
	pub field: String,
	pub size: u32,
	pub kind: FacetKind,
}
impl FacetDefinition {
	pub fn new(name: &str, field: &str, size: u32, kind: FacetKind) -> Self {
		Self { name: name.to_string(), field: field.to_string(), size, kind }
	}

	pub fn resolve_field(&self, culture: &str) -> String {
		self.field.replace(CULTURE_PLACEHOLDER, culture)
	}
}

/// Installation-wide facet catalog. Cloning shares the same definitions.
#[derive(Clone, Debug)]
pub struct FacetCatalog {
	facets: Arc<[FacetDefinition]>,
}
impl FacetCatalog {
	pub fn new(facets: Vec<FacetDefinition>) -> Self {
		Self { facets: facets.into() }
	}

	pub fn default_repository() -> Self {
		Self::new(vec![
			FacetDefinition::new(
				"languages",
				"i18n.languages",
				DEFAULT_FACET_SIZE,
				FacetKind::LanguageCode,
			),
			FacetDefinition::new("types", "types", DEFAULT_FACET_SIZE, FacetKind::TermId),
			FacetDefinition::new(
				"regions",
				"contactInformations.i18n.{culture}.region.untouched",
				DEFAULT_FACET_SIZE,
				FacetKind::LocaleRegionString,
			),
			FacetDefinition::new(
				"geographicSubregions",
				"geographicSubregions",
				DEFAULT_FACET_SIZE,
				FacetKind::TermId,
			),
			FacetDefinition::new(
				"locality",
				"contactInformations.i18n.{culture}.city.untouched",
				DEFAULT_FACET_SIZE,
				FacetKind::LocaleRegionString,
			),
			FacetDefinition::new(
				"thematicAreas",
				"thematicAreas",
				DEFAULT_FACET_SIZE,
				FacetKind::TermId,
			),
		])
	}

	/// Uses `[[facets]]` from the config when present, the repository defaults otherwise.
	pub fn from_config(cfg: &Config) -> Self {
		let Some(facets) = cfg.facets.as_ref() else {
			return Self::default_repository();
		};

		Self::new(
			facets
				.iter()
				.map(|facet| FacetDefinition::new(&facet.name, &facet.field, facet.size, facet.kind))
				.collect(),
		)
	}

	pub fn get(&self, name: &str) -> Option<&FacetDefinition> {
		self.facets.iter().find(|facet| facet.name == name)
	}

	pub fn iter(&self) -> impl Iterator<Item = &FacetDefinition> {
		self.facets.iter()
	}

	pub fn len(&self) -> usize {
		self.facets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.facets.is_empty()
	}

	pub fn resolve(&self, culture: &str) -> ResolvedCatalog {
		ResolvedCatalog {
			culture: culture.to_string(),
			facets: self
				.facets
				.iter()
				.map(|facet| ResolvedFacet {
					name: facet.name.clone(),
					field: facet.resolve_field(culture),
					size: facet.size,
					kind: facet.kind,
				})
				.collect(),
		}
	}
}
impl Default for FacetCatalog {
	fn default() -> Self {
		Self::default_repository()
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedFacet {
	pub name: String,
	pub field: String,
	pub size: u32,
	pub kind: FacetKind,
}

/// Per-request view of the catalog with culture placeholders filled in.
#[derive(Clone, Debug)]
pub struct ResolvedCatalog {
	culture: String,
	facets: Vec<ResolvedFacet>,
}
impl ResolvedCatalog {
	pub fn culture(&self) -> &str {
		&self.culture
	}

	pub fn get(&self, name: &str) -> Option<&ResolvedFacet> {
		self.facets.iter().find(|facet| facet.name == name)
	}

	pub fn iter(&self) -> impl Iterator<Item = &ResolvedFacet> {
		self.facets.iter()
	}

	pub fn len(&self) -> usize {
		self.facets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.facets.is_empty()
	}
}
