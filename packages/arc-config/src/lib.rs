mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Browse, Config, Facet, FacetKind, Postgres, Search, Service, Storage};

use std::{collections::HashSet, fs, path::Path};

const MAX_CULTURE_LEN: usize = 16;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	let url = cfg.search.url.trim();

	if !(url.starts_with("http://") || url.starts_with("https://")) {
		return Err(Error::Validation {
			message: "search.url must start with http:// or https://.".to_string(),
		});
	}
	if cfg.search.index.trim().is_empty() {
		return Err(Error::Validation { message: "search.index must be non-empty.".to_string() });
	}
	if cfg.search.index.contains('/') {
		return Err(Error::Validation {
			message: "search.index must not contain '/'.".to_string(),
		});
	}
	if cfg.search.connect_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.connect_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.connect_timeout_ms > cfg.search.timeout_ms {
		return Err(Error::Validation {
			message: "search.connect_timeout_ms must not exceed search.timeout_ms.".to_string(),
		});
	}
	if cfg.search.default_headers.values().any(|value| !value.is_string()) {
		return Err(Error::Validation {
			message: "search.default_headers values must be strings.".to_string(),
		});
	}
	if !(1..=100).contains(&cfg.browse.default_limit) {
		return Err(Error::Validation {
			message: "browse.default_limit must be in the range 1-100.".to_string(),
		});
	}
	if cfg.browse.max_result_window < u64::from(cfg.browse.default_limit) {
		return Err(Error::Validation {
			message: "browse.max_result_window must be at least browse.default_limit.".to_string(),
		});
	}
	if !is_valid_culture(&cfg.browse.default_culture) {
		return Err(Error::Validation {
			message: "browse.default_culture must be a locale code such as en or pt_BR.".to_string(),
		});
	}
	if cfg.browse.autocomplete_limit == 0 {
		return Err(Error::Validation {
			message: "browse.autocomplete_limit must be greater than zero.".to_string(),
		});
	}

	if let Some(facets) = cfg.facets.as_ref() {
		let mut seen = HashSet::new();

		for facet in facets {
			if facet.name.trim().is_empty() {
				return Err(Error::Validation {
					message: "facets.name must be non-empty.".to_string(),
				});
			}
			if !seen.insert(facet.name.as_str()) {
				return Err(Error::Validation {
					message: format!("facets.name '{}' is declared more than once.", facet.name),
				});
			}
			if facet.field.trim().is_empty() {
				return Err(Error::Validation {
					message: format!("facets.{}.field must be non-empty.", facet.name),
				});
			}
			if facet.size == 0 {
				return Err(Error::Validation {
					message: format!("facets.{}.size must be greater than zero.", facet.name),
				});
			}
		}
	}

	Ok(())
}

/// Cultures are spliced into engine field paths, so only plain locale codes pass.
pub fn is_valid_culture(raw: &str) -> bool {
	!raw.is_empty()
		&& raw.len() <= MAX_CULTURE_LEN
		&& raw.starts_with(|ch: char| ch.is_ascii_alphabetic())
		&& raw.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.search.url.trim().trim_end_matches('/').to_string();

	cfg.search.url = trimmed;
	cfg.browse.default_culture = cfg.browse.default_culture.trim().to_string();

	if cfg.facets.as_ref().map(|facets| facets.is_empty()).unwrap_or(false) {
		cfg.facets = None;
	}
}
