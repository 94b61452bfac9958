use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use arc_config::{Config, Facet, FacetKind};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root
		.as_table_mut()
		.expect("Template config must be a table.")
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.expect("Template config must include the requested section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("arc_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> arc_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = arc_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

fn assert_validation_message(result: arc_config::Result<Config>, expected: &str) {
	let err = result.expect_err("Expected validation error.");
	let message = err.to_string();

	assert!(message.contains(expected), "Unexpected error message: {message}");
}

#[test]
fn template_config_loads_and_normalizes_url() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Template config must be valid.");

	assert_eq!(cfg.search.url, "http://127.0.0.1:9200");
	assert_eq!(cfg.browse.max_result_window, 10_000);
	assert!(cfg.facets.is_none());
}

#[test]
fn timeouts_default_when_omitted() {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let search = root
		.as_table_mut()
		.and_then(|table| table.get_mut("search"))
		.and_then(Value::as_table_mut)
		.expect("Template config must include [search].");

	search.remove("connect_timeout_ms");
	search.remove("timeout_ms");

	let cfg = load_payload(toml::to_string(&root).expect("Failed to render config."))
		.expect("Config without timeouts must load.");

	assert_eq!(cfg.search.connect_timeout_ms, 5_000);
	assert_eq!(cfg.search.timeout_ms, 10_000);
}

#[test]
fn search_url_requires_http_scheme() {
	let payload = sample_toml_with("search", "url", Value::String("localhost:9200".to_string()));

	assert_validation_message(
		load_payload(payload),
		"search.url must start with http:// or https://.",
	);
}

#[test]
fn default_limit_must_be_in_page_range() {
	let payload = sample_toml_with("browse", "default_limit", Value::Integer(101));

	assert_validation_message(
		load_payload(payload),
		"browse.default_limit must be in the range 1-100.",
	);
}

#[test]
fn connect_timeout_must_not_exceed_total_timeout() {
	let payload = sample_toml_with("search", "connect_timeout_ms", Value::Integer(20_000));

	assert_validation_message(
		load_payload(payload),
		"search.connect_timeout_ms must not exceed search.timeout_ms.",
	);
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("arc_config_test_missing_file.toml");
	let err = arc_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, arc_config::Error::ReadConfig { .. }));
}

#[test]
fn facet_kind_must_be_known() {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let facet: Value = toml::from_str(
		r#"
name = "types"
field = "types"
kind = "actor"
"#,
	)
	.expect("Failed to parse facet table.");

	root.as_table_mut()
		.expect("Template config must be a table.")
		.insert("facets".to_string(), Value::Array(vec![facet]));

	let err = load_payload(toml::to_string(&root).expect("Failed to render config."))
		.expect_err("Expected unknown facet kind to be rejected.");

	assert!(matches!(err, arc_config::Error::ParseConfig { .. }));
}

#[test]
fn facet_kinds_parse_from_snake_case() {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let facet: Value = toml::from_str(
		r#"
name = "rating"
field = "rating"
kind = "locale_region_string"
"#,
	)
	.expect("Failed to parse facet table.");

	root.as_table_mut()
		.expect("Template config must be a table.")
		.insert("facets".to_string(), Value::Array(vec![facet]));

	let cfg = load_payload(toml::to_string(&root).expect("Failed to render config."))
		.expect("Facet override must load.");
	let facets = cfg.facets.expect("Facet override must be kept.");

	assert_eq!(facets[0].kind, FacetKind::LocaleRegionString);
	assert_eq!(facets[0].size, 10);
}

#[test]
fn default_culture_must_be_a_locale_code() {
	for culture in ["en us", "en.history^9", ""] {
		let payload =
			sample_toml_with("browse", "default_culture", Value::String(culture.to_string()));

		assert_validation_message(
			load_payload(payload),
			"browse.default_culture must be a locale code",
		);
	}

	let payload = sample_toml_with("browse", "default_culture", Value::String("pt_BR".to_string()));
	let cfg = load_payload(payload).expect("pt_BR must be accepted.");

	assert_eq!(cfg.browse.default_culture, "pt_BR");
}

#[test]
fn facet_names_must_be_unique() {
	let mut cfg = base_config();
	let facet = Facet {
		name: "regions".to_string(),
		field: "contactInformations.i18n.{culture}.region.untouched".to_string(),
		size: 10,
		kind: FacetKind::LocaleRegionString,
	};

	cfg.facets = Some(vec![facet.clone(), facet]);

	let err = arc_config::validate(&cfg).expect_err("Expected duplicate facet error.");

	assert!(err.to_string().contains("facets.name 'regions' is declared more than once."));
}

#[test]
fn default_header_values_must_be_strings() {
	let mut cfg = base_config();

	cfg.search.default_headers.insert("X-Retry".to_string(), serde_json::json!(3));

	let err = arc_config::validate(&cfg).expect_err("Expected header validation error.");

	assert!(err.to_string().contains("search.default_headers values must be strings."));
}
