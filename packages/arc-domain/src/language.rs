use std::collections::HashMap;

use arc_config::Config;

const EN: &[(&str, &str)] = &[
	("af", "Afrikaans"),
	("ar", "Arabic"),
	("ca", "Catalan"),
	("cs", "Czech"),
	("cy", "Welsh"),
	("da", "Danish"),
	("de", "German"),
	("el", "Greek"),
	("en", "English"),
	("es", "Spanish"),
	("eu", "Basque"),
	("fa", "Persian"),
	("fi", "Finnish"),
	("fr", "French"),
	("ga", "Irish"),
	("gl", "Galician"),
	("he", "Hebrew"),
	("hi", "Hindi"),
	("hu", "Hungarian"),
	("id", "Indonesian"),
	("is", "Icelandic"),
	("it", "Italian"),
	("ja", "Japanese"),
	("ko", "Korean"),
	("la", "Latin"),
	("nl", "Dutch"),
	("nn", "Norwegian Nynorsk"),
	("no", "Norwegian"),
	("nr", "South Ndebele"),
	("nd", "North Ndebele"),
	("pl", "Polish"),
	("pt", "Portuguese"),
	("ro", "Romanian"),
	("ru", "Russian"),
	("sl", "Slovenian"),
	("sn", "Shona"),
	("sr", "Serbian"),
	("st", "Southern Sotho"),
	("sv", "Swedish"),
	("sw", "Swahili"),
	("th", "Thai"),
	("tn", "Tswana"),
	("tr", "Turkish"),
	("ts", "Tsonga"),
	("uk", "Ukrainian"),
	("ve", "Venda"),
	("vi", "Vietnamese"),
	("xh", "Xhosa"),
	("zh", "Chinese"),
	("zu", "Zulu"),
];

const FR: &[(&str, &str)] = &[
	("ar", "arabe"),
	("de", "allemand"),
	("en", "anglais"),
	("es", "espagnol"),
	("fr", "français"),
	("it", "italien"),
	("ja", "japonais"),
	("la", "latin"),
	("nl", "néerlandais"),
	("pt", "portugais"),
	("ru", "russe"),
	("zh", "chinois"),
];

const ES: &[(&str, &str)] = &[
	("ar", "árabe"),
	("de", "alemán"),
	("en", "inglés"),
	("es", "español"),
	("fr", "francés"),
	("it", "italiano"),
	("la", "latín"),
	("pt", "portugués"),
	("zh", "chino"),
];

/// ISO 639-1 code to display name tables, keyed by culture.
#[derive(Clone, Debug, Default)]
pub struct LanguageNames {
	tables: HashMap<String, HashMap<String, String>>,
}
impl LanguageNames {
	pub fn builtin() -> Self {
		let mut tables = HashMap::new();

		for (culture, rows) in [("en", EN), ("fr", FR), ("es", ES)] {
			tables.insert(
				culture.to_string(),
				rows.iter().map(|(code, name)| (code.to_string(), name.to_string())).collect(),
			);
		}

		Self { tables }
	}

	/// Built-in tables with `[languages.<culture>]` entries layered on top.
	pub fn from_config(cfg: &Config) -> Self {
		let mut names = Self::builtin();

		if let Some(overrides) = cfg.languages.as_ref() {
			for (culture, rows) in overrides {
				let rows = rows.iter().map(|(code, name)| (code.as_str(), name.as_str()));

				names.extend(culture, rows);
			}
		}

		names
	}

	pub fn extend<'a>(
		&mut self,
		culture: &str,
		rows: impl IntoIterator<Item = (&'a str, &'a str)>,
	) {
		let table = self.tables.entry(culture.to_string()).or_default();

		for (code, name) in rows {
			table.insert(code.to_string(), name.to_string());
		}
	}

	/// Falls back to the base culture ("en" for "en_GB"), then to the code itself.
	pub fn name(&self, culture: &str, code: &str) -> String {
		self.lookup(culture, code)
			.or_else(|| base_culture(culture).and_then(|base| self.lookup(base, code)))
			.map(str::to_string)
			.unwrap_or_else(|| code.to_string())
	}

	fn lookup(&self, culture: &str, code: &str) -> Option<&str> {
		self.tables.get(culture).and_then(|table| table.get(code)).map(String::as_str)
	}
}

fn base_culture(culture: &str) -> Option<&str> {
	culture.split(['_', '-']).next().filter(|base| base.len() < culture.len())
}
