//! TOML-backed translation catalog.
//!
//! One table per locale. Nested tables are flattened into dotted keys, so
//! `[en.step.phone] title = "..."` and `[en] "step.phone.title" = "..."` are
//! the same entry.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use gs_core::ports::TranslationPort;
use tracing::warn;

/// Translations shipped with the binary.
pub const BUILTIN_TRANSLATIONS: &str = include_str!("../translations/default.toml");

#[derive(Debug, Clone)]
pub struct TomlTranslationCatalog {
    default_locale: String,
    tables: HashMap<String, HashMap<String, String>>,
}

impl TomlTranslationCatalog {
    pub fn from_toml_str(raw: &str, default_locale: impl Into<String>) -> anyhow::Result<Self> {
        let root: toml::Table = toml::from_str(raw).context("failed to parse translation table")?;
        let mut tables = HashMap::new();
        for (locale, value) in root {
            let toml::Value::Table(table) = value else {
                warn!(%locale, "ignoring non-table entry at translation root");
                continue;
            };
            let mut entries = HashMap::new();
            flatten(String::new(), table, &mut entries);
            tables.insert(locale, entries);
        }

        let default_locale = default_locale.into();
        if !tables.contains_key(&default_locale) {
            warn!(%default_locale, "default locale has no translations");
        }
        Ok(Self {
            default_locale,
            tables,
        })
    }

    pub fn builtin(default_locale: impl Into<String>) -> anyhow::Result<Self> {
        Self::from_toml_str(BUILTIN_TRANSLATIONS, default_locale)
    }

    pub fn load(path: &Path, default_locale: impl Into<String>) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read translations from {}", path.display()))?;
        Self::from_toml_str(&raw, default_locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    fn lookup(&self, key: &str, locale: &str) -> Option<&str> {
        self.tables
            .get(locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }
}

fn flatten(prefix: String, table: toml::Table, out: &mut HashMap<String, String>) {
    for (key, value) in table {
        let key = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::String(text) => {
                out.insert(key, text);
            }
            toml::Value::Table(nested) => flatten(key, nested, out),
            other => {
                out.insert(key, other.to_string());
            }
        }
    }
}

impl TranslationPort for TomlTranslationCatalog {
    fn translate(&self, key: &str, locale: &str) -> String {
        self.lookup(key, locale)
            .or_else(|| self.lookup(key, &self.default_locale))
            .unwrap_or(key)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
        [en]
        "error.rejected" = "The code you entered is incorrect"
        greeting = "Welcome"

        [en.step.phone]
        title = "Enter your mobile number"

        [hi]
        greeting = "स्वागत है"
    "#;

    fn catalog() -> TomlTranslationCatalog {
        TomlTranslationCatalog::from_toml_str(TABLE, "en").unwrap()
    }

    #[test]
    fn looks_up_requested_locale_first() {
        assert_eq!(catalog().translate("greeting", "hi"), "स्वागत है");
    }

    #[test]
    fn falls_back_to_default_locale_then_key() {
        let catalog = catalog();
        assert_eq!(
            catalog.translate("error.rejected", "hi"),
            "The code you entered is incorrect"
        );
        assert_eq!(catalog.translate("step.phone.title", "ta"), "Enter your mobile number");
        assert_eq!(catalog.translate("missing.key", "hi"), "missing.key");
    }

    #[test]
    fn builtin_table_covers_failure_messages_in_both_locales() {
        let catalog = TomlTranslationCatalog::builtin("en").unwrap();
        for key in ["error.invalid_format", "error.rejected", "error.timeout"] {
            for locale in ["en", "hi"] {
                assert_ne!(catalog.translate(key, locale), key, "{locale}:{key}");
            }
        }
    }

    #[test]
    fn malformed_table_is_an_error() {
        assert!(TomlTranslationCatalog::from_toml_str("[en\n", "en").is_err());
    }
}
