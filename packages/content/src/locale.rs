use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Locale {
    Pt,
    #[default]
    En,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::Pt => "pt",
            Locale::En => "en",
        }
    }

    /// Full language tag, used for the document `lang` attribute and as the
    /// primary key into locale maps.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::Pt => "pt-BR",
            Locale::En => "en-US",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "pt" | "pt-br" => Some(Locale::Pt),
            "en" | "en-us" => Some(Locale::En),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Locale::Pt => Locale::En,
            Locale::En => Locale::Pt,
        }
    }
}

/// Pick the active locale: the `language` cookie wins, then the browser
/// language (`pt*` means Portuguese), then English.
pub fn resolve_locale(cookie: Option<&str>, navigator_language: Option<&str>) -> Locale {
    if let Some(locale) = cookie.and_then(|value| match value.trim() {
        "pt" => Some(Locale::Pt),
        "en" => Some(Locale::En),
        _ => None,
    }) {
        return locale;
    }

    match navigator_language {
        Some(lang) if lang.trim().to_ascii_lowercase().starts_with("pt") => Locale::Pt,
        _ => Locale::En,
    }
}

/// Per-language variants of one text field, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleMap(Vec<(String, String)>);

impl LocaleMap {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self(entries)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    pub fn first(&self) -> Option<&str> {
        self.0
            .iter()
            .map(|(_, v)| v.as_str())
            .find(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact key, then the fixed fallback chain, then any value.
    pub fn pick(&self, tag: &str) -> &str {
        std::iter::once(tag)
            .chain(["pt-BR", "en-US", "pt", "en"])
            .find_map(|key| self.get(key))
            .or_else(|| self.first())
            .unwrap_or("")
    }
}

impl<'de> Deserialize<'de> for LocaleMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LocaleMapVisitor;

        impl<'de> Visitor<'de> for LocaleMapVisitor {
            type Value = LocaleMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language tags to strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    // Non-string values (nested ids, numbers) are not variants.
                    if let serde_json::Value::String(value) = map.next_value()? {
                        entries.push((key, value));
                    }
                }
                Ok(LocaleMap(entries))
            }
        }

        deserializer.deserialize_map(LocaleMapVisitor)
    }
}

/// A text field that is either a plain string or a locale map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Localizable {
    Text(String),
    Map(LocaleMap),
}

impl Localizable {
    pub fn get(&self, tag: &str) -> String {
        match self {
            Localizable::Text(text) => text.clone(),
            Localizable::Map(map) => map.pick(tag).to_string(),
        }
    }
}

impl From<&str> for Localizable {
    fn from(value: &str) -> Self {
        Localizable::Text(value.to_string())
    }
}

/// Resolve an optional localizable field; missing fields are `""`.
pub fn localized(field: Option<&Localizable>, tag: &str) -> String {
    field.map(|f| f.get(tag)).unwrap_or_default()
}
