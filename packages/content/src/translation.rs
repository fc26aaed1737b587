//! Locale tables for the static page text and the `{{age}}`/`{{date}}` tokens.

use chrono::NaiveDate;
use futures_util::future::join;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::dates::{age_on, format_long_date};
use crate::error::ContentError;
use crate::fetch::{ResilientFetcher, Transport};
use crate::locale::Locale;

pub const AGE_TOKEN: &str = "{{age}}";
pub const DATE_TOKEN: &str = "{{date}}";

/// Flat `key -> text` table of one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable(HashMap<String, String>);

impl TranslationTable {
    /// String values of a JSON object; other values are ignored.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(
                map.into_iter()
                    .filter_map(|(k, v)| match v {
                        Value::String(s) => Some((k, s)),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTables {
    pub pt: TranslationTable,
    pub en: TranslationTable,
}

impl TranslationTables {
    pub fn table(&self, locale: Locale) -> &TranslationTable {
        match locale {
            Locale::Pt => &self.pt,
            Locale::En => &self.en,
        }
    }
}

/// Fetch both locale tables concurrently. A table that fails to load is
/// logged and left empty, so its keys render as themselves.
pub async fn load_translations<T: Transport>(
    fetcher: &ResilientFetcher<T>,
    config: &SiteConfig,
) -> TranslationTables {
    let pt_path = config.translation_path(Locale::Pt);
    let en_path = config.translation_path(Locale::En);
    let (pt, en) = join(
        fetcher.fetch_json::<Value>(&pt_path),
        fetcher.fetch_json::<Value>(&en_path),
    )
    .await;

    let table = |locale: Locale, result: Result<Value, ContentError>| match result {
        Ok(value) => TranslationTable::from_value(value),
        Err(e) => {
            warn!("translation.load: {} table unavailable: {e}", locale.code());
            TranslationTable::default()
        }
    };
    let tables = TranslationTables {
        pt: table(Locale::Pt, pt),
        en: table(Locale::En, en),
    };
    info!(
        "translation.load: pt={} en={} keys",
        tables.pt.len(),
        tables.en.len()
    );
    tables
}

/// A piece of sanitized translated markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    /// Text wrapped in the one allowed inline element.
    Span { class: Option<String>, text: String },
}

/// What the page has to change when the language switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChange {
    pub locale: Locale,
    /// Value for the document `lang` attribute.
    pub html_lang: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationEngine {
    tables: TranslationTables,
    locale: Locale,
    last_update: Option<NaiveDate>,
    birth_date: NaiveDate,
}

impl TranslationEngine {
    pub fn new(locale: Locale, birth_date: NaiveDate) -> Self {
        Self {
            tables: TranslationTables::default(),
            locale,
            last_update: None,
            birth_date,
        }
    }

    pub fn with_tables(mut self, tables: TranslationTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn set_tables(&mut self, tables: TranslationTables) {
        self.tables = tables;
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn last_update(&self) -> Option<NaiveDate> {
        self.last_update
    }

    pub fn set_locale(&mut self, locale: Locale) -> LanguageChange {
        debug!("translation.set_locale: {}", locale.code());
        self.locale = locale;
        LanguageChange {
            locale,
            html_lang: locale.tag(),
        }
    }

    pub fn set_last_update(&mut self, date: NaiveDate) {
        self.last_update = Some(date);
    }

    /// Translation of `key` in the active locale, or the key itself.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.tables.table(self.locale).get(key).unwrap_or(key)
    }

    pub fn render(&self, key: &str, today: NaiveDate) -> String {
        self.substitute(self.t(key), today)
    }

    /// Replace `{{age}}` and, once known, `{{date}}` in `text`.
    pub fn substitute(&self, text: &str, today: NaiveDate) -> String {
        let mut out = text.to_string();
        if out.contains(AGE_TOKEN) {
            out = out.replace(AGE_TOKEN, &age_on(self.birth_date, today).to_string());
        }
        if let Some(date) = self.last_update {
            if out.contains(DATE_TOKEN) {
                out = out.replace(DATE_TOKEN, &format_long_date(date, self.locale));
            }
        }
        out
    }

    pub fn markup(&self, key: &str, today: NaiveDate) -> Vec<Segment> {
        sanitize(&self.render(key, today))
    }

    pub fn page_title(&self) -> &str {
        self.t("webTitle")
    }
}

fn tag_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)([^>]*)>").expect("static regex"))
}

fn class_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(r#"class\s*=\s*["']([^"']*)["']"#).expect("static regex"))
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

fn flush(buffer: &mut String, span: &Option<Option<String>>, segments: &mut Vec<Segment>) {
    if buffer.is_empty() {
        return;
    }
    let text = decode_entities(buffer);
    buffer.clear();
    segments.push(match span {
        Some(class) => Segment::Span {
            class: class.clone(),
            text,
        },
        None => Segment::Text(text),
    });
}

/// Split translated markup into text and `<span>` segments. Every other tag
/// is dropped and its content kept as plain text; spans do not nest.
pub fn sanitize(markup: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut span: Option<Option<String>> = None;
    let mut depth = 0usize;
    let mut buffer = String::new();

    let mut cursor = 0;
    for caps in tag_pattern().captures_iter(markup) {
        let Some(whole) = caps.get(0) else { continue };
        buffer.push_str(&markup[cursor..whole.start()]);
        cursor = whole.end();

        if !caps[2].eq_ignore_ascii_case("span") {
            continue;
        }
        let closing = !caps[1].is_empty();
        if closing {
            if depth == 0 {
                continue;
            }
            depth -= 1;
            if depth == 0 {
                flush(&mut buffer, &span, &mut segments);
                span = None;
            }
        } else {
            if depth == 0 {
                flush(&mut buffer, &span, &mut segments);
                let class = class_pattern()
                    .captures(&caps[3])
                    .map(|c| c[1].trim().to_string())
                    .filter(|c| !c.is_empty());
                span = Some(class);
            }
            depth += 1;
        }
    }
    buffer.push_str(&markup[cursor..]);
    flush(&mut buffer, &span, &mut segments);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tables() -> TranslationTables {
        TranslationTables {
            pt: [
                ("lastUpdate", "Última atualização: {{date}}"),
                ("about", "Tenho {{age}} anos."),
                ("webTitle", "Portfólio"),
            ]
            .into_iter()
            .collect(),
            en: [
                ("lastUpdate", "Last Update: {{date}}"),
                ("about", "I am <span class=\"accent\">{{age}}</span> years <b>old</b>."),
                ("webTitle", "Portfolio"),
            ]
            .into_iter()
            .collect(),
        }
    }

    fn engine(locale: Locale) -> TranslationEngine {
        TranslationEngine::new(locale, date(2008, 9, 24)).with_tables(tables())
    }

    #[test]
    fn unknown_keys_render_as_themselves() {
        let engine = engine(Locale::En);
        assert_eq!(engine.t("missing.key"), "missing.key");
        assert_eq!(engine.page_title(), "Portfolio");
    }

    #[test]
    fn date_token_waits_for_the_last_update() {
        let mut engine = engine(Locale::En);
        let today = date(2025, 10, 1);
        assert_eq!(engine.render("lastUpdate", today), "Last Update: {{date}}");
        engine.set_last_update(date(2025, 9, 24));
        assert_eq!(
            engine.render("lastUpdate", today),
            "Last Update: September 24, 2025"
        );
        engine.set_locale(Locale::Pt);
        assert_eq!(
            engine.render("lastUpdate", today),
            "Última atualização: 24 de setembro de 2025"
        );
    }

    #[test]
    fn either_arrival_order_gives_the_same_label() {
        let today = date(2025, 10, 1);
        let commit = date(2025, 9, 24);

        let mut tables_first = TranslationEngine::new(Locale::Pt, date(2008, 9, 24));
        tables_first.set_tables(tables());
        tables_first.set_last_update(commit);

        let mut date_first = TranslationEngine::new(Locale::Pt, date(2008, 9, 24));
        date_first.set_last_update(commit);
        date_first.set_tables(tables());

        assert_eq!(
            tables_first.render("lastUpdate", today),
            date_first.render("lastUpdate", today)
        );
    }

    #[test]
    fn age_is_computed_from_birth_date() {
        let engine = engine(Locale::Pt);
        assert_eq!(engine.render("about", date(2025, 9, 23)), "Tenho 16 anos.");
        assert_eq!(engine.render("about", date(2025, 9, 24)), "Tenho 17 anos.");
        assert_eq!(engine.substitute("{{age}}!", date(2025, 9, 24)), "17!");
    }

    #[test]
    fn locale_switch_is_idempotent() {
        let today = date(2025, 10, 1);
        let direct = engine(Locale::En);
        let mut switched = engine(Locale::En);
        switched.set_locale(Locale::Pt);
        let change = switched.set_locale(Locale::En);
        assert_eq!(change.locale, Locale::En);
        assert_eq!(change.html_lang, "en-US");
        assert_eq!(switched.markup("about", today), direct.markup("about", today));
    }

    #[test]
    fn markup_keeps_spans_and_strips_other_tags() {
        let segments = engine(Locale::En).markup("about", date(2025, 10, 1));
        assert_eq!(
            segments,
            vec![
                Segment::Text("I am ".into()),
                Segment::Span {
                    class: Some("accent".into()),
                    text: "17".into()
                },
                Segment::Text(" years old.".into()),
            ]
        );
    }

    #[test]
    fn sanitizer_drops_scripts_and_decodes_entities() {
        assert_eq!(
            sanitize("<script>alert(1)</script> &amp; <span>x</span></span>"),
            vec![
                Segment::Text("alert(1) & ".into()),
                Segment::Span {
                    class: None,
                    text: "x".into()
                },
            ]
        );
        assert_eq!(sanitize(""), Vec::<Segment>::new());
    }

    #[test]
    fn tables_ignore_non_string_values() {
        let table = TranslationTable::from_value(serde_json::json!({
            "a": "A", "n": 1, "nested": { "b": "B" }
        }));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a"), Some("A"));
        assert!(TranslationTable::from_value(serde_json::json!([1])).is_empty());
    }

    #[tokio::test]
    async fn a_missing_table_degrades_to_keys() {
        use crate::test_utils::FakeTransport;
        let transport = FakeTransport::new().with_json(
            "src/json/translate/pt/translation.json",
            r#"{"webTitle":"Portfólio"}"#,
        );
        let fetcher = ResilientFetcher::new(transport);
        let tables = load_translations(&fetcher, &SiteConfig::default()).await;
        assert_eq!(tables.pt.get("webTitle"), Some("Portfólio"));
        assert!(tables.en.is_empty());
    }
}
