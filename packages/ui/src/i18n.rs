use chrono::{Local, NaiveDate};
use content::translation::{LanguageChange, Segment, TranslationEngine};
use content::{Locale, Preferences};
use dioxus::prelude::*;

use crate::cookies::{navigator_language, BrowserCookies};

/// Active locale and the translation engine rendering static page text.
#[derive(Clone, Copy, PartialEq)]
pub struct I18n {
    pub locale: Signal<Locale>,
    pub engine: Signal<TranslationEngine>,
    pub prefs: Signal<Preferences>,
}

/// Provide [`I18n`] to the tree. The starting locale comes from the
/// `language` cookie, then the browser language.
#[component]
pub fn I18nProvider(children: Element) -> Element {
    let site = crate::use_site();
    let prefs =
        use_signal(|| Preferences::load(&BrowserCookies, navigator_language().as_deref()));
    let start = prefs.peek().locale;
    let locale = use_signal(|| start);
    let engine = use_signal(|| TranslationEngine::new(start, site.config.birth_date));
    use_context_provider(|| I18n {
        locale,
        engine,
        prefs,
    });

    use_hook(move || set_document_lang(start.tag()));

    let title = engine.read().page_title().to_string();
    rsx! {
        document::Title { "{title}" }
        {children}
    }
}

pub fn use_i18n() -> I18n {
    use_context::<I18n>()
}

pub fn use_lang() -> Signal<Locale> {
    use_i18n().locale
}

fn set_document_lang(lang: &'static str) {
    spawn(async move {
        let _ = document::eval(&format!(
            r#"(function(){{ document.documentElement.lang = "{lang}"; return ""; }})()"#
        ))
        .await;
    });
}

/// Switch the page language and persist the choice.
pub fn set_lang(i18n: I18n, next: Locale) {
    let (mut locale, mut engine, mut prefs) = (i18n.locale, i18n.engine, i18n.prefs);
    if locale() == next {
        return;
    }
    let change: LanguageChange = engine.with_mut(|e| e.set_locale(next));
    tracing::info!("i18n.set_lang: {} ({})", change.locale.code(), change.html_lang);
    set_document_lang(change.html_lang);
    prefs.with_mut(|p| p.save_locale(&BrowserCookies, change.locale));
    locale.set(change.locale);
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Translated text of `key` with tokens substituted.
pub fn t(engine: &TranslationEngine, key: &str) -> String {
    engine.render(key, today())
}

/// Translated markup of `name`, keeping only inline spans.
#[component]
pub fn Tr(name: String) -> Element {
    let engine = use_i18n().engine;
    let segments = engine.read().markup(&name, today());
    rsx! {
        {segments.into_iter().map(|segment| match segment {
            Segment::Text(text) => rsx! { "{text}" },
            Segment::Span { class, text } => rsx! {
                span { class: class.unwrap_or_default(), "{text}" }
            },
        })}
    }
}
