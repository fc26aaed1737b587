//! Loads the JSON-driven sections, then the translations and the last-update
//! date once the page is ready.

use std::rc::Rc;
use std::time::Duration;

use content::translation::load_translations;
use content::{
    fetch_last_commit_date, ContentKind, ContentOrchestrator, HttpTransport, LoadOutcome, PageContent,
    SiteConfig,
};
use dioxus::prelude::*;

/// Configuration and network stack shared by every widget.
#[derive(Clone)]
pub struct SiteContext {
    pub config: Rc<SiteConfig>,
    pub transport: Rc<HttpTransport>,
    pub orchestrator: ContentOrchestrator<Rc<HttpTransport>>,
}

/// The latest finished load. `None` until the first one completes.
#[derive(Clone, Copy, PartialEq)]
pub struct DynamicContent {
    pub page: Signal<Option<PageContent>>,
    pub last_update: Signal<Option<chrono::NaiveDate>>,
}

fn page_base_url() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|w| w.location().href().ok())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Builds the shared site context. Only the sections in `layout` are loaded.
#[component]
pub fn SiteProvider(
    #[props(default = ContentKind::ALL.to_vec())] layout: Vec<ContentKind>,
    children: Element,
) -> Element {
    let site = use_hook(|| {
        let config = SiteConfig::from_build_env();
        let transport = Rc::new(HttpTransport::new(page_base_url().as_deref()));
        SiteContext {
            orchestrator: ContentOrchestrator::new(transport.clone(), config.clone())
                .with_layout(&layout),
            config: Rc::new(config),
            transport,
        }
    });
    use_context_provider(|| site);
    rsx! { {children} }
}

pub fn use_site() -> SiteContext {
    use_context::<SiteContext>()
}

pub fn use_dynamic_content() -> DynamicContent {
    use_context::<DynamicContent>()
}

/// Re-renders every section whenever the locale changes; the newest load wins.
#[component]
pub fn ContentProvider(children: Element) -> Element {
    let site = use_site();
    let i18n = crate::use_i18n();
    let mut page = use_signal(|| None::<PageContent>);
    let mut last_update = use_signal(|| None::<chrono::NaiveDate>);
    use_context_provider(|| DynamicContent { page, last_update });

    let orchestrator = site.orchestrator.clone();
    let _load = use_resource(move || {
        let orchestrator = orchestrator.clone();
        let locale = (i18n.locale)();
        async move {
            match orchestrator.load(locale).await {
                LoadOutcome::Ready(next) => {
                    for (kind, err) in &next.failures {
                        tracing::warn!("dynamic.load: {} left empty: {err}", kind.container_id());
                    }
                    page.set(Some(next));
                }
                LoadOutcome::Superseded => {
                    tracing::debug!("dynamic.load: {} superseded", locale.code());
                }
            }
        }
    });

    // Translations start when the content is ready or after the fallback
    // delay, whichever comes first.
    let mut fallback_elapsed = use_signal(|| false);
    let delay = site.config.translation_fallback_ms;
    use_future(move || async move {
        gloo_timers::future::sleep(Duration::from_millis(delay as u64)).await;
        fallback_elapsed.set(true);
    });

    let mut translations_started = use_signal(|| false);
    let site_for_translations = site.clone();
    use_effect(move || {
        let ready = page.read().is_some();
        if !(ready || fallback_elapsed()) || *translations_started.peek() {
            return;
        }
        translations_started.set(true);
        let site = site_for_translations.clone();
        let mut engine = i18n.engine;
        spawn(async move {
            let tables = load_translations(site.orchestrator.fetcher(), &site.config).await;
            engine.with_mut(|e| e.set_tables(tables));
        });
    });

    let mut badge_started = use_signal(|| false);
    use_effect(move || {
        if page.read().is_none() || *badge_started.peek() {
            return;
        }
        badge_started.set(true);
        let site = site.clone();
        let mut engine = i18n.engine;
        spawn(async move {
            match fetch_last_commit_date(site.transport.as_ref(), &site.config).await {
                Ok(date) => {
                    engine.with_mut(|e| e.set_last_update(date));
                    last_update.set(Some(date));
                }
                Err(e) => tracing::warn!("dynamic.badge: {e}"),
            }
        });
    });

    rsx! { {children} }
}
