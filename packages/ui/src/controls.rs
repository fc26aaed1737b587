use content::{favicon_href, FontSize, MenuState, PanelState, Preferences};
use dioxus::prelude::*;

use crate::cookies::BrowserCookies;
use crate::{set_lang, use_i18n, use_site, Tr};

const CONTROLS_CSS: Asset = asset!("/assets/styling/controls.css");

const JS_WATCH_WIDTH: &str = r#"
    dioxus.send(window.innerWidth);
    window.addEventListener("resize", () => dioxus.send(window.innerWidth));
    await new Promise(() => {});
"#;

const JS_WATCH_COLOR_SCHEME: &str = r#"
    const query = window.matchMedia("(prefers-color-scheme: dark)");
    dioxus.send(query.matches);
    query.addEventListener("change", (e) => dioxus.send(e.matches));
    await new Promise(() => {});
"#;

const JS_WATCH_CLICKS: &str = r#"
    document.addEventListener("click", (e) => {
        const panel = document.getElementById("accessibility-panel");
        const trigger = document.getElementById("accessibility-trigger");
        dioxus.send([
            !!(panel && panel.contains(e.target)),
            !!(trigger && trigger.contains(e.target)),
        ]);
    });
    await new Promise(() => {});
"#;

/// Anchors of the page sections, by translation key.
const NAV_ITEMS: [(&str, &str); 5] = [
    ("#about", "menu.about"),
    ("#technologies", "menu.technologies"),
    ("#projects", "menu.projects"),
    ("#formations", "menu.formations"),
    ("#contact", "menu.contact"),
];

/// Main navigation, collapsed behind a toggle below the breakpoint.
#[component]
pub fn NavMenu() -> Element {
    let breakpoint = use_site().config.menu_breakpoint;
    let mut menu = use_signal(|| MenuState::for_viewport(0.0, breakpoint));

    use_future(move || async move {
        let mut watcher = document::eval(JS_WATCH_WIDTH);
        while let Ok(width) = watcher.recv::<f64>().await {
            let next = menu.peek().resized(width, breakpoint);
            menu.set(next);
        }
    });

    let state = menu();
    rsx! {
        document::Link { rel: "stylesheet", href: CONTROLS_CSS }
        nav { class: "menu",
            button {
                class: "menu-toggle",
                "aria-controls": "menu-links",
                "aria-expanded": state.aria_expanded(),
                onclick: move |_| menu.with_mut(|m| *m = m.toggle()),
                i { class: state.icon_class() }
            }
            ul { id: "menu-links", class: if state.is_open() { "menu-links open" } else { "menu-links" },
                for (href, key) in NAV_ITEMS {
                    li { key: "{href}",
                        a { href, Tr { name: key.to_string() } }
                    }
                }
            }
        }
    }
}

/// Flips between the two supported languages.
#[component]
pub fn LanguageToggle() -> Element {
    let i18n = use_i18n();
    let next = (i18n.locale)().toggled();
    let label = next.code().to_ascii_uppercase();
    rsx! {
        button {
            class: "language-toggle",
            lang: next.tag(),
            onclick: move |_| set_lang(i18n, next),
            "{label}"
        }
    }
}

fn resize(mut prefs: Signal<Preferences>, change: fn(FontSize) -> FontSize) {
    prefs.with_mut(|p| {
        let next = change(p.font_size);
        p.save_font_size(&BrowserCookies, next);
    });
}

fn apply_font_size(size: FontSize) {
    let css = size.css();
    spawn(async move {
        let _ = document::eval(&format!(
            r#"(function(){{ document.documentElement.style.fontSize = "{css}"; return ""; }})()"#
        ))
        .await;
    });
}

/// Font-size controls behind a trigger; any click outside both closes it.
#[component]
pub fn AccessibilityPanel() -> Element {
    let prefs = use_i18n().prefs;
    let mut panel = use_signal(PanelState::default);

    use_effect(move || apply_font_size(prefs.read().font_size));

    use_future(move || async move {
        let mut clicks = document::eval(JS_WATCH_CLICKS);
        while let Ok((inside_panel, inside_trigger)) = clicks.recv::<(bool, bool)>().await {
            let next = panel.peek().after_click(inside_panel, inside_trigger);
            if next != *panel.peek() {
                panel.set(next);
            }
        }
    });

    let state = panel();
    let size = prefs.read().font_size;
    rsx! {
        button {
            id: "accessibility-trigger",
            class: "accessibility-trigger",
            "aria-controls": "accessibility-panel",
            "aria-expanded": state.aria_expanded(),
            onclick: move |_| panel.with_mut(|p| *p = p.toggle()),
            i { class: "fa-solid fa-universal-access" }
        }
        div {
            id: "accessibility-panel",
            class: if state.is_open() { "accessibility-panel open" } else { "accessibility-panel" },
            "aria-hidden": state.aria_hidden(),
            h2 { Tr { name: "accessibility.title" } }
            div { class: "font-size",
                button { onclick: move |_| resize(prefs, FontSize::decrease), "aria-label": "A-", "A-" }
                span { class: "font-size-value", "{size}" }
                button { onclick: move |_| resize(prefs, FontSize::reset), "aria-label": "A", "A" }
                button { onclick: move |_| resize(prefs, FontSize::increase), "aria-label": "A+", "A+" }
            }
        }
    }
}

/// Keeps the favicon in step with the system colour scheme.
#[component]
pub fn Favicon() -> Element {
    let mut href = use_signal(|| favicon_href(false, 0));

    use_future(move || async move {
        let mut scheme = document::eval(JS_WATCH_COLOR_SCHEME);
        while let Ok(dark) = scheme.recv::<bool>().await {
            href.set(favicon_href(dark, chrono::Utc::now().timestamp_millis()));
        }
    });

    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: "{href}" }
    }
}
