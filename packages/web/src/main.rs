use content::{ContentKind, SiteConfig};
use dioxus::prelude::*;

use views::Home;

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(PageChrome)]
    #[route("/")]
    Home {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Dynamic sections the home page has containers for.
const PAGE_SECTIONS: [ContentKind; 5] = [
    ContentKind::Technologies,
    ContentKind::Projects,
    ContentKind::Formations,
    ContentKind::TechsThisSite,
    ContentKind::Contact,
];

fn main() {
    install_panic_hook();
    dioxus::launch(App);
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}

fn log_runtime_config() {
    let config = SiteConfig::from_build_env();
    tracing::info!(
        "startup: data_root={} repo={}/{} menu_breakpoint={}px translation_fallback={}ms",
        config.data_root,
        config.github_owner,
        config.github_repo,
        config.menu_breakpoint,
        config.translation_fallback_ms,
    );
    let defaults = SiteConfig::default();
    if config.data_root != defaults.data_root {
        tracing::warn!(
            "startup: PORTFOLIO_DATA_ROOT overrides the bundled data at {}",
            defaults.data_root
        );
    }
}

#[component]
fn App() -> Element {
    use_hook(log_runtime_config);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        ui::PortfolioTheme {}
        ui::Favicon {}
        ui::SiteProvider {
            layout: PAGE_SECTIONS.to_vec(),
            ui::I18nProvider {
                ui::ContentProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}

/// Header with the navigation and accessibility controls around the routed page.
#[component]
fn PageChrome() -> Element {
    rsx! {
        header { class: "header",
            Link { class: "brand", to: Route::Home {},
                i { class: "fa-solid fa-code" }
                span { class: "brand_name", ui::Tr { name: "header.name" } }
            }
            ui::NavMenu {}
            div { class: "header_tools",
                ui::LanguageToggle {}
                ui::AccessibilityPanel {}
            }
        }
        main { class: "container", Outlet::<Route> {} }
    }
}
