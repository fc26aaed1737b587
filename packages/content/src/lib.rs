//! Platform-independent core of the portfolio: data model, fetching,
//! localized rendering, translations and reader preferences.

pub mod accent;
pub mod badge;
pub mod config;
pub mod dates;
pub mod error;
pub mod fetch;
pub mod icons;
pub mod locale;
pub mod model;
pub mod orchestrator;
pub mod preferences;
pub mod render;
pub mod translation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use accent::{average_color, AccentPalette, Rgb, DEFAULT_ACCENT};
pub use badge::{badge_text, commits_url, fetch_last_commit_date};
pub use config::SiteConfig;
pub use error::{BadgeError, ContentError, FetchFailure, LastAttempt};
pub use fetch::{HttpTransport, RawResponse, ResilientFetcher, Transport};
pub use icons::{fa_class, IconOverrides};
pub use locale::{localized, resolve_locale, Locale, Localizable};
pub use model::{Card, CardDocument, ContactLink, IconDocument, IconEntry, Technology};
pub use orchestrator::{ContentOrchestrator, LoadOutcome, PageContent};
pub use preferences::{
    carousel_wheel_scroll, favicon_href, parse_cookies, set_cookie_line, CookieStore, FontSize, MenuState, PanelState,
    Preferences,
};
pub use render::{ContentKind, FilterState, Section};
pub use translation::{
    load_translations, LanguageChange, Segment, TranslationEngine, TranslationTables,
};
