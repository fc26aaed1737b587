//! Reader preferences and the small pieces of page chrome state.

use std::fmt;
use tracing::debug;

use crate::locale::{resolve_locale, Locale};

pub const LANGUAGE_COOKIE: &str = "language";
pub const FONT_SIZE_COOKIE: &str = "fontSize";
const COOKIE_ATTRIBUTES: &str = "path=/; max-age=31536000; SameSite=Lax";

/// Name/value pairs of a `document.cookie` string, values percent-decoded.
pub fn parse_cookies(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = value.trim();
            let value = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());
            Some((name.to_string(), value))
        })
        .collect()
}

/// A one-year, site-wide cookie assignment for `document.cookie`.
pub fn set_cookie_line(name: &str, value: &str) -> String {
    format!("{name}={}; {COOKIE_ATTRIBUTES}", urlencoding::encode(value))
}

/// Where preferences are persisted.
pub trait CookieStore {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&self, name: &str, value: &str);
}

/// Root font size in tenths of an em.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontSize(u8);

impl FontSize {
    pub const MIN: FontSize = FontSize(6);
    pub const MAX: FontSize = FontSize(30);
    pub const DEFAULT: FontSize = FontSize(10);

    pub fn from_tenths(tenths: i32) -> Self {
        FontSize(tenths.clamp(Self::MIN.0 as i32, Self::MAX.0 as i32) as u8)
    }

    pub fn tenths(self) -> u8 {
        self.0
    }

    pub fn increase(self) -> Self {
        Self::from_tenths(self.0 as i32 + 1)
    }

    pub fn decrease(self) -> Self {
        Self::from_tenths(self.0 as i32 - 1)
    }

    pub fn reset(self) -> Self {
        Self::DEFAULT
    }

    /// Parse a stored value such as `1.2em` or `1.2`.
    pub fn parse(raw: &str) -> Option<Self> {
        let number = raw.trim().trim_end_matches("em").trim();
        let em: f64 = number.parse().ok()?;
        if !em.is_finite() {
            return None;
        }
        Some(Self::from_tenths((em * 10.0).round() as i32))
    }

    /// CSS value, e.g. `1.2em`.
    pub fn css(self) -> String {
        self.to_string()
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}em", self.0 / 10, self.0 % 10)
    }
}

/// Locale and font size of the current reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub locale: Locale,
    pub font_size: FontSize,
}

impl Preferences {
    pub fn load(store: &impl CookieStore, navigator_language: Option<&str>) -> Self {
        let cookie = store.get(LANGUAGE_COOKIE);
        let locale = resolve_locale(cookie.as_deref(), navigator_language);
        let font_size = store
            .get(FONT_SIZE_COOKIE)
            .and_then(|raw| FontSize::parse(&raw))
            .unwrap_or_default();
        debug!(
            "preferences.load: locale={} font_size={font_size}",
            locale.code()
        );
        Self { locale, font_size }
    }

    pub fn save_locale(&mut self, store: &impl CookieStore, locale: Locale) {
        self.locale = locale;
        store.set(LANGUAGE_COOKIE, locale.code());
    }

    pub fn save_font_size(&mut self, store: &impl CookieStore, size: FontSize) {
        self.font_size = size;
        store.set(FONT_SIZE_COOKIE, &size.css());
    }
}

/// Main navigation menu: always open on wide viewports.
///
/// The toggle icon only changes when the reader toggles the menu; a
/// viewport change shows or hides the links but leaves the icon alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
    icon_open: bool,
}

impl MenuState {
    pub fn for_viewport(width: f64, breakpoint: u32) -> Self {
        Self {
            open: width > breakpoint as f64,
            icon_open: false,
        }
    }

    /// Visibility for the new `width`, keeping the current icon.
    pub fn resized(self, width: f64, breakpoint: u32) -> Self {
        Self {
            open: width > breakpoint as f64,
            ..self
        }
    }

    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(self) -> Self {
        Self {
            open: !self.open,
            icon_open: !self.open,
        }
    }

    pub fn icon_class(self) -> &'static str {
        if self.icon_open {
            "fa-solid fa-xmark"
        } else {
            "fa-solid fa-bars"
        }
    }

    pub fn aria_expanded(self) -> &'static str {
        bool_attr(self.open)
    }
}

/// Accessibility panel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelState {
    open: bool,
}

impl PanelState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(self) -> Self {
        Self { open: !self.open }
    }

    /// State after a document click; clicks outside panel and trigger close it.
    pub fn after_click(self, inside_panel: bool, inside_trigger: bool) -> Self {
        if inside_panel || inside_trigger {
            self
        } else {
            Self { open: false }
        }
    }

    pub fn aria_expanded(self) -> &'static str {
        bool_attr(self.open)
    }

    pub fn aria_hidden(self) -> &'static str {
        bool_attr(!self.open)
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

pub const FAVICON_DARK: &str = "favicon/code-dark.svg";
pub const FAVICON_LIGHT: &str = "favicon/code-light.svg";

/// Favicon for the colour scheme, cache-busted with `timestamp`.
pub fn favicon_href(dark: bool, timestamp: i64) -> String {
    let base = if dark { FAVICON_DARK } else { FAVICON_LIGHT };
    format!("{base}?v={timestamp}")
}

pub const CAROUSEL_WHEEL_SPEED: f64 = 2.0;

/// Horizontal scroll for a vertical wheel turn over the carousel, or `None`
/// when the carousel is already at the edge the wheel points to and the
/// page should scroll instead.
pub fn carousel_wheel_scroll(
    scroll_left: f64,
    client_width: f64,
    scroll_width: f64,
    delta_y: f64,
) -> Option<f64> {
    let at_start = scroll_left <= 0.0;
    let at_end = scroll_left + client_width >= scroll_width - 10.0;
    if (!at_end && delta_y > 0.0) || (!at_start && delta_y < 0.0) {
        Some(delta_y * CAROUSEL_WHEEL_SPEED)
    } else {
        None
    }
}
