//! Icon class normalisation and inline SVG overrides.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::model::IconEntry;

/// Marker every icon-framework class carries.
pub const CLASS_PREFIX: &str = "fa-";
/// Style used when an icon does not name one.
pub const BASE_STYLE: &str = "fa-solid";

fn prefixed(token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() {
        None
    } else if token.starts_with(CLASS_PREFIX) {
        Some(token.to_string())
    } else {
        Some(format!("{CLASS_PREFIX}{token}"))
    }
}

/// Build the class string for a `(style, icon, size)` triple.
///
/// Each part is prefixed with `fa-` unless it already is, empty parts are
/// dropped and the style falls back to [`BASE_STYLE`].
pub fn fa_class(style: Option<&str>, icon: Option<&str>, size: Option<&str>) -> String {
    let style = style
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(BASE_STYLE);
    [Some(style), icon, size]
        .into_iter()
        .flatten()
        .filter_map(prefixed)
        .collect::<Vec<_>>()
        .join(" ")
}

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static regex"))
}

fn hex_paint() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r#"\s*(?:fill|stroke)=['"]#[^'"]*['"]"#)
}

fn svg_open_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?s)<svg\b([^>]*)>")
}

fn size_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r#"\s+(?:width|height)=['"][^'"]*['"]"#)
}

fn class_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r#"\sclass=(['"])([^'"]*)['"]"#)
}

fn shape_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?s)<(path|circle|rect|line|polygon|ellipse)\b([^>]*?)(/?)>")
}

fn fill_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r#"\sfill=['"]([^'"]*)['"]"#)
}

fn stroke_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r#"\sstroke=['"]([^'"]*)['"]"#)
}

/// Make a custom SVG follow the current text colour.
///
/// Hard-coded hex paints are removed, the root loses its fixed size, gains a
/// default `viewBox` and the `svg-icon` class, and every shape is painted
/// with `currentColor` (fills set to `none` stay unfilled).
pub fn normalize_svg(svg: &str) -> String {
    let svg = hex_paint().replace_all(svg, "");

    let svg = svg_open_tag().replace(&svg, |caps: &regex::Captures| {
        let mut attrs = size_attr().replace_all(&caps[1], "").into_owned();
        if !attrs.contains("viewBox") {
            attrs.push_str(r#" viewBox="0 0 24 24""#);
        }
        attrs = match class_attr().captures(&attrs) {
            Some(class) => {
                let merged = format!(r#" class="{} svg-icon""#, &class[2]);
                class_attr().replace(&attrs, merged.as_str()).into_owned()
            }
            None => format!(r#" class="svg-icon"{attrs}"#),
        };
        format!("<svg{attrs}>")
    });

    let fill = fill_attr();
    let stroke = stroke_attr();
    shape_tag()
        .replace_all(&svg, |caps: &regex::Captures| {
            let mut attrs = caps[2].to_string();
            let fill_none = fill
                .captures(&attrs)
                .is_some_and(|c| c[1].trim() == "none");
            if !fill_none {
                attrs = fill.replace_all(&attrs, "").into_owned();
                attrs.push_str(r#" fill="currentColor""#);
            }
            if stroke.is_match(&attrs) {
                attrs = stroke
                    .replace_all(&attrs, r#" stroke="currentColor""#)
                    .into_owned();
            }
            format!("<{}{}{}>", &caps[1], attrs, &caps[3])
        })
        .into_owned()
}

/// Custom vector glyphs keyed by icon class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IconOverrides {
    by_class: HashMap<String, String>,
}

impl IconOverrides {
    pub fn from_entries(entries: &[IconEntry]) -> Self {
        let by_class = entries
            .iter()
            .filter_map(|entry| {
                let class = entry.class.as_deref()?.trim();
                let svg = entry.svg.as_deref()?;
                if class.is_empty() || svg.trim().is_empty() {
                    return None;
                }
                Some((class.to_string(), normalize_svg(svg)))
            })
            .collect();
        Self { by_class }
    }

    pub fn len(&self) -> usize {
        self.by_class.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_class.is_empty()
    }

    /// Markup for the first class of `classes` that has an override.
    pub fn override_for(&self, classes: &str) -> Option<&str> {
        classes
            .split_whitespace()
            .find_map(|class| self.by_class.get(class))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_style_and_prefixes_tokens() {
        assert_eq!(fa_class(None, Some("github"), None), "fa-solid fa-github");
        assert_eq!(
            fa_class(Some("brands"), Some("rust"), Some("3x")),
            "fa-brands fa-rust fa-3x"
        );
        assert_eq!(fa_class(Some(""), None, Some("")), "fa-solid");
    }

    #[test]
    fn prefixed_inputs_are_idempotent() {
        let once = fa_class(Some("fa-brands"), Some("fa-rust"), Some("fa-2x"));
        assert_eq!(once, "fa-brands fa-rust fa-2x");
        let parts: Vec<&str> = once.split(' ').collect();
        let twice = fa_class(Some(parts[0]), Some(parts[1]), Some(parts[2]));
        assert_eq!(once, twice);
    }

    #[test]
    fn normalizes_custom_svg_to_current_color() {
        let svg = r##"<svg width="32" height="32" xmlns="http://www.w3.org/2000/svg"><path d="M0 0" fill="#ff0000"/><circle r="2" stroke="red"/><rect fill="none"/></svg>"##;
        let out = normalize_svg(svg);
        assert!(!out.contains("width="));
        assert!(!out.contains("#ff0000"));
        assert!(out.contains(r#"viewBox="0 0 24 24""#));
        assert!(out.contains(r#"class="svg-icon""#));
        assert!(out.contains(r#"<path d="M0 0" fill="currentColor"/>"#));
        assert!(out.contains(r#"stroke="currentColor""#));
        assert!(out.contains(r#"<rect fill="none"/>"#));
    }

    #[test]
    fn keeps_existing_view_box_and_class() {
        let svg = r#"<svg class="logo" viewBox="0 0 16 16"><path d="M1 1"/></svg>"#;
        let out = normalize_svg(svg);
        assert!(out.starts_with(r#"<svg class="logo svg-icon" viewBox="0 0 16 16">"#));
        assert_eq!(out.matches("viewBox").count(), 1);
    }

    #[test]
    fn overrides_match_any_class_of_an_icon() {
        let entries = vec![
            IconEntry {
                class: Some("fa-dioxus".into()),
                svg: Some("<svg><path d=\"M0\"/></svg>".into()),
                ..IconEntry::default()
            },
            IconEntry {
                class: Some("fa-empty".into()),
                svg: None,
                ..IconEntry::default()
            },
        ];
        let overrides = IconOverrides::from_entries(&entries);
        assert_eq!(overrides.len(), 1);
        assert!(overrides
            .override_for("fa-brands fa-dioxus fa-3x")
            .is_some_and(|svg| svg.contains("currentColor")));
        assert!(overrides.override_for("fa-brands fa-empty").is_none());
    }
}
