use chrono::NaiveDate;
use tracing::warn;

use crate::locale::Locale;

/// Where the site's data lives and the few constants its widgets need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Prefix of every JSON document path.
    pub data_root: String,
    pub github_owner: String,
    pub github_repo: String,
    /// Used for the `{{age}}` token.
    pub birth_date: NaiveDate,
    /// Viewport width (px) above which the menu is always open.
    pub menu_breakpoint: u32,
    /// How long translations wait for the dynamic content before loading anyway.
    pub translation_fallback_ms: u32,
    pub icon_size: String,
    pub contact_icon_size: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_root: "src/json".to_string(),
            github_owner: "JLBBARCO".to_string(),
            github_repo: "portfolio".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2008, 9, 24).unwrap_or_default(),
            menu_breakpoint: 990,
            translation_fallback_ms: 500,
            icon_size: "3x".to_string(),
            contact_icon_size: "2x".to_string(),
        }
    }
}

impl SiteConfig {
    /// Defaults overridden by `PORTFOLIO_*` keys from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(owner) = value("PORTFOLIO_GITHUB_OWNER") {
            config.github_owner = owner;
        }
        if let Some(repo) = value("PORTFOLIO_GITHUB_REPO") {
            config.github_repo = repo;
        }
        if let Some(root) = value("PORTFOLIO_DATA_ROOT") {
            config.data_root = root.trim_end_matches('/').to_string();
        }
        if let Some(raw) = value("PORTFOLIO_BIRTH_DATE") {
            match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                Ok(date) => config.birth_date = date,
                Err(e) => warn!("config: ignoring PORTFOLIO_BIRTH_DATE={raw}: {e}"),
            }
        }
        config
    }

    /// Overrides baked in at compile time; a page has no process environment.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            match key {
                "PORTFOLIO_GITHUB_OWNER" => option_env!("PORTFOLIO_GITHUB_OWNER"),
                "PORTFOLIO_GITHUB_REPO" => option_env!("PORTFOLIO_GITHUB_REPO"),
                "PORTFOLIO_DATA_ROOT" => option_env!("PORTFOLIO_DATA_ROOT"),
                "PORTFOLIO_BIRTH_DATE" => option_env!("PORTFOLIO_BIRTH_DATE"),
                _ => None,
            }
            .map(str::to_string)
        })
    }

    fn data(&self, rest: &str) -> String {
        format!("{}/{rest}", self.data_root)
    }

    pub fn projects_path(&self) -> String {
        self.data("areas/projects.json")
    }

    pub fn formations_path(&self) -> String {
        self.data("areas/formation.json")
    }

    pub fn techs_this_site_path(&self) -> String {
        self.data("areas/techs-this-site.json")
    }

    pub fn contact_path(&self) -> String {
        self.data("areas/contact.json")
    }

    pub fn svg_icons_path(&self) -> String {
        self.data("icons/svg.json")
    }

    pub fn translation_path(&self, locale: Locale) -> String {
        self.data(&format!("translate/{}/translation.json", locale.code()))
    }

    /// Résumé PDF offered for download in `locale`.
    pub fn resume_path(&self, locale: Locale) -> String {
        match locale {
            Locale::Pt => "src/assets/documents/Curriculo_pt-BR.pdf".to_string(),
            Locale::En => "src/assets/documents/Resume_en-US.pdf".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_bundled_data() {
        let config = SiteConfig::default();
        assert_eq!(config.projects_path(), "src/json/areas/projects.json");
        assert_eq!(
            config.translation_path(Locale::Pt),
            "src/json/translate/pt/translation.json"
        );
        assert_eq!(config.menu_breakpoint, 990);
        assert_eq!(config.birth_date, NaiveDate::from_ymd_opt(2008, 9, 24).unwrap());
    }

    #[test]
    fn lookup_overrides_fields() {
        let config = SiteConfig::from_lookup(lookup(&[
            ("PORTFOLIO_GITHUB_OWNER", "someone"),
            ("PORTFOLIO_GITHUB_REPO", " site "),
            ("PORTFOLIO_DATA_ROOT", "data/"),
            ("PORTFOLIO_BIRTH_DATE", "1990-01-31"),
        ]));
        assert_eq!(config.github_owner, "someone");
        assert_eq!(config.github_repo, "site");
        assert_eq!(config.contact_path(), "data/areas/contact.json");
        assert_eq!(config.birth_date, NaiveDate::from_ymd_opt(1990, 1, 31).unwrap());
    }

    #[test]
    fn invalid_or_blank_values_keep_defaults() {
        let config = SiteConfig::from_lookup(lookup(&[
            ("PORTFOLIO_BIRTH_DATE", "31/01/1990"),
            ("PORTFOLIO_GITHUB_OWNER", "  "),
        ]));
        assert_eq!(config, SiteConfig::default());
    }
}
