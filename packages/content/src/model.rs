use serde::Deserialize;

use crate::locale::{LocaleMap, Localizable};

/// `{ "cards": [...] }` documents (projects, formations, contact).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardDocument<T> {
    pub cards: Vec<T>,
}

/// `{ "icons": [...] }` documents (icon sets, custom svg glyphs).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IconDocument {
    pub icons: Vec<IconEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub title: Option<Localizable>,
    pub description: Option<Localizable>,
    pub institution: Option<Localizable>,
    pub image: Option<String>,
    pub image_mobile: Option<String>,
    pub image_type: Option<String>,
    pub description_image: Option<Localizable>,
    #[serde(default)]
    pub icon_technologies: Vec<Technology>,
    pub link_repository: Option<String>,
    pub link_demo: Option<String>,
    pub date_init: Option<String>,
    pub date_end: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<FormationType>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Technology {
    #[serde(default)]
    pub name: String,
    pub icon: Option<String>,
    pub style: Option<String>,
    pub stack: Option<Stack>,
    /// `"no"` keeps the technology out of the filter buttons.
    pub filter: Option<String>,
}

impl Technology {
    pub fn filterable(&self) -> bool {
        !self
            .filter
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("no"))
    }
}

/// Shared group label for technologies, e.g. `{ "id": "frontend", "pt-BR": ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Stack {
    pub id: String,
    #[serde(flatten)]
    pub labels: LocaleMap,
}

impl Stack {
    pub fn label(&self, tag: &str) -> String {
        match self.labels.pick(tag) {
            "" => self.id.clone(),
            label => label.to_string(),
        }
    }
}

/// Formation category, e.g. `{ "id": "course", "pt-BR": "Curso", "en-US": "Course" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormationType {
    pub id: String,
    #[serde(flatten)]
    pub labels: LocaleMap,
}

impl FormationType {
    pub fn label(&self, tag: &str) -> String {
        match self.labels.pick(tag) {
            "" => self.id.clone(),
            label => label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Certificate {
    pub name: Option<Localizable>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContactLink {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    pub icon: Option<String>,
    pub style: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IconEntry {
    pub class: Option<String>,
    pub style: Option<String>,
    pub name: Option<String>,
    pub size: Option<String>,
    pub svg: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_project_card_with_localized_fields() {
        let json = r#"{
            "title": { "pt-BR": "Portfólio", "en-US": "Portfolio" },
            "description": "Site pessoal",
            "iconTechnologies": [
                { "name": "Rust", "icon": "rust", "style": "brands",
                  "stack": { "id": "backend", "pt-BR": "Back-end", "en-US": "Backend" } },
                { "name": "Git", "icon": "git-alt", "style": "brands", "filter": "no" }
            ],
            "linkRepository": "https://github.com/example/portfolio",
            "dateInit": "01/2024",
            "dateEnd": "06/2024"
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.title.unwrap().get("en-US"), "Portfolio");
        assert_eq!(card.icon_technologies.len(), 2);
        assert!(card.icon_technologies[0].filterable());
        assert!(!card.icon_technologies[1].filterable());
        let stack = card.icon_technologies[0].stack.as_ref().unwrap();
        assert_eq!(stack.id, "backend");
        assert_eq!(stack.label("pt-BR"), "Back-end");
        assert_eq!(card.date_end.as_deref(), Some("06/2024"));
    }

    #[test]
    fn formation_type_falls_back_to_id() {
        let kind: FormationType = serde_json::from_str(r#"{ "id": "course" }"#).unwrap();
        assert_eq!(kind.label("pt-BR"), "course");

        let kind: FormationType =
            serde_json::from_str(r#"{ "id": "course", "pt-BR": "Curso", "en-US": "Course" }"#)
                .unwrap();
        assert_eq!(kind.label("en-US"), "Course");
    }

    #[test]
    fn documents_without_their_array_are_rejected() {
        assert!(serde_json::from_str::<CardDocument<Card>>(r#"{ "items": [] }"#).is_err());
        assert!(serde_json::from_str::<IconDocument>(r#"{ "cards": [] }"#).is_err());
    }
}
