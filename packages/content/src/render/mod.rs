//! Card renderers: one JSON document in, one localized section out.

use futures_util::future::join;
use tracing::{debug, warn};

use crate::config::SiteConfig;
use crate::error::ContentError;
use crate::fetch::{ResilientFetcher, Transport};
use crate::locale::Locale;
use crate::model::{Card, CardDocument, ContactLink, IconDocument};

mod cards;
mod facets;

pub use cards::{
    render_contacts, render_formations, render_icon_set, render_projects, render_technologies,
    CardImage, CardSection, CardView, CertificateView, ContactView, IconView, LinkView,
    SectionLabels, StackGroup, TechIcon,
};
pub use facets::{Facet, FacetBar, FacetButton, FilterState};

/// Locale and icon size a section is rendered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub locale: Locale,
    pub icon_size: String,
}

/// The dynamic sections of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentKind {
    Projects,
    Formations,
    Technologies,
    TechsThisSite,
    Contact,
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Projects,
        ContentKind::Formations,
        ContentKind::Technologies,
        ContentKind::TechsThisSite,
        ContentKind::Contact,
    ];

    /// Id of the element the section renders into.
    pub fn container_id(self) -> &'static str {
        match self {
            ContentKind::Projects => "projectsContainer",
            ContentKind::Formations => "formationsContainer",
            ContentKind::Technologies => "technologiesContainer",
            ContentKind::TechsThisSite => "techsThisSite",
            ContentKind::Contact => "contactContainer",
        }
    }

    pub fn icon_size(self, config: &SiteConfig) -> &str {
        match self {
            ContentKind::Contact => &config.contact_icon_size,
            _ => &config.icon_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Projects(CardSection),
    Formations(CardSection),
    Technologies(Vec<StackGroup>),
    TechsThisSite(Vec<IconView>),
    Contact(Vec<ContactView>),
}

impl Section {
    pub fn kind(&self) -> ContentKind {
        match self {
            Section::Projects(_) => ContentKind::Projects,
            Section::Formations(_) => ContentKind::Formations,
            Section::Technologies(_) => ContentKind::Technologies,
            Section::TechsThisSite(_) => ContentKind::TechsThisSite,
            Section::Contact(_) => ContentKind::Contact,
        }
    }
}

async fn cards<T: Transport>(
    fetcher: &ResilientFetcher<T>,
    path: &str,
) -> Result<Vec<Card>, ContentError> {
    let doc: CardDocument<Card> = fetcher.fetch_json(path).await?;
    Ok(doc.cards)
}

/// Cards of every document that loaded; an error only when none did.
fn merge_sources(
    projects: Result<Vec<Card>, ContentError>,
    formations: Result<Vec<Card>, ContentError>,
) -> Result<Vec<Card>, ContentError> {
    match (projects, formations) {
        (Ok(mut all), Ok(formations)) => {
            all.extend(formations);
            Ok(all)
        }
        (Ok(cards), Err(e)) | (Err(e), Ok(cards)) => {
            warn!("render.Technologies: rendering from one source: {e}");
            Ok(cards)
        }
        (Err(e), Err(_)) => Err(e),
    }
}

/// Fetch and render the section of `kind`.
pub async fn render_section<T: Transport>(
    kind: ContentKind,
    fetcher: &ResilientFetcher<T>,
    config: &SiteConfig,
    locale: Locale,
) -> Result<Section, ContentError> {
    let ctx = RenderContext {
        locale,
        icon_size: kind.icon_size(config).to_string(),
    };
    debug!("render.{kind:?}: locale={}", locale.code());

    let section = match kind {
        ContentKind::Projects => {
            Section::Projects(render_projects(cards(fetcher, &config.projects_path()).await?, &ctx))
        }
        ContentKind::Formations => Section::Formations(render_formations(
            cards(fetcher, &config.formations_path()).await?,
            &ctx,
        )),
        ContentKind::Technologies => {
            let (projects, formations) = join(
                cards(fetcher, &config.projects_path()),
                cards(fetcher, &config.formations_path()),
            )
            .await;
            Section::Technologies(render_technologies(&merge_sources(projects, formations)?, &ctx))
        }
        ContentKind::TechsThisSite => {
            let doc: IconDocument = fetcher.fetch_json(&config.techs_this_site_path()).await?;
            Section::TechsThisSite(render_icon_set(&doc.icons, &ctx))
        }
        ContentKind::Contact => {
            let doc: CardDocument<ContactLink> = fetcher.fetch_json(&config.contact_path()).await?;
            Section::Contact(render_contacts(&doc.cards, &ctx))
        }
    };
    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeTransport;

    const PROJECTS: &str = r#"{"cards":[{"title":"Api","iconTechnologies":[
        {"name":"Rust","icon":"rust","style":"brands","stack":{"id":"back","en-US":"Backend"}}
    ]}]}"#;

    fn technologies(section: Section) -> Vec<StackGroup> {
        match section {
            Section::Technologies(groups) => groups,
            other => panic!("expected technologies, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn technologies_render_from_projects_when_formations_are_missing() {
        let transport = FakeTransport::new()
            .with_json("src/json/areas/projects.json", PROJECTS)
            .with_status("src/json/areas/formation.json", 404);
        let fetcher = ResilientFetcher::new(transport);
        let config = SiteConfig::default();

        let section = render_section(ContentKind::Technologies, &fetcher, &config, Locale::En)
            .await
            .unwrap();
        let groups = technologies(section);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, "back");
        assert_eq!(groups[0].technologies[0].name, "Rust");
    }

    #[tokio::test]
    async fn technologies_fail_only_when_both_sources_fail() {
        let transport = FakeTransport::new()
            .with_status("src/json/areas/projects.json", 500)
            .with_status("src/json/areas/formation.json", 404);
        let fetcher = ResilientFetcher::new(transport);

        let result = render_section(
            ContentKind::Technologies,
            &fetcher,
            &SiteConfig::default(),
            Locale::En,
        )
        .await;
        assert!(matches!(result, Err(ContentError::Fetch(_))));
    }
}
