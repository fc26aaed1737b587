//! Runs every section renderer concurrently and hands back the finished page.

use futures_util::future::join_all;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, error, info, warn};

use crate::config::SiteConfig;
use crate::error::ContentError;
use crate::fetch::{ResilientFetcher, Transport};
use crate::icons::IconOverrides;
use crate::locale::Locale;
use crate::model::IconDocument;
use crate::render::{render_section, ContentKind, Section};

/// Result of one full load: every section that rendered, the SVG overrides
/// and the sections that failed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageContent {
    pub locale: Option<Locale>,
    pub sections: BTreeMap<ContentKind, Section>,
    pub icon_overrides: IconOverrides,
    pub failures: Vec<(ContentKind, ContentError)>,
}

impl PageContent {
    pub fn section(&self, kind: ContentKind) -> Option<&Section> {
        self.sections.get(&kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Ready(PageContent),
    /// A newer load started before this one finished.
    Superseded,
}

/// Coordinates the section renderers. Cloning shares the generation counter,
/// so the newest `load` of any clone wins.
#[derive(Debug, Clone)]
pub struct ContentOrchestrator<T> {
    fetcher: Rc<ResilientFetcher<T>>,
    config: Rc<SiteConfig>,
    layout: Vec<ContentKind>,
    generation: Rc<Cell<u64>>,
}

impl<T: Transport> ContentOrchestrator<T> {
    pub fn new(transport: T, config: SiteConfig) -> Self {
        Self {
            fetcher: Rc::new(ResilientFetcher::new(transport)),
            config: Rc::new(config),
            layout: ContentKind::ALL.to_vec(),
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Only render the sections present on the page.
    pub fn with_layout(mut self, layout: &[ContentKind]) -> Self {
        self.layout = layout.to_vec();
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &ResilientFetcher<T> {
        &self.fetcher
    }

    /// Render every section for `locale`, then apply the SVG post-pass.
    ///
    /// Section failures are logged and recorded; they never abort the join.
    pub async fn load(&self, locale: Locale) -> LoadOutcome {
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);
        info!(
            "orchestrator.load: generation={ticket} locale={} sections={}",
            locale.code(),
            self.layout.len()
        );

        let renders = self.layout.iter().map(|&kind| async move {
            (
                kind,
                render_section(kind, &self.fetcher, &self.config, locale).await,
            )
        });
        let results = join_all(renders).await;

        let mut page = PageContent {
            locale: Some(locale),
            ..PageContent::default()
        };
        for (kind, result) in results {
            match result {
                Ok(section) => {
                    page.sections.insert(kind, section);
                }
                Err(e) => {
                    error!("orchestrator.load: {} failed: {e}", kind.container_id());
                    page.failures.push((kind, e));
                }
            }
        }

        page.icon_overrides = self.svg_overrides().await;

        if self.generation.get() != ticket {
            debug!("orchestrator.load: generation={ticket} superseded");
            return LoadOutcome::Superseded;
        }
        info!(
            "orchestrator.load: generation={ticket} ready sections={} failures={}",
            page.sections.len(),
            page.failures.len()
        );
        LoadOutcome::Ready(page)
    }

    async fn svg_overrides(&self) -> IconOverrides {
        let path = self.config.svg_icons_path();
        match self.fetcher.fetch_json::<IconDocument>(&path).await {
            Ok(doc) => {
                let overrides = IconOverrides::from_entries(&doc.icons);
                debug!("orchestrator.svg: {} overrides", overrides.len());
                overrides
            }
            Err(e) => {
                warn!("orchestrator.svg: {e}");
                IconOverrides::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeTransport;
    use futures_util::future::join;

    const PROJECTS: &str = r#"{"cards":[
        {"title":{"pt-BR":"Antigo","en-US":"Old"},"dateEnd":"12/2023",
         "iconTechnologies":[{"name":"Rust","icon":"rust","style":"brands","stack":{"id":"back","en-US":"Backend"}}]},
        {"title":"New","dateEnd":"06/2024","iconTechnologies":[{"name":"CSS","icon":"css3","style":"brands"}]}
    ]}"#;
    const FORMATIONS: &str = r#"{"cards":[{"title":"Course","type":{"id":"course"}}]}"#;
    const CONTACT: &str = r#"{"cards":[{"name":"GitHub","url":"https://github.com/x","icon":"github","style":"brands"}]}"#;
    const ICONS: &str = r#"{"icons":[{"class":"rust","style":"brands","name":"Rust"}]}"#;
    const SVG: &str = r#"{"icons":[{"class":"fa-rust","svg":"<svg><path d=\"M0\"/></svg>"}]}"#;

    fn full_site() -> FakeTransport {
        FakeTransport::new()
            .with_json("src/json/areas/projects.json", PROJECTS)
            .with_json("src/json/areas/formation.json", FORMATIONS)
            .with_json("src/json/areas/contact.json", CONTACT)
            .with_json("src/json/areas/techs-this-site.json", ICONS)
            .with_json("src/json/icons/svg.json", SVG)
    }

    fn ready(outcome: LoadOutcome) -> PageContent {
        match outcome {
            LoadOutcome::Ready(page) => page,
            LoadOutcome::Superseded => panic!("load was superseded"),
        }
    }

    #[tokio::test]
    async fn renders_every_section_and_applies_svg_overrides() {
        let orchestrator = ContentOrchestrator::new(full_site(), SiteConfig::default());
        let page = ready(orchestrator.load(Locale::En).await);
        assert_eq!(page.sections.len(), 5);
        assert!(page.failures.is_empty());
        assert!(page.icon_overrides.override_for("fa-brands fa-rust fa-3x").is_some());

        let Some(Section::Projects(projects)) = page.section(ContentKind::Projects) else {
            panic!("projects missing");
        };
        assert_eq!(projects.cards[0].title, "New");
        assert_eq!(projects.cards[1].title, "Old");
    }

    #[tokio::test]
    async fn a_failing_section_does_not_block_the_others() {
        let transport = full_site().with_status("src/json/areas/formation.json", 404);
        let orchestrator = ContentOrchestrator::new(transport, SiteConfig::default())
            .with_layout(&[ContentKind::Projects, ContentKind::Formations, ContentKind::Contact]);
        let page = ready(orchestrator.load(Locale::Pt).await);

        assert!(page.section(ContentKind::Formations).is_none());
        assert!(page.section(ContentKind::Projects).is_some());
        assert!(page.section(ContentKind::Contact).is_some());
        assert_eq!(page.failures.len(), 1);
        assert_eq!(page.failures[0].0, ContentKind::Formations);
        assert!(matches!(page.failures[0].1, ContentError::Fetch(_)));
    }

    #[tokio::test]
    async fn sections_off_the_page_are_never_fetched() {
        let transport = full_site();
        let orchestrator = ContentOrchestrator::new(transport.clone(), SiteConfig::default())
            .with_layout(&[ContentKind::Contact]);
        let page = ready(orchestrator.load(Locale::En).await);

        assert_eq!(page.sections.len(), 1);
        assert!(page.failures.is_empty());
        let requests = transport.requests();
        assert!(requests.iter().all(|path| !path.contains("areas/projects")));
        assert!(requests.iter().all(|path| !path.contains("areas/formation")));
        assert!(requests.contains(&"src/json/areas/contact.json".to_string()));
    }

    #[tokio::test]
    async fn missing_svg_map_leaves_icons_alone() {
        let transport = full_site().with_status("src/json/icons/svg.json", 500);
        let orchestrator = ContentOrchestrator::new(transport, SiteConfig::default());
        let page = ready(orchestrator.load(Locale::En).await);
        assert!(page.icon_overrides.is_empty());
        assert_eq!(page.sections.len(), 5);
    }

    #[tokio::test]
    async fn the_newest_load_wins() {
        let orchestrator = ContentOrchestrator::new(full_site(), SiteConfig::default());
        let (first, second) = join(orchestrator.load(Locale::Pt), orchestrator.load(Locale::En)).await;
        assert_eq!(first, LoadOutcome::Superseded);
        assert_eq!(ready(second).locale, Some(Locale::En));
    }

    #[tokio::test]
    async fn reloading_replaces_content_for_the_new_locale() {
        let orchestrator = ContentOrchestrator::new(full_site(), SiteConfig::default())
            .with_layout(&[ContentKind::Projects]);
        let pt = ready(orchestrator.load(Locale::Pt).await);
        let en = ready(orchestrator.load(Locale::En).await);

        let title = |page: &PageContent| match page.section(ContentKind::Projects) {
            Some(Section::Projects(p)) => p.cards[1].title.clone(),
            _ => String::new(),
        };
        assert_eq!(title(&pt), "Antigo");
        assert_eq!(title(&en), "Old");
        assert_eq!(en.sections.len(), 1);
    }
}
