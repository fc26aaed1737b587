use chrono::NaiveDate;
use content::render::CardSection;
use content::test_utils::FakeTransport;
use content::{
    load_translations, ContentKind, ContentOrchestrator, LoadOutcome, Locale, PageContent,
    ResilientFetcher, Section, SiteConfig, TranslationEngine,
};

const PROJECTS: &str = r#"{"cards":[
    {"title":{"pt-BR":"Aberto","en-US":"Open"},"dateInit":"01/2020",
     "iconTechnologies":[{"name":"Rust","icon":"rust","style":"brands",
                          "stack":{"id":"back","pt-BR":"Back-end","en-US":"Backend"}}]},
    {"title":{"pt-BR":"Antigo","en-US":"Old"},"dateEnd":"12/2023",
     "iconTechnologies":[{"name":"CSS","icon":"css3","style":"brands"}]},
    {"title":{"pt-BR":"Novo","en-US":"New"},"dateEnd":"06/2024",
     "iconTechnologies":[{"name":"Rust","icon":"rust","style":"brands"}]}
]}"#;

const CONTACT: &str = r#"{"cards":[{"name":"Email","url":"mailto:me@example.com","icon":"envelope"}]}"#;

fn site() -> FakeTransport {
    FakeTransport::new()
        .with_json("src/json/areas/projects.json", PROJECTS)
        .with_status("src/json/areas/formation.json", 404)
        .with_json("src/json/areas/contact.json", CONTACT)
        .with_json("src/json/areas/techs-this-site.json", r#"{"icons":[]}"#)
        .with_json("src/json/icons/svg.json", r#"{"icons":[]}"#)
        .with_json(
            "src/json/translate/pt/translation.json",
            r#"{"lastUpdate":"Última atualização: {{date}}","webTitle":"Portfólio"}"#,
        )
        .with_json(
            "src/json/translate/en/translation.json",
            r#"{"lastUpdate":"Last Update: {{date}}","webTitle":"Portfolio"}"#,
        )
}

async fn load(orchestrator: &ContentOrchestrator<FakeTransport>, locale: Locale) -> PageContent {
    match orchestrator.load(locale).await {
        LoadOutcome::Ready(page) => page,
        LoadOutcome::Superseded => panic!("unexpected supersession"),
    }
}

fn projects(page: &PageContent) -> &CardSection {
    match page.section(ContentKind::Projects) {
        Some(Section::Projects(section)) => section,
        other => panic!("projects not rendered: {other:?}"),
    }
}

#[tokio::test]
async fn formations_404_leaves_the_rest_of_the_page_intact() {
    let orchestrator = ContentOrchestrator::new(site(), SiteConfig::default());
    let page = load(&orchestrator, Locale::En).await;

    assert!(page.section(ContentKind::Formations).is_none());
    let failed: Vec<_> = page.failures.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(failed, vec![ContentKind::Formations]);
    match page.section(ContentKind::Technologies) {
        Some(Section::Technologies(groups)) => {
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].title, "Backend");
        }
        other => panic!("technologies not rendered from projects: {other:?}"),
    }
    assert!(page.section(ContentKind::Contact).is_some());
    assert!(page.section(ContentKind::TechsThisSite).is_some());

    let titles: Vec<_> = projects(&page).cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["New", "Old", "Open"]);
}

#[tokio::test]
async fn switching_locales_back_matches_a_direct_render() {
    let orchestrator = ContentOrchestrator::new(site(), SiteConfig::default());
    let direct = load(&orchestrator, Locale::En).await;
    load(&orchestrator, Locale::Pt).await;
    let round_trip = load(&orchestrator, Locale::En).await;

    assert_eq!(direct.sections, round_trip.sections);
    assert_eq!(projects(&round_trip).labels.all, "All");
}

#[tokio::test]
async fn last_update_label_is_complete_once_both_halves_arrive() {
    let config = SiteConfig::default();
    let fetcher = ResilientFetcher::new(site());
    let tables = load_translations(&fetcher, &config).await;
    let today = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
    let commit = NaiveDate::from_ymd_opt(2025, 9, 24).unwrap();

    let mut engine = TranslationEngine::new(Locale::Pt, config.birth_date).with_tables(tables);
    engine.set_last_update(commit);
    assert_eq!(
        engine.render("lastUpdate", today),
        "Última atualização: 24 de setembro de 2025"
    );
    engine.set_locale(Locale::En);
    assert_eq!(engine.render("lastUpdate", today), "Last Update: September 24, 2025");
    assert_eq!(engine.page_title(), "Portfolio");
}
