use content::render::{
    CardSection, CardView, ContactView, FacetBar, IconView, SectionLabels, StackGroup,
};
use content::{ContentKind, FilterState, Section};
use dioxus::prelude::*;

use crate::use_dynamic_content;

const SECTIONS_CSS: Asset = asset!("/assets/styling/sections.css");

const CAROUSEL_STEP: i32 = 300;

fn use_section(kind: ContentKind) -> Option<Section> {
    let content = use_dynamic_content();
    let page = content.page.read();
    page.as_ref().and_then(|p| p.section(kind).cloned())
}

/// Font Awesome glyph, or the custom SVG registered for one of its classes.
#[component]
pub fn Icon(class: String, #[props(default)] title: String) -> Element {
    let content = use_dynamic_content();
    let svg = content
        .page
        .read()
        .as_ref()
        .and_then(|p| p.icon_overrides.override_for(&class).map(str::to_string));

    match svg {
        Some(svg) => rsx! {
            i { class: "{class} custom-svg", title: "{title}", dangerous_inner_html: svg }
        },
        None => rsx! {
            i { class: "{class}", title: "{title}", "aria-hidden": "true" }
        },
    }
}

#[component]
fn FilterButtons(bar: FacetBar, state: Signal<FilterState>) -> Element {
    let mut state = state;
    rsx! {
        div { class: "filters", role: "group",
            button {
                class: if state.read().is_active(None) { "filter active" } else { "filter" },
                onclick: move |_| state.with_mut(|s| s.select(None)),
                "{bar.all_label}"
            }
            for facet in bar.buttons.iter() {
                button {
                    key: "{facet.value}",
                    class: if state.read().is_active(Some(&facet.value)) { "filter active" } else { "filter" },
                    onclick: {
                        let value = facet.value.clone();
                        move |_| state.with_mut(|s| s.select(Some(&value)))
                    },
                    "{facet.label}"
                }
            }
        }
    }
}

#[component]
fn CardItem(card: CardView, labels: SectionLabels) -> Element {
    rsx! {
        article { class: "card",
            if let Some(image) = &card.image {
                picture {
                    if let Some(mobile) = &image.mobile_src {
                        source {
                            "media": "(max-width: 990px)",
                            "srcset": "{mobile}",
                            r#type: image.mime.clone().unwrap_or_default(),
                        }
                    }
                    img { src: "{image.src}", alt: "{image.alt}", loading: "lazy" }
                }
            }
            h3 { class: "card-title", "{card.title}" }
            if let Some(institution) = &card.institution {
                p { class: "institution", "{institution}" }
            }
            if let Some(kind) = &card.kind_label {
                span { class: "formation-type", "{kind}" }
            }
            if let Some(description) = &card.description {
                p { class: "description", "{description}" }
            }
            if !card.technologies.is_empty() {
                div { class: "technologies",
                    h4 { "{labels.technologies}" }
                    div { class: "icons",
                        for tech in card.technologies.iter() {
                            Icon { key: "{tech.name}", class: tech.class.clone(), title: tech.name.clone() }
                        }
                    }
                }
            }
            if !card.links.is_empty() {
                div { class: "links",
                    h4 { "{labels.links}" }
                    for link in card.links.iter() {
                        a {
                            href: "{link.href}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            Icon { class: link.class.clone() }
                            " {link.label}"
                        }
                    }
                }
            }
            if !card.certificates.is_empty() {
                div { class: "certificates",
                    h4 { "{labels.certificates}" }
                    ul {
                        for cert in card.certificates.iter() {
                            li {
                                if let Some(url) = &cert.url {
                                    a { href: "{url}", target: "_blank", rel: "noopener noreferrer", "{cert.name}" }
                                } else {
                                    span { "{cert.name}" }
                                }
                            }
                        }
                    }
                }
            }
            if let Some(period) = &card.period {
                p { class: "period", "{period}" }
            }
        }
    }
}

/// Turns vertical wheel movement over the carousel into horizontal scrolling.
fn redirect_wheel(container_id: &str, evt: &WheelEvent) {
    #[cfg(target_arch = "wasm32")]
    {
        use content::carousel_wheel_scroll;

        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(container_id))
        else {
            return;
        };
        let delta_y = evt.delta().strip_units().y;
        if let Some(step) = carousel_wheel_scroll(
            el.scroll_left() as f64,
            el.client_width() as f64,
            el.scroll_width() as f64,
            delta_y,
        ) {
            evt.prevent_default();
            el.scroll_by_with_x_and_y(step, 0.0);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (container_id, evt);
    }
}

#[component]
fn CardGrid(section: CardSection, container_id: String, carousel: bool) -> Element {
    let state = use_signal(FilterState::default);
    let visible: Vec<CardView> = section
        .cards
        .iter()
        .filter(|card| state.read().shows(&card.facets))
        .cloned()
        .collect();

    let target = container_id.clone();
    let scroll = move |delta: i32| {
        let id = target.clone();
        move |_: MouseEvent| {
            let id = id.clone();
            spawn(async move {
                let _ = document::eval(&format!(
                    r#"(function(){{ const el = document.getElementById("{id}"); if (el) el.scrollBy({{ left: {delta}, behavior: "smooth" }}); return ""; }})()"#
                ))
                .await;
            });
        }
    };

    rsx! {
        if let Some(bar) = section.facets.clone() {
            FilterButtons { bar, state }
        }
        div { class: if carousel { "carousel" } else { "card-list" },
            if carousel {
                button { class: "carousel-btn prev", "aria-label": "Previous", onclick: scroll(-CAROUSEL_STEP),
                    i { class: "fa-solid fa-chevron-left" }
                }
            }
            div {
                id: "{container_id}",
                class: "cards",
                onwheel: {
                    let id = container_id.clone();
                    move |evt: WheelEvent| {
                        if carousel {
                            redirect_wheel(&id, &evt);
                        }
                    }
                },
                for (idx, card) in visible.into_iter().enumerate() {
                    CardItem { key: "{idx}-{card.title}", card, labels: section.labels.clone() }
                }
            }
            if carousel {
                button { class: "carousel-btn next", "aria-label": "Next", onclick: scroll(CAROUSEL_STEP),
                    i { class: "fa-solid fa-chevron-right" }
                }
            }
        }
    }
}

#[component]
pub fn ProjectsSection() -> Element {
    let locale = crate::use_lang()().code();
    let projects = use_section(ContentKind::Projects);
    rsx! {
        document::Link { rel: "stylesheet", href: SECTIONS_CSS }
        if let Some(Section::Projects(section)) = projects {
            CardGrid {
                key: "{locale}",
                section,
                container_id: ContentKind::Projects.container_id().to_string(),
                carousel: true,
            }
        }
    }
}

#[component]
pub fn FormationsSection() -> Element {
    let locale = crate::use_lang()().code();
    let formations = use_section(ContentKind::Formations);
    rsx! {
        if let Some(Section::Formations(section)) = formations {
            CardGrid {
                key: "{locale}",
                section,
                container_id: ContentKind::Formations.container_id().to_string(),
                carousel: false,
            }
        }
    }
}

#[component]
fn StackBlock(group: StackGroup) -> Element {
    rsx! {
        div { class: "stack", "data-stack": "{group.id}",
            h3 { "{group.title}" }
            div { class: "icons",
                for tech in group.technologies {
                    Icon { key: "{tech.name}", class: tech.class, title: tech.name }
                }
            }
        }
    }
}

#[component]
pub fn TechnologiesSection() -> Element {
    let groups = match use_section(ContentKind::Technologies) {
        Some(Section::Technologies(groups)) => groups,
        _ => Vec::new(),
    };
    rsx! {
        div { id: ContentKind::Technologies.container_id(), class: "stacks",
            for group in groups {
                StackBlock { key: "{group.id}", group }
            }
        }
    }
}

#[component]
pub fn TechsThisSite() -> Element {
    let icons: Vec<IconView> = match use_section(ContentKind::TechsThisSite) {
        Some(Section::TechsThisSite(icons)) => icons,
        _ => Vec::new(),
    };
    rsx! {
        div { id: ContentKind::TechsThisSite.container_id(), class: "icons site-techs",
            for icon in icons {
                Icon { class: icon.class, title: icon.title }
            }
        }
    }
}

#[component]
pub fn ContactSection() -> Element {
    let links: Vec<ContactView> = match use_section(ContentKind::Contact) {
        Some(Section::Contact(links)) => links,
        _ => Vec::new(),
    };
    rsx! {
        ul { id: ContentKind::Contact.container_id(), class: "contact",
            for link in links {
                li { key: "{link.url}",
                    a { href: "{link.url}", target: "_blank", rel: "noopener noreferrer",
                        Icon { class: link.class }
                        span { "{link.name}" }
                    }
                }
            }
        }
    }
}
