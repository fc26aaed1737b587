use std::collections::{BTreeMap, HashSet};

use crate::dates::by_recency;
use crate::icons::fa_class;
use crate::locale::localized;
use crate::model::{Card, ContactLink, IconEntry, Technology};

use super::facets::{label_order, FacetBar, FacetCounter};
use super::RenderContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechIcon {
    pub name: String,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardImage {
    pub src: String,
    pub mobile_src: Option<String>,
    pub mime: Option<String>,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub href: String,
    pub label: &'static str,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateView {
    pub name: String,
    pub url: Option<String>,
}

/// Everything one card shows, already localized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardView {
    pub title: String,
    pub institution: Option<String>,
    pub kind_label: Option<String>,
    pub description: Option<String>,
    pub image: Option<CardImage>,
    pub technologies: Vec<TechIcon>,
    pub links: Vec<LinkView>,
    pub certificates: Vec<CertificateView>,
    pub period: Option<String>,
    /// Facet values this card answers to.
    pub facets: Vec<String>,
}

/// Fixed section captions, chosen per locale before translations load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLabels {
    pub all: &'static str,
    pub technologies: &'static str,
    pub links: &'static str,
    pub certificates: &'static str,
}

impl SectionLabels {
    pub fn for_tag(tag: &str) -> Self {
        if tag == "pt-BR" {
            Self {
                all: "Todos",
                technologies: "Tecnologias",
                links: "Links",
                certificates: "Certificados",
            }
        } else {
            Self {
                all: "All",
                technologies: "Technologies",
                links: "Links",
                certificates: "Certificates",
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSection {
    pub cards: Vec<CardView>,
    pub facets: Option<FacetBar>,
    pub labels: SectionLabels,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackGroup {
    pub id: String,
    pub title: String,
    pub technologies: Vec<TechIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconView {
    pub class: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactView {
    pub name: String,
    pub url: String,
    pub class: String,
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Sorted by name, first occurrence of each name kept.
fn unique_technologies(technologies: &[Technology]) -> Vec<&Technology> {
    let mut seen = HashSet::new();
    let mut unique: Vec<&Technology> = technologies
        .iter()
        .filter(|t| seen.insert(t.name.as_str()))
        .collect();
    unique.sort_by(|a, b| label_order(&a.name, &b.name));
    unique
}

fn tech_icon(tech: &Technology, ctx: &RenderContext) -> TechIcon {
    TechIcon {
        name: tech.name.clone(),
        class: fa_class(tech.style.as_deref(), tech.icon.as_deref(), Some(ctx.icon_size.as_str())),
    }
}

fn sorted_by_recency(mut cards: Vec<Card>) -> Vec<Card> {
    cards.sort_by(|a, b| {
        by_recency(
            a.date_init.as_deref(),
            a.date_end.as_deref(),
            b.date_init.as_deref(),
            b.date_end.as_deref(),
        )
    });
    cards
}

fn period(card: &Card) -> Option<String> {
    let init = card.date_init.as_deref().filter(|d| !d.trim().is_empty())?;
    Some(match card.date_end.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(end) => format!("{init} - {end}"),
        None => init.to_string(),
    })
}

fn base_view(card: &Card, ctx: &RenderContext) -> CardView {
    let tag = ctx.locale.tag();
    CardView {
        title: localized(card.title.as_ref(), tag),
        institution: non_empty(localized(card.institution.as_ref(), tag)),
        description: non_empty(localized(card.description.as_ref(), tag)),
        technologies: unique_technologies(&card.icon_technologies)
            .into_iter()
            .map(|t| tech_icon(t, ctx))
            .collect(),
        period: period(card),
        ..CardView::default()
    }
}

/// Project cards, most recent first, filterable by technology.
pub fn render_projects(cards: Vec<Card>, ctx: &RenderContext) -> CardSection {
    let labels = SectionLabels::for_tag(ctx.locale.tag());
    let mut counter = FacetCounter::default();
    for card in &cards {
        for tech in unique_technologies(&card.icon_technologies) {
            if !tech.name.is_empty() {
                counter.add(&tech.name, tech.name.clone(), tech.filterable());
            }
        }
    }

    let tag = ctx.locale.tag();
    let views = sorted_by_recency(cards)
        .iter()
        .map(|card| {
            let mut view = base_view(card, ctx);
            view.image = card.image.as_ref().map(|src| CardImage {
                src: src.clone(),
                mobile_src: card.image_mobile.clone(),
                mime: card.image_type.clone(),
                alt: localized(card.description_image.as_ref(), tag),
            });
            if let Some(href) = &card.link_repository {
                view.links.push(LinkView {
                    href: href.clone(),
                    label: "Repository",
                    class: fa_class(Some("brands"), Some("github"), None),
                });
            }
            if let Some(href) = &card.link_demo {
                view.links.push(LinkView {
                    href: href.clone(),
                    label: "Demo",
                    class: fa_class(Some("solid"), Some("share-from-square"), None),
                });
            }
            view.facets = card
                .icon_technologies
                .iter()
                .map(|t| t.name.clone())
                .filter(|n| !n.is_empty())
                .collect();
            view
        })
        .collect();

    CardSection {
        cards: views,
        facets: counter.into_bar(labels.all),
        labels,
    }
}

/// Formation cards, most recent first, filterable by formation type.
pub fn render_formations(cards: Vec<Card>, ctx: &RenderContext) -> CardSection {
    let tag = ctx.locale.tag();
    let labels = SectionLabels::for_tag(tag);
    let mut counter = FacetCounter::default();
    for kind in cards.iter().filter_map(|c| c.kind.as_ref()) {
        if !kind.id.is_empty() {
            counter.add(&kind.id, kind.label(tag), true);
        }
    }

    let views = sorted_by_recency(cards)
        .iter()
        .map(|card| {
            let mut view = base_view(card, ctx);
            view.kind_label = card.kind.as_ref().map(|k| k.label(tag));
            view.certificates = card
                .certificates
                .iter()
                .map(|cert| CertificateView {
                    name: localized(cert.name.as_ref(), tag),
                    url: cert.url.clone().filter(|u| !u.is_empty()),
                })
                .collect();
            view.facets = card
                .kind
                .iter()
                .filter(|k| !k.id.is_empty())
                .map(|k| k.id.clone())
                .collect();
            view
        })
        .collect();

    CardSection {
        cards: views,
        facets: counter.into_bar(labels.all),
        labels,
    }
}

/// Technologies of every card grouped by stack, groups sorted by title.
pub fn render_technologies(cards: &[Card], ctx: &RenderContext) -> Vec<StackGroup> {
    let tag = ctx.locale.tag();
    let mut groups: BTreeMap<String, (String, Vec<&Technology>)> = BTreeMap::new();
    for tech in cards.iter().flat_map(|c| c.icon_technologies.iter()) {
        let Some(stack) = &tech.stack else { continue };
        let group = groups
            .entry(stack.id.clone())
            .or_insert_with(|| (stack.label(tag), Vec::new()));
        if !group.1.iter().any(|t| t.name == tech.name) {
            group.1.push(tech);
        }
    }

    let mut stacks: Vec<StackGroup> = groups
        .into_iter()
        .map(|(id, (title, techs))| {
            let mut techs: Vec<TechIcon> = techs.into_iter().map(|t| tech_icon(t, ctx)).collect();
            techs.sort_by(|a, b| label_order(&a.name, &b.name));
            StackGroup {
                id,
                title,
                technologies: techs,
            }
        })
        .collect();
    stacks.sort_by(|a, b| label_order(&a.title, &b.title));
    stacks
}

/// Icon strip of the technologies this site is built with.
pub fn render_icon_set(icons: &[IconEntry], ctx: &RenderContext) -> Vec<IconView> {
    icons
        .iter()
        .map(|icon| IconView {
            class: fa_class(
                icon.style.as_deref(),
                icon.class.as_deref(),
                Some(icon.size.as_deref().unwrap_or(ctx.icon_size.as_str())),
            ),
            title: icon
                .name
                .clone()
                .or_else(|| icon.class.clone())
                .unwrap_or_default(),
        })
        .collect()
}

pub fn render_contacts(links: &[ContactLink], ctx: &RenderContext) -> Vec<ContactView> {
    links
        .iter()
        .map(|link| ContactView {
            name: link.name.clone(),
            url: link.url.clone(),
            class: fa_class(link.style.as_deref(), link.icon.as_deref(), Some(ctx.icon_size.as_str())),
        })
        .collect()
}
