use std::collections::BTreeMap;

/// One filter button: the facet value it selects and its visible label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetButton {
    pub value: String,
    pub label: String,
    pub count: usize,
}

/// Filter buttons of a card section; "all" always comes first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetBar {
    pub all_label: String,
    pub buttons: Vec<FacetButton>,
}

/// Tallies facet values across a card set.
#[derive(Debug, Default)]
pub(crate) struct FacetCounter {
    counts: BTreeMap<String, (usize, String, bool)>,
}

impl FacetCounter {
    /// Count `value` once; `label` is what the button shows and `listed`
    /// says whether the value gets a button at all.
    pub fn add(&mut self, value: &str, label: String, listed: bool) {
        let entry = self
            .counts
            .entry(value.to_string())
            .or_insert((0, label, true));
        entry.0 += 1;
        if !listed {
            entry.2 = false;
        }
    }

    /// Buttons sorted by label, or `None` when there is nothing to choose
    /// between (fewer than two distinct values).
    pub fn into_bar(self, all_label: &str) -> Option<FacetBar> {
        if self.counts.len() < 2 {
            return None;
        }
        let mut buttons: Vec<FacetButton> = self
            .counts
            .into_iter()
            .filter(|(_, (_, _, listed))| *listed)
            .map(|(value, (count, label, _))| FacetButton {
                label: format!("{label} ({count})"),
                value,
                count,
            })
            .collect();
        buttons.sort_by(|a, b| label_order(&a.label, &b.label));
        Some(FacetBar {
            all_label: all_label.to_string(),
            buttons,
        })
    }
}

/// Case-insensitive ordering for visible labels, ties broken bytewise.
pub(crate) fn label_order(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Facet {
    #[default]
    All,
    Value(String),
}

/// The single active facet of a section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    active: Facet,
}

impl FilterState {
    pub fn select(&mut self, value: Option<&str>) {
        self.active = match value {
            Some(v) => Facet::Value(v.to_string()),
            None => Facet::All,
        };
    }

    pub fn active(&self) -> &Facet {
        &self.active
    }

    pub fn is_active(&self, value: Option<&str>) -> bool {
        match (&self.active, value) {
            (Facet::All, None) => true,
            (Facet::Value(active), Some(v)) => active == v,
            _ => false,
        }
    }

    /// Whether a card carrying `facets` stays visible.
    pub fn shows(&self, facets: &[String]) -> bool {
        match &self.active {
            Facet::All => true,
            Facet::Value(active) => facets.iter().any(|f| f == active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_builds_no_bar() {
        let mut counter = FacetCounter::default();
        counter.add("Rust", "Rust".into(), true);
        counter.add("Rust", "Rust".into(), true);
        assert!(counter.into_bar("All").is_none());
    }

    #[test]
    fn bar_lists_counts_sorted_by_label() {
        let mut counter = FacetCounter::default();
        counter.add("rust", "Rust".into(), true);
        counter.add("css", "css".into(), true);
        counter.add("rust", "Rust".into(), true);
        counter.add("git", "Git".into(), false);
        let bar = counter.into_bar("Todos").unwrap();
        assert_eq!(bar.all_label, "Todos");
        let labels: Vec<_> = bar.buttons.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["css (1)", "Rust (2)"]);
    }

    #[test]
    fn selection_is_mutually_exclusive() {
        let mut state = FilterState::default();
        assert!(state.is_active(None));
        assert!(state.shows(&[]));

        state.select(Some("Rust"));
        assert!(state.is_active(Some("Rust")));
        assert!(!state.is_active(None));
        assert!(!state.is_active(Some("CSS")));
        assert!(state.shows(&["CSS".into(), "Rust".into()]));
        assert!(!state.shows(&["CSS".into()]));

        state.select(None);
        assert_eq!(state.active(), &Facet::All);
        assert!(state.shows(&["CSS".into()]));
    }
}
