use content::badge_text;
use dioxus::prelude::*;

use crate::{use_dynamic_content, use_i18n, Tr};

const LAST_UPDATE_KEY: &str = "lastUpdate";

/// "Last update" line under the footer; hidden until the commit date is known.
#[component]
pub fn LastUpdateBadge() -> Element {
    let i18n = use_i18n();
    let last_update = use_dynamic_content().last_update;

    let Some(date) = last_update() else {
        return rsx! {};
    };
    let translated = i18n.engine.read().t(LAST_UPDATE_KEY) != LAST_UPDATE_KEY;
    let fallback = badge_text(date, (i18n.locale)());

    rsx! {
        p { id: "lastUpdate", class: "last-update",
            i { class: "fa-solid fa-clock-rotate-left" }
            " "
            if translated {
                Tr { name: LAST_UPDATE_KEY.to_string() }
            } else {
                "{fallback}"
            }
        }
    }
}
