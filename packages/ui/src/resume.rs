use dioxus::prelude::*;

use crate::{use_i18n, use_site, Tr};

/// Download link for the résumé of the active locale, shown only when the
/// file is actually served.
#[component]
pub fn ResumeLink() -> Element {
    let site = use_site();
    let locale = use_i18n().locale;

    let available = use_resource(move || {
        let site = site.clone();
        let path = site.config.resume_path(locale());
        async move {
            let found = site.orchestrator.fetcher().probe(&path).await;
            tracing::debug!("resume.probe: {path} found={found}");
            found.then_some(path)
        }
    });

    let Some(Some(href)) = available() else {
        return rsx! {};
    };
    rsx! {
        a { class: "btn resume", href: "{href}", download: "",
            i { class: "fa-solid fa-file-arrow-down" }
            " "
            Tr { name: "resume.download" }
        }
    }
}
