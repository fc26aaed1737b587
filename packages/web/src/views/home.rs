use dioxus::prelude::*;
use ui::{
    ContactSection, FormationsSection, LastUpdateBadge, ProfileImage, ProjectsSection, ResumeLink,
    TechnologiesSection, TechsThisSite, Tr,
};

const PROFILE_IMAGE: &str = "src/assets/images/profile.svg";

#[component]
pub fn Home() -> Element {
    let engine = ui::use_i18n().engine;
    let alt = ui::t(&engine.read(), "about.imageAlt");

    rsx! {
        section { id: "about", class: "panel about",
            ProfileImage { src: PROFILE_IMAGE.to_string(), alt }
            div {
                h1 { Tr { name: "about.title" } }
                p { Tr { name: "about.text" } }
                ResumeLink {}
            }
        }
        section { id: "technologies", class: "panel",
            h2 { Tr { name: "technologies.title" } }
            TechnologiesSection {}
        }
        section { id: "projects", class: "panel",
            h2 { Tr { name: "projects.title" } }
            ProjectsSection {}
        }
        section { id: "formations", class: "panel",
            h2 { Tr { name: "formations.title" } }
            FormationsSection {}
        }
        section { id: "contact", class: "panel",
            h2 { Tr { name: "contact.title" } }
            ContactSection {}
        }
        footer { class: "footer",
            p { Tr { name: "footer.builtWith" } }
            TechsThisSite {}
            LastUpdateBadge {}
        }
    }
}
