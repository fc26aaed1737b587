//! Dioxus components of the portfolio page.

mod accent;
pub use accent::ProfileImage;

mod badge;
pub use badge::LastUpdateBadge;

mod controls;
pub use controls::{AccessibilityPanel, Favicon, LanguageToggle, NavMenu};

mod cookies;
pub use cookies::BrowserCookies;

mod dynamic;
pub use dynamic::{
    use_dynamic_content, use_site, ContentProvider, DynamicContent, SiteContext, SiteProvider,
};

mod i18n;
pub use i18n::{set_lang, t, today, use_i18n, use_lang, I18n, I18nProvider, Tr};

mod resume;
pub use resume::ResumeLink;

mod sections;
pub use sections::{
    ContactSection, FormationsSection, Icon, ProjectsSection, TechnologiesSection, TechsThisSite,
};

mod theme;
pub use theme::PortfolioTheme;
