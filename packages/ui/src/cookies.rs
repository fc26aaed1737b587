use content::preferences::{parse_cookies, set_cookie_line, CookieStore};
#[cfg(not(target_arch = "wasm32"))]
use std::cell::RefCell;

/// `document.cookie` of the current page.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserCookies;

#[cfg(target_arch = "wasm32")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use web_sys::wasm_bindgen::JsCast;
    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}

#[cfg(target_arch = "wasm32")]
fn read_jar() -> String {
    html_document()
        .and_then(|doc| doc.cookie().ok())
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn write_jar(line: &str) {
    if let Some(doc) = html_document() {
        if let Err(e) = doc.set_cookie(line) {
            tracing::warn!("cookies.set: {e:?}");
        }
    }
}

// Off the browser (tests, SSR) the jar lives in memory.
#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static JAR: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

#[cfg(not(target_arch = "wasm32"))]
fn read_jar() -> String {
    JAR.with(|jar| {
        jar.borrow()
            .iter()
            .filter_map(|line| line.split(';').next())
            .collect::<Vec<_>>()
            .join("; ")
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn write_jar(line: &str) {
    let name = line.split('=').next().unwrap_or_default().to_string();
    JAR.with(|jar| {
        let mut jar = jar.borrow_mut();
        jar.retain(|existing| existing.split('=').next() != Some(name.as_str()));
        jar.push(line.to_string());
    });
}

impl CookieStore for BrowserCookies {
    fn get(&self, name: &str) -> Option<String> {
        parse_cookies(&read_jar())
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    fn set(&self, name: &str, value: &str) {
        write_jar(&set_cookie_line(name, value));
    }
}

/// `navigator.language`, when there is a browser to ask.
pub fn navigator_language() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|w| w.navigator().language())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}
