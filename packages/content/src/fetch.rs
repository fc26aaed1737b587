//! JSON fetching with a basename fallback.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::error::{ContentError, FetchFailure, LastAttempt};

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for the network layer. Browser futures are not `Send`.
#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<RawResponse, String>;
    /// Status of a `HEAD` request.
    async fn head(&self, url: &str) -> Result<u16, String>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for Rc<T> {
    async fn get(&self, url: &str) -> Result<RawResponse, String> {
        (**self).get(url).await
    }

    async fn head(&self, url: &str) -> Result<u16, String> {
        (**self).head(url).await
    }
}

/// `reqwest` transport resolving relative paths against a base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Option<reqwest::Url>,
}

impl HttpTransport {
    pub fn new(base: Option<&str>) -> Self {
        let base = base.and_then(|b| match reqwest::Url::parse(b) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("fetch: ignoring invalid base url {b}: {e}");
                None
            }
        });
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    fn resolve(&self, url: &str) -> Result<reqwest::Url, String> {
        match &self.base {
            Some(base) => base.join(url).map_err(|e| e.to_string()),
            None => reqwest::Url::parse(url).map_err(|e| e.to_string()),
        }
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, String> {
        let url = self.resolve(url)?;
        let res = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = res.status().as_u16();
        let body = res.text().await.map_err(|e| e.to_string())?;
        Ok(RawResponse { status, body })
    }

    async fn head(&self, url: &str) -> Result<u16, String> {
        let url = self.resolve(url)?;
        let res = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Ok(res.status().as_u16())
    }
}

/// The paths tried for `path`: itself, then its basename. Never more than two.
pub fn candidate_paths(path: &str) -> Vec<String> {
    let basename = path.rsplit('/').next().unwrap_or(path);
    let mut candidates = vec![path.to_string()];
    if !basename.is_empty() && basename != path {
        candidates.push(basename.to_string());
    }
    candidates
}

/// Fetches JSON documents, retrying once with the path's basename so the
/// site still works when served from a different base directory.
#[derive(Debug, Clone)]
pub struct ResilientFetcher<T> {
    transport: T,
}

impl<T: Transport> ResilientFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Body of the first candidate answering with a 2xx status.
    pub async fn fetch_text(&self, path: &str) -> Result<String, FetchFailure> {
        let mut last = LastAttempt::Network("no candidate path".to_string());
        for candidate in candidate_paths(path) {
            match self.transport.get(&candidate).await {
                Ok(res) if res.is_success() => {
                    debug!("fetch: {candidate} -> {}", res.status);
                    return Ok(res.body);
                }
                Ok(res) => {
                    debug!("fetch: {candidate} -> {}", res.status);
                    last = LastAttempt::Status(res.status);
                }
                Err(e) => {
                    debug!("fetch: {candidate} failed: {e}");
                    last = LastAttempt::Network(e);
                }
            }
        }
        Err(FetchFailure {
            path: path.to_string(),
            last,
        })
    }

    pub async fn fetch_json<D: DeserializeOwned>(&self, path: &str) -> Result<D, ContentError> {
        let body = self.fetch_text(path).await?;
        serde_json::from_str(&body).map_err(|e| ContentError::malformed(path, e))
    }

    /// Whether `path` exists, by `HEAD` request.
    pub async fn probe(&self, path: &str) -> bool {
        match self.transport.head(path).await {
            Ok(status) => (200..300).contains(&status),
            Err(e) => {
                debug!("fetch.probe: {path} failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeTransport;
    use crate::CardDocument;
    use crate::model::ContactLink;

    #[test]
    fn candidates_are_path_then_basename() {
        assert_eq!(
            candidate_paths("json/areas/contact.json"),
            vec!["json/areas/contact.json", "contact.json"]
        );
        assert_eq!(candidate_paths("contact.json"), vec!["contact.json"]);
    }

    #[tokio::test]
    async fn primary_path_is_used_when_it_answers() {
        let transport = FakeTransport::new().with_json("json/contact.json", r#"{"cards":[]}"#);
        let fetcher = ResilientFetcher::new(transport.clone());
        let doc: CardDocument<ContactLink> = fetcher.fetch_json("json/contact.json").await.unwrap();
        assert!(doc.cards.is_empty());
        assert_eq!(transport.requests(), vec!["json/contact.json"]);
    }

    #[tokio::test]
    async fn falls_back_to_basename_after_a_404() {
        let transport = FakeTransport::new()
            .with_status("json/contact.json", 404)
            .with_json("contact.json", r#"{"cards":[{"name":"Mail","url":"mailto:a@b.c"}]}"#);
        let fetcher = ResilientFetcher::new(transport.clone());
        let doc: CardDocument<ContactLink> = fetcher.fetch_json("json/contact.json").await.unwrap();
        assert_eq!(doc.cards[0].name, "Mail");
        assert_eq!(transport.requests(), vec!["json/contact.json", "contact.json"]);
    }

    #[tokio::test]
    async fn reports_the_last_failure_after_two_attempts() {
        let transport = FakeTransport::new()
            .with_network_error("json/contact.json")
            .with_status("contact.json", 503);
        let fetcher = ResilientFetcher::new(transport.clone());
        let err = fetcher.fetch_text("json/contact.json").await.unwrap_err();
        assert_eq!(err.path, "json/contact.json");
        assert_eq!(err.last, LastAttempt::Status(503));
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn unknown_paths_fail_with_a_status() {
        let fetcher = ResilientFetcher::new(FakeTransport::new());
        let err = fetcher.fetch_text("missing.json").await.unwrap_err();
        assert_eq!(err.last, LastAttempt::Status(404));
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let transport = FakeTransport::new().with_json("contact.json", "{ not json");
        let fetcher = ResilientFetcher::new(transport);
        let err = fetcher
            .fetch_json::<CardDocument<ContactLink>>("contact.json")
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Malformed { .. }));
    }

    #[tokio::test]
    async fn probe_reports_existence() {
        let transport = FakeTransport::new().with_json("cv.pdf", "%PDF");
        let fetcher = ResilientFetcher::new(transport);
        assert!(fetcher.probe("cv.pdf").await);
        assert!(!fetcher.probe("other.pdf").await);
    }
}
