//! In-memory network used by the tests of this crate and its dependents.

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use crate::fetch::{RawResponse, Transport};
use crate::preferences::CookieStore;

#[derive(Debug, Clone)]
enum Canned {
    Response(RawResponse),
    NetworkError,
}

/// Answers requests from a fixed table; unknown paths get a 404.
///
/// Every request yields to the executor once before answering so that
/// concurrent loads interleave the way real fetches do.
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    routes: Rc<RefCell<HashMap<String, Canned>>>,
    log: Rc<RefCell<Vec<String>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, path: &str, body: &str) -> Self {
        self.routes
            .borrow_mut()
            .insert(path.to_string(), Canned::Response(RawResponse::ok(body)));
        self
    }

    pub fn with_status(self, path: &str, status: u16) -> Self {
        self.routes.borrow_mut().insert(
            path.to_string(),
            Canned::Response(RawResponse {
                status,
                body: String::new(),
            }),
        );
        self
    }

    pub fn with_network_error(self, path: &str) -> Self {
        self.routes
            .borrow_mut()
            .insert(path.to_string(), Canned::NetworkError);
        self
    }

    /// Paths requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn answer(&self, url: &str) -> Result<RawResponse, String> {
        self.log.borrow_mut().push(url.to_string());
        match self.routes.borrow().get(url) {
            Some(Canned::Response(res)) => Ok(res.clone()),
            Some(Canned::NetworkError) => Err(format!("connection refused: {url}")),
            None => Ok(RawResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, String> {
        YieldOnce::default().await;
        self.answer(url)
    }

    async fn head(&self, url: &str) -> Result<u16, String> {
        YieldOnce::default().await;
        self.answer(url).map(|res| res.status)
    }
}

#[derive(Default)]
struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Cookie jar kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookies {
    jar: Rc<RefCell<HashMap<String, String>>>,
}

impl CookieStore for MemoryCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.borrow().get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) {
        self.jar
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }
}
