//! Test doubles for driving the crawler without a network.
//!
//! [`MockFetcher`] serves registered bodies by exact URL, answers 404 for
//! everything else and records every request so tests can assert how much
//! network work a run did. Transport failures such as timeouts are injected
//! per URL with [`MockFetcher::on_error`].

use async_trait::async_trait;
use presskit_fetch::{FetchError, PageFetcher, RawPage};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

type ErrorFactory = Box<dyn Fn(&str) -> FetchError + Send + Sync>;

/// HashMap-based page fetcher. Builder pattern: `.on_page()`, `.on_error()`, `.on_panic()`.
#[derive(Default)]
pub struct MockFetcher {
    pages: Mutex<HashMap<String, String>>,
    errors: HashMap<String, ErrorFactory>,
    panics: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    /// An empty fetcher; every URL answers 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    #[must_use]
    pub fn on_page(self, url: &str, body: impl Into<String>) -> Self {
        self.set_page(url, body);
        self
    }

    /// Fail every request for `url` with the error `make` builds from the URL.
    ///
    /// ```
    /// # use presskit_crawler::testing::MockFetcher;
    /// # use presskit_fetch::FetchError;
    /// # use std::time::Duration;
    /// let fetcher = MockFetcher::new().on_error("https://slow.dev/", |url| FetchError::Timeout {
    ///     url: url.to_string(),
    ///     timeout: Duration::from_secs(15),
    /// });
    /// # drop(fetcher);
    /// ```
    #[must_use]
    pub fn on_error(
        mut self,
        url: &str,
        make: impl Fn(&str) -> FetchError + Send + Sync + 'static,
    ) -> Self {
        self.errors.insert(url.to_string(), Box::new(make));
        self
    }

    /// Fail `url` with a timeout.
    #[must_use]
    pub fn on_timeout(self, url: &str, timeout: Duration) -> Self {
        self.on_error(url, move |url| FetchError::Timeout {
            url: url.to_string(),
            timeout,
        })
    }

    /// Panic when `url` is requested.
    #[must_use]
    pub fn on_panic(mut self, url: &str) -> Self {
        self.panics.insert(url.to_string());
        self
    }

    /// Replace or add a page after construction.
    pub fn set_page(&self, url: &str, body: impl Into<String>) {
        self.pages
            .lock()
            .expect("mock pages lock")
            .insert(url.to_string(), body.into());
    }

    /// Stop serving `url`.
    pub fn remove_page(&self, url: &str) {
        self.pages.lock().expect("mock pages lock").remove(url);
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("mock requests lock").clone()
    }

    /// Number of requests so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("mock requests lock").len()
    }

    /// Forget recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().expect("mock requests lock").clear();
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> presskit_fetch::Result<RawPage> {
        self.requests
            .lock()
            .expect("mock requests lock")
            .push(url.to_string());

        assert!(!self.panics.contains(url), "MockFetcher: forced panic for {url}");

        if let Some(make) = self.errors.get(url) {
            return Err(make(url));
        }

        let body = self.pages.lock().expect("mock pages lock").get(url).cloned();
        match body {
            Some(body) => Ok(RawPage {
                url: url.to_string(),
                status: 200,
                body,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
