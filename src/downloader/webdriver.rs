//! The WebDriver routing adapter.
//!
//! ## Overview
//!
//! `WebDriverDownloader` sits between the crawler and its default transport.
//! Each request is inspected once:
//!
//! - flag unset → the request is handed to the wrapped transport unchanged
//!   and its response returned verbatim; the grid is never contacted.
//! - flag set → a fresh session is opened against the configured grid, the
//!   browser navigates to the URL (or submits the request's form data), and
//!   the rendered document plus final URL come back as the response, with
//!   the live session in the response meta for further interaction.
//!
//! ## Resource model
//!
//! Every qualifying request gets its own isolated session; there is no
//! pooling and no reuse. The handler never closes a session it opened —
//! release is the caller's job via [`Session::quit`]. Failures from the grid
//! or the inner transport propagate unchanged; retries belong to the host
//! framework's scheduler.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use tracing::{debug, error, trace};

use super::{Downloader, HttpDownloader};
use crate::config::GridConfig;
use crate::error::DownloadError;
use crate::request::Request;
use crate::response::Response;
use crate::session::{BrowserKind, Session};
use crate::stats::HandlerStats;

/// Download handler that routes flagged requests through a WebDriver grid
/// and delegates everything else to the wrapped transport.
#[derive(Debug)]
pub struct WebDriverDownloader<D = HttpDownloader> {
    inner: D,
    config: GridConfig,
    stats: Arc<HandlerStats>,
}

impl WebDriverDownloader<HttpDownloader> {
    /// Creates a handler over the default HTTP transport.
    pub fn new(config: GridConfig) -> Self {
        Self::with_inner(HttpDownloader::new(), config)
    }
}

impl<D: Downloader> WebDriverDownloader<D> {
    /// Wraps an existing transport. The configuration is read here once and
    /// never re-read.
    pub fn with_inner(inner: D, config: GridConfig) -> Self {
        Self {
            inner,
            config,
            stats: Arc::new(HandlerStats::new()),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Routing counters, shareable with the host's reporting.
    pub fn stats(&self) -> Arc<HandlerStats> {
        Arc::clone(&self.stats)
    }

    fn effective_browser(&self, request: &Request) -> BrowserKind {
        request.meta.browser.unwrap_or(self.config.browser)
    }

    fn effective_implicit_wait(&self, request: &Request) -> std::time::Duration {
        request
            .meta
            .implicit_wait
            .unwrap_or_else(|| self.config.implicit_wait())
    }

    async fn download_via_grid(&self, request: Request) -> Result<Response, DownloadError> {
        let browser = self.effective_browser(&request);
        let implicit_wait = self.effective_implicit_wait(&request);
        debug!(url = %request.url, %browser, "routing request through webdriver grid");

        let session = Session::open(&self.config.grid_url, browser, implicit_wait).await?;
        self.stats.record_session_opened();

        match grid_plan(&request) {
            GridPlan::Submit(fields) => session.submit_form(&request.url, fields).await?,
            GridPlan::Navigate => session.goto(&request.url).await?,
        }

        let body = session.page_source().await?;
        let url = session.current_url().await?;
        trace!(%url, bytes = body.len(), "rendered document read back from session");

        // The WebDriver protocol does not expose the navigation's HTTP
        // status; rendered responses report 200.
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        let mut response = Response::new(url, StatusCode::OK, headers, Bytes::from(body));
        response.meta.session = Some(session);
        Ok(response)
    }
}

/// How a grid-routed request reaches its URL.
#[derive(Debug, PartialEq, Eq)]
enum GridPlan<'a> {
    /// Plain navigation.
    Navigate,
    /// Submission of the request's form fields through an injected form.
    Submit(&'a [(String, String)]),
}

/// Form data always wins over the method: a request that carries fields is
/// submitted, whatever its method says; the browser owns the wire request
/// either way.
fn grid_plan(request: &Request) -> GridPlan<'_> {
    match &request.form_data {
        Some(fields) => GridPlan::Submit(fields),
        None => GridPlan::Navigate,
    }
}

#[async_trait]
impl<D: Downloader> Downloader for WebDriverDownloader<D> {
    type Client = D::Client;

    fn client(&self) -> &D::Client {
        self.inner.client()
    }

    async fn download(&self, request: Request) -> Result<Response, DownloadError> {
        if !request.meta.use_webdriver {
            trace!(url = %request.url, "request not flagged for webdriver, delegating");
            self.stats.record_passed_through();
            return self.inner.download(request).await;
        }

        self.stats.record_grid_routed();
        let url = request.url.clone();
        match self.download_via_grid(request).await {
            Ok(response) => Ok(response),
            Err(e) => {
                self.stats.record_failure();
                error!(%url, error = %e, "grid download failed");
                Err(e)
            }
        }
    }
}
