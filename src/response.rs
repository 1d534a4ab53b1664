//! Responses produced by the downloader seam.
//!
//! For pass-through requests the response mirrors what the HTTP transport
//! returned. For grid-routed requests the body is the rendered document, the
//! URL is the browser's final (possibly redirected) URL, and the meta carries
//! the live [`Session`] so user code can keep driving the browser.

use std::borrow::Cow;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use url::Url;

use crate::session::Session;

/// Per-response extension flags produced by the WebDriver download handler.
///
/// `session` is present if and only if the originating request carried the
/// webdriver flag.
#[derive(Debug, Clone, Default)]
pub struct ResponseMeta {
    /// Live browser session for grid-routed responses. The handler never
    /// closes it; see [`Session::quit`].
    pub session: Option<Session>,
}

/// A downloaded response.
#[derive(Debug, Clone)]
pub struct Response {
    /// Final URL after any redirects.
    pub url: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub meta: ResponseMeta,
}

impl Response {
    pub fn new(url: Url, status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            url,
            status,
            headers,
            body,
            meta: ResponseMeta::default(),
        }
    }

    /// The body as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Whether this response was rendered by a browser session.
    pub fn is_rendered(&self) -> bool {
        self.meta.session.is_some()
    }

    /// The live browser session, for grid-routed responses.
    pub fn session(&self) -> Option<&Session> {
        self.meta.session.as_ref()
    }
}
