//! Requests flowing into the downloader seam.
//!
//! `Request` carries the URL, method, and optional form fields, plus a typed
//! meta side-channel. The meta replaces the open string-keyed mapping a
//! Scrapy-style framework would use: the fields the handler reads are spelled
//! out, so a flag typo is a compile error instead of a silent pass-through.

use std::time::Duration;

use http::Method;
use url::Url;

use crate::session::BrowserKind;

/// Per-request extension flags consumed by the WebDriver download handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestMeta {
    /// Route this request through the grid instead of the plain HTTP
    /// transport. Defaults to false (pass-through).
    pub use_webdriver: bool,
    /// Per-request browser override; falls back to the handler's configured
    /// default when absent.
    pub browser: Option<BrowserKind>,
    /// Per-request implicit-wait override; falls back to the handler's
    /// configured default when absent.
    pub implicit_wait: Option<Duration>,
}

impl RequestMeta {
    /// Meta with the webdriver flag set and everything else defaulted.
    pub fn webdriver() -> Self {
        Self {
            use_webdriver: true,
            ..Self::default()
        }
    }

    /// Sets the per-request browser override.
    pub fn with_browser(mut self, browser: BrowserKind) -> Self {
        self.browser = Some(browser);
        self
    }

    /// Sets the per-request implicit-wait override.
    pub fn with_implicit_wait(mut self, wait: Duration) -> Self {
        self.implicit_wait = Some(wait);
        self
    }
}

/// A request to be downloaded.
#[derive(Debug, Clone)]
pub struct Request {
    pub url: Url,
    pub method: Method,
    /// Form fields submitted with non-GET requests. Repeated names are
    /// allowed, so this is a pair list rather than a map.
    pub form_data: Option<Vec<(String, String)>>,
    pub meta: RequestMeta,
}

impl Request {
    /// Creates a GET request with default meta.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            method: Method::GET,
            form_data: None,
            meta: RequestMeta::default(),
        }
    }

    /// Sets the HTTP method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Attaches form fields. Switches the method to POST unless a non-GET
    /// method was already set.
    pub fn with_form_data(mut self, fields: Vec<(String, String)>) -> Self {
        if self.method == Method::GET {
            self.method = Method::POST;
        }
        self.form_data = Some(fields);
        self
    }

    /// Replaces the request meta.
    pub fn with_meta(mut self, meta: RequestMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Stable identity used by scheduler-side duplicate detection.
    pub fn fingerprint(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn new_request_defaults_to_get_pass_through() {
        let req = Request::new(url("https://example.com/"));
        assert_eq!(req.method, Method::GET);
        assert!(req.form_data.is_none());
        assert!(!req.meta.use_webdriver);
        assert!(req.meta.browser.is_none());
    }

    #[test]
    fn form_data_switches_method_to_post() {
        let req = Request::new(url("https://example.com/login"))
            .with_form_data(vec![("user".into(), "alice".into())]);
        assert_eq!(req.method, Method::POST);
    }

    #[test]
    fn explicit_method_survives_form_data() {
        let req = Request::new(url("https://example.com/profile"))
            .with_method(Method::PUT)
            .with_form_data(vec![("bio".into(), "hi".into())]);
        assert_eq!(req.method, Method::PUT);
    }

    #[test]
    fn webdriver_meta_sets_only_the_flag() {
        let meta = RequestMeta::webdriver();
        assert!(meta.use_webdriver);
        assert!(meta.browser.is_none());
        assert!(meta.implicit_wait.is_none());
    }

    #[test]
    fn fingerprint_distinguishes_method_and_url() {
        let a = Request::new(url("https://example.com/a"));
        let b = Request::new(url("https://example.com/a")).with_method(Method::POST);
        let c = Request::new(url("https://example.com/c"));
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint(), Request::new(url("https://example.com/a")).fingerprint());
    }
}
