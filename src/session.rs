//! Remote browser sessions obtained from a WebDriver grid.
//!
//! A [`Session`] is a single live browser instance provisioned by the grid.
//! It is created per qualifying request by the
//! [`WebDriverDownloader`](crate::downloader::WebDriverDownloader) and handed
//! to user code inside the response meta, where it stays addressable for
//! further navigation and DOM interaction.
//!
//! Teardown is manual: dropping a `Session` (or any clone of it) does not
//! close the remote browser. Callers that are done with a session must call
//! [`Session::quit`], otherwise the browser keeps running on the grid.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thirtyfour::common::capabilities::desiredcapabilities::Capabilities;
use thirtyfour::prelude::*;
use tracing::{debug, trace};
use url::Url;

use crate::error::DownloadError;

/// Browser types the grid can provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    #[default]
    Chrome,
    Firefox,
    Edge,
}

impl BrowserKind {
    /// The browser name as the grid knows it.
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Edge => "edge",
        }
    }

    fn capabilities(&self) -> Capabilities {
        match self {
            BrowserKind::Chrome => DesiredCapabilities::chrome().into(),
            BrowserKind::Firefox => DesiredCapabilities::firefox().into(),
            BrowserKind::Edge => DesiredCapabilities::edge().into(),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrowserKind {
    type Err = DownloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chrome" => Ok(BrowserKind::Chrome),
            "firefox" => Ok(BrowserKind::Firefox),
            "edge" => Ok(BrowserKind::Edge),
            other => Err(DownloadError::Configuration(format!(
                "unknown browser name: {other}"
            ))),
        }
    }
}

/// Script used to submit form data through the browser. The WebDriver
/// protocol has no POST primitive, so the handler injects a form and submits
/// it; action URL and fields arrive as script arguments and are never
/// interpolated into the script text.
///
/// The outgoing document is tagged before `submit()`. The tag lives on the
/// window object, which the browser replaces along with the document when
/// the navigation commits, so its absence proves the pre-submit page is
/// gone.
const SUBMIT_FORM_SCRIPT: &str = r#"
const [action, fields] = arguments;
window.__spiderFormNavPending = true;
const form = document.createElement('form');
form.method = 'POST';
form.action = action;
for (const [name, value] of fields) {
    const input = document.createElement('input');
    input.type = 'hidden';
    input.name = name;
    input.value = value;
    form.appendChild(input);
}
document.body.appendChild(form);
form.submit();
"#;

/// Poll script for [`Session::submit_form`]: reports `pending` while the
/// tagged pre-submit document is still current, otherwise the new
/// document's ready state.
const SUBMIT_SETTLE_SCRIPT: &str =
    "return window.__spiderFormNavPending === true ? 'pending' : document.readyState;";

/// How long [`Session::submit_form`] polls for the navigation triggered by
/// the injected form to settle before reading the document as-is.
const SUBMIT_SETTLE_LIMIT: Duration = Duration::from_secs(10);
const SUBMIT_SETTLE_POLL: Duration = Duration::from_millis(100);

/// A live browser session on the grid.
///
/// Cloning is cheap and clones address the same remote browser. The session
/// stays open until [`Session::quit`] is called on any handle.
#[derive(Clone)]
pub struct Session {
    driver: WebDriver,
    kind: BrowserKind,
}

impl Session {
    /// Opens a new session against `grid_url` for the given browser kind and
    /// applies `implicit_wait` as the session-wide element-lookup timeout.
    pub async fn open(
        grid_url: &str,
        kind: BrowserKind,
        implicit_wait: Duration,
    ) -> Result<Self, DownloadError> {
        debug!(grid = grid_url, browser = %kind, wait = ?implicit_wait, "opening webdriver session");
        let driver = WebDriver::new(grid_url, kind.capabilities()).await?;
        driver.set_implicit_wait_timeout(implicit_wait).await?;
        Ok(Self { driver, kind })
    }

    /// The browser kind this session was opened with.
    pub fn kind(&self) -> BrowserKind {
        self.kind
    }

    /// The underlying `thirtyfour` driver, for interactions this wrapper
    /// does not cover.
    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    /// Navigates the browser to `url` and blocks until the load completes or
    /// the driver reports failure.
    pub async fn goto(&self, url: &Url) -> Result<(), DownloadError> {
        trace!(%url, "navigating session");
        self.driver.goto(url.as_str()).await?;
        Ok(())
    }

    /// Submits `fields` to `url` through an injected form, then waits for
    /// the resulting navigation to settle.
    pub async fn submit_form(
        &self,
        url: &Url,
        fields: &[(String, String)],
    ) -> Result<(), DownloadError> {
        trace!(%url, fields = fields.len(), "submitting form through session");
        self.driver
            .execute(SUBMIT_FORM_SCRIPT, form_script_args(url, fields))
            .await?;
        self.settle_after_submit().await
    }

    /// The rendered document, serialized from the live DOM.
    pub async fn page_source(&self) -> Result<String, DownloadError> {
        Ok(self.driver.source().await?)
    }

    /// The browser's current URL, reflecting any redirects that happened
    /// during navigation.
    pub async fn current_url(&self) -> Result<Url, DownloadError> {
        Ok(self.driver.current_url().await?)
    }

    /// Finds the first element matching a CSS selector, honoring the
    /// session's implicit wait.
    pub async fn find(&self, css: &str) -> Result<WebElement, DownloadError> {
        Ok(self.driver.find(By::Css(css)).await?)
    }

    /// Executes a script in the page and returns its JSON result.
    pub async fn execute(&self, script: &str) -> Result<serde_json::Value, DownloadError> {
        let ret = self.driver.execute(script, Vec::new()).await?;
        Ok(ret.json().clone())
    }

    /// Closes the remote browser and ends the session. All clones of this
    /// handle become unusable afterwards.
    pub async fn quit(self) -> Result<(), DownloadError> {
        debug!(browser = %self.kind, "quitting webdriver session");
        self.driver.quit().await?;
        Ok(())
    }

    /// The injected form submits asynchronously, so the script returns
    /// before the navigation starts — and the pre-submit document already
    /// reports `complete`. Poll until the tag planted by the submit script
    /// is gone AND the (new) document reports complete; `complete` can then
    /// only come from the replacement document. Mid-navigation script
    /// errors are transient and keep the poll going. Past the deadline,
    /// proceed with whatever the page holds; hard timeout semantics stay
    /// with the driver and the host framework.
    async fn settle_after_submit(&self) -> Result<(), DownloadError> {
        let deadline = tokio::time::Instant::now() + SUBMIT_SETTLE_LIMIT;
        loop {
            match self.execute(SUBMIT_SETTLE_SCRIPT).await {
                Ok(state) if state.as_str() == Some("complete") => return Ok(()),
                Ok(_) => {}
                Err(e) => {
                    trace!(error = %e, "settle poll failed mid-navigation, retrying");
                }
            }
            if tokio::time::Instant::now() >= deadline {
                trace!("document did not settle after submit, proceeding");
                return Ok(());
            }
            tokio::time::sleep(SUBMIT_SETTLE_POLL).await;
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("kind", &self.kind)
            .field("driver", &"WebDriver { .. }")
            .finish()
    }
}

/// Builds the argument list handed to [`SUBMIT_FORM_SCRIPT`].
fn form_script_args(url: &Url, fields: &[(String, String)]) -> Vec<serde_json::Value> {
    let pairs: Vec<serde_json::Value> = fields
        .iter()
        .map(|(name, value)| serde_json::json!([name, value]))
        .collect();
    vec![
        serde_json::Value::String(url.to_string()),
        serde_json::Value::Array(pairs),
    ]
}
