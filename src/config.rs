//! Handler configuration.
//!
//! `GridConfig` holds the process-wide settings the handler reads once at
//! initialization: which browser the grid should provision, where the grid
//! lives, and the session-wide implicit wait. The struct is immutable after
//! construction and passed explicitly to the handler constructor; there is no
//! ambient global to mutate at runtime.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::DownloadError;
use crate::session::BrowserKind;

/// Default grid endpoint, the standard local Selenium hub address.
pub const DEFAULT_GRID_URL: &str = "http://127.0.0.1:4444";

const ENV_BROWSER: &str = "SPIDER_WEBDRIVER_BROWSER";
const ENV_GRID_URL: &str = "SPIDER_WEBDRIVER_URL";
const ENV_IMPLICIT_WAIT: &str = "SPIDER_WEBDRIVER_IMPLICIT_WAIT_SECS";

/// Process-wide WebDriver handler settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Browser the grid provisions unless a request overrides it.
    pub browser: BrowserKind,
    /// WebDriver grid endpoint.
    pub grid_url: String,
    /// Session-wide element-lookup timeout, in whole seconds.
    pub implicit_wait_secs: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            browser: BrowserKind::Chrome,
            grid_url: DEFAULT_GRID_URL.to_string(),
            implicit_wait_secs: 0,
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default browser kind.
    pub fn with_browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    /// Sets the grid endpoint URL.
    pub fn with_grid_url(mut self, grid_url: impl Into<String>) -> Self {
        self.grid_url = grid_url.into();
        self
    }

    /// Sets the implicit wait, in whole seconds.
    pub fn with_implicit_wait_secs(mut self, secs: u64) -> Self {
        self.implicit_wait_secs = secs;
        self
    }

    /// The implicit wait as a duration.
    pub fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.implicit_wait_secs)
    }

    /// Reads settings from the environment, falling back to defaults for
    /// unset variables:
    ///
    /// - `SPIDER_WEBDRIVER_BROWSER` — browser name (`chrome`, `firefox`, `edge`)
    /// - `SPIDER_WEBDRIVER_URL` — grid endpoint URL
    /// - `SPIDER_WEBDRIVER_IMPLICIT_WAIT_SECS` — implicit wait in whole seconds
    pub fn from_env() -> Result<Self, DownloadError> {
        let mut cfg = Self::default();
        if let Ok(name) = std::env::var(ENV_BROWSER) {
            cfg.browser = BrowserKind::from_str(&name)?;
        }
        if let Ok(grid_url) = std::env::var(ENV_GRID_URL) {
            cfg.grid_url = grid_url;
        }
        if let Ok(secs) = std::env::var(ENV_IMPLICIT_WAIT) {
            cfg.implicit_wait_secs = secs.parse().map_err(|_| {
                DownloadError::Configuration(format!(
                    "{ENV_IMPLICIT_WAIT} must be a whole number of seconds, got {secs:?}"
                ))
            })?;
        }
        cfg.validate()?;
        debug!(browser = %cfg.browser, grid = %cfg.grid_url, "loaded grid config from environment");
        Ok(cfg)
    }

    /// Checks that the grid endpoint is a valid URL.
    pub fn validate(&self) -> Result<(), DownloadError> {
        Url::parse(&self.grid_url)?;
        Ok(())
    }
}
