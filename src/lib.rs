//! # spider-webdriver
//!
//! WebDriver grid download handler for spider-style crawlers.
//!
//! Some pages only take shape after client-side scripts run. This crate lets
//! a crawler route exactly those requests through a remote browser-automation
//! grid: a per-request flag decides whether a request goes to the normal HTTP
//! transport or to a browser session that renders the page first. Everything
//! else — scheduling, retries, parsing — stays with the host framework.
//!
//! ## Example
//!
//! ```rust,ignore
//! use spider_webdriver::prelude::*;
//! use url::Url;
//!
//! async fn fetch() -> Result<(), DownloadError> {
//!     let config = GridConfig::default()
//!         .with_grid_url("http://127.0.0.1:4444")
//!         .with_implicit_wait_secs(2);
//!     let handler = WebDriverDownloader::new(config);
//!
//!     // Plain request: served by the wrapped HTTP transport.
//!     let plain = Request::new(Url::parse("https://example.com/static")?);
//!     let response = handler.download(plain).await?;
//!     assert!(response.session().is_none());
//!
//!     // Flagged request: rendered by a browser on the grid.
//!     let rendered = Request::new(Url::parse("https://example.com/app")?)
//!         .with_meta(RequestMeta::webdriver());
//!     let response = handler.download(rendered).await?;
//!     if let Some(session) = response.session() {
//!         // Keep driving the browser, then release it explicitly.
//!         let heading = session.find("h1").await?;
//!         println!("{}", heading.text().await?);
//!         session.clone().quit().await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod downloader;
pub mod error;
pub mod prelude;
pub mod request;
pub mod response;
pub mod session;
pub mod stats;

pub use config::{GridConfig, DEFAULT_GRID_URL};
pub use downloader::{Downloader, HttpDownloader, WebDriverDownloader};
pub use error::DownloadError;
pub use request::{Request, RequestMeta};
pub use response::{Response, ResponseMeta};
pub use session::{BrowserKind, Session};
pub use stats::{HandlerStats, HandlerStatsSnapshot};

// Re-export for trait implementations downstream.
pub use async_trait::async_trait;
