//! # Downloader Module
//!
//! The download seam between the crawler and its transports.
//!
//! ## Overview
//!
//! A crawler's downloader turns a [`Request`] into a [`Response`]. Two
//! implementations live here:
//!
//! - [`HttpDownloader`]: the default transport, a thin layer over
//!   `reqwest::Client`.
//! - [`WebDriverDownloader`]: the routing adapter. It wraps a default
//!   transport and, per request, either delegates to it verbatim or renders
//!   the page through a remote WebDriver grid session.
//!
//! Custom transports implement [`Downloader`] and can be wrapped the same
//! way; the adapter is generic over its inner downloader.

mod http;
mod webdriver;

pub use http::HttpDownloader;
pub use webdriver::WebDriverDownloader;

use async_trait::async_trait;

use crate::error::DownloadError;
use crate::request::Request;
use crate::response::Response;

/// Turns requests into responses.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// The underlying client, exposed so middlewares can share connection
    /// pools and cookies with the transport.
    type Client: Clone + Send + Sync;

    /// Returns the underlying client.
    fn client(&self) -> &Self::Client;

    /// Downloads a single request. Failures are surfaced as-is; retry policy
    /// belongs to the caller.
    async fn download(&self, request: Request) -> Result<Response, DownloadError>;
}
