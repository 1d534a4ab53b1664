//! Error types for the downloader seam.
//!
//! The handler performs no recovery and no translation: failures from the
//! plain HTTP transport and from the remote grid are carried through
//! unchanged as error sources, so callers can match on the underlying
//! library's own failure.

use thiserror::Error;

/// Errors surfaced by a [`Downloader`](crate::Downloader) implementation.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Failure raised by the default HTTP transport.
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure raised by the WebDriver grid or a live session
    /// (connection refused, navigation timeout, unknown capability, ...).
    #[error("webdriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    /// A URL could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid handler configuration detected at initialization.
    #[error("configuration error: {0}")]
    Configuration(String),
}
