//! A "prelude" for users of the `spider-webdriver` crate.
//!
//! Re-exports the types needed to wire the handler into a crawler.
//!
//! # Example
//!
//! ```
//! use spider_webdriver::prelude::*;
//! ```

pub use crate::{
    // Handler and transports
    Downloader,
    HttpDownloader,
    WebDriverDownloader,
    // Configuration
    BrowserKind,
    GridConfig,
    // Request/response seam
    Request,
    RequestMeta,
    Response,
    Session,
    // Errors
    DownloadError,
    // For implementing custom transports
    async_trait,
};
