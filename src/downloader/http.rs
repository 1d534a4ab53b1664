//! Default HTTP transport built on `reqwest`.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::trace;

use super::Downloader;
use crate::error::DownloadError;
use crate::request::Request;
use crate::response::Response;

/// Plain HTTP downloader, the pass-through target of the WebDriver handler.
///
/// Redirects, connection pooling, and TLS are whatever the wrapped
/// `reqwest::Client` is configured with.
#[derive(Debug, Clone, Default)]
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    type Client = reqwest::Client;

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    async fn download(&self, request: Request) -> Result<Response, DownloadError> {
        trace!(url = %request.url, method = %request.method, "downloading over http");
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());
        if let Some(fields) = &request.form_data {
            builder = builder.form(fields);
        }

        let resp = builder.send().await?;
        let url = resp.url().clone();
        let status = resp.status();
        let headers = resp.headers().clone();
        let body: Bytes = resp.bytes().await?;

        Ok(Response::new(url, status, headers, body))
    }
}
