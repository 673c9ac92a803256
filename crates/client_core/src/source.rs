//! Paginated catalog data source.

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{ArtworkPageResponse, PageQuery};
use tracing::debug;
use url::Url;

use crate::error::BrowseError;

/// Anything that can serve one page of the catalog by 1-based page number.
#[async_trait]
pub trait ArtworkSource: Send + Sync {
    async fn fetch_page(&self, page_number: usize) -> Result<ArtworkPageResponse, BrowseError>;
}

/// `GET <endpoint>?page=<n>` against the public catalog API.
#[derive(Debug, Clone)]
pub struct HttpArtworkSource {
    http: Client,
    endpoint: Url,
}

impl HttpArtworkSource {
    pub fn new(endpoint: &str) -> Result<Self, BrowseError> {
        Ok(Self::with_client(Client::new(), Url::parse(endpoint)?))
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ArtworkSource for HttpArtworkSource {
    async fn fetch_page(&self, page_number: usize) -> Result<ArtworkPageResponse, BrowseError> {
        debug!(endpoint = %self.endpoint, page_number, "fetching catalog page");
        let page: ArtworkPageResponse = self
            .http
            .get(self.endpoint.clone())
            .query(&PageQuery { page: page_number })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(page_number, rows = page.data.len(), "catalog page decoded");
        Ok(page)
    }
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
