//! Listing discovery: turning storefront search pages into stubs.

use crate::error::DiscoveryError;
use async_trait::async_trait;
use presskit_core::{DiscoveryConfig, ListingStub};
use presskit_extract::parse_listing_rows;
use presskit_fetch::{parse_http_url, PageFetcher};
use std::sync::Arc;
use tracing::{debug, info};

/// Paginated source of listing stubs.
///
/// An empty page means the end of results.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_page(&self, offset: u32) -> Result<Vec<ListingStub>, DiscoveryError>;
}

/// Storefront search results filtered to upcoming releases.
pub struct StorefrontSearch {
    fetcher: Arc<dyn PageFetcher>,
    config: DiscoveryConfig,
}

impl StorefrontSearch {
    /// Create a search source that fetches through `fetcher`.
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: DiscoveryConfig) -> Self {
        Self { fetcher, config }
    }

    /// URL of the results page starting at `offset`.
    pub fn page_url(&self, offset: u32) -> Result<String, DiscoveryError> {
        let mut url = parse_http_url(&self.config.base_url)?;
        {
            let mut query = url.query_pairs_mut();
            if self.config.coming_soon {
                query.append_pair("filter", "comingsoon");
            }
            if !self.config.category.is_empty() {
                query.append_pair("category1", &self.config.category);
            }
            if !self.config.platform.is_empty() {
                query.append_pair("os", &self.config.platform);
            }
            if !self.config.language.is_empty() {
                query.append_pair("supportedlang", &self.config.language);
            }
            query
                .append_pair("start", &offset.to_string())
                .append_pair("count", &self.config.page_size.to_string());
        }
        Ok(url.into())
    }
}

#[async_trait]
impl ListingSource for StorefrontSearch {
    async fn fetch_page(&self, offset: u32) -> Result<Vec<ListingStub>, DiscoveryError> {
        let url = self.page_url(offset)?;
        debug!(offset, url = %url, "fetching listing page");

        let page = self.fetcher.fetch(&url).await?;
        let stubs = parse_listing_rows(&page.body, &page.url)?;

        info!(offset, count = stubs.len(), "discovered listings");
        Ok(stubs)
    }
}
