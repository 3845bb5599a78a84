use async_trait::async_trait;
use storefront_api::{Category, ProductListing, StoreApiClient};

use crate::Result;

/// Where the menu gets its category tree from
///
/// The store API client is the real implementation; tests plug in mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategorySource: Send + Sync {
    async fn load_categories(&self) -> Result<Vec<Category>>;
}

/// Where a product listing page comes from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn load_listing(&self, category_id: &str) -> Result<ProductListing>;
}

#[async_trait]
impl CategorySource for StoreApiClient {
    async fn load_categories(&self) -> Result<Vec<Category>> {
        Ok(self.fetch_navigation().await?)
    }
}

#[async_trait]
impl ListingSource for StoreApiClient {
    async fn load_listing(&self, category_id: &str) -> Result<ProductListing> {
        Ok(self.fetch_product_listing(category_id).await?)
    }
}
