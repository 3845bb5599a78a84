// Loading / error / success bookkeeping for the two storefront screens
use storefront_api::{Category, Product, ProductListing};
use tracing::{info, warn};

use crate::source::{CategorySource, ListingSource};

/// Tri-state every screen renders from
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Failed(String),
    Loaded(T),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Category tree for the menu screen
pub struct NavigationStore<S> {
    source: S,
    state: LoadState<Vec<Category>>,
}

impl<S: CategorySource> NavigationStore<S> {
    /// Starts out `Loading`; call [`load`](Self::load) to actually fetch
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: LoadState::Loading,
        }
    }

    pub async fn load(&mut self) -> &LoadState<Vec<Category>> {
        self.state = LoadState::Loading;

        self.state = match self.source.load_categories().await {
            Ok(categories) => {
                info!("Menu loaded with {} root categories", categories.len());
                LoadState::Loaded(categories)
            }
            Err(e) => {
                warn!("Menu failed to load: {}", e);
                LoadState::Failed(e.to_string())
            }
        };

        &self.state
    }

    /// Manual retry after a failure; same as a fresh load
    pub async fn reload(&mut self) -> &LoadState<Vec<Category>> {
        self.load().await
    }

    pub fn state(&self) -> &LoadState<Vec<Category>> {
        &self.state
    }

    /// Loaded categories, or nothing while loading or after a failure
    pub fn categories(&self) -> &[Category] {
        self.state.value().map(Vec::as_slice).unwrap_or_default()
    }
}

/// Product listing for one category
pub struct ListingStore<S> {
    source: S,
    category_id: Option<String>,
    state: LoadState<ProductListing>,
}

impl<S: ListingSource> ListingStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            category_id: None,
            state: LoadState::Loading,
        }
    }

    /// Fetch page 1 for `category_id`, replacing whatever was shown before
    pub async fn load(&mut self, category_id: &str) -> &LoadState<ProductListing> {
        self.category_id = Some(category_id.to_string());
        self.state = LoadState::Loading;

        self.state = match self.source.load_listing(category_id).await {
            Ok(listing) => {
                info!(
                    "Listing for {} loaded with {} elements",
                    category_id,
                    listing.elements().len()
                );
                LoadState::Loaded(listing)
            }
            Err(e) => {
                warn!("Listing for {} failed to load: {}", category_id, e);
                LoadState::Failed(e.to_string())
            }
        };

        &self.state
    }

    /// Re-fetch the last requested category. Nothing to do before the first load.
    pub async fn reload(&mut self) -> &LoadState<ProductListing> {
        if let Some(category_id) = self.category_id.clone() {
            return self.load(&category_id).await;
        }
        &self.state
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category_id.as_deref()
    }

    pub fn state(&self) -> &LoadState<ProductListing> {
        &self.state
    }

    pub fn products(&self) -> Vec<Product> {
        self.state
            .value()
            .map(ProductListing::products)
            .unwrap_or_default()
    }

    /// Number of elements on the loaded page
    pub fn result_count(&self) -> usize {
        self.state
            .value()
            .map(|listing| listing.elements().len())
            .unwrap_or(0)
    }
}
