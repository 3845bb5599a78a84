// Store API client: the two storefront loaders and their wire types
pub mod client;
pub mod config;
pub mod error;
pub mod listing;
pub mod navigation;

// Re-export common types
pub use client::StoreApiClient;
pub use config::ApiConfig;
pub use error::{ErrorKind, Result, StoreApiError};
pub use listing::{CalculatedPrice, ListPrice, Product, ProductListing, QuantityRange};
pub use navigation::{normalize, parse_navigation, Category, RawCategory};
