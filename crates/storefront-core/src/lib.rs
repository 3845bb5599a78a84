// Storefront logic that sits between the store API and whatever renders it
pub mod config;
pub mod error;
pub mod menu;
pub mod pricing;
pub mod source;
pub mod state;

pub use config::Config;
pub use error::Error;
pub use menu::{MenuAction, MenuNavigator};
pub use pricing::{PriceTier, ProductCard};
pub use source::{CategorySource, ListingSource};
pub use state::{ListingStore, LoadState, NavigationStore};

pub type Result<T> = std::result::Result<T, Error>;
