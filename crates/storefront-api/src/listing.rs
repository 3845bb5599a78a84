use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::client::StoreApiClient;
use crate::error::Result;

const LISTING_PATH: &str = "product-listing";
const SEO_URLS_HEADER: &str = "sw-include-seo-urls";

/// Paginated listing envelope, kept exactly as the backend sent it
///
/// The shape belongs to the backend contract. The accessors below only read
/// from it; nothing is validated or rewritten on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductListing(Value);

impl ProductListing {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    pub fn into_raw(self) -> Value {
        self.0
    }

    /// The `elements` array, or nothing if the envelope doesn't have one
    pub fn elements(&self) -> &[Value] {
        self.0
            .get("elements")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total hit count reported by the backend
    pub fn total(&self) -> Option<u64> {
        self.0.get("total").and_then(Value::as_u64)
    }

    /// Typed view of the elements. Elements that don't look like a product are
    /// skipped rather than failing the whole page.
    pub fn products(&self) -> Vec<Product> {
        self.elements()
            .iter()
            .filter_map(|element| match Product::deserialize(element) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!("Skipping listing element that is not a product: {}", e);
                    None
                }
            })
            .collect()
    }
}

/// Product record from a listing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub translated: Option<Value>,
    pub cover: Option<ProductCover>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub calculated_prices: Vec<CalculatedPrice>,
    pub calculated_price: Option<CalculatedPrice>,
    pub is_new: Option<bool>,
}

impl Product {
    pub fn translated_name(&self) -> Option<&str> {
        self.translated
            .as_ref()
            .and_then(|t| t.get("name"))
            .and_then(Value::as_str)
    }

    /// Translated name, falling back to the base name
    pub fn display_name(&self) -> &str {
        self.translated_name()
            .filter(|name| !name.is_empty())
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    pub fn cover_url(&self) -> Option<&str> {
        self.cover.as_ref()?.media.as_ref()?.url.as_deref()
    }

    pub fn is_new(&self) -> bool {
        self.is_new.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCover {
    pub media: Option<Media>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub url: Option<String>,
}

/// One backend-computed price; several of them mean quantity tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedPrice {
    pub unit_price: f64,
    pub list_price: Option<ListPrice>,
    pub extensions: Option<PriceExtensions>,
}

impl CalculatedPrice {
    /// Quantity range for tiered prices, when the block price plugin sent one
    pub fn quantity_range(&self) -> Option<&QuantityRange> {
        self.extensions.as_ref()?.maxia_listing_block_prices.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPrice {
    pub price: f64,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceExtensions {
    pub maxia_listing_block_prices: Option<QuantityRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityRange {
    pub from: Option<u32>,
    pub to: Option<u32>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a listing response body without touching its shape
pub fn parse_listing(body: &str) -> Result<ProductListing> {
    Ok(ProductListing(serde_json::from_str(body)?))
}

/// Fixed request body: first page, product fields the listing screen renders
pub fn listing_request_body() -> Value {
    json!({
        "page": 1,
        "includes": {
            "product": [
                "id",
                "name",
                "description",
                "cover",
                "calculatedPrices",
                "calculatedPrice",
                "price",
                "translated",
                "isNew"
            ],
            "media": ["url"]
        }
    })
}

impl StoreApiClient {
    /// Fetch page 1 of a category's product listing
    pub async fn fetch_product_listing(&self, category_id: &str) -> Result<ProductListing> {
        let path = format!("{}/{}", LISTING_PATH, urlencoding::encode(category_id));

        let mut headers = HeaderMap::new();
        headers.insert(SEO_URLS_HEADER, HeaderValue::from_static("true"));

        let result = async {
            let body = self.post_json(&path, &listing_request_body(), headers).await?;
            parse_listing(&body)
        }
        .await;

        match &result {
            Ok(listing) => debug!(
                "Loaded {} products for category {}",
                listing.elements().len(),
                category_id
            ),
            Err(e) => error!("Product listing fetch error: {}", e),
        }

        result
    }
}
