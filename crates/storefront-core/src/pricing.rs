// Turning listing prices into what a product tile shows
use serde::Serialize;
use storefront_api::{CalculatedPrice, Product};

/// Format an amount with two decimals behind the currency symbol
pub fn format_price(amount: f64, currency_symbol: &str) -> String {
    format!("{}{:.2}", currency_symbol, amount)
}

/// One row of a quantity price table ("Staffelpreise")
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTier {
    /// Minimum quantity; 1 when the backend didn't say
    pub from: u32,
    pub unit_price: String,
    pub list_price: Option<String>,
}

/// Everything a product tile in the listing needs, already formatted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub cover_url: Option<String>,
    pub is_new: bool,
    /// Single price, absent when the product is tier-priced or has no price
    pub price: Option<String>,
    /// Struck-through list price, only when it is above the unit price
    pub list_price: Option<String>,
    /// e.g. `-20%`; never shown together with tiers
    pub discount_label: Option<String>,
    pub tiers: Vec<PriceTier>,
}

impl ProductCard {
    pub fn from_product(product: &Product, currency_symbol: &str) -> Self {
        let has_tiers = product.calculated_prices.len() > 1;

        let mut card = Self {
            id: product.id.clone(),
            name: product.display_name().to_string(),
            cover_url: product.cover_url().map(str::to_string),
            is_new: product.is_new(),
            price: None,
            list_price: None,
            discount_label: None,
            tiers: Vec::new(),
        };

        if has_tiers {
            card.tiers = product
                .calculated_prices
                .iter()
                .map(|price| tier(price, currency_symbol))
                .collect();
            return card;
        }

        let single = product
            .calculated_prices
            .first()
            .or(product.calculated_price.as_ref());

        if let Some(price) = single {
            card.price = Some(format_price(price.unit_price, currency_symbol));
            card.list_price = price
                .list_price
                .as_ref()
                .filter(|list| list.price > price.unit_price)
                .map(|list| format_price(list.price, currency_symbol));
            card.discount_label = price
                .list_price
                .as_ref()
                .and_then(|list| list.percentage)
                .filter(|percentage| *percentage != 0.0)
                .map(|percentage| format!("-{}%", percentage));
        }

        card
    }

    pub fn has_tiers(&self) -> bool {
        !self.tiers.is_empty()
    }
}

fn tier(price: &CalculatedPrice, currency_symbol: &str) -> PriceTier {
    PriceTier {
        from: price.quantity_range().and_then(|r| r.from).unwrap_or(1),
        unit_price: format_price(price.unit_price, currency_symbol),
        list_price: price
            .list_price
            .as_ref()
            .map(|list| format_price(list.price, currency_symbol)),
    }
}
