use serde::Serialize;

#[derive(Debug, Clone)]
pub struct RawProduct {
    pub name: &'static str,
    pub brand: &'static str,
    pub price: f64,
    pub description: &'static str,
    pub sub_category: Option<&'static str>,
}

/// Products declared under one category key, in declaration order.
#[derive(Debug, Clone)]
pub struct ProductGroup {
    pub category: &'static str,
    pub products: &'static [RawProduct],
}

/// A product as the storefront consumes it. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmittedProduct {
    pub id: String,
    pub name: &'static str,
    pub description: &'static str,
    pub long_description: String,
    pub price: f64,
    pub image: String,
    pub category: &'static str,
    pub sub_category: &'static str,
    pub brand: &'static str,
    pub rating: f64,
    pub reviews_count: u32,
    pub in_stock: bool,
    pub is_best_seller: bool,
    pub badges: Vec<String>,
}
