//! Built-in catalog served when the durable store is unavailable.

use once_cell::sync::Lazy;

use super::product::Product;
use crate::domain::foundation::{Price, ProductId, Timestamp};

const DEMO_ITEMS: [(&str, &str, f64); 4] = [
    ("d1", "Gold Necklace", 1999.0),
    ("d2", "Diamond Ring", 2999.0),
    ("d3", "Silver Bracelet", 799.0),
    ("d4", "Pearl Earrings", 1299.0),
];

static DEMO_CATALOG: Lazy<Vec<Product>> = Lazy::new(|| {
    let now = Timestamp::now();
    DEMO_ITEMS
        .iter()
        .filter_map(|(id, name, price)| {
            Some(Product::reconstitute(
                ProductId::new(*id).ok()?,
                (*name).to_string(),
                Price::try_new(*price).ok()?,
                placeholder_image(name),
                now,
                now,
            ))
        })
        .collect()
});

/// The static catalog.
pub fn demo_catalog() -> &'static [Product] {
    &DEMO_CATALOG
}

fn placeholder_image(name: &str) -> String {
    format!(
        "https://via.placeholder.com/600x400?text={}",
        name.replace(' ', "+")
    )
}
